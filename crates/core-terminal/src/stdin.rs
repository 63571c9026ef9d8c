//! Stdin as a `ByteSource` with a fixed read window.
//!
//! Reads go straight to the file descriptor: std's buffered `Stdin` may pull
//! several bytes of an escape sequence into its buffer, after which `poll`
//! reports nothing pending and the decoder would misread the sequence as a
//! lone Escape.

use core_input::ByteSource;
use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

/// Escape sequence detection window.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

pub struct StdinBytes {
    fd: RawFd,
    timeout_ms: libc::c_int,
}

impl Default for StdinBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinBytes {
    pub fn new() -> Self {
        Self::with_timeout(READ_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let timeout_ms = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        Self {
            fd: libc::STDIN_FILENO,
            timeout_ms,
        }
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut pfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };
        // SAFETY: `pfd` is a valid, exclusively borrowed pollfd array of length 1.
        let ready = unsafe { libc::poll(&mut pfd, 1, self.timeout_ms) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            return if is_transient(&err) { Ok(None) } else { Err(err) };
        }
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a valid one-byte buffer.
        let n = unsafe { libc::read(self.fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
            _ => {
                let err = io::Error::last_os_error();
                if is_transient(&err) { Ok(None) } else { Err(err) }
            }
        }
    }
}
