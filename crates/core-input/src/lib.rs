//! Raw keystroke decoding.
//!
//! `KeyDecoder` pulls bytes from a `ByteSource` and folds escape sequences into
//! `KeyToken`s. The source reports a short read timeout as `Ok(None)`; the
//! decoder uses that to tell a lone Escape press from the start of a sequence.
//!
//! Decoding is total: every input yields exactly one token. Sequences the
//! decoder does not recognise (including ones cut short by the timeout) come
//! back as `NamedKey::Esc` and the bytes already consumed are discarded.

mod key_token;

use core_events::{ESC, KeyToken, NamedKey};
use key_token::{is_ss3_introducer, map_csi_digit, map_csi_letter, map_ss3_letter};
use std::collections::VecDeque;
use std::io;
use thiserror::Error;

/// Blocking-with-timeout byte input.
pub trait ByteSource {
    /// Read one byte. `Ok(None)` means the read window elapsed with no input.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read from terminal: {0}")]
    Read(#[from] io::Error),
}

pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Block until a byte arrives, then decode one key.
    pub fn read_key(&mut self) -> Result<KeyToken, InputError> {
        let first = loop {
            if let Some(b) = self.source.read_byte()? {
                break b;
            }
        };
        if first != ESC {
            return Ok(KeyToken::Char(first));
        }
        let key = self.read_escape()?;
        tracing::trace!(target: "input.decode", %key, "escape_sequence");
        Ok(key)
    }

    fn read_escape(&mut self) -> Result<KeyToken, InputError> {
        let escape = KeyToken::Named(NamedKey::Esc);
        let Some(first) = self.source.read_byte()? else {
            return Ok(escape);
        };
        let Some(second) = self.source.read_byte()? else {
            return Ok(escape);
        };

        let named = if first == b'[' {
            if second.is_ascii_digit() {
                match self.source.read_byte()? {
                    Some(b'~') => map_csi_digit(second),
                    _ => None,
                }
            } else {
                map_csi_letter(second)
            }
        } else if is_ss3_introducer(first) {
            map_ss3_letter(second)
        } else {
            None
        };

        if named.is_none() {
            tracing::debug!(
                target: "input.decode",
                first,
                second,
                "unrecognized_escape_sequence"
            );
        }
        Ok(named.map_or(escape, KeyToken::Named))
    }
}

/// Scripted `ByteSource` for tests and replay. `None` entries simulate a read
/// timeout; an exhausted script reports `UnexpectedEof`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedBytes {
    script: VecDeque<Option<u8>>,
}

impl ScriptedBytes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that arrive back to back.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut s = Self::new();
        s.push_bytes(bytes);
        s
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend(bytes.iter().copied().map(Some));
        self
    }

    pub fn push_timeout(&mut self) -> &mut Self {
        self.script.push_back(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.script
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}
