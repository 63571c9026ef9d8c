//! Status line composition.
//!
//! Format: `<name> - <N> lines[ (modified)]` on the left and `<line>/<N>` on
//! the right, padded with spaces to the screen width.
//! * `<name>` is the file name as given (first 20 characters) or `[No Name]`.
//! * The right part is drawn only if it fits exactly after the left part;
//!   otherwise the line is padded with spaces.
//!
//! Two stages: `compose_status` produces ordered `StatusSegment`s, then
//! `format_status` renders them into the left and right strings.

use std::borrow::Cow;
use std::fmt::Write as _;

const MAX_NAME_CHARS: usize = 20;
const NO_NAME: &str = "[No Name]";

pub struct StatusContext<'a> {
    pub file_name: Option<&'a str>,
    pub num_rows: usize,
    /// 0-based cursor row; may equal `num_rows`.
    pub cy: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    FileName(Cow<'a, str>),
    LineCount(usize),
    Modified,
    /// Right-aligned `line_1/total`.
    Position { line_1: usize, total: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(name) if name.chars().count() > MAX_NAME_CHARS => {
            name.chars().take(MAX_NAME_CHARS).collect::<String>().into()
        }
        Some(name) => name.into(),
        None => NO_NAME.into(),
    };
    let mut out = Vec::with_capacity(4);
    out.push(StatusSegment::FileName(name));
    out.push(StatusSegment::LineCount(ctx.num_rows));
    if ctx.dirty {
        out.push(StatusSegment::Modified);
    }
    out.push(StatusSegment::Position {
        line_1: ctx.cy + 1,
        total: ctx.num_rows,
    });
    out
}

/// Render segments into `(left, right)` strings.
pub fn format_status(segments: &[StatusSegment<'_>]) -> (String, String) {
    let mut left = String::with_capacity(48);
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::FileName(name) => left.push_str(name),
            StatusSegment::LineCount(n) => {
                let _ = write!(left, " - {n} lines");
            }
            StatusSegment::Modified => left.push_str(" (modified)"),
            StatusSegment::Position { line_1, total } => {
                let _ = write!(right, "{line_1}/{total}");
            }
        }
    }
    (left, right)
}

/// Full status line, exactly `width` columns wide (fewer only if `width` is 0).
pub fn build_status(ctx: &StatusContext, width: usize) -> String {
    let (left, right) = format_status(&compose_status(ctx));
    let mut line: String = left.chars().take(width).collect();
    let mut len = line.chars().count();
    let rlen = right.chars().count();
    while len < width {
        if width - len == rlen {
            line.push_str(&right);
            break;
        }
        line.push(' ');
        len += 1;
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx(file_name: Option<&str>, num_rows: usize, cy: usize, dirty: bool) -> StatusContext<'_> {
        StatusContext {
            file_name,
            num_rows,
            cy,
            dirty,
        }
    }

    #[test]
    fn segments_for_dirty_named_file() {
        let c = ctx(Some("a.txt"), 3, 1, true);
        assert_eq!(
            compose_status(&c),
            vec![
                StatusSegment::FileName("a.txt".into()),
                StatusSegment::LineCount(3),
                StatusSegment::Modified,
                StatusSegment::Position {
                    line_1: 2,
                    total: 3
                },
            ]
        );
    }

    #[test]
    fn clean_unnamed_status() {
        let (l, r) = format_status(&compose_status(&ctx(None, 0, 0, false)));
        assert_eq!(l, "[No Name] - 0 lines");
        assert_eq!(r, "1/0");
    }

    #[test]
    fn right_part_is_right_aligned() {
        let s = build_status(&ctx(Some("a.txt"), 3, 0, true), 40);
        assert_eq!(s.len(), 40);
        assert_eq!(s, format!("a.txt - 3 lines (modified){}1/3", " ".repeat(11)));
    }

    #[test]
    fn long_name_is_cut_to_twenty_chars() {
        let s = build_status(&ctx(Some("a/very/long/path/to/some/file.txt"), 1, 0, false), 80);
        assert!(s.starts_with("a/very/long/path/to/ - 1 lines"));
    }

    #[test]
    fn narrow_screen_truncates_and_drops_right_part() {
        let s = build_status(&ctx(Some("file.txt"), 10, 0, false), 10);
        assert_eq!(s, "file.txt -");
        let s = build_status(&ctx(Some("f"), 1, 0, false), 12);
        assert_eq!(s, "f - 1 lines ");
    }
}
