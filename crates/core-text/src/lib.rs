//! Row-oriented document model.
//!
//! A `Document` is an ordered list of `Row`s. Each row owns its logical bytes
//! (`chars`, no line terminator) and a cached display form (`render`) with tabs
//! expanded. All mutation goes through `Document` so the render cache is rebuilt
//! before the row can be observed again and the dirty counter stays accurate.
//!
//! Columns here are byte offsets. Grapheme clusters and wide characters are not
//! modelled; the only byte whose display width differs from one is the tab.

pub mod render;

pub use render::{DEFAULT_TAB_STOP, cx_to_rx, expand_tabs, rx_to_cx};

/// One logical line plus its rendered form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
}

impl Row {
    pub fn new(chars: Vec<u8>, tab_stop: usize) -> Self {
        let render = expand_tabs(&chars, tab_stop);
        Self { chars, render }
    }

    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Logical length in bytes.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        cx_to_rx(&self.chars, cx, tab_stop)
    }

    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        rx_to_cx(&self.chars, rx, tab_stop)
    }

    fn update_render(&mut self, tab_stop: usize) {
        self.render = expand_tabs(&self.chars, tab_stop);
    }
}

/// Search direction for [`Document::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Location of a search hit: row index and byte offset into `chars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub row: usize,
    pub cx: usize,
}

#[derive(Debug, Clone)]
pub struct Document {
    rows: Vec<Row>,
    tab_stop: usize,
    dirty: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TAB_STOP)
    }
}

impl Document {
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            tab_stop: render::normalize_tab_stop(tab_stop),
            dirty: 0,
        }
    }

    /// Build a clean document from already split lines (terminators stripped).
    pub fn from_lines<I>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        for line in lines {
            doc.append_row(line);
        }
        doc.dirty = 0;
        doc
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Logical length of row `at`; zero for the virtual row past the end.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Count of mutations since the last load or save.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    pub fn append_row(&mut self, chars: Vec<u8>) {
        let at = self.rows.len();
        self.insert_row(at, chars);
    }

    /// Insert a row before index `at`. `at > num_rows()` is ignored.
    pub fn insert_row(&mut self, at: usize, chars: Vec<u8>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(chars, self.tab_stop));
        self.dirty += 1;
    }

    /// Remove row `at`. Out-of-range indices are ignored.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert byte `c` into row `row` at `at`, clamping `at` to the row length.
    pub fn insert_char(&mut self, row: usize, at: usize, c: u8) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.chars.len());
        r.chars.insert(at, c);
        r.update_render(tab_stop);
        self.dirty += 1;
    }

    /// Remove the byte at `at` in row `row`. Out-of-range positions are ignored.
    pub fn delete_char(&mut self, row: usize, at: usize) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at >= r.chars.len() {
            return;
        }
        r.chars.remove(at);
        r.update_render(tab_stop);
        self.dirty += 1;
    }

    /// Append `bytes` to the end of row `row`.
    pub fn row_append_bytes(&mut self, row: usize, bytes: &[u8]) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.chars.extend_from_slice(bytes);
        r.update_render(tab_stop);
        self.dirty += 1;
    }

    /// Cut row `row` at `at` (clamped) and insert the tail as row `row + 1`.
    pub fn split_row(&mut self, row: usize, at: usize) {
        let tab_stop = self.tab_stop;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.chars.len());
        let tail = r.chars.split_off(at);
        r.update_render(tab_stop);
        self.insert_row(row + 1, tail);
    }

    /// Merge row `row` into the end of row `row - 1`, removing `row`.
    pub fn join_with_previous(&mut self, row: usize) {
        if row == 0 || row >= self.rows.len() {
            return;
        }
        let tail = self.rows.remove(row).chars;
        self.row_append_bytes(row - 1, &tail);
    }

    /// Every row's bytes, each followed by `\n`.
    pub fn rows_to_flat_text(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for r in &self.rows {
            out.extend_from_slice(&r.chars);
            out.push(b'\n');
        }
        out
    }

    /// Find `query` starting at the row after (or before) `from`, wrapping
    /// around the document. `from == None` starts at the first (or last) row.
    /// Each row is checked for its first occurrence only, matched against the
    /// rendered text and mapped back to a byte offset.
    pub fn find(&self, query: &[u8], from: Option<usize>, direction: Direction) -> Option<Match> {
        let n = self.rows.len();
        if n == 0 || query.is_empty() {
            return None;
        }
        let mut current = from.map(|r| r.min(n - 1));
        for _ in 0..n {
            let next = match (current, direction) {
                (None, Direction::Forward) => 0,
                (None, Direction::Backward) => n - 1,
                (Some(r), Direction::Forward) => (r + 1) % n,
                (Some(r), Direction::Backward) => (r + n - 1) % n,
            };
            current = Some(next);
            let row = &self.rows[next];
            if let Some(rx) = find_bytes(&row.render, query) {
                let cx = row.rx_to_cx(rx, self.tab_stop);
                return Some(Match { row: next, cx });
            }
        }
        None
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Split raw file content into lines, stripping `\n` and a preceding `\r`.
/// A final terminator does not produce an extra empty line.
pub fn split_lines(content: &[u8]) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = content
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect();
    if content.is_empty() || content.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().map(|l| l.as_bytes().to_vec()), 8)
    }

    #[test]
    fn from_lines_is_clean() {
        let d = doc(&["abc", "d\te"]);
        assert_eq!(d.num_rows(), 2);
        assert!(!d.is_dirty());
        assert_eq!(d.row(1).unwrap().render(), b"d       e");
    }

    #[test]
    fn insert_char_clamps_and_rerenders() {
        let mut d = doc(&["ab"]);
        d.insert_char(0, 99, b'\t');
        d.insert_char(0, 0, b'x');
        let row = d.row(0).unwrap();
        assert_eq!(row.chars(), b"xab\t");
        assert_eq!(row.render(), b"xab     ");
        assert_eq!(d.dirty(), 2);
    }

    #[test]
    fn insert_char_on_missing_row_is_ignored() {
        let mut d = doc(&[]);
        d.insert_char(0, 0, b'a');
        assert!(d.is_empty());
        assert!(!d.is_dirty());
    }

    #[test]
    fn delete_char_out_of_range_is_noop() {
        let mut d = doc(&["ab"]);
        d.delete_char(0, 2);
        d.delete_char(3, 0);
        assert!(!d.is_dirty());
        d.delete_char(0, 0);
        assert_eq!(d.row(0).unwrap().chars(), b"b");
    }

    #[test]
    fn split_and_join_are_symmetric() {
        let mut d = doc(&["hel\tlo"]);
        d.split_row(0, 3);
        assert_eq!(d.num_rows(), 2);
        assert_eq!(d.row(0).unwrap().chars(), b"hel");
        assert_eq!(d.row(1).unwrap().chars(), b"\tlo");
        assert_eq!(d.row(1).unwrap().render(), b"        lo");
        d.join_with_previous(1);
        assert_eq!(d.num_rows(), 1);
        assert_eq!(d.row(0).unwrap().chars(), b"hel\tlo");
        assert_eq!(d.row(0).unwrap().render(), b"hel     lo");
    }

    #[test]
    fn insert_and_delete_rows_positionally() {
        let mut d = doc(&["a", "c"]);
        d.insert_row(1, b"b".to_vec());
        d.insert_row(9, b"z".to_vec());
        assert_eq!(d.rows_to_flat_text(), b"a\nb\nc\n".to_vec());
        d.delete_row(0);
        d.delete_row(7);
        assert_eq!(d.rows_to_flat_text(), b"b\nc\n".to_vec());
    }

    #[test]
    fn flatten_round_trips_loaded_lines() {
        let content = b"abc\nd\te\n";
        let d = Document::from_lines(split_lines(content), 8);
        assert_eq!(d.rows_to_flat_text(), content.to_vec());
    }

    #[test]
    fn split_lines_strips_crlf_and_keeps_inner_blanks() {
        assert_eq!(
            split_lines(b"a\r\n\r\nb"),
            vec![b"a".to_vec(), Vec::new(), b"b".to_vec()]
        );
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn find_wraps_in_both_directions() {
        let d = doc(&["foo", "bar", "foobar"]);
        assert_eq!(
            d.find(b"bar", None, Direction::Forward),
            Some(Match { row: 1, cx: 0 })
        );
        assert_eq!(
            d.find(b"bar", Some(1), Direction::Forward),
            Some(Match { row: 2, cx: 3 })
        );
        assert_eq!(
            d.find(b"bar", Some(2), Direction::Forward),
            Some(Match { row: 1, cx: 0 })
        );
        assert_eq!(
            d.find(b"foo", Some(0), Direction::Backward),
            Some(Match { row: 2, cx: 0 })
        );
        assert_eq!(d.find(b"zzz", None, Direction::Forward), None);
        assert_eq!(d.find(b"", None, Direction::Forward), None);
    }

    #[test]
    fn find_matches_rendered_text_and_reports_byte_offset() {
        let d = doc(&["\tkey = 1"]);
        assert_eq!(
            d.find(b"key", None, Direction::Forward),
            Some(Match { row: 0, cx: 1 })
        );
    }
}
