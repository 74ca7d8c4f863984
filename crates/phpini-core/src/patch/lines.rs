//! Line scanning and splicing over raw ini bytes
//!
//! Lines are addressed by byte offsets into the original text so an edit
//! touches exactly one line and every other byte, including the `\r\n` or
//! `\n` terminators and any non-UTF-8 comments, stays as it was.

/// One line of ini text, located by byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan<'a> {
    /// Byte offset of the first byte of the line
    pub start: usize,
    /// Line content without its terminator
    pub content: &'a [u8],
    /// The terminator: `\r\n`, `\n` or empty for a final unterminated line
    pub ending: &'a [u8],
}

impl LineSpan<'_> {
    /// Byte offset just past the content, where the terminator begins
    #[must_use]
    pub const fn content_end(&self) -> usize {
        self.start + self.content.len()
    }

    /// Byte offset of the next line
    #[must_use]
    pub const fn end(&self) -> usize {
        self.content_end() + self.ending.len()
    }
}

/// Iterate over the lines of `text`, keeping track of terminators
pub fn spans(text: &[u8]) -> impl Iterator<Item = LineSpan<'_>> {
    let mut start = 0;
    text.split_inclusive(|&b| b == b'\n').map(move |raw| {
        let content = raw
            .strip_suffix(b"\n")
            .map_or(raw, |c| c.strip_suffix(b"\r").unwrap_or(c));
        let span = LineSpan {
            start,
            content,
            ending: &raw[content.len()..],
        };
        start += raw.len();
        span
    })
}

/// Find the first line accepted by `matcher`
pub fn find<'a, T>(
    text: &'a [u8],
    mut matcher: impl FnMut(&'a [u8]) -> Option<T>,
) -> Option<(LineSpan<'a>, T)> {
    spans(text).find_map(|span| matcher(span.content).map(|found| (span, found)))
}

/// Terminator to use for newly inserted lines
#[must_use]
pub fn dominant_ending(text: &[u8]) -> &'static [u8] {
    if text.windows(2).any(|w| w == b"\r\n") {
        b"\r\n"
    } else {
        b"\n"
    }
}

/// Position of a line, detached from the borrowed text so it can be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    content_start: usize,
    content_end: usize,
    line_end: usize,
}

impl From<LineSpan<'_>> for Location {
    fn from(span: LineSpan<'_>) -> Self {
        Self {
            content_start: span.start,
            content_end: span.content_end(),
            line_end: span.end(),
        }
    }
}

/// Replace the content of one line, keeping its terminator
#[must_use]
pub fn replace(mut text: Vec<u8>, at: Location, content: &[u8]) -> Vec<u8> {
    text.splice(at.content_start..at.content_end, content.iter().copied());
    text
}

/// Insert a new line directly after the line at `at`
///
/// The new line reuses the terminator of the line above it. When that line
/// is the last one and unterminated, it gets the file's dominant terminator.
#[must_use]
pub fn insert_after(mut text: Vec<u8>, at: Location, content: &[u8]) -> Vec<u8> {
    if at.line_end > at.content_end {
        let mut line = content.to_vec();
        line.extend_from_slice(&text[at.content_end..at.line_end]);
        text.splice(at.line_end..at.line_end, line);
    } else {
        let mut line = dominant_ending(&text).to_vec();
        line.extend_from_slice(content);
        text.splice(at.content_end..at.content_end, line);
    }
    text
}
