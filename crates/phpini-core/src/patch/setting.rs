//! `key = value` line matching and assignment

use super::SettingOutcome;
use super::lines::{self, LineSpan, Location};

/// A `key = value` line for one particular key, active or commented out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingLine<'a> {
    /// Whether the line starts with `;`
    pub commented: bool,
    /// Current value with surrounding whitespace and inline comment removed
    pub value: &'a [u8],
}

impl<'a> SettingLine<'a> {
    /// Parse a single line of ini text as an assignment to `name`
    ///
    /// The key is compared ignoring ASCII case and must be followed by
    /// optional whitespace and `=`. The value is read with [`value_of`].
    #[must_use]
    pub fn parse(content: &'a [u8], name: &str) -> Option<Self> {
        let line = content.trim_ascii_start();
        let (commented, line) = match line.strip_prefix(b";") {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let key = line.get(..name.len())?;
        if name.is_empty() || !key.eq_ignore_ascii_case(name.as_bytes()) {
            return None;
        }
        let after = line[name.len()..].trim_ascii_start().strip_prefix(b"=")?;

        Some(Self {
            commented,
            value: value_of(after),
        })
    }
}

/// The value part of whatever follows `=` on a setting line
///
/// A double-quoted value is taken whole, so a `;` inside the quotes is not
/// mistaken for a comment. Anything else ends at the first `;` and loses its
/// surrounding whitespace.
#[must_use]
pub fn value_of(after: &[u8]) -> &[u8] {
    let after = after.trim_ascii_start();
    let closing = after
        .strip_prefix(b"\"")
        .and_then(|quoted| quoted.iter().position(|&b| b == b'"'));

    match closing {
        Some(close) => &after[..close + 2],
        None => after.split(|&b| b == b';').next().unwrap_or_default().trim_ascii_end(),
    }
}

/// Whether `value`, once written as `name = value`, reads back unchanged
///
/// Values that fail this would be rewritten on every run.
#[must_use]
pub fn reads_back(value: &str) -> bool {
    value_of(value.as_bytes()) == value.as_bytes()
}

/// Find the first active or commented assignment to `name`
fn find_line<'a>(
    text: &'a [u8],
    name: &str,
    commented: bool,
) -> Option<(LineSpan<'a>, SettingLine<'a>)> {
    lines::find(text, |content| {
        SettingLine::parse(content, name).filter(|l| l.commented == commented)
    })
}

/// Assign `value` to the setting `name` in `text`
///
/// `value` must already have its placeholders substituted. Only the first
/// active assignment is considered; when there is none, the new line goes
/// directly below the first commented assignment. A setting the text does
/// not mention at all is left out.
#[must_use]
pub fn assign(text: Vec<u8>, name: &str, value: &str) -> (Vec<u8>, SettingOutcome) {
    let line = format!("{name} = {value}").into_bytes();

    if let Some((span, current)) = find_line(&text, name, false) {
        if current.value == value.as_bytes() {
            return (text, SettingOutcome::Unchanged);
        }
        let previous = String::from_utf8_lossy(current.value).into_owned();
        let at = Location::from(span);
        return (lines::replace(text, at, &line), SettingOutcome::Updated { previous });
    }

    match find_line(&text, name, true) {
        Some((span, _)) => {
            let at = Location::from(span);
            (lines::insert_after(text, at, &line), SettingOutcome::Inserted)
        }
        None => (text, SettingOutcome::NotFound),
    }
}
