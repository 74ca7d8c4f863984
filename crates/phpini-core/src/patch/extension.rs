//! `extension=` line matching and activation

use super::ExtensionOutcome;
use super::lines::{self, LineSpan, Location};

const KEYWORD: &str = "extension";

/// Prefixes PHP builds put in front of a module name (`php_curl.dll`)
const MODULE_PREFIXES: [&str; 2] = ["", "php_"];

/// Shared-library suffixes of native modules
const MODULE_SUFFIXES: [&str; 3] = ["", ".dll", ".so"];

/// An `extension=` line, active or commented out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionLine<'a> {
    /// Whether the line starts with `;`
    pub commented: bool,
    /// Module identifier exactly as written, without surrounding quotes
    pub module: &'a [u8],
}

impl<'a> ExtensionLine<'a> {
    /// Parse a single line of ini text
    ///
    /// Accepts `extension = <module>` with optional leading whitespace, an
    /// optional `;` marker, case-insensitive keyword, optional quotes around
    /// the module and an optional trailing `; comment`.
    #[must_use]
    pub fn parse(content: &'a [u8]) -> Option<Self> {
        let line = content.trim_ascii_start();
        let (commented, line) = match line.strip_prefix(b";") {
            Some(rest) => (true, rest),
            None => (false, line),
        };

        let keyword = line.get(..KEYWORD.len())?;
        if !keyword.eq_ignore_ascii_case(KEYWORD.as_bytes()) {
            return None;
        }
        let value = line[KEYWORD.len()..]
            .trim_ascii_start()
            .strip_prefix(b"=")?
            .trim_ascii_start();

        let (module, rest) = match value.strip_prefix(b"\"") {
            Some(quoted) => {
                let close = quoted.iter().position(|&b| b == b'"')?;
                (&quoted[..close], &quoted[close + 1..])
            }
            None => {
                let end = value
                    .iter()
                    .position(|&b| b.is_ascii_whitespace() || b == b';')
                    .unwrap_or(value.len());
                value.split_at(end)
            }
        };

        let rest = rest.trim_ascii_start();
        if module.is_empty() || !(rest.is_empty() || rest.starts_with(b";")) {
            return None;
        }

        Some(Self { commented, module })
    }

    /// Whether this line loads the extension `name`
    #[must_use]
    pub fn loads(&self, name: &str) -> bool {
        module_matches(self.module, name)
    }
}

/// Check a module identifier against a requested extension name
///
/// `curl` matches `curl`, `php_curl`, `curl.so` and `php_curl.dll`,
/// ignoring ASCII case.
#[must_use]
pub fn module_matches(module: &[u8], name: &str) -> bool {
    let name = name.as_bytes();
    MODULE_PREFIXES.iter().any(|prefix| {
        MODULE_SUFFIXES.iter().any(|suffix| {
            let (prefix, suffix) = (prefix.as_bytes(), suffix.as_bytes());
            module.len() == prefix.len() + name.len() + suffix.len()
                && module[..prefix.len()].eq_ignore_ascii_case(prefix)
                && module[prefix.len()..prefix.len() + name.len()].eq_ignore_ascii_case(name)
                && module[prefix.len() + name.len()..].eq_ignore_ascii_case(suffix)
        })
    })
}

/// Find the first active or commented line loading `name`
fn find_line<'a>(
    text: &'a [u8],
    name: &str,
    commented: bool,
) -> Option<(LineSpan<'a>, ExtensionLine<'a>)> {
    lines::find(text, |content| {
        ExtensionLine::parse(content).filter(|l| l.commented == commented && l.loads(name))
    })
}

/// Activate the extension `name` in `text`
///
/// An active line leaves the text untouched. Otherwise the first commented
/// line loading the module is rewritten to `extension=<module>`, keeping the
/// module identifier as it was spelled in the file.
#[must_use]
pub fn enable(text: Vec<u8>, name: &str) -> (Vec<u8>, ExtensionOutcome) {
    if find_line(&text, name, false).is_some() {
        return (text, ExtensionOutcome::AlreadyEnabled);
    }

    let Some((span, line)) = find_line(&text, name, true) else {
        return (text, ExtensionOutcome::NotFound);
    };

    let module = String::from_utf8_lossy(line.module).into_owned();
    let mut active = format!("{KEYWORD}=").into_bytes();
    active.extend_from_slice(line.module);
    let at = Location::from(span);

    (lines::replace(text, at, &active), ExtensionOutcome::Enabled { module })
}
