//! Whole-file patching scenarios against template-like ini text

use std::path::Path;

use super::*;
use crate::config::Settings;

const TEMPLATE: &str = "\
[PHP]
; Maximum amount of memory a script may consume
; https://php.net/memory-limit
memory_limit = 128M

;extension_dir = \"./\"
; On windows:
;extension_dir = \"ext\"

;extension=bz2
;extension=curl
;extension=ffi
extension=php_openssl.dll
;extension=php_mbstring.dll

[Date]
; Defines the default timezone used by the date functions
; https://php.net/date.timezone
;date.timezone =
";

fn template() -> Vec<u8> {
    TEMPLATE.as_bytes().to_vec()
}

fn extensions(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn test_end_to_end_scenario() {
    let exts = extensions(&["mbstring"]);
    let settings: Settings = [("date.timezone", "UTC")].into_iter().collect();

    let patched = IniPatcher::new(&exts, &settings).patch(
        b";extension=php_mbstring.dll\n;date.timezone =\n".to_vec(),
        Path::new("/php"),
    );

    assert_eq!(
        patched.text,
        b"extension=php_mbstring.dll\n;date.timezone =\ndate.timezone = UTC\n"
    );
    assert!(patched.report.modified);
    assert_eq!(
        patched.report.extensions[0].outcome,
        ExtensionOutcome::Enabled {
            module: "php_mbstring.dll".to_string()
        }
    );
    assert_eq!(patched.report.settings[0].outcome, SettingOutcome::Inserted);
}

#[test]
fn test_template_patch_is_minimal() {
    let exts = extensions(&["curl", "openssl", "sodium"]);
    let settings: Settings = [
        ("memory_limit", "512M"),
        ("extension_dir", "{PATH}\\ext"),
        ("date.timezone", "Europe/Paris"),
        ("upload_max_filesize", "64M"),
    ]
    .into_iter()
    .collect();

    let patched = IniPatcher::new(&exts, &settings).patch(template(), Path::new("C:\\php"));

    let expected = TEMPLATE
        .replace("memory_limit = 128M", "memory_limit = 512M")
        .replace(";extension=curl", "extension=curl")
        .replace(
            ";extension_dir = \"./\"\n",
            ";extension_dir = \"./\"\nextension_dir = C:\\php\\ext\n",
        )
        .replace(";date.timezone =\n", ";date.timezone =\ndate.timezone = Europe/Paris\n");
    assert_eq!(patched.text, expected.as_bytes());

    let outcomes: Vec<_> = patched
        .report
        .extensions
        .iter()
        .map(|r| (r.name.as_str(), r.outcome.clone()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            (
                "curl",
                ExtensionOutcome::Enabled {
                    module: "curl".to_string()
                }
            ),
            ("openssl", ExtensionOutcome::AlreadyEnabled),
            ("sodium", ExtensionOutcome::NotFound),
        ]
    );
    assert_eq!(patched.report.settings[1].value, "C:\\php\\ext");
    assert_eq!(patched.report.settings[3].outcome, SettingOutcome::NotFound);
}

#[test]
fn test_second_pass_is_idempotent() {
    let exts = extensions(&["curl", "mbstring", "sodium"]);
    let settings: Settings = [
        ("memory_limit", "512M"),
        ("extension_dir", "{PATH}/ext"),
        ("date.timezone", "UTC"),
        ("unknown.setting", "1"),
    ]
    .into_iter()
    .collect();
    let patcher = IniPatcher::new(&exts, &settings);
    let dir = Path::new("/opt/php");

    let first = patcher.patch(template(), dir);
    let second = patcher.patch(first.text.clone(), dir);

    assert!(first.report.modified);
    assert!(!second.report.modified);
    assert_eq!(second.text, first.text);
    assert!(second.report.extensions.iter().all(|r| matches!(
        r.outcome,
        ExtensionOutcome::AlreadyEnabled | ExtensionOutcome::NotFound
    )));
    assert!(second.report.settings.iter().all(|r| matches!(
        r.outcome,
        SettingOutcome::Unchanged | SettingOutcome::NotFound
    )));
}

#[test]
fn test_crlf_template_keeps_line_endings() {
    let crlf = TEMPLATE.replace('\n', "\r\n");
    let exts = extensions(&["bz2"]);
    let settings: Settings = [("date.timezone", "UTC")].into_iter().collect();

    let patched =
        IniPatcher::new(&exts, &settings).patch(crlf.clone().into_bytes(), Path::new("/php"));

    let expected = crlf
        .replace(";extension=bz2\r\n", "extension=bz2\r\n")
        .replace(";date.timezone =\r\n", ";date.timezone =\r\ndate.timezone = UTC\r\n");
    assert_eq!(patched.text, expected.as_bytes());
}

#[test]
fn test_unknown_directives_leave_text_untouched() {
    let exts = extensions(&["xdebug"]);
    let settings: Settings = [("xdebug.mode", "debug")].into_iter().collect();

    let patched = IniPatcher::new(&exts, &settings).patch(template(), Path::new("/php"));

    assert_eq!(patched.text, TEMPLATE.as_bytes());
    assert!(!patched.report.modified);
}

#[test]
fn test_setting_values_settle_after_one_pass() {
    for value in ["UTC ", " UTC", "a;b", r#""a" b"#] {
        assert!(!reads_back(value), "{value:?} should be rejected before patching");
    }

    for value in [r#""a;b""#, "Europe/Paris", r"C:\php\ext", "E_ALL & ~E_NOTICE", ""] {
        assert!(reads_back(value));
        let settings: Settings = [("date.timezone", value)].into_iter().collect();
        let patcher = IniPatcher::new(&[], &settings);

        let first = patcher.patch(b";date.timezone =\n".to_vec(), Path::new("/php"));
        let second = patcher.patch(first.text.clone(), Path::new("/php"));

        assert_eq!(second.text, first.text, "{value:?}");
        assert!(!second.report.modified, "{value:?} was rewritten on the second pass");
        assert_eq!(second.report.settings[0].outcome, SettingOutcome::Unchanged);
    }
}

#[test]
fn test_non_utf8_bytes_pass_through() {
    let exts = extensions(&["gd"]);
    let settings: Settings = [("date.timezone", "UTC")].into_iter().collect();
    let original = b"; caf\xe9 cr\xe8me\n;extension=gd ; biblioth\xe8que\n;date.timezone =\n";

    let patched = IniPatcher::new(&exts, &settings).patch(original.to_vec(), Path::new("/php"));

    assert_eq!(
        patched.text,
        b"; caf\xe9 cr\xe8me\nextension=gd\n;date.timezone =\ndate.timezone = UTC\n"
    );
    assert_eq!(patched.report.settings[0].outcome, SettingOutcome::Inserted);
}
