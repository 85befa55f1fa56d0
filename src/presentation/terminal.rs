//! Terminal capability detection

use is_terminal::IsTerminal;

/// Whether stdout can show the unicode icon set
pub fn stdout_supports_unicode() -> bool {
    supports_unicode_impl(|key| std::env::var(key).ok(), std::io::stdout().is_terminal())
}

fn supports_unicode_impl(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> bool {
    if !is_tty {
        return false;
    }
    let term = get_env("TERM").unwrap_or_default();
    if term.eq_ignore_ascii_case("dumb") {
        return false;
    }

    const KEYS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];
    for k in KEYS {
        if let Some(val) = get_env(k) {
            let v = val.to_lowercase();
            if v.contains("utf-8") || v.contains("utf8") {
                return true;
            }
            if !v.is_empty() {
                return false;
            }
        }
    }

    // Default to true on modern systems unless explicitly "dumb".
    true
}
