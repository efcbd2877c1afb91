//! Note template loading and date-pattern substitution.
//!
//! # Responsibility
//! - Resolve the note template for a vault, caching it in the session.
//! - Rewrite `{{date: FORMAT}}` placeholders with the current date.
//!
//! # Invariants
//! - Text outside `{{date: ...}}` patterns is preserved byte-for-byte.
//! - FORMAT uses moment.js-style tokens (the format Obsidian templates
//!   already use), mapped onto strftime before formatting.
//! - Template read failures are best-effort: logged, then treated as an
//!   empty template.

use crate::model::vault::PathProperty;
use crate::registry::VaultRegistry;
use crate::session::SessionState;
use chrono::{DateTime, Local};
use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Session variable caching the loaded template across invocations.
pub const TEMPLATE_SESSION_VAR: &str = "note-template";

static DATE_PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{date: ([^}]+)\}\}").expect("valid date pattern regex"));

/// Moment-style tokens in descending match length; longer tokens must win
/// over their prefixes (`YYYY` before `YY`, `MMMM` before `MM`).
const MOMENT_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("dddd", "%A"),
    ("MMMM", "%B"),
    ("ddd", "%a"),
    ("MMM", "%b"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("M", "%-m"),
    ("D", "%-d"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
];

/// Returns the note template for `vault`, reading it at most once per
/// session.
///
/// The cached value lives in the session so follow-up keystrokes (each a
/// fresh process) skip the file read. Missing template path or unreadable
/// file both yield an empty template.
pub fn load_note_template(
    registry: &VaultRegistry,
    session: &mut SessionState,
    vault: &str,
) -> String {
    if let Some(cached) = session.get_str(TEMPLATE_SESSION_VAR) {
        if !cached.is_empty() {
            return cached.to_string();
        }
    }

    let template_path = match registry.get_vault_property(vault, PathProperty::RegularTemplatePath)
    {
        Ok(Some(path)) => path,
        Ok(None) => return String::new(),
        Err(err) => {
            warn!("event=template_load module=template status=error vault={vault} error={err}");
            return String::new();
        }
    };

    match std::fs::read_to_string(&template_path) {
        Ok(template) => {
            session.set_str(TEMPLATE_SESSION_VAR, template.clone());
            template
        }
        Err(err) => {
            warn!(
                "event=template_load module=template status=error path={template_path} error={err}"
            );
            String::new()
        }
    }
}

/// Rewrites every `{{date: FORMAT}}` pattern using the current local time.
pub fn render_template(template: &str) -> String {
    substitute_date_patterns(template, &Local::now())
}

/// Rewrites `{{date: FORMAT}}` patterns against an explicit timestamp.
pub fn substitute_date_patterns(template: &str, now: &DateTime<Local>) -> String {
    DATE_PATTERN_RE
        .replace_all(template, |caps: &Captures<'_>| {
            let strftime = moment_to_strftime(&caps[1]);
            now.format(&strftime).to_string()
        })
        .into_owned()
}

/// Maps a moment.js-style format string onto strftime specifiers.
///
/// Unknown characters pass through unchanged; literal `%` is escaped so
/// user text cannot inject specifiers.
fn moment_to_strftime(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'outer: while !rest.is_empty() {
        for (token, spec) in MOMENT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }

        let ch = rest.chars().next().expect("non-empty remainder");
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{moment_to_strftime, substitute_date_patterns};
    use chrono::{Local, TimeZone};

    fn fixed_now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 4).unwrap()
    }

    #[test]
    fn iso_date_pattern_is_rewritten_exactly() {
        let rendered = substitute_date_patterns("# Daily {{date: YYYY-MM-DD}}\n", &fixed_now());
        assert_eq!(rendered, "# Daily 2024-03-07\n");
    }

    #[test]
    fn unrelated_text_is_untouched() {
        let template = "no patterns here, not even {{date}} without format";
        assert_eq!(substitute_date_patterns(template, &fixed_now()), template);
    }

    #[test]
    fn multiple_patterns_each_render() {
        let rendered =
            substitute_date_patterns("{{date: YYYY}} and {{date: DD.MM}}", &fixed_now());
        assert_eq!(rendered, "2024 and 07.03");
    }

    #[test]
    fn longest_token_wins() {
        assert_eq!(moment_to_strftime("YYYY-MM"), "%Y-%m");
        assert_eq!(moment_to_strftime("YY"), "%y");
        assert_eq!(moment_to_strftime("MMMM D"), "%B %-d");
    }

    #[test]
    fn unpadded_tokens_render_without_leading_zero() {
        let rendered = substitute_date_patterns("{{date: D/M/YYYY}}", &fixed_now());
        assert_eq!(rendered, "7/3/2024");
    }

    #[test]
    fn literal_percent_is_escaped() {
        let rendered = substitute_date_patterns("{{date: YYYY 100%}}", &fixed_now());
        assert_eq!(rendered, "2024 100%");
    }
}
