//! Line classification for the INI-style configuration format

use std::sync::LazyLock;

use regex::Regex;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]$").expect("valid header pattern"));
static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+)=(.*)$").expect("valid parameter pattern"));

/// What a single configuration line is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Line starting with `#` or `;`
    Comment,
    /// `[name]`
    Header(String),
    /// `key = value`, both trimmed
    Param { key: String, value: String },
    /// Anything else; skipped on parse, preserved on write
    Other,
}

/// Classify a raw line (terminator and surrounding whitespace allowed).
pub fn classify(raw: &str) -> LineKind {
    let line = raw.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') || line.starts_with(';') {
        return LineKind::Comment;
    }
    if let Some(caps) = HEADER_RE.captures(line) {
        return LineKind::Header(caps[1].to_string());
    }
    if let Some(caps) = PARAM_RE.captures(line) {
        return LineKind::Param {
            key: caps[1].trim().to_string(),
            value: caps[2].trim().to_string(),
        };
    }
    LineKind::Other
}

/// Split text into lines that keep their terminators, so concatenating the
/// pieces reproduces the input exactly.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Render a parameter line in the canonical written form.
pub fn render_param(key: &str, value: &str) -> String {
    format!("    {} = {}\n", key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", LineKind::Blank)]
    #[case("   \r\n", LineKind::Blank)]
    #[case("# comment", LineKind::Comment)]
    #[case("  ; comment = with equals", LineKind::Comment)]
    #[case("include /etc/extra", LineKind::Other)]
    #[case("[docs", LineKind::Other)]
    fn classifies_simple_lines(#[case] raw: &str, #[case] expected: LineKind) {
        assert_eq!(classify(raw), expected);
    }

    #[test]
    fn header_keeps_inner_name() {
        assert_eq!(classify("  [print$]  \n"), LineKind::Header("print$".into()));
    }

    #[test]
    fn param_is_trimmed() {
        assert_eq!(
            classify("    valid users =  bob, @eng \n"),
            LineKind::Param {
                key: "valid users".into(),
                value: "bob, @eng".into()
            }
        );
    }

    #[test]
    fn param_value_may_contain_equals() {
        assert_eq!(
            classify("comment = a=b"),
            LineKind::Param {
                key: "comment".into(),
                value: "a=b".into()
            }
        );
    }

    #[test]
    fn split_lines_round_trips() {
        let text = "[a]\r\n  x = 1\n\nlast";
        assert_eq!(split_lines(text).collect::<String>(), text);
    }
}
