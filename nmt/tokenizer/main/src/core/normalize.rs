//! Whitespace normalization

/// Whitespace as classified by C `isspace` in the "C" locale.
///
/// Unlike `char::is_ascii_whitespace` this includes the vertical tab.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Replace every run of ASCII whitespace with a single space.
///
/// All other characters pass through unchanged; leading and trailing
/// whitespace collapses but is not trimmed.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_space(c) {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_newline_collapse() {
        assert_eq!(normalize("Hello\t\nWorld"), "Hello World");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_vertical_tab_and_form_feed() {
        assert_eq!(normalize("a\x0Bb\x0Cc\rd"), "a b c d");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        // U+00A0 (no-break space) is not ASCII whitespace
        assert_eq!(normalize("Привет\u{00A0}мир"), "Привет\u{00A0}мир");
    }

    #[test]
    fn test_edges_collapse_but_stay() {
        assert_eq!(normalize("  a  "), " a ");
    }
}
