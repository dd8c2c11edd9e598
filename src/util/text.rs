use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns.
///
/// ```
/// use pulso::util::display_width;
///
/// assert_eq!(display_width("Notícias"), 8);
/// assert_eq!(display_width("日本"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Appends "..." when text is cut. For widths of 3 or less there is no room
/// for an ellipsis, so the result is just the characters that fit.
///
/// Returns `Cow::Borrowed` when the string already fits.
///
/// ```
/// use pulso::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Economia", 20), "Economia");
/// assert_eq!(truncate_to_width("Inteligência artificial", 10), "Intelig...");
/// assert_eq!(truncate_to_width("Teste", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..end], suffix))
}

/// Strip terminal control characters and ANSI escape sequences.
///
/// Article text comes from third-party publishers and is printed straight to
/// the terminal, so escape sequences must never survive. Removes:
/// - C0 controls and DEL, except tab and newline
/// - CSI sequences (`ESC [` ... final byte 0x40-0x7E)
/// - OSC sequences (`ESC ]` ... BEL or `ESC \`)
/// - any other bare ESC
///
/// Carriage returns are dropped too: a lone `\r` rewinds the cursor and can
/// overwrite the line it sits on.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_stripped) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            if !is_stripped(c) {
                out.push(c);
            }
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }

    Cow::Owned(out)
}

fn is_stripped(c: char) -> bool {
    (c.is_ascii_control() && c != '\t' && c != '\n') || ('\u{80}'..='\u{9f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_accented_text_counts_one_column_per_letter() {
        assert_eq!(display_width("saúde"), 5);
        assert_eq!(truncate_to_width("Política econômica", 9), "Políti...");
    }

    #[test]
    fn test_wide_characters() {
        // Each CJK character is 2 columns.
        assert_eq!(truncate_to_width("日本語テスト", 7), "日本...");
        assert_eq!(truncate_to_width("日本語テスト", 5), "日...");
        assert_eq!(truncate_to_width("日本", 4), "日本");
    }

    #[test]
    fn test_narrow_widths_skip_ellipsis() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 1), "T");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
        assert_eq!(truncate_to_width("日本", 1), "");
        assert_eq!(truncate_to_width("日本", 3), "日");
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        let s = "Dólar fecha em queda\tapós dados";
        assert!(matches!(strip_control_chars(s), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_csi_sequences() {
        assert_eq!(strip_control_chars("\x1b[31mAlerta\x1b[0m"), "Alerta");
        assert_eq!(strip_control_chars("a\x1b[2Jb"), "ab");
    }

    #[test]
    fn test_strips_osc_sequences() {
        assert_eq!(
            strip_control_chars("\x1b]0;titulo falso\x07Manchete"),
            "Manchete"
        );
        assert_eq!(
            strip_control_chars("\x1b]8;;http://evil\x1b\\link"),
            "link"
        );
    }

    #[test]
    fn test_strips_bare_controls() {
        assert_eq!(strip_control_chars("a\x00b\x07c\x7fd"), "abcd");
        assert_eq!(strip_control_chars("linha\rsobrescrita"), "linhasobrescrita");
        assert_eq!(strip_control_chars("a\u{9b}b"), "ab");
        assert_eq!(strip_control_chars("a\x1bb"), "ab");
    }

    #[test]
    fn test_keeps_newlines_and_tabs() {
        assert_eq!(strip_control_chars("a\n\tb\x01"), "a\n\tb");
    }

    #[test]
    fn test_unterminated_sequences_do_not_panic() {
        assert_eq!(strip_control_chars("fim\x1b["), "fim");
        assert_eq!(strip_control_chars("fim\x1b]0;sem fim"), "fim");
    }
}
