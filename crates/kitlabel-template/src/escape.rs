//! ZPL field data escaping

/// Escape text for a ZPL field written under `^FH_`.
///
/// With `_` as the hex indicator, `_`, `^` and `~` are replaced by their
/// `_XX` hex forms so product text cannot open a new command. Line breaks
/// become spaces.
#[must_use]
pub fn escape_zpl_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '_' => out.push_str("_5F"),
            '^' => out.push_str("_5E"),
            '~' => out.push_str("_7E"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters_are_hex_escaped() {
        assert_eq!(escape_zpl_field("^XZ"), "_5EXZ");
        assert_eq!(escape_zpl_field("~JA"), "_7EJA");
        assert_eq!(escape_zpl_field("A_B"), "A_5FB");
        assert_eq!(escape_zpl_field("^FS^XA~DG"), "_5EFS_5EXA_7EDG");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(escape_zpl_field("a\r\nb\nc\rd"), "a b c d");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "HARLEY DAVIDSON FXDX 1999-2005 0.90 / 9.5";
        assert_eq!(escape_zpl_field(text), text);
        assert_eq!(escape_zpl_field(""), "");
    }

    #[test]
    fn test_existing_hex_sequences_stay_literal() {
        // Hex sequences already in product text stay literal.
        assert_eq!(escape_zpl_field("_5E"), "_5F5E");
    }
}
