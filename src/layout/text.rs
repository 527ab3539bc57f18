use crate::page::SpanFont;
use crate::units::Pt;

const TABSIZE: usize = 4;

fn width_of_char(font: &SpanFont, ch: char) -> Pt {
    let mut buf = [0u8; 4];
    font.font.width_of_text(ch.encode_utf8(&mut buf), font.size)
}

/// Calculate the width of a given string of text in the given font
pub fn width_of_text(text: &str, font: &SpanFont) -> Pt {
    font.font.width_of_text(text, font.size)
}

/// Breaks text into lines that each fit within `max_width`, keeping words intact
/// where possible. A word that is wider than `max_width` on its own is split at
/// the last character that still fits. Runs of whitespace collapse to a single
/// space, tabs count as whitespace and explicit newlines always start a new line.
///
/// Always returns at least one line; empty input yields a single empty line so
/// that blank values still take up vertical space.
pub fn wrap_text(text: &str, font: &SpanFont, max_width: Pt) -> Vec<String> {
    let space_width = width_of_text(" ", font);
    let text = text
        .replace('\t', &" ".repeat(TABSIZE))
        .replace("\r\n", "\n")
        .replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = Pt(0.0);

        for word in paragraph.split_whitespace() {
            let word_width = width_of_text(word, font);
            let gap = if line.is_empty() { Pt(0.0) } else { space_width };

            if line_width + gap + word_width <= max_width {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += gap + word_width;
                continue;
            }

            // the word doesn't fit behind what we have, so break before it
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = Pt(0.0);
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }

            // no break point, force character breaks
            for ch in word.chars() {
                let ch_width = width_of_char(font, ch);
                if !line.is_empty() && line_width + ch_width > max_width {
                    lines.push(std::mem::take(&mut line));
                    line_width = Pt(0.0);
                }
                line.push(ch);
                line_width += ch_width;
            }
        }

        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;

    const BODY: SpanFont = SpanFont {
        font: Font::Helvetica,
        size: Pt(12.0),
    };

    #[test]
    fn short_text_is_a_single_line() {
        assert_eq!(wrap_text("Seller: Acme", &BODY, Pt(468.0)), vec!["Seller: Acme"]);
    }

    #[test]
    fn empty_text_still_takes_a_line() {
        assert_eq!(wrap_text("", &BODY, Pt(100.0)), vec![String::new()]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let text = "Premium stainless steel widget with extended warranty";
        let lines = wrap_text(text, &BODY, Pt(150.0));
        assert!(lines.len() > 1);
        for line in lines.iter() {
            assert!(width_of_text(line, &BODY) <= Pt(150.0), "{line:?} overflows");
            assert!(!line.starts_with(' ') && !line.ends_with(' '));
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn splits_words_that_are_too_long_by_character() {
        let word = "SUPERCALIFRAGILISTICEXPIALIDOCIOUS";
        let lines = wrap_text(word, &BODY, Pt(50.0));
        assert!(lines.len() > 1);
        for line in lines.iter() {
            assert!(width_of_text(line, &BODY) <= Pt(50.0));
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn honours_explicit_newlines() {
        assert_eq!(
            wrap_text("Unit 4\r\nIndustrial Estate", &BODY, Pt(468.0)),
            vec!["Unit 4", "Industrial Estate"]
        );
    }
}
