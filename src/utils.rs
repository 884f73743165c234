//! Small text helpers used by the renderer and the CLI.

/// Flavor text from the API carries hard line breaks and form feeds; flatten
/// them to plain spaces.
pub fn clean_text(s: &str) -> String {
    s.replace(['\n', '\u{c}', '\r'], " ")
}

/// Greedily wrap `s` into lines of at most `width` characters, breaking only
/// between words. A word longer than `width` gets a line of its own.
pub fn text_to_lines(s: &str, width: usize) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    for word in s.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_flattens_control_breaks() {
        assert_eq!(
            clean_text("When several of\nthese POKéMON\u{c}gather"),
            "When several of these POKéMON gather"
        );
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = text_to_lines("A mouse-type Pokémon that stores electricity", 16);
        assert_eq!(lines, vec!["A mouse-type", "Pokémon that", "stores", "electricity"]);
        assert!(text_to_lines("   ", 10).is_empty());
    }
}
