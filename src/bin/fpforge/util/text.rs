/// Greedy word wrap measured in characters.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    match max_len {
        0 => String::new(),
        n => s.chars().take(n - 1).chain(std::iter::once('…')).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap("unknown fingerprint type", 40), vec!["unknown fingerprint type"]);
        assert_eq!(
            wrap("record 3 could not be parsed", 12),
            vec!["record 3", "could not be", "parsed"]
        );
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn long_words_get_their_own_line() {
        assert_eq!(wrap("a verylongword b", 5), vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate("ecfp4", 10), "ecfp4");
        assert_eq!(truncate("ecfp4", 5), "ecfp4");
        assert_eq!(truncate("substance_id", 6), "subst…");
        assert_eq!(truncate("αβγδε", 3), "αβ…");
        assert_eq!(truncate("abc", 0), "");
    }
}
