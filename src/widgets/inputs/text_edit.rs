pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

/// Keeps ASCII digits only.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Appends `ch` when it is a digit and `value` holds fewer than `max_len`
/// characters.
pub fn push_digit(value: &mut String, ch: char, max_len: usize) -> bool {
    if !ch.is_ascii_digit() || char_count(value) >= max_len {
        return false;
    }
    value.push(ch);
    true
}

pub fn pop_char(value: &mut String) -> bool {
    value.pop().is_some()
}

/// Field text followed by a caret cell when focused, padded to `width`.
pub fn field_text(value: &str, focused: bool, width: usize) -> String {
    let mut out = value.to_string();
    if focused {
        out.push('▏');
    }
    let len = char_count(&out);
    if len < width {
        out.push_str(&" ".repeat(width - len));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_filtered() {
        assert_eq!(digits_only("1a5.0-3"), "1503");
        assert_eq!(digits_only("١٢"), "");
    }

    #[test]
    fn push_digit_respects_limit() {
        let mut value = String::from("12");
        assert!(!push_digit(&mut value, 'x', 4));
        assert!(push_digit(&mut value, '3', 3));
        assert!(!push_digit(&mut value, '4', 3));
        assert_eq!(value, "123");
        assert!(pop_char(&mut value));
        assert_eq!(value, "12");
    }

    #[test]
    fn field_text_pads_and_marks_focus() {
        assert_eq!(field_text("10", false, 4), "10  ");
        assert_eq!(field_text("10", true, 4), "10▏ ");
        assert_eq!(field_text("2024", false, 2), "2024");
    }
}
