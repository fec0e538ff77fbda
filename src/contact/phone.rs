pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a contact for the WhatsApp provider. Numbers already carrying a
/// `+` prefix pass through unchanged; everything else is reduced to digits
/// and prefixed with the configured country calling code.
pub fn normalize_number(value: &str, country_code: &str) -> String {
    if value.starts_with('+') {
        value.to_string()
    } else {
        format!("+{}{}", country_code, digits_only(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{digits_only, normalize_number};

    #[test]
    fn keeps_already_prefixed_numbers() {
        assert_eq!(normalize_number("+5511999887766", "55"), "+5511999887766");
    }

    #[test]
    fn prefixes_bare_numbers_with_country_code() {
        assert_eq!(normalize_number("11999887766", "55"), "+5511999887766");
    }

    #[test]
    fn strips_formatting_before_prefixing() {
        assert_eq!(normalize_number("(11) 99988-7766", "55"), "+5511999887766");
        assert_eq!(normalize_number("11 99988-7766", "55"), "+5511999887766");
    }

    #[test]
    fn honors_other_country_codes() {
        assert_eq!(normalize_number("912345678", "351"), "+351912345678");
    }

    #[test]
    fn digits_only_drops_everything_else() {
        assert_eq!(digits_only("+55 (11) 9.9988-7766"), "5511999887766");
        assert_eq!(digits_only("abc"), "");
    }
}
