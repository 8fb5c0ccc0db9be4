/// Turns whatever the visitor typed into the number the webhook dials.
///
/// Only ASCII digits survive. A leading `0` (Australian national format) is
/// swapped for `+61`, a leading `61` just gets its `+`. Anything else goes
/// through as bare digits, no length or plausibility checks.
pub fn format_phone_number(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = cleaned.strip_prefix('0') {
        return format!("+61{}", rest);
    }

    if cleaned.starts_with("61") {
        return format!("+{}", cleaned);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::format_phone_number;

    #[test]
    fn national_format_becomes_international() {
        assert_eq!(format_phone_number("0412 345 678"), "+61412345678");
        assert_eq!(format_phone_number("(02) 9876-5432"), "+61298765432");
        assert_eq!(format_phone_number("0"), "+61");
    }

    #[test]
    fn country_code_without_plus_gets_one() {
        assert_eq!(format_phone_number("61412345678"), "+61412345678");
        assert_eq!(format_phone_number("+61 412 345 678"), "+61412345678");
    }

    #[test]
    fn other_input_is_reduced_to_digits() {
        assert_eq!(format_phone_number("abc123"), "123");
        assert_eq!(format_phone_number("+1 (555) 010-9999"), "15550109999");
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("no digits here"), "");
    }

    #[test]
    fn only_ascii_digits_count() {
        // Arabic-Indic and full-width digits are stripped like any other symbol.
        assert_eq!(format_phone_number("٠٤١٢ 7"), "7");
        assert_eq!(format_phone_number("０４１２"), "");
    }

    #[test]
    fn only_the_first_zero_is_replaced() {
        assert_eq!(format_phone_number("00412"), "+610412");
    }

    #[test]
    fn formatting_twice_changes_nothing() {
        let inputs = [
            "0412 345 678",
            "61412345678",
            "+61 2 9876 5432",
            "abc123",
            "00612",
            "0",
            "",
            "6",
            "1800 123 456",
        ];
        for input in inputs {
            let once = format_phone_number(input);
            assert_eq!(format_phone_number(&once), once, "input {:?}", input);
        }
    }
}
