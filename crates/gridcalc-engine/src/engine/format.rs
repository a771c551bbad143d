/// Format a number as plain decimal text.
///
/// Never uses exponent notation, so the output can be spliced back into a
/// formula and re-read by the arithmetic tokenizer.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // Normalizes -0.
        "0".to_string()
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-3.75), "-3.75");
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(1e-7), "0.0000001");
    }
}
