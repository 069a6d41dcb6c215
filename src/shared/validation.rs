use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating the reporting teacher's email
    /// Anything without whitespace or '@', an '@', and a dotted domain
    /// - Valid: "a@b.com", "profe.garcia@iesjandula.es", "x@y.z"
    /// - Invalid: "bad-email", "a@b", "a @b.com", "a@@b.com", "@b.com"
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_regex_valid() {
        assert!(EMAIL_REGEX.is_match("a@b.com"));
        assert!(EMAIL_REGEX.is_match("profe.garcia@iesjandula.es"));
        assert!(EMAIL_REGEX.is_match("x@y.z"));
        assert!(EMAIL_REGEX.is_match("a+tag@sub.domain.org"));
        assert!(EMAIL_REGEX.is_match("ñandú@colegio.es"));
    }

    #[test]
    fn test_email_regex_invalid() {
        assert!(!EMAIL_REGEX.is_match("bad-email")); // no at sign
        assert!(!EMAIL_REGEX.is_match("a@b")); // no dot in domain
        assert!(!EMAIL_REGEX.is_match("a @b.com")); // whitespace
        assert!(!EMAIL_REGEX.is_match("a@@b.com")); // double at
        assert!(!EMAIL_REGEX.is_match("@b.com")); // empty local part
        assert!(!EMAIL_REGEX.is_match("a@b.")); // empty tld
        assert!(!EMAIL_REGEX.is_match("")); // empty
    }
}
