//! Input validation helpers
//!
//! Centralized text length constants plus the email/phone predicates used
//! by the order and reservation flows. The predicates validate the string
//! exactly as received: no trimming, no normalization.

use std::sync::LazyLock;

use regex::Regex;

// ── Text length limits ──────────────────────────────────────────────

/// Chat messages, enforced at the dispatch boundary
pub const MAX_MESSAGE_LEN: usize = 1000;

// ── Flow field predicates ───────────────────────────────────────────

/// local@domain.tld with a 2+ letter TLD
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// Digits, spaces, dashes, plus, parentheses; at least 10 characters
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-\+\(\)]{10,}$").expect("phone pattern"));

/// True if `email` is a well-formed address.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// True if `phone` looks like a dialable number.
pub fn validate_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("anna@example.com"));
        assert!(validate_email("a.b+tag@sub.domain.co"));
        assert!(validate_email("USER_99%x@host-name.io"));
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(!validate_email(""));
        assert!(!validate_email("plainaddress"));
        assert!(!validate_email("missing@tld"));
        assert!(!validate_email("one@letter.t"));
        assert!(!validate_email("spaces in@local.com"));
        assert!(!validate_email("name@domain.com "));
    }

    #[test]
    fn accepts_dialable_phones() {
        assert!(validate_phone("5551234567"));
        assert!(validate_phone("(555) 123-4567"));
        assert!(validate_phone("+34 600 11 22 33"));
    }

    #[test]
    fn rejects_short_or_lettered_phones() {
        assert!(!validate_phone("555-1234"));
        assert!(!validate_phone("call me maybe"));
        assert!(!validate_phone("555123456x"));
    }
}
