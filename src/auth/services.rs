use lazy_static::lazy_static;
use regex::Regex;

pub(crate) const MIN_USERNAME_LEN: usize = 3;
pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Placeholder avatar URL. There is no real upload pipeline; the profile
/// picture is a generated initials image keyed on the display name.
pub(crate) fn avatar_placeholder_url(name: &str) -> String {
    format!("https://ui-avatars.com/api/?name={name}&background=3f51b5&color=fff")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn avatar_url_embeds_name() {
        let url = avatar_placeholder_url("alice");
        assert!(url.contains("name=alice"));
        assert!(url.starts_with("https://ui-avatars.com/"));
    }
}
