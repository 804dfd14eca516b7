//! Stateless field predicates checked before any store is touched.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted name length, inclusive.
pub const NAME_MIN_LENGTH: usize = 5;
/// Maximum accepted name length, inclusive.
pub const NAME_MAX_LENGTH: usize = 10;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `email` looks like `local-part@domain.tld`.
///
/// Syntax only: no DNS or MX lookups are performed.
///
/// # Examples
/// ```
/// use userhub::domain::validate_email;
///
/// assert!(validate_email("a@b.co"));
/// assert!(!validate_email("a@b.c"));
/// ```
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Return `true` when `name` is between [`NAME_MIN_LENGTH`] and
/// [`NAME_MAX_LENGTH`] long, both inclusive.
///
/// Length is measured in UTF-8 code units, so multi-byte characters count
/// more than once.
pub fn validate_name_length(name: &str) -> bool {
    (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&name.len())
}
