//! Log sanitization utilities for masking personal data.
//!
//! Emails and phone numbers pass through these helpers before they reach a
//! log line.

const VISIBLE_PREFIX: usize = 3;

/// Mask an email address for safe logging.
///
/// Keeps up to three characters of the local part and the whole domain.
/// Input without an `@` (such as a search fragment) is masked as plain text.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_email("user@example.com"), "use***@example.com");
/// assert_eq!(mask_email("ab@test.org"), "ab***@test.org");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => format!("{}***@{}", prefix(local), domain),
        None => format!("{}***", prefix(email)),
    }
}

/// Mask a phone number, keeping only its last two digits.
///
/// # Examples
/// ```ignore
/// assert_eq!(mask_phone("+1234567890"), "***90");
/// ```
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(2)..].iter().collect();
    format!("***{}", tail)
}

fn prefix(value: &str) -> String {
    value.chars().take(VISIBLE_PREFIX).collect()
}
