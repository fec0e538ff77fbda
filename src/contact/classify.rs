use regex::Regex;

use super::phone::digits_only;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Unknown,
}

/// Decides which notification channel a free-text contact belongs to.
/// Total over every input; the email pattern wins over the phone pattern,
/// even for all-digit local parts like `11999887766@domain.com`.
pub fn classify(contact: &str) -> ContactKind {
    let email = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex");
    if email.is_match(contact) {
        return ContactKind::Email;
    }

    let digits = digits_only(contact);
    if (4..=15).contains(&digits.len()) && !digits.starts_with('0') {
        return ContactKind::Phone;
    }

    ContactKind::Unknown
}
