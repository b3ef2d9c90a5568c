//! Form drafts and validation.
//!
//! Each admin form has a draft type holding raw field text plus a `validate`
//! method that checks every field in one pass: failures accumulate into
//! `FieldErrors` keyed by field name, and the caller only gets a typed record
//! back when the whole draft is valid. Views render the messages under their
//! fields; nothing is applied from a partially valid draft.

pub mod broadcast;
pub mod strategy;
pub mod user;

pub use broadcast::{BroadcastDraft, ValidBroadcast};
pub use strategy::{StrategyDraft, ValidStrategy};
pub use user::{UserDraft, ValidUser};

/// Field-level validation failures, kept in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// First message recorded for a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Parse a numeric field. An empty input counts as zero, so range checks own
/// that failure instead of a parse error. Non-finite values are rejected.
pub(crate) fn parse_number(
    raw: &str,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            errors.push(field, format!("{label} must be a number."));
            None
        }
    }
}

/// Parse an optional numeric field. Empty means absent.
pub(crate) fn parse_optional_number(
    raw: &str,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(Some(value)),
        _ => {
            errors.push(field, format!("{label} must be a number."));
            None
        }
    }
}

/// Lightweight email syntax check: one `@`, a non-empty local part, and a
/// dotted domain with no whitespace.
pub(crate) fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = raw.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_keep_order_and_first_match() {
        let mut errors = FieldErrors::default();
        errors.push("name", "first");
        errors.push("email", "second");
        errors.push("name", "third");

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.get("email"), Some("second"));
        assert_eq!(errors.get("missing"), None);

        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["name", "email", "name"]);
    }

    #[test]
    fn empty_number_coerces_to_zero() {
        let mut errors = FieldErrors::default();
        assert_eq!(parse_number("", "p", "Price", &mut errors), Some(0.0));
        assert_eq!(parse_number("  ", "p", "Price", &mut errors), Some(0.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn junk_number_is_rejected_with_label() {
        let mut errors = FieldErrors::default();
        assert_eq!(parse_number("abc", "p", "Entry price", &mut errors), None);
        assert_eq!(errors.get("p"), Some("Entry price must be a number."));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let mut errors = FieldErrors::default();
        assert_eq!(parse_number("NaN", "p", "Price", &mut errors), None);
        assert_eq!(parse_number("inf", "q", "Price", &mut errors), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn optional_number_distinguishes_absent_from_invalid() {
        let mut errors = FieldErrors::default();
        assert_eq!(
            parse_optional_number("", "s", "Sharpe ratio", &mut errors),
            Some(None)
        );
        assert_eq!(
            parse_optional_number("1.05", "s", "Sharpe ratio", &mut errors),
            Some(Some(1.05))
        );
        assert_eq!(
            parse_optional_number("x", "s", "Sharpe ratio", &mut errors),
            None
        );
        assert_eq!(errors.get("s"), Some("Sharpe ratio must be a number."));
    }

    #[test]
    fn email_check_accepts_plain_addresses() {
        assert!(is_valid_email("alice.j@example.com"));
        assert!(is_valid_email("admin@signalstream.app"));
        assert!(is_valid_email("a+b@mail.co.uk"));
    }

    #[test]
    fn email_check_rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@example."));
    }
}
