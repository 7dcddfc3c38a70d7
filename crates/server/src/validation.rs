//! Boundary validation, run before service dispatch. Every failing field
//! is collected and reported in one response rather than just the first.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self { field, reason: reason.into() }
    }
}

/// `Field 'X': reason` items, comma-joined.
pub fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("Field '{}': {}", e.field, e.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn validate_user_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        return Some(FieldError::new("name", "must not be blank"));
    }
    let len = name.chars().count();
    if !(2..=50).contains(&len) {
        return Some(FieldError::new("name", "must be between 2 and 50 characters"));
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        return Some(FieldError::new("email", "must not be empty"));
    }
    if !is_valid_email(email) {
        return Some(FieldError::new("email", "must be a valid email address"));
    }
    None
}

pub fn validate_service_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        return Some(FieldError::new("serviceName", "must not be blank"));
    }
    if name.chars().count() > 100 {
        return Some(FieldError::new("serviceName", "must be at most 100 characters"));
    }
    None
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) || email.matches('@').count() != 1 {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
