//! Boundary validation helpers shared by request DTOs.
//!
//! Request types derive [`validator::Validate`]; handlers call
//! [`validate_input`] so every failure surfaces as
//! [`CoreError::Validation`] with a readable, deterministic message.

use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Run the derived validation rules on `input`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe_errors(&errors)))
}

/// Flatten field errors into `"field: message"` pairs sorted by field name.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

/// Require an optional string field to be present and not blank.
///
/// Returns the trimmed value.
pub fn require_non_blank(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(length(max = 3))]
        code: String,
    }

    #[test]
    fn valid_input_passes() {
        let probe = Probe {
            name: "ok".into(),
            code: "abc".into(),
        };
        assert!(validate_input(&probe).is_ok());
    }

    #[test]
    fn failures_are_sorted_by_field() {
        let probe = Probe {
            name: String::new(),
            code: "toolong".into(),
        };
        let err = validate_input(&probe).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "code: length; name: must not be empty");
    }

    #[test]
    fn require_non_blank_trims() {
        assert_eq!(
            require_non_blank("title", Some("  Ship it ".into())).unwrap(),
            "Ship it"
        );
    }

    #[test]
    fn require_non_blank_rejects_missing_and_blank() {
        assert_matches!(
            require_non_blank("title", None),
            Err(CoreError::Validation(msg)) if msg == "title is required"
        );
        assert!(require_non_blank("title", Some("   ".into())).is_err());
    }
}
