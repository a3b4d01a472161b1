//! Input validation helpers shared by the blog services and the web layer.
//!
//! Validation rules are declared with `validator` derives on input structs;
//! this module holds the custom rules and turns `ValidationErrors` into the
//! crate's per-field message map.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::FieldErrors;
use crate::{QuillError, Result};

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Validate that a string does not contain control characters or NULL bytes.
///
/// Newlines, carriage returns and tabs are allowed.
pub fn no_control_chars(value: &str) -> std::result::Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::new("no_control_chars"));
    }
    Ok(())
}

/// Human-readable message for a failed rule on a field.
fn message_for(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let label = field.replace('_', " ");
    match error.code.as_ref() {
        "required" => format!("The {label} field is required."),
        "length" => {
            let len = error
                .params
                .get("value")
                .and_then(|v| v.as_str())
                .map(|v| v.chars().count() as u64);
            let min = error.params.get("min").and_then(|v| v.as_u64());
            let max = error.params.get("max").and_then(|v| v.as_u64());
            match (len, min, max) {
                (Some(len), Some(min), _) if len < min => {
                    format!("The {label} field must be at least {min} characters.")
                }
                (_, _, Some(max)) => {
                    format!("The {label} field must not be greater than {max} characters.")
                }
                (_, Some(min), None) => {
                    format!("The {label} field must be at least {min} characters.")
                }
                _ => format!("The {label} field has an invalid length."),
            }
        }
        "email" => format!("The {label} field must be a valid email address."),
        "no_control_chars" => format!("The {label} field must not contain control characters."),
        _ => format!("The {label} field is invalid."),
    }
}

/// Collect `validator` errors into a sorted field → messages map.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| message_for(&field, e))
            .collect();
        fields.insert(field.to_string(), messages);
    }
    fields
}

/// Run `validator` rules, mapping failures to `QuillError::Validation`.
pub fn check<T: Validate>(input: &T) -> Result<()> {
    input
        .validate()
        .map_err(|errors| QuillError::Validation(collect_field_errors(&errors)))
}
