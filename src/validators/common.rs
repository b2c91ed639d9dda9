//! Common validation utilities and helpers.

use validator::{ValidationError, ValidationErrors};

use crate::errors::FieldError;

/// Custom validator rejecting empty and whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Flatten validator errors into field errors.
///
/// Field names are converted from the struct's snake_case to the PascalCase
/// used on the wire, and the list is sorted by field so responses are stable.
///
/// # Example
/// ```ignore
/// let errors = body.validate().err().map(collect_field_errors).unwrap_or_default();
/// ```
pub fn collect_field_errors(e: ValidationErrors) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            let label = field_label(field);
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldError::new(label.clone(), message)
            })
        })
        .collect();
    errors.sort_by(|a, b| a.field.cmp(&b.field));
    errors
}

/// `first_name` -> `FirstName`
fn field_label(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("John").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   \t").is_err());
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("first_name"), "FirstName");
        assert_eq!(field_label("id"), "Id");
        assert_eq!(field_label("email"), "Email");
    }
}
