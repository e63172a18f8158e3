/// Request field validation
///
/// Inputs derive [`validator::Validate`]; this module turns the resulting
/// [`ValidationErrors`] into a flat list of [`FieldError`]s named the way
/// clients send them (camelCase). All violations are reported at once.
///
/// # Example
///
/// ```
/// use orgauth_shared::validation::{check, not_blank};
/// use validator::Validate;
///
/// #[derive(Validate)]
/// struct Input {
///     #[validate(custom(function = "not_blank"))]
///     first_name: String,
/// }
///
/// let errors = check(&Input { first_name: " ".to_string() }, &["firstName"]).unwrap_err();
/// assert_eq!(errors[0].field, "firstName");
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire (camelCase) field name
    pub field: String,

    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Custom validator rejecting empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Converts `first_name` to `firstName`
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Flattens validator output into [`FieldError`]s
///
/// `order` lists wire names in declaration order; reported errors follow it
/// so responses are deterministic. Unlisted fields sort last.
pub fn field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            let field = wire_name(&field.to_string());
            errors.iter().map(move |error| FieldError {
                field: field.clone(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string()),
            })
        })
        .collect();

    out.sort_by_key(|e| {
        order
            .iter()
            .position(|f| *f == e.field)
            .unwrap_or(order.len())
    });
    out
}

/// Runs `Validate` and converts failures
pub fn check<T: Validate>(input: &T, order: &[&str]) -> Result<(), Vec<FieldError>> {
    input.validate().map_err(|e| field_errors(&e, order))
}

/// Parses the `userId` of an add-member body
pub fn parse_user_id(raw: Option<&str>) -> Result<Uuid, FieldError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| FieldError::new("userId", "must not be empty"))?;

    Uuid::parse_str(raw).map_err(|_| FieldError::new("userId", "must be a valid user id"))
}
