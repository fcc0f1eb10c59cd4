//! Field format rules for a candidate contact.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::contact::{ContactDraft, ContactInput};

pub const NAME_MIN_LEN: usize = 3;
pub const NUMBER_MIN_LEN: usize = 8;
pub const NUMBER_MAX_LEN: usize = 15;

// ASCII digits only; `\d` in `regex` would also admit other scripts' digits.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,3}-[0-9]+$").expect("number pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Number,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Number => write!(f, "number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("name `{value}` is shorter than the minimum allowed length ({})", NAME_MIN_LEN)]
    NameTooShort { value: String },
    #[error(
        "number `{value}` is not a valid phone number, format should be XX-XXXXXXX or XXX-XXXXXXXX ({} to {} characters)",
        NUMBER_MIN_LEN,
        NUMBER_MAX_LEN
    )]
    NumberFormatInvalid { value: String },
}

impl ValidationError {
    /// Field the violation was found on.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) => *field,
            ValidationError::NameTooShort { .. } => Field::Name,
            ValidationError::NumberFormatInvalid { .. } => Field::Number,
        }
    }
}

/// Every violation found on one candidate, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(ValidationError::field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person validation failed: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field(), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a candidate against the name and number rules.
///
/// Both fields are always checked so the caller sees every violation at once.
/// On success the values are returned exactly as given.
pub fn validate(input: &ContactInput) -> Result<ContactDraft, ValidationErrors> {
    let name = present(input.name.as_deref());
    let number = present(input.number.as_deref());

    let violations: Vec<ValidationError> = [check_name(name), check_number(number)]
        .into_iter()
        .flatten()
        .collect();

    match (name, number) {
        (Some(name), Some(number)) if violations.is_empty() => Ok(ContactDraft::new(name, number)),
        _ => Err(ValidationErrors(violations)),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_name(name: Option<&str>) -> Option<ValidationError> {
    let Some(name) = name else {
        return Some(ValidationError::MissingField(Field::Name));
    };
    if name.chars().count() < NAME_MIN_LEN {
        return Some(ValidationError::NameTooShort {
            value: name.to_string(),
        });
    }
    None
}

fn check_number(number: Option<&str>) -> Option<ValidationError> {
    let Some(number) = number else {
        return Some(ValidationError::MissingField(Field::Number));
    };
    let len = number.chars().count();
    if !(NUMBER_MIN_LEN..=NUMBER_MAX_LEN).contains(&len) || !NUMBER_PATTERN.is_match(number) {
        return Some(ValidationError::NumberFormatInvalid {
            value: number.to_string(),
        });
    }
    None
}
