// envstore: Validated Environment Variable Store
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Name and value invariants.
//!
//! ```text
//! name:  trimmed non-empty -> equals trimmed -> no '=' -> no NUL
//! value: equals trimmed -> no NUL -> (EmptyValues::Reject) non-empty
//! ```
//!
//! Checks run in the order above and the first failure wins. Whitespace is
//! Unicode `White_Space`, as [`str::trim`] defines it.

use thiserror::Error;

use super::types::EmptyValues;
use crate::error::{EnvError, NameViolation, ValueViolation};

/// Outcome of a failed validation, before it is tied to a variable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Name(#[from] NameViolation),
    #[error(transparent)]
    Value(#[from] ValueViolation),
}

impl ValidationError {
    /// Attaches the offending name, producing the store-level error.
    #[must_use]
    pub fn for_name(self, name: &str) -> EnvError {
        match self {
            Self::Name(violation) => EnvError::InvalidName {
                name: name.to_owned(),
                violation,
            },
            Self::Value(violation) => EnvError::InvalidValue {
                name: name.to_owned(),
                violation,
            },
        }
    }
}

/// Checks a name against the name invariant.
///
/// # Errors
///
/// Returns the first [`NameViolation`] found.
pub fn validate_name(name: &str) -> Result<(), NameViolation> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameViolation::Empty);
    }
    if trimmed != name {
        return Err(NameViolation::Untrimmed);
    }
    if name.contains('=') {
        return Err(NameViolation::ContainsEquals);
    }
    if name.contains('\0') {
        return Err(NameViolation::ContainsNul);
    }
    Ok(())
}

/// Checks a value against the value invariant.
///
/// # Errors
///
/// Returns the first [`ValueViolation`] found.
pub fn validate_value(value: &str, empty_values: EmptyValues) -> Result<(), ValueViolation> {
    if value.trim() != value {
        return Err(ValueViolation::Untrimmed);
    }
    if value.contains('\0') {
        return Err(ValueViolation::ContainsNul);
    }
    if value.is_empty() && empty_values == EmptyValues::Reject {
        return Err(ValueViolation::Empty);
    }
    Ok(())
}

/// Validates a name, then its value.
///
/// # Errors
///
/// Returns the first violated rule; name rules are checked before value rules.
pub fn validate(name: &str, value: &str, empty_values: EmptyValues) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_value(value, empty_values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules_in_order() {
        let cases = [
            ("", Err(NameViolation::Empty)),
            ("   ", Err(NameViolation::Empty)),
            (" name ", Err(NameViolation::Untrimmed)),
            ("name\n", Err(NameViolation::Untrimmed)),
            ("\u{3000}name", Err(NameViolation::Untrimmed)),
            ("na=me", Err(NameViolation::ContainsEquals)),
            ("na\0me", Err(NameViolation::ContainsNul)),
            ("=\0", Err(NameViolation::ContainsEquals)),
            ("name", Ok(())),
            ("Name With Inner Space", Ok(())),
        ];
        for (name, expected) in cases {
            assert_eq!(validate_name(name), expected, "name {name:?}");
        }
    }

    #[test]
    fn test_value_rules() {
        let cases = [
            ("value", EmptyValues::Allow, Ok(())),
            ("val=ue", EmptyValues::Allow, Ok(())),
            ("", EmptyValues::Allow, Ok(())),
            ("", EmptyValues::Reject, Err(ValueViolation::Empty)),
            (" value ", EmptyValues::Allow, Err(ValueViolation::Untrimmed)),
            ("\t", EmptyValues::Reject, Err(ValueViolation::Untrimmed)),
            ("val\0ue", EmptyValues::Allow, Err(ValueViolation::ContainsNul)),
        ];
        for (value, policy, expected) in cases {
            assert_eq!(validate_value(value, policy), expected, "value {value:?}");
        }
    }

    #[test]
    fn test_name_checked_before_value() {
        let err = validate("", " v ", EmptyValues::Allow).unwrap_err();
        assert_eq!(err, ValidationError::Name(NameViolation::Empty));
    }

    #[test]
    fn test_for_name_maps_to_store_error() {
        let err = ValidationError::Value(ValueViolation::Untrimmed).for_name("k");
        assert!(matches!(
            err,
            EnvError::InvalidValue {
                ref name,
                violation: ValueViolation::Untrimmed,
            } if name == "k"
        ));
    }
}
