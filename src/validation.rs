//! Shared validation engine.
//!
//! Every entity funnels its options through a [`Schema`] bound to the entity
//! name. Each field is read once, in declaration order, and the first violated
//! rule aborts construction. Absent optional fields stay `None` and are never
//! replaced by a placeholder.

use crate::error::{Result, UniversignError};
use serde::de::DeserializeOwned;

/// A validating constructor shared by every entity of the request schema.
pub trait Validate: Sized {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    /// Raw options accepted by the constructor.
    type Options: DeserializeOwned;

    /// Validate `options` and build the entity.
    fn validate(options: Self::Options) -> Result<Self>;

    /// Build the entity from a JSON options bag.
    ///
    /// Unknown keys are ignored. A value of the wrong type (for instance a
    /// numeric string where an integer is expected) or an unknown enumeration
    /// value is rejected before any rule runs.
    ///
    /// ```rust
    /// use universign::{BasicAuthConfig, Validate};
    ///
    /// let auth = BasicAuthConfig::from_json(serde_json::json!({
    ///     "user": "bar",
    ///     "pass": "foo",
    /// })).unwrap();
    /// assert_eq!(auth.user(), "bar");
    /// ```
    fn from_json(value: serde_json::Value) -> Result<Self> {
        let options = serde_json::from_value(value).map_err(|source| {
            UniversignError::InvalidOptions {
                entity: Self::ENTITY,
                source,
            }
        })?;
        Self::validate(options)
    }
}

/// Field-level rule applied to every present value.
pub(crate) trait FieldRule {
    /// Returns the violated constraint, if any.
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl FieldRule for String {
    fn check(&self) -> std::result::Result<(), String> {
        if self.is_empty() {
            return Err("is not allowed to be empty".to_string());
        }
        Ok(())
    }
}

impl FieldRule for i32 {}
impl FieldRule for bool {}
impl FieldRule for u8 {}

impl<T: FieldRule> FieldRule for Vec<T> {
    fn check(&self) -> std::result::Result<(), String> {
        for (index, item) in self.iter().enumerate() {
            item.check()
                .map_err(|reason| format!("item at position {index} {reason}"))?;
        }
        Ok(())
    }
}

/// Rules of one entity, bound to the entity name for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Schema {
    entity: &'static str,
}

impl Schema {
    pub(crate) const fn new(entity: &'static str) -> Self {
        Self { entity }
    }

    /// A field that must be present and valid.
    pub(crate) fn required<T: FieldRule>(&self, field: &str, value: Option<T>) -> Result<T> {
        let value = value.ok_or_else(|| self.violation(field, "is required"))?;
        self.check(field, &value)?;
        Ok(value)
    }

    /// A field that may be absent but must be valid when present.
    pub(crate) fn optional<T: FieldRule>(&self, field: &str, value: Option<T>) -> Result<Option<T>> {
        if let Some(value) = &value {
            self.check(field, value)?;
        }
        Ok(value)
    }

    /// A list that must be present and hold at least one valid item.
    pub(crate) fn non_empty<T>(&self, field: &str, value: Option<Vec<T>>) -> Result<Vec<T>>
    where
        Vec<T>: FieldRule,
    {
        let items = self.required(field, value)?;
        if items.is_empty() {
            return Err(self.violation(field, "must contain at least 1 item"));
        }
        Ok(items)
    }

    pub(crate) fn violation(&self, field: &str, reason: impl Into<String>) -> UniversignError {
        UniversignError::Validation {
            entity: self.entity,
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn business_rule(&self, message: impl Into<String>) -> UniversignError {
        UniversignError::BusinessRule {
            entity: self.entity,
            message: message.into(),
        }
    }

    fn check<T: FieldRule>(&self, field: &str, value: &T) -> Result<()> {
        value.check().map_err(|reason| self.violation(field, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: Schema = Schema::new("Sample");

    #[test]
    fn test_required_missing() {
        let err = SCHEMA.required::<String>("name", None).unwrap_err();
        assert_eq!(err.to_string(), "Sample - \"name\" is required");
    }

    #[test]
    fn test_required_empty_string() {
        let err = SCHEMA.required("name", Some(String::new())).unwrap_err();
        assert_eq!(err.to_string(), "Sample - \"name\" is not allowed to be empty");
    }

    #[test]
    fn test_optional_absent_stays_absent() {
        let value = SCHEMA.optional::<String>("title", None).unwrap();
        assert!(value.is_none());

        let value = SCHEMA.optional("title", Some("t".to_string())).unwrap();
        assert_eq!(value.as_deref(), Some("t"));
    }

    #[test]
    fn test_list_item_rule() {
        let texts = vec!["ok".to_string(), String::new()];
        let err = SCHEMA.optional("checkBoxTexts", Some(texts)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sample - \"checkBoxTexts\" item at position 1 is not allowed to be empty"
        );
    }

    #[test]
    fn test_non_empty() {
        let err = SCHEMA.non_empty::<String>("signers", Some(vec![])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sample - \"signers\" must contain at least 1 item"
        );

        let err = SCHEMA.non_empty::<String>("signers", None).unwrap_err();
        assert_eq!(err.to_string(), "Sample - \"signers\" is required");

        let items = SCHEMA
            .non_empty("signers", Some(vec!["a".to_string()]))
            .unwrap();
        assert_eq!(items.len(), 1);
    }
}
