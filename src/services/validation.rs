//! Field-level validation errors for link creation

use std::collections::BTreeMap;
use std::fmt;

use strum::AsRefStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    LongUrl,
    ValidityMinutes,
    CustomShortcode,
}

/// At most one message per field, collected before anything is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first message recorded for `field`.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field.as_ref(), message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_wins() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::CustomShortcode, "Must be 4-12 alphanumeric characters");
        errors.add(Field::CustomShortcode, "Shortcode already exists");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::CustomShortcode),
            Some("Must be 4-12 alphanumeric characters")
        );
    }

    #[test]
    fn test_display_is_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(Field::CustomShortcode, "bad code");
        errors.add(Field::LongUrl, "URL is required");
        assert_eq!(
            errors.to_string(),
            "longUrl: URL is required; customShortcode: bad code"
        );
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
