//! Per-field error accumulator

use std::collections::BTreeMap;

use serde::Serialize;

/// Transient mapping from field name to its list of error messages, built up
/// during one validation pass.
///
/// Independent checks append to it without failing fast, so the user sees
/// every problem at once. Adding a message a field already carries is a
/// no-op, which keeps overlapping checks from repeating themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error message for a field, skipping duplicates
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        let messages = self.0.entry(field.to_string()).or_default();

        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Record several messages for a field
    pub fn extend(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields carrying at least one error
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let errors = FieldErrors::new();

        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_add_accumulates_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("password", "This password is too short.");
        errors.add("password", "This password is entirely numeric.");
        errors.add("username", "This username is not allowed.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("password").unwrap().len(), 2);
        assert_eq!(errors.get("username").unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_messages_are_dropped() {
        let mut errors = FieldErrors::new();
        errors.add("email", "This e-mail address is not allowed.");
        errors.add("email", "This e-mail address is not allowed.");

        assert_eq!(errors.get("email").unwrap().len(), 1);
    }

    #[test]
    fn test_extend() {
        let mut errors = FieldErrors::new();
        errors.extend(
            "password",
            vec![
                "This password is too short.".to_string(),
                "This password is too common.".to_string(),
            ],
        );

        assert_eq!(errors.get("password").unwrap().len(), 2);
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("username", "This username is not allowed.");

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"username":["This username is not allowed."]}"#);
    }
}
