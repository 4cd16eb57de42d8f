//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for a subject's display name.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Unique identifier for a questionnaire session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random SessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Stable string key of a catalog question (e.g. `b1_q1_free_play`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a QuestionId, rejecting empty or whitespace-only keys.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("question_id"));
        }
        Ok(Self(id))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for QuestionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QuestionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Name under which the subject's report is filed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectName(String);

impl SubjectName {
    /// Creates a SubjectName from user input, trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("subject"));
        }
        if trimmed.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(ValidationError::invalid_format(
                "subject",
                format!("must be {} characters or less", MAX_SUBJECT_LENGTH),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_generates_unique_values() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_parses_from_its_display_form() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[test]
    fn question_id_rejects_blank_keys() {
        assert!(QuestionId::new("").is_err());
        assert!(QuestionId::new("   ").is_err());
    }

    #[test]
    fn question_id_compares_with_str() {
        let id = QuestionId::new("b1_q1_free_play").unwrap();
        assert_eq!(id, "b1_q1_free_play");
        assert_eq!(id.as_str(), "b1_q1_free_play");
    }

    #[test]
    fn question_id_serializes_as_plain_string() {
        let id = QuestionId::new("c1_q1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c1_q1\"");
    }

    #[test]
    fn subject_name_is_trimmed() {
        let name = SubjectName::new("  Aselya  ").unwrap();
        assert_eq!(name.as_str(), "Aselya");
    }

    #[test]
    fn subject_name_rejects_blank() {
        assert!(matches!(
            SubjectName::new(" \t"),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn subject_name_rejects_too_long() {
        let long = "x".repeat(MAX_SUBJECT_LENGTH + 1);
        assert!(matches!(
            SubjectName::new(long),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
