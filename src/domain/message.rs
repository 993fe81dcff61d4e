use crate::error::{AppError, Result};

/// A persisted message. The id is assigned by the database and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub text: String,
}

/// Message text that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    text: String,
}

impl NewMessage {
    /// Validates raw input into a message ready for insertion.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if the text is missing, empty, whitespace only,
    /// or contains a NUL character (which Postgres `TEXT` cannot store).
    pub fn new(text: Option<String>) -> Result<Self> {
        match text {
            None => Err(AppError::BadRequest("Message text is required".to_string())),
            Some(text) if text.trim().is_empty() => {
                Err(AppError::BadRequest("Message text must not be empty".to_string()))
            }
            Some(text) if text.contains('\0') => {
                Err(AppError::BadRequest("Message text must not contain NUL characters".to_string()))
            }
            Some(text) => Ok(Self { text }),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
