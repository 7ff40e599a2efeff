//! Small standalone exercises: a JSON-backed `Person` and a palindrome check.

use std::path::{Path, PathBuf};

use restcheck_infrastructure::serialization::{SerializationError, from_json};
use serde::{Deserialize, Serialize};

/// Error reading a [`Person`] file.
#[derive(Debug, thiserror::Error)]
pub enum PersonFileError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a person record.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

/// A person record as stored in the sample JSON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// First name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// `male` or `female`.
    pub sex: String,
}

impl Person {
    /// Creates a person.
    pub fn new(name: impl Into<String>, age: u32, sex: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            sex: sex.into(),
        }
    }

    /// Reads a person from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a person.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PersonFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PersonFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(from_json(&text)?)
    }

    /// Encodes the person as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Whether the name contains `letter`, ignoring case.
    #[must_use]
    pub fn name_contains(&self, letter: char) -> bool {
        self.name
            .to_lowercase()
            .contains(letter.to_lowercase().collect::<String>().as_str())
    }
}

/// Whether `text` reads the same backwards, ignoring case and every
/// character that is not a letter or digit.
#[must_use]
pub fn is_palindrome(text: &str) -> bool {
    let chars: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    chars.iter().eq(chars.iter().rev())
}
