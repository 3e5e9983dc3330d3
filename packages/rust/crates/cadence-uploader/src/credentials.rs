//! Basic-auth credentials stored as a single `username:password` line.

use std::fmt::{self, Debug, Formatter};
use std::path::Path;

use crate::error::CredentialsError;

/// Default credentials file name under the home directory.
pub const DEFAULT_AUTH_FILE_NAME: &str = ".grok-auth-data";

/// Username and password for the metrics endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Basic-auth user.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Read the first line of `path` and split it on `:`.
    ///
    /// # Errors
    ///
    /// [`CredentialsError::Read`] if the file cannot be read,
    /// [`CredentialsError::FieldCount`] unless the line has exactly two fields.
    pub fn from_file(path: &Path) -> Result<Self, CredentialsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let line = raw.lines().next().unwrap_or_default();
        let fields: Vec<&str> = line.split(':').collect();
        match fields.as_slice() {
            [username, password] => Ok(Self {
                username: (*username).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err(CredentialsError::FieldCount {
                path: path.to_path_buf(),
                found: fields.len(),
            }),
        }
    }
}
