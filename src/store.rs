// Credential store: a flat CSV file loaded fully into memory and
// rewritten on every mutation. The file lives at `regno.csv` unless the
// caller picks another path; a missing file just means an empty store.
//
// Rows are kept in a BTreeMap keyed by email so the rewritten file has a
// stable order. Security answers are stored lowercased and in plaintext,
// passwords as unsalted SHA-256 hex digests (see `password`), both
// faithful to the data this tool inherits.

use crate::password::{hash_password, validate_password, verify_password, PasswordPolicyError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default location of the store file, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "regno.csv";

/// Errors surfaced by store operations. All of them are reported to the
/// user as printed messages; none corrupt the in-memory mapping.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user {email} already exists")]
    DuplicateEmail { email: String },

    #[error("no account registered for {email}")]
    UnknownEmail { email: String },

    #[error("incorrect security answer")]
    WrongAnswer,

    #[error(transparent)]
    Policy(#[from] PasswordPolicyError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// One row of the store file. `password` is the SHA-256 hex digest of the
/// real password; `answer` is kept lowercased. Field order matches the
/// `email,password,security_question,answer` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub answer: String,
}

/// The full user mapping plus the path it persists to. Mutating
/// operations rewrite the file before returning.
pub struct CredentialStore {
    path: PathBuf,
    users: BTreeMap<String, UserRecord>,
}

impl CredentialStore {
    /// Load the store from `path`. A missing file is not an error: it
    /// yields an empty store, and the file is created on the first save.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut users = BTreeMap::new();
        match csv::Reader::from_path(&path) {
            Ok(mut reader) => {
                for row in reader.deserialize() {
                    let mut record: UserRecord = row.map_err(|source| StoreError::Csv {
                        path: path.clone(),
                        source,
                    })?;
                    // Answers are compared lowercased; normalize on load in
                    // case the file was edited by hand.
                    record.answer = record.answer.to_lowercase();
                    users.insert(record.email.clone(), record);
                }
                debug!(count = users.len(), path = %path.display(), "loaded credential store");
            }
            Err(err) if is_not_found(&err) => {
                warn!(path = %path.display(), "store file not found, starting empty");
            }
            Err(source) => return Err(StoreError::Csv { path, source }),
        }
        Ok(CredentialStore { path, users })
    }

    /// Rewrite the whole file from the in-memory mapping. Rows go out in
    /// email order under the `email,password,security_question,answer`
    /// header.
    pub fn save(&self) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|source| StoreError::Csv {
            path: self.path.clone(),
            source,
        })?;
        for record in self.users.values() {
            writer.serialize(record).map_err(|source| StoreError::Csv {
                path: self.path.clone(),
                source,
            })?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(count = self.users.len(), path = %self.path.display(), "saved credential store");
        Ok(())
    }

    /// Create a new account and persist it. Rejects duplicate emails and
    /// passwords that fail the policy; stores the password digest, never
    /// the raw password, and the answer lowercased.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        security_question: &str,
        answer: &str,
    ) -> Result<(), StoreError> {
        if self.users.contains_key(email) {
            return Err(StoreError::DuplicateEmail {
                email: email.to_string(),
            });
        }
        validate_password(password)?;
        let record = UserRecord {
            email: email.to_string(),
            password: hash_password(password),
            security_question: security_question.to_string(),
            answer: answer.to_lowercase(),
        };
        self.users.insert(email.to_string(), record);
        self.save()
    }

    /// Check one login attempt. Unknown emails and wrong passwords are
    /// both a plain `false`; the caller owns the attempt counting.
    pub fn check_login(&self, email: &str, password: &str) -> bool {
        self.users
            .get(email)
            .is_some_and(|record| verify_password(&record.password, password))
    }

    /// Security question for a registered email, if any.
    pub fn security_question(&self, email: &str) -> Option<&str> {
        self.users.get(email).map(|r| r.security_question.as_str())
    }

    /// Reset the password after checking the security answer. The answer
    /// comparison is case-insensitive (answers are stored lowercased);
    /// on success only the password digest changes, and the file is
    /// rewritten.
    pub fn reset_password(
        &mut self,
        email: &str,
        answer: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let record = self
            .users
            .get_mut(email)
            .ok_or_else(|| StoreError::UnknownEmail {
                email: email.to_string(),
            })?;
        if record.answer != answer.to_lowercase() {
            return Err(StoreError::WrongAnswer);
        }
        validate_password(new_password)?;
        record.password = hash_password(new_password);
        self.save()
    }

    /// The record for an email, if registered.
    pub fn get(&self, email: &str) -> Option<&UserRecord> {
        self.users.get(email)
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Path the store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn is_not_found(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound)
}
