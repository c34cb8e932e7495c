//! Plaintext credential loading

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors while reading a credential file
#[derive(Debug, Error)]
pub enum CredentialError {
    /// File could not be read
    #[error("cannot read credential file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but holds nothing usable
    #[error("credential file {0} is empty")]
    Empty(PathBuf),
}

/// Read a single credential from a plaintext file
///
/// Surrounding whitespace, including the trailing newline most editors add,
/// is stripped.
pub fn read_credential_file(path: impl AsRef<Path>) -> Result<String, CredentialError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty(path.to_path_buf()));
    }

    debug!(path = %path.display(), "Loaded credential");
    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_and_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  sk-test-123  ").unwrap();

        assert_eq!(read_credential_file(file.path()).unwrap(), "sk-test-123");
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(matches!(
            read_credential_file(file.path()),
            Err(CredentialError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_credential_file(dir.path().join("api_key")).unwrap_err();
        assert!(matches!(err, CredentialError::Unreadable { .. }));
        assert!(err.to_string().contains("api_key"));
    }
}
