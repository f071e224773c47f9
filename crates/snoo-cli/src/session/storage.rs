//! Credential file for persisting login state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored credentials. A non-empty cookie takes precedence over the password.
#[derive(Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl std::fmt::Debug for StoredAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredAuth")
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// `auth.json` in the per-user data directory.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "snoo").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("auth.json"))
}

/// Save credentials, readable only by the current user.
pub fn save(path: &Path, auth: &StoredAuth) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    let json = serde_json::to_string_pretty(auth)?;
    fs::write(path, &json).context("Failed to write credential file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Load credentials, or `None` if the file does not exist.
pub fn load(path: &Path) -> Result<Option<StoredAuth>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).context("Failed to read credential file")?;
    let auth = serde_json::from_str(&json).context("Invalid credential file")?;

    Ok(Some(auth))
}

/// Remove the credential file. Returns `false` if there was none.
pub fn clear(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).context("Failed to remove credential file")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.json");

        let auth = StoredAuth {
            cookie: Some("reddit_session=abc".to_string()),
            user: Some("spez".to_string()),
            password: None,
        };
        save(&path, &auth).unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded, auth);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("password"));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("auth.json")).unwrap().is_none());
        assert!(!clear(&dir.path().join("auth.json")).unwrap());
    }

    #[test]
    fn partial_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, r#"{"user": "spez", "password": "hunter2"}"#).unwrap();

        let loaded = load(&path).unwrap().unwrap();
        assert!(loaded.cookie.is_none());
        assert_eq!(loaded.user.as_deref(), Some("spez"));
        assert_eq!(loaded.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "not json").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let auth = StoredAuth {
            cookie: Some("reddit_session=abc".to_string()),
            user: Some("spez".to_string()),
            password: Some("hunter2".to_string()),
        };
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("abc"));
        assert!(debug.contains("spez"));
    }

    #[cfg(unix)]
    #[test]
    fn file_is_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        save(&path, &StoredAuth::default()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
