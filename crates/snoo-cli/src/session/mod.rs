//! Building a library session from the CLI configuration.

pub mod storage;

use anyhow::{Context, Result, bail};
use snoo::{Credentials, Session, SessionCookie};
use tracing::debug;

use crate::cli::Config;

use storage::StoredAuth;

/// An unauthenticated session.
pub fn anonymous(config: &Config) -> Result<Session> {
    Session::with_base_url(config.api_url()?, &config.user_agent)
        .context("Failed to create session")
}

/// A session restored from the credential file.
///
/// A stored cookie is preferred; user and password are only used when no
/// cookie is stored. With `required` unset, a missing file yields an
/// anonymous session instead of an error.
pub async fn open(config: &Config, required: bool) -> Result<Session> {
    let session = anonymous(config)?;
    let path = config.auth_path()?;

    let Some(stored) = storage::load(&path)? else {
        if required {
            bail!("Not logged in. Run 'snoo login' first.");
        }
        return Ok(session);
    };

    match stored {
        StoredAuth {
            cookie: Some(cookie),
            ..
        } if !cookie.is_empty() => {
            debug!(path = %path.display(), "Restoring stored cookie");
            session
                .set_cookie(SessionCookie::new(cookie))
                .await
                .context("Stored cookie was rejected. Run 'snoo login' again.")?;
        }
        StoredAuth {
            user: Some(user),
            password: Some(password),
            ..
        } => {
            debug!(path = %path.display(), "Logging in with stored password");
            let credentials = Credentials::new(&user, &password);
            session
                .login(&credentials)
                .await
                .context("Failed to login with stored credentials")?;

            let refreshed = StoredAuth {
                cookie: session.cookie().await.map(|c| c.as_str().to_string()),
                user: Some(user),
                password: Some(password),
            };
            storage::save(&path, &refreshed).context("Failed to save credentials")?;
        }
        _ if required => bail!("Credential file {} is incomplete", path.display()),
        _ => {}
    }

    Ok(session)
}
