//! Session management for authenticated API calls.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::auth::{Credentials, Modhash, SessionCookie};
use crate::endpoints::{
    self, API_TYPE_JSON, COMMENT, CommentForm, LOGIN, ListingQuery, LoginData, LoginForm, ME,
    ThingsData,
};
use crate::error::{AuthError, DecodeError, Error, InvalidInputError};
use crate::model::{Account, CommentResult};
use crate::paginator::Paginator;
use crate::ratelimit::RateLimit;
use crate::reply::parse_api_reply;
use crate::thing::{Kind, Listing, Thing};
use crate::transport::{Reply, Transport, auth_headers};
use crate::types::{ApiUrl, Fullname};

/// A session against the API. Unauthenticated until [`Session::login`] or
/// [`Session::set_cookie`] succeeds.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Each HTTP call and the rate-limit update that follows
/// it run under one lock, so [`Session::rate_limit`] never observes a torn
/// state. Nothing is retried or throttled automatically.
///
/// # Example
///
/// ```no_run
/// use snoo::{Credentials, Session};
///
/// # async fn example() -> Result<(), snoo::Error> {
/// let session = Session::new("snoo-example/0.1")?;
/// session.login(&Credentials::new("spez", "hunter2")).await?;
///
/// let me = session.me().await?;
/// println!("Logged in as: {}", me.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    transport: Transport,
    auth: RwLock<AuthState>,
}

#[derive(Default)]
struct AuthState {
    cookie: Option<SessionCookie>,
    modhash: Option<Modhash>,
}

impl Session {
    /// Create an unauthenticated session against the default API host.
    ///
    /// # Errors
    ///
    /// Returns an error if `user_agent` cannot be sent as a header.
    pub fn new(user_agent: &str) -> Result<Self, Error> {
        Self::with_base_url(ApiUrl::default(), user_agent)
    }

    /// Create an unauthenticated session against `api`.
    pub fn with_base_url(api: ApiUrl, user_agent: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: Arc::new(SessionInner {
                transport: Transport::new(api, user_agent)?,
                auth: RwLock::new(AuthState::default()),
            }),
        })
    }

    /// Returns the API base URL for this session.
    pub fn api_url(&self) -> &ApiUrl {
        self.inner.transport.api()
    }

    /// Authenticate with a user name and password.
    ///
    /// Existing cookie and modhash are discarded before the request is sent,
    /// so a failed login leaves the session unauthenticated. Incomplete
    /// credentials are rejected up front and leave the session untouched.
    ///
    /// # Errors
    ///
    /// [`AuthError::MissingCredentials`] for an empty user or password,
    /// [`Error::Api`] when the server rejects the login.
    #[instrument(skip(self, credentials), fields(user = %credentials.user()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        if !credentials.is_complete() {
            return Err(AuthError::MissingCredentials.into());
        }

        info!("Logging in");
        self.logout().await;

        let form = LoginForm {
            api_type: API_TYPE_JSON,
            user: credentials.user(),
            passwd: credentials.password(),
        };
        let reply = self.post_form(LOGIN, &form).await?.ensure_success()?;
        let data: LoginData = parse_api_reply(&reply.body)?.payload()?;

        if data.cookie.is_empty() {
            return Err(DecodeError::EmptyResult {
                what: "login cookie".to_string(),
            }
            .into());
        }

        let mut auth = self.inner.auth.write().await;
        auth.cookie = Some(SessionCookie::from_login_token(&data.cookie));
        auth.modhash = Some(Modhash::new(data.modhash)).filter(|m| !m.as_str().is_empty());

        debug!("Login succeeded");
        Ok(())
    }

    /// Adopt a pre-authenticated cookie and look up the modhash for it.
    ///
    /// # Errors
    ///
    /// [`AuthError::BadCookie`] if the lookup succeeds but returns no
    /// modhash. The cookie is discarded whenever this returns an error.
    #[instrument(skip(self, cookie))]
    pub async fn set_cookie(&self, cookie: SessionCookie) -> Result<(), Error> {
        info!("Adopting session cookie");

        {
            let mut auth = self.inner.auth.write().await;
            auth.cookie = Some(cookie);
            auth.modhash = None;
        }

        let lookup = self.me().await;

        let mut auth = self.inner.auth.write().await;
        if let Err(e) = lookup {
            auth.cookie = None;
            return Err(e);
        }
        if auth.modhash.is_none() {
            auth.cookie = None;
            return Err(AuthError::BadCookie.into());
        }

        debug!("Cookie accepted");
        Ok(())
    }

    /// Forget the cookie and modhash.
    pub async fn logout(&self) {
        let mut auth = self.inner.auth.write().await;
        *auth = AuthState::default();
    }

    /// Export the current cookie for persistence.
    ///
    /// # Security
    ///
    /// Handle the returned cookie securely. It grants access to the account.
    pub async fn cookie(&self) -> Option<SessionCookie> {
        self.inner.auth.read().await.cookie.clone()
    }

    /// Returns `true` when both a cookie and a modhash are held.
    pub async fn is_authenticated(&self) -> bool {
        let auth = self.inner.auth.read().await;
        auth.cookie.is_some() && auth.modhash.is_some()
    }

    /// Rate-limit counters as of the most recent completed call.
    pub async fn rate_limit(&self) -> RateLimit {
        self.inner.transport.rate_limit().await
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// The session's own account. Also refreshes the stored modhash.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<Account, Error> {
        debug!("Fetching own account");

        let account = self.get_account(ME).await?;

        if let Some(modhash) = account.modhash.as_deref().filter(|m| !m.is_empty()) {
            self.inner.auth.write().await.modhash = Some(Modhash::new(modhash));
        }

        Ok(account)
    }

    /// Another user's public account.
    #[instrument(skip(self))]
    pub async fn user(&self, name: &str) -> Result<Account, Error> {
        debug!("Fetching user account");

        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(InvalidInputError::UserName {
                value: name.to_string(),
            }
            .into());
        }

        self.get_account(&endpoints::user_about(name)).await
    }

    async fn get_account(&self, method: &str) -> Result<Account, Error> {
        let url = self.api_url().method_url(method);
        let reply = self
            .inner
            .transport
            .get(&url, self.headers().await?)
            .await?
            .ensure_success()?;

        let thing: Thing = serde_json::from_str(&reply.body)?;
        thing.expect_kind(&Kind::Account)?;
        Ok(serde_json::from_value(thing.data)?)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Post `text` as a reply to `parent`.
    ///
    /// # Errors
    ///
    /// [`Error::Status`] for a non-success HTTP status, [`Error::Api`] for an
    /// error envelope, and [`DecodeError::EmptyResult`] when the reply holds
    /// no things.
    #[instrument(skip(self, text), fields(%parent))]
    pub async fn comment(&self, parent: &Fullname, text: &str) -> Result<CommentResult, Error> {
        debug!("Posting comment");

        let form = CommentForm {
            api_type: API_TYPE_JSON,
            thing_id: parent.as_str(),
            text,
        };
        let reply = self.post_form(COMMENT, &form).await?.ensure_success()?;
        let data: ThingsData = parse_api_reply(&reply.body)?.payload()?;

        let first = data
            .things
            .into_iter()
            .next()
            .ok_or_else(|| DecodeError::EmptyResult {
                what: "comment reply things".to_string(),
            })?;

        Ok(serde_json::from_value(first.data)?)
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// A paginator over a listing endpoint such as "r/rust/new".
    pub fn listing(&self, path: &str) -> Paginator {
        let url = self.api_url().method_url(&endpoints::listing(path));
        Paginator::new(self.clone(), url)
    }

    /// A paginator over a subreddit's front page.
    pub fn subreddit(&self, name: &str) -> Paginator {
        self.listing(&format!("r/{}", name))
    }

    /// Fetch one listing page.
    pub(crate) async fn fetch_listing(
        &self,
        url: &str,
        query: &ListingQuery<'_>,
    ) -> Result<Listing, Error> {
        let reply = self
            .inner
            .transport
            .get_with_query(url, query, self.headers().await?)
            .await?
            .ensure_success()?;

        let thing: Thing = serde_json::from_str(&reply.body)?;
        Listing::try_from(thing)
    }

    // ========================================================================
    // Plumbing
    // ========================================================================

    async fn headers(&self) -> Result<HeaderMap, Error> {
        let auth = self.inner.auth.read().await;
        auth_headers(auth.cookie.as_ref(), auth.modhash.as_ref())
    }

    async fn post_form<F: Serialize>(&self, method: &str, form: &F) -> Result<Reply, Error> {
        let url = self.api_url().method_url(method);
        self.inner
            .transport
            .post_form(&url, form, self.headers().await?)
            .await
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", self.api_url())
            .field("auth", &"[REDACTED]")
            .finish()
    }
}
