//! Bearer session management

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::UserProfile;
use crate::session::{Session, SessionStore};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TelegramLogin<'a> {
    init_data: &'a str,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    token: String,
    user: UserProfile,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: UserProfile,
}

/// Holds the bearer token and the cached current user
///
/// The session is loaded from the store on construction and written back on
/// every change, so a restarted client picks up where it left off.
pub struct AuthManager {
    api: ApiClient,
    store: Arc<dyn SessionStore>,
    session: RwLock<Session>,
}

impl AuthManager {
    pub fn new(api: ApiClient, store: Arc<dyn SessionStore>) -> ClientResult<Self> {
        let session = store.load()?;
        Ok(Self {
            api,
            store,
            session: RwLock::new(session),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().token.is_some()
    }

    /// Token for a protected call; fails without touching the network
    pub(crate) fn bearer(&self) -> ClientResult<String> {
        self.token().ok_or(ClientError::NotAuthenticated)
    }

    fn store_session(&self, session: Session) -> ClientResult<()> {
        self.store.save(&session)?;
        *self.session.write() = session;
        Ok(())
    }

    /// Exchange Mini App init data for a bearer token
    pub async fn login_with_telegram(&self, init_data: &str) -> ClientResult<UserProfile> {
        let LoginEnvelope { token, user } = self
            .api
            .send_json(
                Method::POST,
                "auth/telegram",
                &TelegramLogin { init_data },
                None,
            )
            .await?;

        self.store_session(Session {
            token: Some(token),
            user: Some(user.clone()),
        })?;

        tracing::info!(user_id = %user.id, "Logged in with Telegram");

        Ok(user)
    }

    /// Re-validate the stored token and refresh the cached user
    ///
    /// Returns `false` without a token. A 401 or 403 from the server drops
    /// the session; transport errors are returned and leave it intact.
    pub async fn check_auth(&self) -> ClientResult<bool> {
        let Some(token) = self.token() else {
            return Ok(false);
        };

        let result: ClientResult<UserEnvelope> = self
            .api
            .send_empty(Method::POST, "auth/verify", Some(&token))
            .await;

        match result {
            Ok(UserEnvelope { user }) => {
                self.store_session(Session {
                    token: Some(token),
                    user: Some(user),
                })?;
                Ok(true)
            }
            Err(e)
                if matches!(
                    e.status(),
                    Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
                ) =>
            {
                tracing::warn!(error = %e, "Stored session rejected, logging out");
                self.logout()?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.store.clear()?;
        *self.session.write() = Session::default();
        Ok(())
    }

    /// Headers for a JSON request, with `Authorization` when logged in
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Stored token is not a valid header value"),
            }
        }

        headers
    }

    /// The verified current user, or `NotAuthenticated`
    pub async fn require_auth(&self) -> ClientResult<UserProfile> {
        if !self.check_auth().await? {
            return Err(ClientError::NotAuthenticated);
        }
        self.current_user().ok_or(ClientError::NotAuthenticated)
    }
}
