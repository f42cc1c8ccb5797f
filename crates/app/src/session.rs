//! Process-wide session state.
//!
//! The hosted auth provider issues HS256 access tokens. A verified token
//! becomes an [`Identity`], and [`SessionStore::apply`] is the only way the
//! current identity changes. Screens read it with [`SessionStore::current`].

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use wedplan_core::roles::Role;
use wedplan_core::types::UserId;

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Profile fields the auth provider copies into every token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Role chosen at sign-up. Unknown values are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Claims carried by the auth provider's access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's account id.
    pub sub: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    pub aud: String,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Claims {
    /// Role requested at sign-up, if it names a known role.
    pub fn requested_role(&self) -> Option<Role> {
        self.user_metadata.role.as_deref()?.parse().ok()
    }
}

/// Verification settings for access tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth provider.
    pub secret: String,
    /// Expected `aud` claim.
    pub audience: String,
}

/// Validate and decode an access token.
///
/// Checks the signature, expiry and audience.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Sign claims the way the auth provider does. Used by local tooling and tests.
pub fn encode_token(claims: &Claims, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

/// The signed-in user as seen by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        let email = claims.email.clone().unwrap_or_default();
        let full_name = claims
            .user_metadata
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.clone());
        Self {
            id: claims.sub,
            email,
            full_name,
        }
    }
}

/// Sign-in state change reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Identity),
    SignedOut,
}

/// Holds the current identity. One instance per running application,
/// shared behind an `Arc`.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<Option<Identity>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// The signed-in identity, or `None` when nobody is signed in.
    pub fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    /// Apply an auth event. Takes effect before this returns.
    pub fn apply(&self, event: AuthEvent) {
        let next = match event {
            AuthEvent::SignedIn(identity) => {
                tracing::info!(user_id = %identity.id, "Session signed in");
                Some(identity)
            }
            AuthEvent::SignedOut => {
                tracing::info!("Session signed out");
                None
            }
        };
        self.tx.send_replace(next);
    }
}
