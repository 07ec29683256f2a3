use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::{Database, DatabaseError, NewUser, UserData, UserRole};

pub struct Auth<Db> {
    db: Arc<Db>,
    codec: TokenCodec,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Token is missing a valid signature or has expired
    #[error("Invalid or expired token")]
    InvalidToken,
    /// The caller's role does not grant the required capability
    #[error("Insufficient privileges")]
    Forbidden,
    /// Something else went wrong with the database
    #[error(transparent)]
    Db(DatabaseError),
    #[error("TokenError: {0}")]
    TokenError(String),
}

/// The payload embedded in every issued session token.
///
/// Validity is purely cryptographic, nothing is stored server side. The
/// embedded email must still resolve to a stored user for role-gated
/// routes to succeed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Standard JWT subject, set to the user's email
    pub sub: String,
    /// Issued at (unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }
}

/// Signs and verifies session tokens. Storage and transmission of the token
/// is the transport layer's concern.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    const TOKEN_DURATION_IN_DAYS: i64 = 365;

    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Signs a new token for the given email
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.issue_at(email, Utc::now())
    }

    fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = now + Duration::days(Self::TOKEN_DURATION_IN_DAYS);

        let claims = Claims {
            sub: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Returns the claims of a token, if the signature checks out and it
    /// has not expired
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

/// The profile posted on login. Roles other than `Requested` are only
/// honored when the user does not exist yet.
#[derive(Debug)]
pub struct LoginProfile {
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
}

impl<Db> Auth<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>, token_secret: &str) -> Self {
        Self {
            db: db.clone(),
            codec: TokenCodec::new(token_secret),
        }
    }

    /// Signs a session token for the given email
    pub fn issue_token(&self, email: &str) -> Result<String, AuthError> {
        self.codec.issue(email)
    }

    /// Verifies a session token, returning its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.codec.verify(token)
    }

    /// Looks up the user stored under the given email, if any
    pub async fn resolve_user(&self, email: &str) -> Result<Option<UserData>, DatabaseError> {
        match self.db.user_by_email(email).await {
            Ok(user) => Ok(Some(user)),
            Err(DatabaseError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Looks up the role stored for the given email. `None` means no such
    /// user exists, which callers must not conflate with a low-privilege
    /// role.
    pub async fn resolve_role(&self, email: &str) -> Result<Option<UserRole>, DatabaseError> {
        Ok(self.resolve_user(email).await?.map(|user| user.role))
    }

    /// Checks that the caller's stored role matches the required capability
    /// exactly. There is no hierarchy, an admin does not pass a host check.
    pub async fn authorize(&self, email: &str, required: UserRole) -> Result<UserData, AuthError> {
        let user = self.resolve_user(email).await.map_err(AuthError::Db)?;

        match user {
            Some(user) if user.role == required => Ok(user),
            _ => Err(AuthError::Forbidden),
        }
    }

    /// Stores a user on first login, or handles a returning one.
    ///
    /// A returning user posting the `Requested` role is asking for a host
    /// upgrade, which an admin approves later. Anything else a returning
    /// user posts is ignored.
    pub async fn upsert_user(&self, profile: LoginProfile) -> Result<UserData, DatabaseError> {
        match self.db.user_by_email(&profile.email).await {
            Ok(existing) => {
                if profile.role == Some(UserRole::Requested) {
                    self.db
                        .update_user_role(&existing.email, UserRole::Requested)
                        .await
                } else {
                    Ok(existing)
                }
            }
            Err(DatabaseError::NotFound { .. }) => {
                self.db
                    .create_user(NewUser {
                        email: profile.email,
                        name: profile.name,
                        role: profile.role.unwrap_or(UserRole::Guest),
                    })
                    .await
            }
            Err(e) => Err(e),
        }
    }

    /// Sets a user's role, refreshing the stored timestamp
    pub async fn set_role(&self, email: &str, role: UserRole) -> Result<UserData, DatabaseError> {
        self.db.update_user_role(email, role).await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::{Duration, Utc};

    use super::{Auth, AuthError, LoginProfile, TokenCodec};
    use crate::{MemoryDatabase, UserRole};

    const SECRET: &str = "test-secret";

    fn auth() -> Auth<MemoryDatabase> {
        Auth::new(&Arc::new(MemoryDatabase::new()), SECRET)
    }

    fn profile(email: &str, role: Option<UserRole>) -> LoginProfile {
        LoginProfile {
            email: email.to_string(),
            name: "Test User".to_string(),
            role,
        }
    }

    #[test]
    fn token_round_trip() {
        let codec = TokenCodec::new(SECRET);

        let token = codec.issue("mary@example.com").expect("token is issued");
        let claims = codec.verify(&token).expect("token verifies");

        assert_eq!(claims.email(), "mary@example.com");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let codec = TokenCodec::new(SECRET);
        let other = TokenCodec::new("other-secret");

        let token = other.issue("mary@example.com").expect("token is issued");

        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::new(SECRET);

        let issued_at = Utc::now() - Duration::days(366);
        let token = codec
            .issue_at("mary@example.com", issued_at)
            .expect("token is issued");

        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn authorize_checks_exact_role() {
        let auth = auth();

        auth.upsert_user(profile("host@example.com", Some(UserRole::Host)))
            .await
            .unwrap();
        auth.upsert_user(profile("admin@example.com", Some(UserRole::Admin)))
            .await
            .unwrap();

        assert!(auth
            .authorize("host@example.com", UserRole::Host)
            .await
            .is_ok());

        // A host asking for admin statistics is refused
        assert!(matches!(
            auth.authorize("host@example.com", UserRole::Admin).await,
            Err(AuthError::Forbidden)
        ));

        // No hierarchy, an admin does not pass a host check
        assert!(matches!(
            auth.authorize("admin@example.com", UserRole::Host).await,
            Err(AuthError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn authorize_rejects_unknown_email() {
        let auth = auth();

        assert!(matches!(
            auth.authorize("nobody@example.com", UserRole::Guest).await,
            Err(AuthError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn upsert_stores_first_login_and_keeps_returning_users() {
        let auth = auth();

        let created = auth
            .upsert_user(profile("mary@example.com", None))
            .await
            .unwrap();
        assert_eq!(created.role, UserRole::Guest);

        // Logging in again with a different posted role changes nothing
        let returning = auth
            .upsert_user(profile("mary@example.com", Some(UserRole::Admin)))
            .await
            .unwrap();
        assert_eq!(returning.id, created.id);
        assert_eq!(returning.role, UserRole::Guest);
    }

    #[tokio::test]
    async fn upsert_applies_requested_upgrade() {
        let auth = auth();

        auth.upsert_user(profile("mary@example.com", None))
            .await
            .unwrap();

        let upgraded = auth
            .upsert_user(profile("mary@example.com", Some(UserRole::Requested)))
            .await
            .unwrap();

        assert_eq!(upgraded.role, UserRole::Requested);
    }
}
