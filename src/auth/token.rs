//! Defines the claims carried by a bearer token and the keys used to sign and verify tokens.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long a token is valid for after it is issued.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(7);

/// The claims encoded in a bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub user_id: UserID,
    /// The email of the user at the time the token was issued.
    pub email: String,
    /// Issued at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry time, seconds since the Unix epoch.
    pub exp: i64,
}

/// The keys for signing and verifying tokens with the server secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    duration: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Create the keys from the server `secret`. Issued tokens expire after `duration`.
    pub fn new(secret: &str, duration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            duration,
        }
    }

    /// How long issued tokens are valid for.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Issue a token for a user that is valid from now.
    ///
    /// # Errors
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue(&self, user_id: &UserID, email: &str) -> Result<String, Error> {
        self.issue_at(user_id, email, OffsetDateTime::now_utc())
    }

    /// Issue a token for a user that is valid from `issued_at`.
    ///
    /// # Errors
    /// Returns [Error::TokenCreation] if the token could not be signed.
    pub fn issue_at(
        &self,
        user_id: &UserID,
        email: &str,
        issued_at: OffsetDateTime,
    ) -> Result<String, Error> {
        let claims = Claims {
            user_id: user_id.clone(),
            email: email.to_owned(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + self.duration).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| Error::TokenCreation(error.to_string()))
    }

    /// Check the signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    /// Returns [Error::ExpiredToken] if the token is past its expiry time and
    /// [Error::InvalidToken] for any other problem with the token.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|error| match error.kind() {
                ErrorKind::ExpiredSignature => Error::ExpiredToken,
                _ => Error::InvalidToken,
            })
    }
}
