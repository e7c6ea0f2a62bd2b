// Marquee
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Verification of tokens and of the permissions they carry.

use crate::remote::default_jwks_url;
use crate::{
    AuthError, AuthResult, CachingKeyStore, CachingKeyStoreOptions, KeyStore, RemoteKeyStore,
    get_bearer_token,
};
use http::HeaderMap;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use log::warn;
use marquee_core::env::{get_optional_var, get_required_var};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Configuration of the token verifier.
#[derive(Clone, Debug, PartialEq)]
pub struct JwtOptions {
    /// Expected issuer of the tokens (the `iss` claim).  Usually the URL of the identity
    /// provider's tenant, ending in a slash.
    pub issuer: String,

    /// Expected audience of the tokens (the `aud` claim).
    pub audience: String,

    /// Location of the JWKS document.  Defaults to `<issuer>.well-known/jwks.json`.
    pub jwks_url: Option<Url>,

    /// Configuration of the in-memory cache of signing keys.
    pub cache: CachingKeyStoreOptions,
}

impl JwtOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_ISSUER`, `<prefix>_AUDIENCE`,
    /// `<prefix>_JWKS_URL`, `<prefix>_JWKS_CACHE_TTL` and `<prefix>_JWKS_CACHE_CAPACITY`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let jwks_url = match get_optional_var::<String>(prefix, "JWKS_URL")? {
            Some(raw) => Some(
                Url::parse(&raw)
                    .map_err(|e| format!("Invalid URL in {}_JWKS_URL: {}", prefix, e))?,
            ),
            None => None,
        };
        Ok(Self {
            issuer: get_required_var::<String>(prefix, "ISSUER")?,
            audience: get_required_var::<String>(prefix, "AUDIENCE")?,
            jwks_url,
            cache: CachingKeyStoreOptions::from_env(&format!("{}_JWKS_CACHE", prefix))?,
        })
    }
}

/// Claims of a verified token that are relevant to authorization decisions.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject the token was issued to.
    #[serde(default)]
    pub sub: Option<String>,

    /// Permissions granted to the subject, if the issuer included them.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Checks whether the token grants `permission`.
    fn check_permission(&self, permission: &str) -> AuthResult<()> {
        match self.permissions.as_ref() {
            None => Err(AuthError::unauthorized(
                "invalid_claims",
                "Permissions not included in token",
            )),
            Some(permissions) if permissions.iter().any(|p| p == permission) => Ok(()),
            Some(_) => Err(AuthError::forbidden("unauthorized", "Permission not found")),
        }
    }
}

/// Verifies bearer tokens against the keys published by the issuer.
#[derive(Clone)]
pub struct JwtVerifier {
    /// Source of the public keys to verify token signatures with.
    keys: Arc<dyn KeyStore + Send + Sync>,

    /// Rules to validate the token claims.
    validation: Arc<Validation>,
}

impl JwtVerifier {
    /// Creates a new verifier that trusts the keys in `keys` and only accepts tokens minted by
    /// `issuer` for `audience`.
    pub fn new(keys: Arc<dyn KeyStore + Send + Sync>, issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_nbf = true;
        Self { keys, validation: Arc::from(validation) }
    }

    /// Creates a new verifier that fetches the issuer's keys over HTTP, as configured by `opts`.
    pub fn from_options(opts: JwtOptions) -> Result<Self, String> {
        let url = match opts.jwks_url {
            Some(url) => url,
            None => default_jwks_url(&opts.issuer)?,
        };
        let keys = CachingKeyStore::new(opts.cache, RemoteKeyStore::new(url));
        Ok(Self::new(Arc::from(keys), &opts.issuer, &opts.audience))
    }

    /// Verifies the signature and the standard claims of `token` and returns its claims.
    pub async fn verify(&self, token: &str) -> AuthResult<Claims> {
        let header = decode_header(token).map_err(|e| {
            AuthError::unauthorized(
                "invalid_header",
                format!("Unable to parse authentication token: {}", e),
            )
        })?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::unauthorized(
                "invalid_header",
                format!("Unsupported signing algorithm {:?}", header.alg),
            ));
        }
        let kid = match header.kid {
            Some(kid) => kid,
            None => {
                return Err(AuthError::unauthorized("invalid_header", "Authorization malformed"));
            }
        };

        let jwk = match self.keys.find(&kid).await {
            Ok(Some(jwk)) => jwk,
            Ok(None) => {
                return Err(AuthError::unauthorized(
                    "invalid_header",
                    "Unable to find the appropriate key",
                ));
            }
            Err(e) => {
                warn!("Cannot fetch signing key {}: {}", kid, e);
                return Err(AuthError::unavailable("Unable to fetch the signing keys"));
            }
        };
        let key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            warn!("Signing key {} is unusable: {}", kid, e);
            AuthError::unauthorized("invalid_header", "Unable to find the appropriate key")
        })?;

        match decode::<Claims>(token, &key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AuthError::unauthorized("token_expired", "Token expired")
                }
                ErrorKind::InvalidAudience
                | ErrorKind::InvalidIssuer
                | ErrorKind::ImmatureSignature
                | ErrorKind::MissingRequiredClaim(_) => AuthError::unauthorized(
                    "invalid_claims",
                    "Incorrect claims. Please, check the audience and issuer",
                ),
                ErrorKind::InvalidSignature => {
                    AuthError::unauthorized("invalid_signature", "Token signature is invalid")
                }
                _ => AuthError::unauthorized(
                    "invalid_header",
                    format!("Unable to parse authentication token: {}", e),
                ),
            }),
        }
    }

    /// Verifies the bearer token in `headers` and checks that it grants `permission`.
    pub async fn authorize(&self, headers: &HeaderMap, permission: &str) -> AuthResult<Claims> {
        let token = get_bearer_token(headers)?;
        let claims = self.verify(token).await?;
        claims.check_permission(permission)?;
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticKeyStore;
    use crate::testutils::*;
    use http::StatusCode;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_options_from_env_required_only() {
        let overrides = [
            ("AUTH_ISSUER", Some("https://tenant.example.com/")),
            ("AUTH_AUDIENCE", Some("coffee")),
            ("AUTH_JWKS_URL", None),
            ("AUTH_JWKS_CACHE_TTL", None),
            ("AUTH_JWKS_CACHE_CAPACITY", None),
        ];
        temp_env::with_vars(overrides, || {
            let opts = JwtOptions::from_env("AUTH").unwrap();
            assert_eq!(
                JwtOptions {
                    issuer: "https://tenant.example.com/".to_owned(),
                    audience: "coffee".to_owned(),
                    jwks_url: None,
                    cache: CachingKeyStoreOptions::default(),
                },
                opts
            );
        });
    }

    #[test]
    fn test_options_from_env_all_present() {
        let overrides = [
            ("AUTH_ISSUER", Some("https://tenant.example.com/")),
            ("AUTH_AUDIENCE", Some("coffee")),
            ("AUTH_JWKS_URL", Some("https://keys.example.com/jwks.json")),
            ("AUTH_JWKS_CACHE_TTL", Some("1h")),
            ("AUTH_JWKS_CACHE_CAPACITY", Some("3")),
        ];
        temp_env::with_vars(overrides, || {
            let opts = JwtOptions::from_env("AUTH").unwrap();
            assert_eq!(
                JwtOptions {
                    issuer: "https://tenant.example.com/".to_owned(),
                    audience: "coffee".to_owned(),
                    jwks_url: Some(Url::parse("https://keys.example.com/jwks.json").unwrap()),
                    cache: CachingKeyStoreOptions { ttl: Duration::from_secs(3600), capacity: 3 },
                },
                opts
            );
        });
    }

    #[test]
    fn test_options_from_env_missing() {
        let overrides =
            [("AUTH_ISSUER", Some("https://tenant.example.com/")), ("AUTH_AUDIENCE", None)];
        temp_env::with_vars(overrides, || {
            let err = JwtOptions::from_env("AUTH").unwrap_err();
            assert!(err.contains("AUTH_AUDIENCE"));
        });
    }

    #[test]
    fn test_options_from_env_bad_url() {
        let overrides = [
            ("AUTH_ISSUER", Some("https://tenant.example.com/")),
            ("AUTH_AUDIENCE", Some("coffee")),
            ("AUTH_JWKS_URL", Some("not a url")),
        ];
        temp_env::with_vars(overrides, || {
            let err = JwtOptions::from_env("AUTH").unwrap_err();
            assert!(err.starts_with("Invalid URL in AUTH_JWKS_URL"));
        });
    }

    /// Verifies `token` with the test verifier and expects a 401 failure with `exp_code`.
    async fn do_verify_error_test(exp_code: &str, token: &str) {
        let e = test_verifier().verify(token).await.unwrap_err();
        assert_eq!(StatusCode::UNAUTHORIZED, e.status());
        assert_eq!(exp_code, e.code(), "Unexpected error: {}", e);
    }

    #[tokio::test]
    async fn test_verify_ok() {
        let token = TokenBuilder::default().with_permissions(&["get:things"]).build();
        let claims = test_verifier().verify(&token).await.unwrap();
        assert_eq!(
            Claims {
                sub: Some("test-user".to_owned()),
                permissions: Some(vec!["get:things".to_owned()])
            },
            claims
        );
    }

    #[tokio::test]
    async fn test_verify_garbage() {
        do_verify_error_test("invalid_header", "not-a-token").await;
    }

    #[tokio::test]
    async fn test_verify_missing_kid() {
        do_verify_error_test("invalid_header", &TokenBuilder::default().with_kid(None).build())
            .await;
    }

    #[tokio::test]
    async fn test_verify_unknown_kid() {
        let token = TokenBuilder::default().with_kid(Some("other-key")).build();
        do_verify_error_test("invalid_header", &token).await;
    }

    #[tokio::test]
    async fn test_verify_expired() {
        do_verify_error_test("token_expired", &TokenBuilder::default().expired_since(3600).build())
            .await;
    }

    #[tokio::test]
    async fn test_verify_wrong_audience() {
        let token = TokenBuilder::default().with_claim("aud", json!("someone-else")).build();
        do_verify_error_test("invalid_claims", &token).await;
    }

    #[tokio::test]
    async fn test_verify_wrong_issuer() {
        let token =
            TokenBuilder::default().with_claim("iss", json!("https://evil.example.com/")).build();
        do_verify_error_test("invalid_claims", &token).await;
    }

    #[tokio::test]
    async fn test_verify_missing_exp() {
        let token = TokenBuilder::default().without_claim("exp").build();
        do_verify_error_test("invalid_claims", &token).await;
    }

    #[tokio::test]
    async fn test_verify_not_yet_valid() {
        let nbf = jsonwebtoken::get_current_timestamp() + 3600;
        let token = TokenBuilder::default().with_claim("nbf", json!(nbf)).build();
        do_verify_error_test("invalid_claims", &token).await;
    }

    #[tokio::test]
    async fn test_verify_bad_signature() {
        let token = TokenBuilder::default().with_untrusted_key().build();
        do_verify_error_test("invalid_signature", &token).await;
    }

    #[tokio::test]
    async fn test_verify_keys_unavailable() {
        let keys = StaticKeyStore::from_json(TEST_JWKS);
        keys.set_offline(true);
        let verifier = JwtVerifier::new(Arc::from(keys), TEST_ISSUER, TEST_AUDIENCE);

        let e = verifier.verify(&TokenBuilder::default().build()).await.unwrap_err();
        assert_eq!(StatusCode::SERVICE_UNAVAILABLE, e.status());
    }

    /// Builds a header map with a bearer `token`.
    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.append("Authorization", format!("Bearer {}", token).parse().unwrap());
        headers
    }

    #[tokio::test]
    async fn test_authorize_ok() {
        let token = TokenBuilder::default().with_permissions(&["a", "post:drinks", "b"]).build();
        let claims =
            test_verifier().authorize(&bearer_headers(&token), "post:drinks").await.unwrap();
        assert_eq!(Some("test-user"), claims.sub.as_deref());
    }

    #[tokio::test]
    async fn test_authorize_missing_header() {
        let e = test_verifier().authorize(&HeaderMap::new(), "post:drinks").await.unwrap_err();
        assert_eq!(StatusCode::UNAUTHORIZED, e.status());
        assert_eq!("authorization_header_missing", e.code());
    }

    #[tokio::test]
    async fn test_authorize_missing_permissions_claim() {
        let token = TokenBuilder::default().build();
        let e =
            test_verifier().authorize(&bearer_headers(&token), "post:drinks").await.unwrap_err();
        assert_eq!(StatusCode::UNAUTHORIZED, e.status());
        assert_eq!("invalid_claims", e.code());
    }

    #[tokio::test]
    async fn test_authorize_permission_not_granted() {
        let token = TokenBuilder::default().with_permissions(&["get:drinks-detail"]).build();
        let e =
            test_verifier().authorize(&bearer_headers(&token), "post:drinks").await.unwrap_err();
        assert_eq!(StatusCode::FORBIDDEN, e.status());
        assert_eq!("unauthorized", e.code());
        assert_eq!("Permission not found", e.to_string());
    }

    #[tokio::test]
    async fn test_authorize_invalid_token_before_permissions() {
        let token = TokenBuilder::default()
            .with_permissions(&["post:drinks"])
            .expired_since(3600)
            .build();
        let e =
            test_verifier().authorize(&bearer_headers(&token), "post:drinks").await.unwrap_err();
        assert_eq!("token_expired", e.code());
    }
}
