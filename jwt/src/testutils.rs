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

//! Test utilities to mint tokens that services under test accept.

use crate::{JwtVerifier, StaticKeyStore};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode, get_current_timestamp};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Key set that holds the public half of the test signing key.
pub const TEST_JWKS: &str = include_str!("../testdata/jwks.json");

/// Identifier of the test signing key in `TEST_JWKS`.
pub const TEST_KID: &str = "test-key";

/// Issuer that test tokens claim and that test verifiers expect.
pub const TEST_ISSUER: &str = "https://issuer.example.com/";

/// Audience that test tokens claim and that test verifiers expect.
pub const TEST_AUDIENCE: &str = "marquee";

/// Private half of the test signing key.
const TEST_PRIVATE_KEY: &[u8] = include_bytes!("../testdata/private.pem");

/// A key that is not published in `TEST_JWKS`.
const OTHER_PRIVATE_KEY: &[u8] = include_bytes!("../testdata/other.pem");

/// Creates a verifier that trusts the test signing key.
pub fn test_verifier() -> JwtVerifier {
    let keys = StaticKeyStore::from_json(TEST_JWKS);
    JwtVerifier::new(Arc::from(keys), TEST_ISSUER, TEST_AUDIENCE)
}

/// Builder for tokens signed with the test key.
///
/// By default, tokens are valid for an hour and carry no permissions.
#[must_use]
pub struct TokenBuilder {
    /// Header of the token.
    header: Header,

    /// Private key to sign the token with.
    key: &'static [u8],

    /// Claims to place in the token.
    claims: Map<String, Value>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(TEST_KID.to_owned());

        let now = get_current_timestamp();
        let mut claims = Map::new();
        claims.insert("iss".to_owned(), json!(TEST_ISSUER));
        claims.insert("aud".to_owned(), json!(TEST_AUDIENCE));
        claims.insert("sub".to_owned(), json!("test-user"));
        claims.insert("iat".to_owned(), json!(now));
        claims.insert("exp".to_owned(), json!(now + 3600));

        Self { header, key: TEST_PRIVATE_KEY, claims }
    }
}

impl TokenBuilder {
    /// Sets the `permissions` claim to `permissions`.
    pub fn with_permissions(self, permissions: &[&str]) -> Self {
        self.with_claim("permissions", json!(permissions))
    }

    /// Sets the claim `name` to `value`, replacing any previous value.
    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.claims.insert(name.to_owned(), value);
        self
    }

    /// Removes the claim `name`.
    pub fn without_claim(mut self, name: &str) -> Self {
        self.claims.remove(name);
        self
    }

    /// Sets the key identifier in the header to `kid`, or removes it if `None`.
    pub fn with_kid(mut self, kid: Option<&str>) -> Self {
        self.header.kid = kid.map(str::to_owned);
        self
    }

    /// Signs the token with a key that the test verifier does not trust even though the header
    /// names the trusted key.
    pub fn with_untrusted_key(mut self) -> Self {
        self.key = OTHER_PRIVATE_KEY;
        self
    }

    /// Makes the token expire `secs` seconds ago.
    pub fn expired_since(self, secs: u64) -> Self {
        let now = get_current_timestamp();
        self.with_claim("exp", json!(now - secs))
    }

    /// Signs and encodes the token.
    pub fn build(self) -> String {
        let key = EncodingKey::from_rsa_pem(self.key).expect("Test key must be valid");
        encode(&self.header, &self.claims, &key).expect("Test token must be encodable")
    }
}
