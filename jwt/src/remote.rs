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

//! Key store backed by the JWKS document that the issuer publishes over HTTP.

use crate::keys::{KeyResult, KeyStore};
use async_trait::async_trait;
use bytes::Buf;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use log::debug;
use reqwest::{Client, Response, StatusCode};
use std::io;
use url::Url;

/// Converts a `reqwest::Error` to an `io::Error`.
fn reqwest_error_to_io_error(e: reqwest::Error) -> io::Error {
    io::Error::other(format!("{}", e))
}

/// Converts a `reqwest::Response` to an `io::Error`.  The response should have a non-OK status.
async fn http_response_to_io_error(response: Response) -> io::Error {
    let status = response.status();

    let kind = match status {
        StatusCode::OK => panic!("Should not have been called on a successful request"),

        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => io::ErrorKind::PermissionDenied,
        StatusCode::NOT_FOUND => io::ErrorKind::NotFound,
        StatusCode::TOO_MANY_REQUESTS => io::ErrorKind::ConnectionRefused,

        _ => io::ErrorKind::Other,
    };

    match response.text().await {
        Ok(text) => io::Error::new(
            kind,
            format!("HTTP request returned status {} with text '{}'", status, text),
        ),
        Err(e) => io::Error::new(
            kind,
            format!("HTTP request returned status {} and failed to get text due to {}", status, e),
        ),
    }
}

/// Returns the conventional location of the JWKS document for tokens minted by `issuer`.
pub(crate) fn default_jwks_url(issuer: &str) -> Result<Url, String> {
    let mut base =
        Url::parse(issuer).map_err(|e| format!("Invalid issuer URL '{}': {}", issuer, e))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(".well-known/jwks.json").map_err(|e| format!("Invalid JWKS URL: {}", e))
}

/// Key store that fetches the JWKS document on every lookup.
///
/// This is meant to be wrapped in a `CachingKeyStore` so that not every request pays for a round
/// trip to the issuer.
#[derive(Clone)]
pub struct RemoteKeyStore {
    /// Asynchronous HTTP client with which to issue the JWKS requests.
    client: Client,

    /// Location of the JWKS document.
    url: Url,
}

impl RemoteKeyStore {
    /// Creates a new key store that fetches the JWKS document from `url`.
    pub fn new(url: Url) -> Self {
        Self { client: Client::default(), url }
    }
}

#[async_trait]
impl KeyStore for RemoteKeyStore {
    async fn find(&self, kid: &str) -> KeyResult<Option<Jwk>> {
        debug!("Fetching JWKS from {} to look for key {}", self.url, kid);
        let response =
            self.client.get(self.url.clone()).send().await.map_err(reqwest_error_to_io_error)?;
        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err(reqwest_error_to_io_error)?;
                let jwks: JwkSet = serde_json::from_reader(bytes.reader())?;
                Ok(jwks.find(kid).cloned())
            }
            _ => Err(http_response_to_io_error(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_jwks_url() {
        assert_eq!(
            "https://tenant.example.com/.well-known/jwks.json",
            default_jwks_url("https://tenant.example.com/").unwrap().as_str()
        );
        assert_eq!(
            "https://tenant.example.com/.well-known/jwks.json",
            default_jwks_url("https://tenant.example.com").unwrap().as_str()
        );
        assert_eq!(
            "https://example.com/tenant/.well-known/jwks.json",
            default_jwks_url("https://example.com/tenant").unwrap().as_str()
        );
    }

    #[test]
    fn test_default_jwks_url_invalid_issuer() {
        let err = default_jwks_url("not a url").unwrap_err();
        assert!(err.starts_with("Invalid issuer URL 'not a url'"));
    }
}
