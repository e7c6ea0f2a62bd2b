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

//! Key store backed by an in-memory key set for testing purposes.

use crate::keys::{KeyResult, KeyStore};
use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Key store that serves a fixed key set and records how many times it was queried.
#[derive(Clone)]
pub struct StaticKeyStore {
    /// The keys to serve.
    jwks: Arc<JwkSet>,

    /// Number of lookups served so far, including failed ones.
    queries: Arc<AtomicUsize>,

    /// Whether lookups should fail as if the issuer was unreachable.
    offline: Arc<AtomicBool>,
}

impl StaticKeyStore {
    /// Creates a new key store that serves the keys in `jwks`.
    pub fn new(jwks: JwkSet) -> Self {
        Self {
            jwks: Arc::from(jwks),
            queries: Arc::from(AtomicUsize::new(0)),
            offline: Arc::from(AtomicBool::new(false)),
        }
    }

    /// Creates a new key store from the JSON representation of a key set.
    pub fn from_json(raw: &str) -> Self {
        Self::new(serde_json::from_str(raw).expect("Test JWKS must be valid"))
    }

    /// Makes all future lookups fail (`offline` true) or succeed (`offline` false).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Returns the number of lookups served so far.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyStore for StaticKeyStore {
    async fn find(&self, kid: &str) -> KeyResult<Option<Jwk>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "Key store is offline"));
        }
        Ok(self.jwks.find(kid).cloned())
    }
}
