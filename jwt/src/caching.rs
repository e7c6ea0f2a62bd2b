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

//! Wrapper over a key store to keep recently used keys in memory.

use crate::keys::{KeyResult, KeyStore};
use async_trait::async_trait;
use derivative::Derivative;
use futures::lock::Mutex;
use jsonwebtoken::jwk::Jwk;
use log::debug;
use lru_time_cache::LruCache;
use marquee_core::env::get_optional_var;
use std::sync::Arc;
use std::time::Duration;

/// Default maximum amount of time to keep cached keys in memory.
const DEFAULT_TTL_SECONDS: u64 = 10 * 60;

/// Default maximum number of keys to keep cached in memory.
const DEFAULT_CAPACITY: usize = 16;

/// Options to configure a `CachingKeyStore`.
#[derive(Derivative)]
#[derivative(Clone, Debug, PartialEq)]
pub struct CachingKeyStoreOptions {
    /// The TTL for the entries in the cache.
    pub ttl: Duration,

    /// The cache capacity in number of keys.
    pub capacity: usize,
}

impl Default for CachingKeyStoreOptions {
    fn default() -> Self {
        Self { ttl: Duration::from_secs(DEFAULT_TTL_SECONDS), capacity: DEFAULT_CAPACITY }
    }
}

impl CachingKeyStoreOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_TTL` and `<prefix>_CAPACITY`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            ttl: get_optional_var::<Duration>(prefix, "TTL")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TTL_SECONDS)),
            capacity: get_optional_var::<usize>(prefix, "CAPACITY")?.unwrap_or(DEFAULT_CAPACITY),
        })
    }
}

/// Key store that remembers the keys returned by another store.
///
/// Only keys that were found are cached.  Lookups of unknown key IDs and failed lookups always
/// reach the wrapped store.
#[derive(Clone)]
pub struct CachingKeyStore<K> {
    /// The wrapped key store.
    delegee: K,

    /// Cache of found keys by their ID.
    cache: Arc<Mutex<LruCache<String, Jwk>>>,
}

impl<K> CachingKeyStore<K> {
    /// Creates a new caching key store that wraps `delegee` using `opts` for configuration.
    pub fn new(opts: CachingKeyStoreOptions, delegee: K) -> Self {
        let cache = LruCache::with_expiry_duration_and_capacity(opts.ttl, opts.capacity);
        Self { delegee, cache: Arc::from(Mutex::from(cache)) }
    }
}

#[async_trait]
impl<K> KeyStore for CachingKeyStore<K>
where
    K: KeyStore + Send + Sync,
{
    async fn find(&self, kid: &str) -> KeyResult<Option<Jwk>> {
        {
            let mut cache = self.cache.lock().await;
            if let Some(jwk) = cache.get(kid) {
                return Ok(Some(jwk.clone()));
            };
        }

        let jwk = match self.delegee.find(kid).await? {
            Some(jwk) => jwk,
            None => return Ok(None),
        };

        let mut cache = self.cache.lock().await;
        if cache.insert(kid.to_owned(), jwk.clone()).is_some() {
            debug!("Key {} was fetched concurrently by another request", kid);
        }
        Ok(Some(jwk))
    }
}
