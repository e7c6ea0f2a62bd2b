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

//! Interface to the sources of token signing keys.

use async_trait::async_trait;
use jsonwebtoken::jwk::Jwk;
use std::io;

/// Result type for key lookups.
pub(crate) type KeyResult<T> = io::Result<T>;

/// Source of the public keys that the token issuer signs tokens with.
#[async_trait]
pub trait KeyStore {
    /// Looks up the key identified by `kid`, returning `None` if the issuer does not publish it.
    async fn find(&self, kid: &str) -> KeyResult<Option<Jwk>>;
}
