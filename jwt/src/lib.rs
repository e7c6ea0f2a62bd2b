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

//! Gate for APIs that require a bearer token carrying specific permissions.
//!
//! Tokens are RS256-signed JWTs issued by an external identity provider.  The provider publishes
//! its public signing keys as a JSON Web Key Set (JWKS), which this crate fetches over HTTP and
//! keeps cached in memory for a configurable amount of time.
//!
//! Services typically construct a single `JwtVerifier` at startup with `JwtVerifier::from_options`
//! and then call `JwtVerifier::authorize` from every handler that requires a permission, before
//! reaching into the driver.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

mod bearer;
pub use bearer::get_bearer_token;
mod caching;
pub use caching::{CachingKeyStore, CachingKeyStoreOptions};
mod error;
pub use error::{AuthError, AuthResult};
mod keys;
pub use keys::KeyStore;
#[cfg(any(test, feature = "testutils"))]
mod mock;
#[cfg(any(test, feature = "testutils"))]
pub use mock::StaticKeyStore;
mod remote;
pub use remote::RemoteKeyStore;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod verifier;
pub use verifier::{Claims, JwtOptions, JwtVerifier};
