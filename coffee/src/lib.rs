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

//! REST service to manage the drinks menu of a coffee shop.
//!
//! Listing drinks is public, but seeing their full recipes and changing the menu requires a bearer
//! token that carries the matching permission.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use marquee_core::db::Db;
use marquee_core::rest::ServerOptions;
use marquee_jwt::JwtVerifier;
use std::io;
use std::sync::Arc;

pub mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application as configured by `opts`.
///
/// Requests to protected APIs are checked with `verifier`.
pub async fn serve(
    opts: ServerOptions,
    db: Arc<dyn Db + Send + Sync>,
    verifier: JwtVerifier,
) -> io::Result<()> {
    let driver = Driver::new(db.clone());
    let app = app(driver, verifier);

    let result = marquee_core::rest::serve(&opts, app).await;
    db.close().await;
    result
}
