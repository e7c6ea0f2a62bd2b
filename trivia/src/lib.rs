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

//! REST service to browse trivia questions and play quizzes.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use marquee_core::db::Db;
use marquee_core::rest::ServerOptions;
use std::io;
use std::sync::Arc;

pub mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Categories created at startup when seeding is requested.
pub const STOCK_CATEGORIES: &[&str] =
    &["Science", "Art", "Geography", "History", "Entertainment", "Sports"];

/// Instantiates all resources to serve the application as configured by `opts`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(opts: ServerOptions, db: Arc<dyn Db + Send + Sync>) -> io::Result<()> {
    let driver = Driver::new(db.clone());
    let app = app(driver);

    let result = marquee_core::rest::serve(&opts, app).await;
    db.close().await;
    result
}
