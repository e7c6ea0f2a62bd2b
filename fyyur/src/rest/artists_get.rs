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

//! Page to list all artists.

use crate::driver::Driver;
use crate::rest::{ErrorPage, pages};
use axum::extract::State;
use axum::response::Html;
use marquee_core::template::{self, escape};

/// An artist within the list.
const ARTIST_TEMPLATE: &str = r#"<li><a href="/artists/%id%">%name%</a></li>
"#;

/// GET handler for this page.
pub(crate) async fn handler(State(driver): State<Driver>) -> Result<Html<String>, ErrorPage> {
    let artists = driver.get_artists().await?;

    let content = if artists.is_empty() {
        "<p>No artists listed yet.</p>\n".to_owned()
    } else {
        let mut items = String::new();
        for artist in artists {
            items.push_str(&template::apply(
                ARTIST_TEMPLATE,
                &[("id", &artist.id().to_string()), ("name", &escape(&artist.info().name))],
            ));
        }
        format!("<ul class=\"artists\">\n{}</ul>\n", items)
    };

    Ok(Html(pages::layout("Artists", None, &content)))
}
