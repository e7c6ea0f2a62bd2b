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

//! Page to list all shows.

use crate::driver::Driver;
use crate::model::format_start_time;
use crate::rest::{ErrorPage, pages};
use axum::extract::State;
use axum::response::Html;
use marquee_core::template::{self, escape};

/// A show within the list.
const SHOW_TEMPLATE: &str = r#"<li class="show">
<a href="/artists/%artist_id%"><img src="%artist_image_link%" alt="%artist_name%"></a>
<h3><a href="/artists/%artist_id%">%artist_name%</a></h3>
<p>playing at <a href="/venues/%venue_id%">%venue_name%</a></p>
<p class="start-time">%start_time%</p>
</li>
"#;

/// GET handler for this page.
pub(crate) async fn handler(State(driver): State<Driver>) -> Result<Html<String>, ErrorPage> {
    let shows = driver.get_shows().await?;

    let content = if shows.is_empty() {
        "<p>No shows listed yet.</p>\n".to_owned()
    } else {
        let mut items = String::new();
        for show in shows {
            items.push_str(&template::apply(
                SHOW_TEMPLATE,
                &[
                    ("artist_id", &show.artist_id().to_string()),
                    ("artist_name", &escape(show.artist_name())),
                    ("artist_image_link", &escape(show.artist_image_link())),
                    ("venue_id", &show.venue_id().to_string()),
                    ("venue_name", &escape(show.venue_name())),
                    ("start_time", &format_start_time(*show.start_time())),
                ],
            ));
        }
        format!("<ul class=\"shows\">\n{}</ul>\n", items)
    };

    Ok(Html(pages::layout("Shows", None, &content)))
}
