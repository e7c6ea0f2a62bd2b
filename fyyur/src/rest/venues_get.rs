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

//! Page to list all venues grouped by location.

use crate::driver::Driver;
use crate::rest::{ErrorPage, pages};
use axum::extract::State;
use axum::response::Html;
use marquee_core::template::{self, escape};

/// A group of venues in the same city.
const AREA_TEMPLATE: &str = r#"<section class="area">
<h2>%city%, %state%</h2>
<ul>
%venues%
</ul>
</section>
"#;

/// A venue within an area.
const VENUE_TEMPLATE: &str = r#"<li><a href="/venues/%id%">%name%</a>
<span class="upcoming">%num_upcoming_shows% upcoming shows</span></li>
"#;

/// GET handler for this page.
pub(crate) async fn handler(State(driver): State<Driver>) -> Result<Html<String>, ErrorPage> {
    let areas = driver.get_venue_areas().await?;

    let mut content = String::new();
    for area in areas {
        let mut venues = String::new();
        for venue in area.venues() {
            venues.push_str(&template::apply(
                VENUE_TEMPLATE,
                &[
                    ("id", &venue.id().to_string()),
                    ("name", &escape(venue.name())),
                    ("num_upcoming_shows", &venue.num_upcoming_shows().to_string()),
                ],
            ));
        }
        content.push_str(&template::apply(
            AREA_TEMPLATE,
            &[
                ("city", &escape(area.city())),
                ("state", &escape(area.state())),
                ("venues", &venues),
            ],
        ));
    }
    if content.is_empty() {
        content.push_str("<p>No venues listed yet.</p>\n");
    }

    Ok(Html(pages::layout("Venues", None, &content)))
}
