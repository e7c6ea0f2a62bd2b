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

//! Action to delete an artist.

use crate::driver::Driver;
use crate::rest::pages::{self, Flash};
use crate::rest::{FailedAction, parse_path_id};
use axum::extract::{Path, State};
use axum::response::Html;

/// DELETE handler for this action.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, FailedAction> {
    let context = || format!("An error occurred. Artist {} could not be deleted", raw_id);
    let id = parse_path_id(&raw_id).map_err(|e| FailedAction::new(context(), e))?;

    driver.delete_artist(id).await.map_err(|e| FailedAction::new(context(), e))?;

    let flash = Flash::success(format!("Artist {} was successfully deleted!", id));
    Ok(Html(pages::home(Some(&flash))))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use marquee_core::rest::testutils::OneShotBuilder;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::DELETE, format!("/artists/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let artist = context.create_artist("Guns N Petals").await;

        OneShotBuilder::new(context.app(), route(*artist.id()))
            .send_empty()
            .await
            .expect_text(&format!("Artist {} was successfully deleted!", artist.id()))
            .await;
        assert!(context.all_artists().await.is_empty());
    }

    #[tokio::test]
    async fn test_has_shows() {
        let context = TestContext::setup().await;

        let venue = context.create_venue("The Musical Hop", "San Francisco").await;
        let artist = context.create_artist("Guns N Petals").await;
        context.create_show(&artist, &venue, UPCOMING).await;
        context.create_show(&artist, &venue, PAST).await;

        OneShotBuilder::new(context.app(), route(*artist.id()))
            .send_empty()
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_text("cannot be deleted because it has 2 shows")
            .await;
        assert_eq!(vec![artist], context.all_artists().await);
    }
}
