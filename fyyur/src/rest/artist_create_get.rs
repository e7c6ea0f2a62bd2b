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

//! Page with the form to list a new artist.

use crate::model::ArtistInfo;
use crate::rest::pages;
use axum::response::Html;

/// GET handler for this page.
pub(crate) async fn handler() -> Html<String> {
    Html(pages::artist_form(None, &ArtistInfo::default()))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use marquee_core::rest::testutils::OneShotBuilder;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/artists/create".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let body = OneShotBuilder::new(context.into_app(), route())
            .send_empty()
            .await
            .take_body_as_text()
            .await;
        assert!(body.contains("<h1>List a new artist</h1>"));
        assert!(body.contains("action=\"/artists/create\""));
        assert!(body.contains("name=\"seeking_venue\" value=\"y\">"));
    }
}
