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

//! Parsing of the URL-encoded forms submitted by the HTML pages.

use crate::model::{ArtistInfo, VenueInfo};
use crate::rest::FailedAction;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::Method;
use marquee_core::rest::{RestError, RestResult};

/// A request body extractor for URL-encoded forms.
///
/// GET requests carry the form in the query string and all other requests in the body.
/// Malformed forms are rejected with a 400 error rendered as a failed action.
#[derive(Debug)]
pub(crate) struct Form(Vec<(String, String)>);

#[async_trait]
impl<S> FromRequest<S> for Form
where
    S: Send + Sync,
{
    type Rejection = FailedAction;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.method() == Method::GET {
            let query = req.uri().query().unwrap_or_default();
            return Form::parse(query.as_bytes()).map_err(|e| FailedAction::new("Invalid form", e));
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            FailedAction::new("Invalid form", RestError::InvalidRequest(e.body_text()))
        })?;
        Form::parse(&body).map_err(|e| FailedAction::new("Invalid form", e))
    }
}

impl Form {
    /// Parses the URL-encoded `raw` form.
    pub(crate) fn parse(raw: &[u8]) -> RestResult<Self> {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(raw)
            .map(Form)
            .map_err(|e| RestError::InvalidRequest(format!("Invalid form data: {}", e)))
    }

    /// Gets the first value of the field `key` with surrounding whitespace removed, or the
    /// empty string if the field is missing.
    pub(crate) fn get(&self, key: &str) -> String {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.trim().to_owned()).unwrap_or_default()
    }

    /// Gets all non-empty values of the repeated field `key`.
    pub(crate) fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, v)| k == key && !v.trim().is_empty())
            .map(|(_, v)| v.trim().to_owned())
            .collect()
    }

    /// Interprets the field `key` as a checkbox, which is set if its value is `y`, `on` or
    /// `true`.
    pub(crate) fn flag(&self, key: &str) -> bool {
        matches!(self.get(key).to_lowercase().as_str(), "y" | "on" | "true")
    }

    /// Gets the field `key` as an identifier.
    pub(crate) fn id(&self, key: &str) -> RestResult<i64> {
        let raw = self.get(key);
        if raw.is_empty() {
            return Err(RestError::InvalidRequest(format!("Missing {}", key)));
        }
        raw.parse::<i64>()
            .map_err(|_| RestError::InvalidRequest(format!("Invalid {} '{}'", key, raw)))
    }

    /// Extracts the properties of a venue.
    pub(crate) fn venue_info(&self) -> VenueInfo {
        VenueInfo {
            name: self.get("name"),
            city: self.get("city"),
            state: self.get("state"),
            address: self.get("address"),
            phone: self.get("phone"),
            image_link: self.get("image_link"),
            facebook_link: self.get("facebook_link"),
            genres: self.all("genres"),
            seeking_talent: self.flag("seeking_talent"),
            seeking_talent_description: self.get("seeking_description"),
            website: self.get("website_link"),
        }
    }

    /// Extracts the properties of an artist.
    pub(crate) fn artist_info(&self) -> ArtistInfo {
        ArtistInfo {
            name: self.get("name"),
            city: self.get("city"),
            state: self.get("state"),
            phone: self.get("phone"),
            genres: self.all("genres"),
            image_link: self.get("image_link"),
            facebook_link: self.get("facebook_link"),
            website: self.get("website_link"),
            seeking_venue: self.flag("seeking_venue"),
            seeking_venue_description: self.get("seeking_description"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get() {
        let form = Form::parse(b"name=+The+Hop+&city=&name=Other").unwrap();
        assert_eq!("The Hop", form.get("name"));
        assert_eq!("", form.get("city"));
        assert_eq!("", form.get("state"));
    }

    #[test]
    fn test_all() {
        let form = Form::parse(b"genres=Jazz&name=x&genres=&genres=R%26B").unwrap();
        assert_eq!(vec!["Jazz".to_owned(), "R&B".to_owned()], form.all("genres"));
        assert!(form.all("other").is_empty());
    }

    #[test]
    fn test_flag() {
        for raw in ["a=y", "a=on", "a=true", "a=TRUE"] {
            assert!(Form::parse(raw.as_bytes()).unwrap().flag("a"), "{} must be set", raw);
        }
        for raw in ["", "a=", "a=n", "a=false", "b=y"] {
            assert!(!Form::parse(raw.as_bytes()).unwrap().flag("a"), "{} must be unset", raw);
        }
    }

    #[test]
    fn test_id() {
        let form = Form::parse(b"a=12&b=x").unwrap();
        assert_eq!(12, form.id("a").unwrap());
        assert_eq!(
            RestError::InvalidRequest("Invalid b 'x'".to_owned()),
            form.id("b").unwrap_err()
        );
        assert_eq!(RestError::InvalidRequest("Missing c".to_owned()), form.id("c").unwrap_err());
    }

    #[test]
    fn test_venue_info() {
        let form = Form::parse(
            b"name=Hop&city=SF&state=CA&address=1+Main&genres=Jazz&genres=Folk\
              &seeking_talent=y&seeking_description=Bands&website_link=https%3A%2F%2Fhop",
        )
        .unwrap();
        let exp = VenueInfo {
            name: "Hop".to_owned(),
            city: "SF".to_owned(),
            state: "CA".to_owned(),
            address: "1 Main".to_owned(),
            genres: vec!["Jazz".to_owned(), "Folk".to_owned()],
            seeking_talent: true,
            seeking_talent_description: "Bands".to_owned(),
            website: "https://hop".to_owned(),
            ..Default::default()
        };
        assert_eq!(exp, form.venue_info());
    }

    #[test]
    fn test_artist_info() {
        let form = Form::parse(b"name=Matt&city=NY&state=NY&seeking_venue=on&phone=555").unwrap();
        let exp = ArtistInfo {
            name: "Matt".to_owned(),
            city: "NY".to_owned(),
            state: "NY".to_owned(),
            phone: "555".to_owned(),
            seeking_venue: true,
            ..Default::default()
        };
        assert_eq!(exp, form.artist_info());
    }
}
