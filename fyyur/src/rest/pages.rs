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

//! Rendering of the HTML pages shared by various handlers.
//!
//! Every value interpolated into a page goes through `template::escape`.  Fragments that are
//! built here and passed as replacements to outer templates are already escaped.

use crate::driver::{Profile, Schedule, Summary};
use crate::model::{Artist, ArtistInfo, GENRES, ShowDetails, Venue, VenueInfo, format_start_time};
use axum::http::StatusCode;
use marquee_core::template::{self, escape};

/// Skeleton of all pages.
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

/// Contents of the home page.
const HOME_TEMPLATE: &str = include_str!("templates/home.html");

/// Contents of error pages.
const ERROR_TEMPLATE: &str = include_str!("templates/error.html");

/// Contents of the search results pages.
const SEARCH_TEMPLATE: &str = include_str!("templates/search.html");

/// Contents of the venue details page.
const VENUE_TEMPLATE: &str = include_str!("templates/venue.html");

/// Contents of the artist details page.
const ARTIST_TEMPLATE: &str = include_str!("templates/artist.html");

/// Form to create or edit a venue.
const VENUE_FORM_TEMPLATE: &str = include_str!("templates/venue_form.html");

/// Form to create or edit an artist.
const ARTIST_FORM_TEMPLATE: &str = include_str!("templates/artist_form.html");

/// Form to list a new show.
const SHOW_FORM_TEMPLATE: &str = include_str!("templates/show_form.html");

/// Notice rendered at the top of a page.
const FLASH_TEMPLATE: &str = r#"<div class="flash flash-%kind%" role="alert">%message%</div>
"#;

/// A single search result.
const SEARCH_RESULT_TEMPLATE: &str = r#"<li><a href="/%kind%/%id%">%name%</a>
<span class="upcoming">%num_upcoming_shows% upcoming shows</span></li>
"#;

/// A show as listed in the page of a venue or an artist.
const SHOW_CARD_TEMPLATE: &str = r#"<div class="show">
<a href="/%kind%/%id%"><img src="%image_link%" alt="%name%"></a>
<h3><a href="/%kind%/%id%">%name%</a></h3>
<p class="start-time">%start_time%</p>
</div>
"#;

/// A genre choice in a form.
const GENRE_OPTION_TEMPLATE: &str = r#"<option value="%genre%"%selected%>%genre%</option>
"#;

/// Kinds of flash messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum FlashKind {
    /// The requested action succeeded.
    Success,

    /// The requested action failed.
    Error,
}

/// A one-shot notice to show at the top of a page.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Flash {
    /// Whether the notice reports a success or a failure.
    kind: FlashKind,

    /// Text of the notice.  Not escaped.
    message: String,
}

impl Flash {
    /// Creates a notice reporting that an action succeeded.
    pub(crate) fn success<S: Into<String>>(message: S) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    /// Creates a notice reporting that an action failed.
    pub(crate) fn error<S: Into<String>>(message: S) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }

    /// Renders the notice as HTML.
    fn render(&self) -> String {
        let kind = match self.kind {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        };
        template::apply(FLASH_TEMPLATE, &[("kind", kind), ("message", &escape(&self.message))])
    }
}

/// Wraps the already-escaped `content` in the common page skeleton with a `title` and an
/// optional `flash` notice.
pub(crate) fn layout(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash = flash.map(Flash::render).unwrap_or_default();
    template::apply(
        LAYOUT_TEMPLATE,
        &[("title", &escape(title)), ("flash", &flash), ("content", content)],
    )
}

/// Renders the home page with an optional `flash` notice.
pub(crate) fn home(flash: Option<&Flash>) -> String {
    layout("Home", flash, HOME_TEMPLATE)
}

/// Renders an error page for a request that failed with `status` and `message`.
pub(crate) fn error(status: StatusCode, message: &str) -> String {
    let title = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"));
    let content = template::apply(ERROR_TEMPLATE, &[("message", &escape(message))]);
    layout(&title, None, &content)
}

/// Renders the search results page for `term` given the matching entities of `kind`, which
/// is the path prefix of the entities.
pub(crate) fn search_results(kind: &'static str, term: &str, results: &[Summary]) -> String {
    let mut items = String::new();
    for result in results {
        items.push_str(&template::apply(
            SEARCH_RESULT_TEMPLATE,
            &[
                ("kind", kind),
                ("id", &result.id().to_string()),
                ("name", &escape(result.name())),
                ("num_upcoming_shows", &result.num_upcoming_shows().to_string()),
            ],
        ));
    }
    let content = template::apply(
        SEARCH_TEMPLATE,
        &[("term", &escape(term)), ("count", &results.len().to_string()), ("results", &items)],
    );
    layout("Search results", None, &content)
}

/// Renders the list of `shows` linking to the counterpart of each show, which is of `kind` and
/// is selected by `pick`.
fn show_cards<F>(shows: &[ShowDetails], kind: &'static str, pick: F) -> String
where
    F: Fn(&ShowDetails) -> (i64, &str, &str),
{
    let mut cards = String::new();
    for show in shows {
        let (id, name, image_link) = pick(show);
        cards.push_str(&template::apply(
            SHOW_CARD_TEMPLATE,
            &[
                ("kind", kind),
                ("id", &id.to_string()),
                ("name", &escape(name)),
                ("image_link", &escape(image_link)),
                ("start_time", &format_start_time(*show.start_time())),
            ],
        ));
    }
    cards
}

/// Formats the heading of a list of `count` shows that are `when`.
fn shows_title(count: usize, when: &str) -> String {
    format!("{} {} {}", count, when, if count == 1 { "Show" } else { "Shows" })
}

/// Renders the `schedule` replacements of a details page, linking each show to the entity of
/// `kind` selected by `pick`.
fn schedule_replacements<F>(
    schedule: &Schedule,
    kind: &'static str,
    pick: F,
) -> [(&'static str, String); 4]
where
    F: Fn(&ShowDetails) -> (i64, &str, &str) + Copy,
{
    [
        ("upcoming_title", shows_title(schedule.upcoming().len(), "Upcoming")),
        ("upcoming_shows", show_cards(schedule.upcoming(), kind, pick)),
        ("past_title", shows_title(schedule.past().len(), "Past")),
        ("past_shows", show_cards(schedule.past(), kind, pick)),
    ]
}

/// Renders the seeking notice of a venue or an artist.
fn seeking_notice(seeking: bool, what: &str, description: &str) -> String {
    if seeking {
        format!(
            "<div class=\"seeking\"><p>Currently seeking {}</p><p>{}</p></div>",
            what,
            escape(description)
        )
    } else {
        format!("<p class=\"not-seeking\">Not currently seeking {}</p>", what)
    }
}

/// Renders the details page of a venue with an optional `flash` notice.
pub(crate) fn venue_profile(profile: &Profile<Venue>, flash: Option<&Flash>) -> String {
    let venue = profile.entity();
    let info = venue.info();
    let schedule = schedule_replacements(profile.schedule(), "artists", |s| {
        (*s.artist_id(), s.artist_name().as_str(), s.artist_image_link().as_str())
    });
    let mut replacements = vec![
        ("id", venue.id().to_string()),
        ("genres", escape(&info.genres.join(", "))),
        ("address", escape(&info.address)),
        ("city", escape(&info.city)),
        ("state", escape(&info.state)),
        ("phone", escape(&info.phone)),
        ("website", escape(&info.website)),
        ("facebook_link", escape(&info.facebook_link)),
        (
            "seeking",
            seeking_notice(info.seeking_talent, "talent", &info.seeking_talent_description),
        ),
        ("image_link", escape(&info.image_link)),
    ];
    replacements.extend(schedule);
    let replacements = replacements.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
    let content = template::apply(VENUE_TEMPLATE, &replacements);
    layout(&info.name, flash, &content)
}

/// Renders the details page of an artist with an optional `flash` notice.
pub(crate) fn artist_profile(profile: &Profile<Artist>, flash: Option<&Flash>) -> String {
    let artist = profile.entity();
    let info = artist.info();
    let schedule = schedule_replacements(profile.schedule(), "venues", |s| {
        (*s.venue_id(), s.venue_name().as_str(), s.venue_image_link().as_str())
    });
    let mut replacements = vec![
        ("id", artist.id().to_string()),
        ("genres", escape(&info.genres.join(", "))),
        ("city", escape(&info.city)),
        ("state", escape(&info.state)),
        ("phone", escape(&info.phone)),
        ("website", escape(&info.website)),
        ("facebook_link", escape(&info.facebook_link)),
        (
            "seeking",
            seeking_notice(info.seeking_venue, "venues", &info.seeking_venue_description),
        ),
        ("image_link", escape(&info.image_link)),
    ];
    replacements.extend(schedule);
    let replacements = replacements.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
    let content = template::apply(ARTIST_TEMPLATE, &replacements);
    layout(&info.name, flash, &content)
}

/// Renders the genre choices of a form, marking those in `selected`.
fn genre_options(selected: &[String]) -> String {
    let mut options = String::new();
    for genre in GENRES {
        let mark = if selected.iter().any(|s| s == genre) { " selected" } else { "" };
        options.push_str(&template::apply(
            GENRE_OPTION_TEMPLATE,
            &[("genre", &escape(genre)), ("selected", mark)],
        ));
    }
    options
}

/// Returns the attribute that marks a checkbox as set if `checked` is true.
fn checked(checked: bool) -> &'static str {
    if checked { " checked" } else { "" }
}

/// Renders the page with the form to create a venue (if `id` is none) or to edit the venue
/// `id`, prefilled with `info`.
pub(crate) fn venue_form(id: Option<i64>, info: &VenueInfo) -> String {
    let (title, action, button) = match id {
        None => ("List a new venue".to_owned(), "/venues/create".to_owned(), "Create venue"),
        Some(id) => (format!("Edit venue {}", id), format!("/venues/{}/edit", id), "Save venue"),
    };
    let content = template::apply(
        VENUE_FORM_TEMPLATE,
        &[
            ("action", &action),
            ("name", &escape(&info.name)),
            ("city", &escape(&info.city)),
            ("state", &escape(&info.state)),
            ("address", &escape(&info.address)),
            ("phone", &escape(&info.phone)),
            ("genres", &genre_options(&info.genres)),
            ("facebook_link", &escape(&info.facebook_link)),
            ("image_link", &escape(&info.image_link)),
            ("website", &escape(&info.website)),
            ("seeking", checked(info.seeking_talent)),
            ("seeking_description", &escape(&info.seeking_talent_description)),
            ("button", button),
        ],
    );
    layout(&title, None, &content)
}

/// Renders the page with the form to create an artist (if `id` is none) or to edit the artist
/// `id`, prefilled with `info`.
pub(crate) fn artist_form(id: Option<i64>, info: &ArtistInfo) -> String {
    let (title, action, button) = match id {
        None => ("List a new artist".to_owned(), "/artists/create".to_owned(), "Create artist"),
        Some(id) => {
            (format!("Edit artist {}", id), format!("/artists/{}/edit", id), "Save artist")
        }
    };
    let content = template::apply(
        ARTIST_FORM_TEMPLATE,
        &[
            ("action", &action),
            ("name", &escape(&info.name)),
            ("city", &escape(&info.city)),
            ("state", &escape(&info.state)),
            ("phone", &escape(&info.phone)),
            ("genres", &genre_options(&info.genres)),
            ("facebook_link", &escape(&info.facebook_link)),
            ("image_link", &escape(&info.image_link)),
            ("website", &escape(&info.website)),
            ("seeking", checked(info.seeking_venue)),
            ("seeking_description", &escape(&info.seeking_venue_description)),
            ("button", button),
        ],
    );
    layout(&title, None, &content)
}

/// Renders the form to list a new show.
pub(crate) fn show_form() -> String {
    layout("List a new show", None, SHOW_FORM_TEMPLATE)
}
