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

//! Generic data types shared by all services.

use serde::{Deserialize, Serialize};

/// Errors caused by invalid data while constructing model types.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Escape character used in the `LIKE` patterns returned by `SearchTerm::like_pattern`.
///
/// Queries using those patterns must spell out `ESCAPE '\'`.
pub const LIKE_ESCAPE: char = '\\';

/// A non-empty term to look for as a literal substring of a text column.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a new search term from an untrusted string `s`, rejecting empty terms.
    ///
    /// Whitespace is significant: a term made of spaces matches texts that contain them.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Search term cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns the raw search term.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `text` contains this term, ignoring case across all of Unicode.
    ///
    /// This is the in-memory counterpart of `like_pattern` for backends whose `LIKE` operator
    /// only folds ASCII letters.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0.to_lowercase())
    }

    /// Returns a `LIKE` pattern that matches any text containing this term.
    ///
    /// Wildcard characters in the term are escaped with `LIKE_ESCAPE` so that they match
    /// literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if ch == LIKE_ESCAPE || ch == '%' || ch == '_' {
                pattern.push(LIKE_ESCAPE);
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl TryFrom<String> for SearchTerm {
    type Error = ModelError;

    fn try_from(s: String) -> ModelResult<Self> {
        SearchTerm::new(s)
    }
}

impl From<SearchTerm> for String {
    fn from(term: SearchTerm) -> Self {
        term.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    #[test]
    fn test_search_term_ok() {
        assert_eq!("coffee", SearchTerm::new("coffee").unwrap().as_str());
        assert_eq!(" a ", SearchTerm::new(" a ").unwrap().as_str());
        assert_eq!("   ", SearchTerm::new("   ").unwrap().as_str());
    }

    #[test]
    fn test_search_term_empty() {
        assert_eq!(
            ModelError("Search term cannot be empty".to_owned()),
            SearchTerm::new("").unwrap_err()
        );
    }

    #[test]
    fn test_search_term_like_pattern() {
        assert_eq!("%band%", SearchTerm::new("band").unwrap().like_pattern());
        assert_eq!("% %", SearchTerm::new(" ").unwrap().like_pattern());
        assert_eq!("%50\\%%", SearchTerm::new("50%").unwrap().like_pattern());
        assert_eq!("%a\\_b%", SearchTerm::new("a_b").unwrap().like_pattern());
        assert_eq!("%c:\\\\x%", SearchTerm::new("c:\\x").unwrap().like_pattern());
    }

    #[test]
    fn test_search_term_matches() {
        let term = SearchTerm::new("Café").unwrap();
        assert!(term.matches("LE CAFÉ NOIR"));
        assert!(term.matches("café"));
        assert!(!term.matches("cafe"));
        assert!(SearchTerm::new("50%").unwrap().matches("Only 50% off"));
        assert!(!SearchTerm::new("_").unwrap().matches("a b"));
    }

    #[test]
    fn test_search_term_ser_de() {
        assert_tokens(&SearchTerm::new("title").unwrap(), &[Token::Str("title")]);
        assert_de_tokens_error::<SearchTerm>(&[Token::Str("")], "Search term cannot be empty");
    }
}
