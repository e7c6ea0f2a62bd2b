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

//! High-level data types for trivia questions.

use derive_getters::Getters;
use derive_more::Constructor;
use marquee_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Number of questions returned per page.
pub(crate) const QUESTIONS_PER_PAGE: usize = 10;

/// An integer as sent by clients, which may come as a JSON number or as a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseInt {
    /// A JSON number.
    Number(i64),

    /// A JSON string that should hold a number.
    Text(String),
}

impl TryFrom<LooseInt> for i64 {
    type Error = ModelError;

    fn try_from(raw: LooseInt) -> ModelResult<Self> {
        match raw {
            LooseInt::Number(i) => Ok(i),
            LooseInt::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ModelError(format!("Expected an integer but got '{}'", s))),
        }
    }
}

/// Identifier of a category.
///
/// The identifier 0 is never assigned to a category and is used by quizzes to mean "any".
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "LooseInt", into = "i64")]
pub(crate) struct CategoryId(i64);

impl CategoryId {
    /// The pseudo-category that matches all categories.
    pub(crate) const ANY: CategoryId = CategoryId(0);

    /// Creates a new category identifier from a raw `id`.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub(crate) fn as_i64(self) -> i64 {
        self.0
    }
}

impl TryFrom<LooseInt> for CategoryId {
    type Error = ModelError;

    fn try_from(raw: LooseInt) -> ModelResult<Self> {
        let id = i64::try_from(raw)?;
        if id < 0 {
            return Err(ModelError(format!("Category id {} cannot be negative", id)));
        }
        Ok(CategoryId(id))
    }
}

impl From<CategoryId> for i64 {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

/// A question category.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Category {
    /// Identifier of the category.
    id: CategoryId,

    /// Name of the category.
    #[serde(rename = "type")]
    kind: String,
}

/// Difficulty of a question, from 1 (easiest) to 5 (hardest).
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "LooseInt", into = "i64")]
pub(crate) struct Difficulty(u8);

impl Difficulty {
    /// Lowest valid difficulty.
    const MIN: i64 = 1;

    /// Highest valid difficulty.
    const MAX: i64 = 5;

    /// Creates a new difficulty from a raw `level`, validating its range.
    pub(crate) fn new(level: i64) -> ModelResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(ModelError(format!(
                "Difficulty must be between {} and {} but got {}",
                Self::MIN,
                Self::MAX,
                level
            )));
        }
        Ok(Self(level as u8))
    }

    /// Returns the difficulty as an integer.
    pub(crate) fn as_i64(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<LooseInt> for Difficulty {
    type Error = ModelError;

    fn try_from(raw: LooseInt) -> ModelResult<Self> {
        Difficulty::new(i64::try_from(raw)?)
    }
}

impl From<Difficulty> for i64 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.as_i64()
    }
}

/// A question that has not been stored yet.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct NewQuestion {
    /// Text of the question.
    question: String,

    /// Text of the answer.
    answer: String,

    /// Category the question belongs to.
    category: CategoryId,

    /// Difficulty of the question.
    difficulty: Difficulty,
}

impl NewQuestion {
    /// Creates a new question, ensuring that its texts are not blank.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        question: S1,
        answer: S2,
        category: CategoryId,
        difficulty: Difficulty,
    ) -> ModelResult<Self> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(ModelError("Question cannot be empty".to_owned()));
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(ModelError("Answer cannot be empty".to_owned()));
        }
        Ok(Self { question, answer, category, difficulty })
    }

    /// Converts this question into a stored question with the given `id`.
    pub(crate) fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// A stored question.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct Question {
    /// Identifier of the question.
    id: i64,

    /// Text of the question.
    question: String,

    /// Text of the answer.
    answer: String,

    /// Category the question belongs to.
    category: CategoryId,

    /// Difficulty of the question.
    difficulty: Difficulty,
}
