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

//! Operations to play quizzes.

use crate::db;
use crate::driver::Driver;
use crate::model::{CategoryId, Question};
use marquee_core::driver::{DriverError, DriverResult};
use rand::seq::IndexedRandom;
use std::collections::HashSet;

impl Driver {
    /// Picks a random question from `category` that is not in `previous`.
    ///
    /// `CategoryId::ANY` selects questions from all categories.  Running out of candidates is
    /// reported as not found.
    pub(crate) async fn next_quiz_question(
        self,
        category: CategoryId,
        previous: &[i64],
    ) -> DriverResult<Question> {
        let mut ex = self.db.ex().await?;
        let questions = if category == CategoryId::ANY {
            db::get_questions(&mut ex).await?
        } else {
            db::get_questions_in_category(&mut ex, category).await?
        };

        let previous = previous.iter().copied().collect::<HashSet<i64>>();
        let candidates = questions
            .into_iter()
            .filter(|q| !previous.contains(q.id()))
            .collect::<Vec<Question>>();
        match candidates.choose(&mut rand::rng()) {
            Some(question) => Ok(question.clone()),
            None => Err(DriverError::NotFound("No questions left to ask".to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;

    #[tokio::test]
    async fn test_next_quiz_question_any_category() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;
        let q1 = context.create_question("Science question", &science).await;
        let q2 = context.create_question("Art question", &art).await;

        let mut seen = HashSet::new();
        for _ in 0..50 {
            let question =
                context.driver().next_quiz_question(CategoryId::ANY, &[]).await.unwrap();
            seen.insert(*question.id());
        }
        assert_eq!(HashSet::from([*q1.id(), *q2.id()]), seen);
    }

    #[tokio::test]
    async fn test_next_quiz_question_honors_category() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;
        context.create_questions(5, &science).await;
        let art_questions = context.create_questions(3, &art).await;

        for _ in 0..20 {
            let question = context.driver().next_quiz_question(*art.id(), &[]).await.unwrap();
            assert!(art_questions.contains(&question));
        }
    }

    #[tokio::test]
    async fn test_next_quiz_question_skips_previous() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let questions = context.create_questions(4, &science).await;
        let mut previous = vec![];

        for _ in 0..questions.len() {
            let question =
                context.driver().next_quiz_question(*science.id(), &previous).await.unwrap();
            assert!(!previous.contains(question.id()));
            previous.push(*question.id());
        }

        assert_eq!(
            DriverError::NotFound("No questions left to ask".to_owned()),
            context.driver().next_quiz_question(*science.id(), &previous).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_next_quiz_question_unknown_category() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        context.create_questions(2, &science).await;

        assert_eq!(
            DriverError::NotFound("No questions left to ask".to_owned()),
            context
                .driver()
                .next_quiz_question(context.unknown_category(), &[])
                .await
                .unwrap_err()
        );
    }
}
