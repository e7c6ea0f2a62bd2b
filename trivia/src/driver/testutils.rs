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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Category, CategoryId, Difficulty, NewQuestion, Question};
use marquee_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(marquee_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a category named `kind` by directly modifying the backing database.
    pub(crate) async fn create_category(&self, kind: &str) -> Category {
        db::create_category(&mut self.ex().await, kind).await.unwrap()
    }

    /// Creates a question with `text` in `category` by directly modifying the backing database.
    pub(crate) async fn create_question(&self, text: &str, category: &Category) -> Question {
        let new = NewQuestion::new(
            text,
            format!("Answer to {}", text),
            *category.id(),
            Difficulty::new(3).unwrap(),
        )
        .unwrap();
        db::create_question(&mut self.ex().await, new).await.unwrap()
    }

    /// Creates `count` questions in `category` named after their creation order.
    pub(crate) async fn create_questions(
        &self,
        count: usize,
        category: &Category,
    ) -> Vec<Question> {
        let mut questions = Vec::with_capacity(count);
        for i in 0..count {
            questions.push(self.create_question(&format!("Question {}", i), category).await);
        }
        questions
    }

    /// Gets all questions by directly querying the backing database.
    pub(crate) async fn all_questions(&self) -> Vec<Question> {
        db::get_questions(&mut self.ex().await).await.unwrap()
    }

    /// Returns an identifier for a category that does not exist.
    pub(crate) fn unknown_category(&self) -> CategoryId {
        CategoryId::new(9999)
    }
}
