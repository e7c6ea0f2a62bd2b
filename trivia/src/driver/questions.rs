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

//! Operations on questions.

use crate::db;
use crate::driver::Driver;
use crate::model::{Category, CategoryId, NewQuestion, QUESTIONS_PER_PAGE, Question};
use marquee_core::db::DbError;
use marquee_core::driver::{DriverError, DriverResult};
use marquee_core::model::SearchTerm;
use marquee_core::pagination::{PageNumber, paginate};

/// A page of questions taken from a larger collection.
#[derive(Debug, PartialEq)]
pub(crate) struct QuestionsPage {
    /// The questions in the requested page.
    pub(crate) questions: Vec<Question>,

    /// Number of questions in the whole collection.
    pub(crate) total_questions: usize,
}

impl QuestionsPage {
    /// Extracts `page` out of `all` questions.
    fn new(all: Vec<Question>, page: PageNumber) -> Self {
        let total_questions = all.len();
        let questions = paginate(all, page, QUESTIONS_PER_PAGE);
        Self { questions, total_questions }
    }

    /// Returns true if the page holds no questions.
    fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Driver {
    /// Gets the questions in `page` along with all categories.
    pub(crate) async fn get_questions(
        self,
        page: PageNumber,
    ) -> DriverResult<(QuestionsPage, Vec<Category>)> {
        let mut tx = self.db.begin().await?;
        let questions = QuestionsPage::new(db::get_questions(tx.ex()).await?, page);
        if questions.is_empty() {
            return Err(DriverError::NotFound(format!("No questions in page {}", page.get())));
        }
        let categories = db::get_categories(tx.ex()).await?;
        tx.commit().await?;
        Ok((questions, categories))
    }

    /// Stores a `new` question and returns it along with the first page of questions.
    ///
    /// Questions referencing unknown categories are rejected as unprocessable.
    pub(crate) async fn create_question(
        self,
        new: NewQuestion,
    ) -> DriverResult<(Question, QuestionsPage)> {
        let mut tx = self.db.begin().await?;
        let category = *new.category();
        let question = match db::create_question(tx.ex(), new).await {
            Ok(question) => question,
            Err(DbError::ConstraintViolation(_)) => {
                return Err(DriverError::Unprocessable(format!(
                    "Category {} does not exist",
                    category.as_i64()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let questions = QuestionsPage::new(db::get_questions(tx.ex()).await?, PageNumber::FIRST);
        tx.commit().await?;
        Ok((question, questions))
    }

    /// Deletes the question `id` and returns the first page of the remaining questions.
    ///
    /// Deleting a question that does not exist is unprocessable, not a missing resource.
    pub(crate) async fn delete_question(self, id: i64) -> DriverResult<QuestionsPage> {
        let mut tx = self.db.begin().await?;
        match db::delete_question(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::Unprocessable(format!("Question {} does not exist", id)));
            }
            Err(e) => return Err(e.into()),
        }
        let questions = QuestionsPage::new(db::get_questions(tx.ex()).await?, PageNumber::FIRST);
        tx.commit().await?;
        Ok(questions)
    }

    /// Gets the questions in `page` out of those whose text contains `term`.
    pub(crate) async fn search_questions(
        self,
        term: SearchTerm,
        page: PageNumber,
    ) -> DriverResult<QuestionsPage> {
        let questions = db::search_questions(&mut self.db.ex().await?, &term).await?;
        let questions = QuestionsPage::new(questions, page);
        if questions.is_empty() {
            return Err(DriverError::NotFound(format!(
                "No questions match '{}' in page {}",
                term.as_str(),
                page.get()
            )));
        }
        Ok(questions)
    }

    /// Gets the questions in `page` out of those in the `category`, along with the category.
    ///
    /// Unknown categories and empty pages are both unprocessable.
    pub(crate) async fn get_category_questions(
        self,
        id: CategoryId,
        page: PageNumber,
    ) -> DriverResult<(Category, QuestionsPage)> {
        let mut tx = self.db.begin().await?;
        let category = match db::get_category(tx.ex(), id).await {
            Ok(category) => category,
            Err(DbError::NotFound) => {
                return Err(DriverError::Unprocessable(format!(
                    "Category {} does not exist",
                    id.as_i64()
                )));
            }
            Err(e) => return Err(e.into()),
        };
        let questions = db::get_questions_in_category(tx.ex(), id).await?;
        let questions = QuestionsPage::new(questions, page);
        if questions.is_empty() {
            return Err(DriverError::Unprocessable(format!(
                "No questions in page {} of category {}",
                page.get(),
                category.kind()
            )));
        }
        tx.commit().await?;
        Ok((category, questions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::Difficulty;

    /// Shorthand to build a page number.
    fn page(n: usize) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_get_questions_pages() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;
        let questions = context.create_questions(15, &science).await;

        let (first, categories) = context.driver().get_questions(page(1)).await.unwrap();
        let exp_first = QuestionsPage { questions: questions[0..10].to_vec(), total_questions: 15 };
        assert_eq!(exp_first, first);
        assert_eq!(vec![science, art], categories);

        let (second, _) = context.driver().get_questions(page(2)).await.unwrap();
        let exp_second = QuestionsPage { questions: questions[10..].to_vec(), total_questions: 15 };
        assert_eq!(exp_second, second);
    }

    #[tokio::test]
    async fn test_get_questions_past_the_end() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        context.create_questions(10, &science).await;

        assert_eq!(
            DriverError::NotFound("No questions in page 2".to_owned()),
            context.driver().get_questions(page(2)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_questions_none() {
        let context = TestContext::setup().await;

        context.create_category("Science").await;

        assert_eq!(
            DriverError::NotFound("No questions in page 1".to_owned()),
            context.driver().get_questions(PageNumber::FIRST).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_question_ok() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let existing = context.create_question("Existing", &science).await;

        let new = NewQuestion::new("New?", "Yes", *science.id(), Difficulty::new(5).unwrap())
            .unwrap();
        let (question, page) = context.driver().create_question(new.clone()).await.unwrap();
        assert_eq!(new.with_id(*question.id()), question);
        assert_eq!(
            QuestionsPage { questions: vec![existing, question.clone()], total_questions: 2 },
            page
        );
        assert_eq!(page.questions, context.all_questions().await);
    }

    #[tokio::test]
    async fn test_create_question_unknown_category() {
        let context = TestContext::setup().await;

        let new =
            NewQuestion::new("New?", "Yes", context.unknown_category(), Difficulty::new(1).unwrap())
                .unwrap();
        assert_eq!(
            DriverError::Unprocessable("Category 9999 does not exist".to_owned()),
            context.driver().create_question(new).await.unwrap_err()
        );
        assert!(context.all_questions().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_question_ok() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let questions = context.create_questions(12, &science).await;

        let page = context.driver().delete_question(*questions[0].id()).await.unwrap();
        assert_eq!(
            QuestionsPage { questions: questions[1..11].to_vec(), total_questions: 11 },
            page
        );
        assert_eq!(questions[1..].to_vec(), context.all_questions().await);
    }

    #[tokio::test]
    async fn test_delete_question_not_found() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let questions = context.create_questions(2, &science).await;

        assert_eq!(
            DriverError::Unprocessable("Question 1234 does not exist".to_owned()),
            context.driver().delete_question(1234).await.unwrap_err()
        );
        assert_eq!(questions, context.all_questions().await);
    }

    #[tokio::test]
    async fn test_search_questions_ok() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let q1 = context.create_question("What is the BOILING point of water?", &science).await;
        context.create_question("Who discovered penicillin?", &science).await;
        let q3 = context.create_question("Is boiling an endothermic process?", &science).await;

        let term = SearchTerm::new("boiling").unwrap();
        let page = context.driver().search_questions(term, PageNumber::FIRST).await.unwrap();
        assert_eq!(QuestionsPage { questions: vec![q1, q3], total_questions: 2 }, page);
    }

    #[tokio::test]
    async fn test_search_questions_no_matches() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        context.create_question("Who discovered penicillin?", &science).await;

        let term = SearchTerm::new("xyz").unwrap();
        assert_eq!(
            DriverError::NotFound("No questions match 'xyz' in page 1".to_owned()),
            context.driver().search_questions(term, PageNumber::FIRST).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_category_questions_ok() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;
        context.create_questions(3, &science).await;
        let art_questions = context.create_questions(2, &art).await;

        let (category, page) =
            context.driver().get_category_questions(*art.id(), PageNumber::FIRST).await.unwrap();
        assert_eq!(art, category);
        assert_eq!(QuestionsPage { questions: art_questions, total_questions: 2 }, page);
    }

    #[tokio::test]
    async fn test_get_category_questions_unknown_category() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::Unprocessable("Category 9999 does not exist".to_owned()),
            context
                .driver()
                .get_category_questions(context.unknown_category(), PageNumber::FIRST)
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_get_category_questions_empty() {
        let context = TestContext::setup().await;

        let science = context.create_category("Science").await;
        let art = context.create_category("Art").await;
        context.create_questions(3, &science).await;

        assert_eq!(
            DriverError::Unprocessable("No questions in page 1 of category Art".to_owned()),
            context.driver().get_category_questions(*art.id(), PageNumber::FIRST).await.unwrap_err()
        );
    }
}
