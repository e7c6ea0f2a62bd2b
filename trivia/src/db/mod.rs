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

//! Database abstraction to manipulate questions and categories.

use crate::model::{Category, CategoryId, Difficulty, NewQuestion, Question};
use log::info;
#[cfg(feature = "postgres")]
use marquee_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use marquee_core::db::sqlite;
use marquee_core::db::{DbError, DbResult, Executor};
use marquee_core::model::SearchTerm;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Category {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let kind: String = row.try_get("type").map_err(postgres::map_sqlx_error)?;
        Ok(Category::new(CategoryId::new(id), kind))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Question {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let question: String = row.try_get("question").map_err(postgres::map_sqlx_error)?;
        let answer: String = row.try_get("answer").map_err(postgres::map_sqlx_error)?;
        let category: i64 = row.try_get("category").map_err(postgres::map_sqlx_error)?;
        let difficulty: i32 = row.try_get("difficulty").map_err(postgres::map_sqlx_error)?;

        let difficulty = Difficulty::new(i64::from(difficulty))?;
        Ok(Question::new(id, question, answer, CategoryId::new(category), difficulty))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Category {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let kind: String = row.try_get("type").map_err(sqlite::map_sqlx_error)?;
        Ok(Category::new(CategoryId::new(id), kind))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Question {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let question: String = row.try_get("question").map_err(sqlite::map_sqlx_error)?;
        let answer: String = row.try_get("answer").map_err(sqlite::map_sqlx_error)?;
        let category: i64 = row.try_get("category").map_err(sqlite::map_sqlx_error)?;
        let difficulty: i32 = row.try_get("difficulty").map_err(sqlite::map_sqlx_error)?;

        let difficulty = Difficulty::new(i64::from(difficulty))?;
        Ok(Question::new(id, question, answer, CategoryId::new(category), difficulty))
    }
}

/// Converts a collection of raw `rows` into model objects of type `T`.
fn rows_to<R, T>(rows: Vec<R>) -> DbResult<Vec<T>>
where
    T: TryFrom<R, Error = DbError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Creates a new category named `kind`.
pub(crate) async fn create_category(ex: &mut Executor, kind: &str) -> DbResult<Category> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO categories (type) VALUES ($1) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(kind)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO categories (type) VALUES (?)";
            let done = sqlx::query(query_str)
                .bind(kind)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Category::new(CategoryId::new(id), kind.to_owned()))
}

/// Inserts the categories in `kinds` that do not exist yet.
pub async fn seed_categories(ex: &mut Executor, kinds: &[&str]) -> DbResult<()> {
    for kind in kinds {
        match create_category(ex, kind).await {
            Ok(category) => info!("Created category {} with id {}", kind, category.id().as_i64()),
            Err(DbError::AlreadyExists) => (),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Gets all categories sorted by their identifier.
pub(crate) async fn get_categories(ex: &mut Executor) -> DbResult<Vec<Category>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, type FROM categories ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows_to(rows)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, type FROM categories ORDER BY id";
            let rows =
                sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            rows_to(rows)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the category identified by `id`.
pub(crate) async fn get_category(ex: &mut Executor, id: CategoryId) -> DbResult<Category> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, type FROM categories WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Category::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, type FROM categories WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Category::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Stores a `new` question and returns it with its assigned identifier.
///
/// Fails with `DbError::ConstraintViolation` if the category of the question does not exist.
pub(crate) async fn create_question(ex: &mut Executor, new: NewQuestion) -> DbResult<Question> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO questions (question, answer, category, difficulty)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(new.question().as_str())
                .bind(new.answer().as_str())
                .bind(new.category().as_i64())
                .bind(new.difficulty().as_i64() as i32)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO questions (question, answer, category, difficulty)
                VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(new.question().as_str())
                .bind(new.answer().as_str())
                .bind(new.category().as_i64())
                .bind(new.difficulty().as_i64() as i32)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(new.with_id(id))
}

/// Gets all questions sorted by their identifier.
pub(crate) async fn get_questions(ex: &mut Executor) -> DbResult<Vec<Question>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM questions ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows_to(rows)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM questions ORDER BY id";
            let rows =
                sqlx::query(query_str).fetch_all(ex.conn()).await.map_err(sqlite::map_sqlx_error)?;
            rows_to(rows)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all questions in the `category` sorted by their identifier.
pub(crate) async fn get_questions_in_category(
    ex: &mut Executor,
    category: CategoryId,
) -> DbResult<Vec<Question>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM questions WHERE category = $1 ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(category.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows_to(rows)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM questions WHERE category = ? ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(category.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows_to(rows)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all questions whose text contains `term`, ignoring case, sorted by their identifier.
pub(crate) async fn search_questions(
    ex: &mut Executor,
    term: &SearchTerm,
) -> DbResult<Vec<Question>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT * FROM questions WHERE question ILIKE $1 ESCAPE '\\' ORDER BY id";
            let rows = sqlx::query(query_str)
                .bind(term.like_pattern())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows_to(rows)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // LIKE in SQLite only folds ASCII case so matching happens here.
            let query_str = "SELECT * FROM questions ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let questions: Vec<Question> = rows_to(rows)?;
            Ok(questions.into_iter().filter(|q| term.matches(q.question())).collect())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the question identified by `id`.
pub(crate) async fn delete_question(ex: &mut Executor, id: i64) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM questions WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM questions WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
