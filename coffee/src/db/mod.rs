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

//! Database abstraction to manipulate drinks.

use crate::model::{Drink, DrinkTitle, Ingredient, Recipe};
#[cfg(feature = "postgres")]
use marquee_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use marquee_core::db::sqlite;
use marquee_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(test)]
mod tests;

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

/// Serializes `recipe` for storage.
fn recipe_to_json(recipe: &Recipe) -> DbResult<String> {
    Ok(serde_json::to_string(recipe.ingredients())?)
}

/// Parses a `raw` recipe as read from storage.
fn recipe_from_json(raw: &str) -> DbResult<Recipe> {
    let ingredients = serde_json::from_str::<Vec<Ingredient>>(raw)?;
    Ok(Recipe::new(ingredients)?)
}

/// Builds a drink out of the raw values of a row.
fn build_drink(id: i64, title: String, recipe: String) -> DbResult<Drink> {
    Ok(Drink::new(id, DrinkTitle::new(title)?, recipe_from_json(&recipe)?))
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Drink {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let recipe: String = row.try_get("recipe").map_err(postgres::map_sqlx_error)?;
        build_drink(id, title, recipe)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Drink {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let recipe: String = row.try_get("recipe").map_err(sqlite::map_sqlx_error)?;
        build_drink(id, title, recipe)
    }
}

/// Stores a new drink and returns it with its assigned identifier.
///
/// Fails with `DbError::AlreadyExists` if another drink has the same title.
pub(crate) async fn create_drink(
    ex: &mut Executor,
    title: DrinkTitle,
    recipe: Recipe,
) -> DbResult<Drink> {
    let raw_recipe = recipe_to_json(&recipe)?;
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO drinks (title, recipe) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(title.as_str())
                .bind(&raw_recipe)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO drinks (title, recipe) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(title.as_str())
                .bind(&raw_recipe)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    Ok(Drink::new(id, title, recipe))
}

/// Gets all drinks sorted by their identifier.
pub(crate) async fn get_drinks(ex: &mut Executor) -> DbResult<Vec<Drink>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, title, recipe FROM drinks ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Drink::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, title, recipe FROM drinks ORDER BY id";
            let rows = sqlx::query(query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Drink::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the drink identified by `id`.
pub(crate) async fn get_drink(ex: &mut Executor, id: i64) -> DbResult<Drink> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, title, recipe FROM drinks WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Drink::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, title, recipe FROM drinks WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Drink::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the title and recipe of an existing `drink`.
///
/// Fails with `DbError::AlreadyExists` if another drink has the new title.
pub(crate) async fn update_drink(ex: &mut Executor, drink: &Drink) -> DbResult<()> {
    let raw_recipe = recipe_to_json(drink.recipe())?;
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE drinks SET title = $1, recipe = $2 WHERE id = $3";
            let done = sqlx::query(query_str)
                .bind(drink.title().as_str())
                .bind(&raw_recipe)
                .bind(*drink.id())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE drinks SET title = ?, recipe = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(drink.title().as_str())
                .bind(&raw_recipe)
                .bind(*drink.id())
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
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes the drink identified by `id`.
pub(crate) async fn delete_drink(ex: &mut Executor, id: i64) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM drinks WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM drinks WHERE id = ?";
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
