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

//! Common tests for any database implementation.

use crate::db::*;
use crate::model::{Drink, DrinkTitle, Ingredient, Recipe};
use marquee_core::db::{Db, DbError};
use std::sync::Arc;

/// Builds a recipe with a single ingredient named `name`.
fn simple_recipe(name: &str) -> Recipe {
    Recipe::new(vec![Ingredient::new("blue", name, 1).unwrap()]).unwrap()
}

async fn test_drinks_ok(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert!(get_drinks(&mut ex).await.unwrap().is_empty());

    let water = create_drink(&mut ex, DrinkTitle::new("Water").unwrap(), simple_recipe("water"))
        .await
        .unwrap();
    let recipe = Recipe::new(vec![
        Ingredient::new("brown", "espresso", 1).unwrap(),
        Ingredient::new("white", "milk", 3).unwrap(),
    ])
    .unwrap();
    let latte =
        create_drink(&mut ex, DrinkTitle::new("Latte").unwrap(), recipe.clone()).await.unwrap();
    assert!(water.id() < latte.id());
    assert_eq!(&recipe, latte.recipe());

    assert_eq!(vec![water.clone(), latte.clone()], get_drinks(&mut ex).await.unwrap());
    assert_eq!(latte, get_drink(&mut ex, *latte.id()).await.unwrap());

    drop(ex);
    db.close().await;
}

async fn test_drinks_duplicate_title(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let title = DrinkTitle::new("Water").unwrap();
    create_drink(&mut ex, title.clone(), simple_recipe("water")).await.unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        create_drink(&mut ex, title, simple_recipe("tap water")).await.unwrap_err()
    );

    drop(ex);
    db.close().await;
}

async fn test_drinks_not_found(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    create_drink(&mut ex, DrinkTitle::new("Water").unwrap(), simple_recipe("water"))
        .await
        .unwrap();
    assert_eq!(DbError::NotFound, get_drink(&mut ex, 500).await.unwrap_err());

    drop(ex);
    db.close().await;
}

async fn test_drinks_update(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let water = create_drink(&mut ex, DrinkTitle::new("Water").unwrap(), simple_recipe("water"))
        .await
        .unwrap();
    let tea = create_drink(&mut ex, DrinkTitle::new("Tea").unwrap(), simple_recipe("tea"))
        .await
        .unwrap();

    let sparkling =
        Drink::new(*water.id(), DrinkTitle::new("Sparkling").unwrap(), simple_recipe("soda"));
    update_drink(&mut ex, &sparkling).await.unwrap();
    assert_eq!(vec![sparkling.clone(), tea.clone()], get_drinks(&mut ex).await.unwrap());

    let clash = Drink::new(*tea.id(), DrinkTitle::new("Sparkling").unwrap(), simple_recipe("tea"));
    assert_eq!(DbError::AlreadyExists, update_drink(&mut ex, &clash).await.unwrap_err());

    let missing = Drink::new(1000, DrinkTitle::new("Ghost").unwrap(), simple_recipe("air"));
    assert_eq!(DbError::NotFound, update_drink(&mut ex, &missing).await.unwrap_err());

    assert_eq!(vec![sparkling, tea], get_drinks(&mut ex).await.unwrap());

    drop(ex);
    db.close().await;
}

async fn test_drinks_delete(db: Arc<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let water = create_drink(&mut ex, DrinkTitle::new("Water").unwrap(), simple_recipe("water"))
        .await
        .unwrap();
    let tea = create_drink(&mut ex, DrinkTitle::new("Tea").unwrap(), simple_recipe("tea"))
        .await
        .unwrap();

    delete_drink(&mut ex, *water.id()).await.unwrap();
    assert_eq!(vec![tea], get_drinks(&mut ex).await.unwrap());

    assert_eq!(DbError::NotFound, delete_drink(&mut ex, *water.id()).await.unwrap_err());

    drop(ex);
    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        marquee_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_drinks_ok,
            test_drinks_duplicate_title,
            test_drinks_not_found,
            test_drinks_update,
            test_drinks_delete
        );
    }
];

mod sqlite {
    use super::*;
    use marquee_core::db::sqlite::testutils::setup;

    /// Initializes an in-memory database with the drinks schema.
    async fn setup_db() -> Arc<dyn Db + Send + Sync> {
        let db = Arc::from(setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(setup_db().await);
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use marquee_core::db::postgres::testutils::setup;

    /// Connects to the test database and initializes it with the drinks schema.
    async fn setup_db() -> Arc<dyn Db + Send + Sync> {
        let db = Arc::from(setup().await);
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        setup_db().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}
