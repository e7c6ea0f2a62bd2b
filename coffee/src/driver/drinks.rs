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

//! Operations on drinks.

use crate::db;
use crate::driver::Driver;
use crate::model::{Drink, DrinkTitle, Recipe};
use log::info;
use marquee_core::db::DbError;
use marquee_core::driver::{DriverError, DriverResult};
use serde_json::Value;

/// Creates the error returned when a drink named `title` already exists.
fn already_exists(title: &str) -> DriverError {
    DriverError::AlreadyExists(format!("Drink '{}' already exists", title))
}

impl Driver {
    /// Gets all drinks in the menu.
    pub(crate) async fn get_drinks(self) -> DriverResult<Vec<Drink>> {
        Ok(db::get_drinks(&mut self.db.ex().await?).await?)
    }

    /// Adds a new drink to the menu.  Titles must be unique.
    pub(crate) async fn create_drink(
        self,
        title: DrinkTitle,
        recipe: Recipe,
    ) -> DriverResult<Drink> {
        let mut tx = self.db.begin().await?;
        let raw_title = title.as_str().to_owned();
        let drink = match db::create_drink(tx.ex(), title, recipe).await {
            Ok(drink) => drink,
            Err(DbError::AlreadyExists) => return Err(already_exists(&raw_title)),
            Err(e) => return Err(e.into()),
        };
        tx.commit().await?;
        info!("Added drink {} titled '{}'", drink.id(), drink.title().as_str());
        Ok(drink)
    }

    /// Changes the `title` of the drink `id` and, if given, its `recipe`.
    ///
    /// The raw inputs are only validated once the drink is known to exist.  The title is
    /// mandatory and a null `recipe` keeps the current one.
    pub(crate) async fn update_drink(
        self,
        id: i64,
        title: Option<String>,
        recipe: Option<Value>,
    ) -> DriverResult<Drink> {
        let mut tx = self.db.begin().await?;
        let old = match db::get_drink(tx.ex(), id).await {
            Ok(drink) => drink,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Drink {} does not exist", id)));
            }
            Err(e) => return Err(e.into()),
        };

        let title = match title {
            Some(title) => DrinkTitle::new(title)?,
            None => return Err(DriverError::InvalidInput("Missing title".to_owned())),
        };
        let recipe = match recipe {
            None | Some(Value::Null) => old.recipe().clone(),
            Some(recipe) => Recipe::from_value(recipe)
                .map_err(|e| DriverError::Unprocessable(e.to_string()))?,
        };

        let drink = Drink::new(id, title, recipe);
        match db::update_drink(tx.ex(), &drink).await {
            Ok(()) => (),
            Err(DbError::AlreadyExists) => return Err(already_exists(drink.title().as_str())),
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(drink)
    }

    /// Removes the drink `id` from the menu.
    pub(crate) async fn delete_drink(self, id: i64) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        match db::delete_drink(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Drink {} does not exist", id)));
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        info!("Removed drink {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::driver::testutils::*;
    use crate::model::{Drink, DrinkTitle};
    use marquee_core::driver::DriverError;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_drinks_empty() {
        let context = TestContext::setup().await;

        assert!(context.driver().get_drinks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_drinks_ok() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;
        let tea = context.create_drink("Tea").await;

        assert_eq!(vec![water, tea], context.driver().get_drinks().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_drink_ok() {
        let context = TestContext::setup().await;

        let drink = context
            .driver()
            .create_drink(DrinkTitle::new("Latte").unwrap(), recipe_for("milk"))
            .await
            .unwrap();
        assert_eq!("Latte", drink.title().as_str());
        assert_eq!(vec![drink], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_create_drink_duplicate() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;

        match context
            .driver()
            .create_drink(DrinkTitle::new("Water").unwrap(), recipe_for("tap water"))
            .await
        {
            Err(DriverError::AlreadyExists(msg)) => assert!(msg.contains("'Water' already exists")),
            e => panic!("{:?}", e),
        }
        assert_eq!(vec![water], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_update_drink_title_only() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;

        let updated = context
            .driver()
            .update_drink(*water.id(), Some("Still water".to_owned()), None)
            .await
            .unwrap();
        let title = DrinkTitle::new("Still water").unwrap();
        let exp = Drink::new(*water.id(), title, recipe_for("Water"));
        assert_eq!(exp, updated);
        assert_eq!(vec![exp], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_update_drink_title_and_recipe() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;

        let recipe = json!([{"color": "green", "name": "soda", "parts": 2}]);
        let updated = context
            .driver()
            .update_drink(*water.id(), Some("Soda".to_owned()), Some(recipe))
            .await
            .unwrap();
        let exp = Drink::new(*water.id(), DrinkTitle::new("Soda").unwrap(), recipe_for("soda"));
        assert_eq!(exp, updated);
        assert_eq!(vec![updated], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_update_drink_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Drink 5 does not exist".to_owned()),
            context
                .driver()
                .update_drink(5, Some("Soda".to_owned()), None)
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_drink_not_found_before_validation() {
        let context = TestContext::setup().await;

        for (title, recipe) in [(None, None), (Some(String::new()), Some(json!([])))] {
            assert_eq!(
                DriverError::NotFound("Drink 7 does not exist".to_owned()),
                context.driver().update_drink(7, title, recipe).await.unwrap_err()
            );
        }
    }

    #[tokio::test]
    async fn test_update_drink_invalid_inputs() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;

        assert_eq!(
            DriverError::InvalidInput("Missing title".to_owned()),
            context.driver().update_drink(*water.id(), None, None).await.unwrap_err()
        );
        match context.driver().update_drink(*water.id(), Some(String::new()), None).await {
            Err(DriverError::InvalidInput(_)) => (),
            e => panic!("{:?}", e),
        }
        let title = Some("Soda".to_owned());
        match context.driver().update_drink(*water.id(), title, Some(json!([]))).await {
            Err(DriverError::Unprocessable(_)) => (),
            e => panic!("{:?}", e),
        }
        assert_eq!(vec![water], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_update_drink_duplicate() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;
        let tea = context.create_drink("Tea").await;

        let title = Some("Water".to_owned());
        match context.driver().update_drink(*tea.id(), title, None).await {
            Err(DriverError::AlreadyExists(msg)) => assert!(msg.contains("'Water' already exists")),
            e => panic!("{:?}", e),
        }
        assert_eq!(vec![water, tea], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_delete_drink_ok() {
        let context = TestContext::setup().await;

        let water = context.create_drink("Water").await;
        let tea = context.create_drink("Tea").await;

        context.driver().delete_drink(*water.id()).await.unwrap();
        assert_eq!(vec![tea], context.all_drinks().await);
    }

    #[tokio::test]
    async fn test_delete_drink_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Drink 3 does not exist".to_owned()),
            context.driver().delete_drink(3).await.unwrap_err()
        );
    }
}
