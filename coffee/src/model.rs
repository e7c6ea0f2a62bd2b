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

//! High-level data types for the drinks menu.

use derive_getters::Getters;
use derive_more::Constructor;
use marquee_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title of a drink.  Titles are never blank.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DrinkTitle(String);

impl DrinkTitle {
    /// Creates a new title from an untrusted string.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ModelError("Title cannot be empty".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the title.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// One ingredient of a recipe.
#[derive(Clone, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct Ingredient {
    /// Color used to draw the ingredient in the menu.
    color: String,

    /// Name of the ingredient.
    name: String,

    /// Proportion of the ingredient in the drink.
    parts: u32,
}

impl Ingredient {
    /// Creates a new ingredient after validating its fields.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        color: S1,
        name: S2,
        parts: u32,
    ) -> ModelResult<Self> {
        Self { color: color.into(), name: name.into(), parts }.validate()
    }

    /// Checks that the fields of this ingredient are valid and returns it.
    fn validate(self) -> ModelResult<Self> {
        if self.color.trim().is_empty() {
            return Err(ModelError("Ingredient color cannot be empty".to_owned()));
        }
        if self.name.trim().is_empty() {
            return Err(ModelError("Ingredient name cannot be empty".to_owned()));
        }
        if self.parts == 0 {
            return Err(ModelError(format!("Ingredient {} must have at least one part", self.name)));
        }
        Ok(self)
    }
}

/// Ingredient as shown to anonymous clients, without its name.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ShortIngredient {
    /// Color used to draw the ingredient in the menu.
    pub(crate) color: String,

    /// Proportion of the ingredient in the drink.
    pub(crate) parts: u32,
}

/// The list of ingredients of a drink.  Recipes are never empty.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Recipe(Vec<Ingredient>);

impl Recipe {
    /// Creates a new recipe from a list of `ingredients`.
    pub(crate) fn new(ingredients: Vec<Ingredient>) -> ModelResult<Self> {
        if ingredients.is_empty() {
            return Err(ModelError("Recipe must have at least one ingredient".to_owned()));
        }
        let ingredients =
            ingredients.into_iter().map(Ingredient::validate).collect::<ModelResult<Vec<_>>>()?;
        Ok(Self(ingredients))
    }

    /// Parses a recipe as sent by clients.
    ///
    /// The recipe can be a list of ingredients, a single ingredient, or a string that holds the
    /// JSON encoding of either.
    pub(crate) fn from_value(value: Value) -> ModelResult<Self> {
        match value {
            Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::String(_)) => {
                    Err(ModelError("Recipe string must encode a list or an object".to_owned()))
                }
                Ok(value) => Self::from_value(value),
                Err(e) => Err(ModelError(format!("Recipe is not valid JSON: {}", e))),
            },
            Value::Array(_) => {
                let ingredients = serde_json::from_value::<Vec<Ingredient>>(value)
                    .map_err(|e| ModelError(format!("Invalid recipe: {}", e)))?;
                Self::new(ingredients)
            }
            Value::Object(_) => {
                let ingredient = serde_json::from_value::<Ingredient>(value)
                    .map_err(|e| ModelError(format!("Invalid recipe: {}", e)))?;
                Self::new(vec![ingredient])
            }
            _ => Err(ModelError("Recipe must be a list of ingredients".to_owned())),
        }
    }

    /// Returns the ingredients of the recipe.
    pub(crate) fn ingredients(&self) -> &[Ingredient] {
        &self.0
    }
}

/// A drink in the menu.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Drink {
    /// Identifier of the drink.
    id: i64,

    /// Title of the drink.
    title: DrinkTitle,

    /// Recipe to prepare the drink.
    recipe: Recipe,
}

impl Drink {
    /// Returns the representation of the drink for anonymous clients.
    pub(crate) fn short(&self) -> ShortDrink {
        let recipe = self
            .recipe
            .ingredients()
            .iter()
            .map(|i| ShortIngredient { color: i.color.clone(), parts: i.parts })
            .collect();
        ShortDrink { id: self.id, title: self.title.as_str().to_owned(), recipe }
    }

    /// Returns the full representation of the drink, including ingredient names.
    pub(crate) fn long(&self) -> LongDrink {
        LongDrink {
            id: self.id,
            title: self.title.as_str().to_owned(),
            recipe: self.recipe.ingredients().to_vec(),
        }
    }
}

/// Representation of a drink that omits ingredient names.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ShortDrink {
    /// Identifier of the drink.
    pub(crate) id: i64,

    /// Title of the drink.
    pub(crate) title: String,

    /// Ingredients without their names.
    pub(crate) recipe: Vec<ShortIngredient>,
}

/// Representation of a drink with all of its details.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct LongDrink {
    /// Identifier of the drink.
    pub(crate) id: i64,

    /// Title of the drink.
    pub(crate) title: String,

    /// Full ingredients.
    pub(crate) recipe: Vec<Ingredient>,
}
