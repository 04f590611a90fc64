//! Coffee-shop drink bodies, in the short (public) and long (staff) forms.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::models::{Drink, Ingredient, IngredientPortion, short_recipe};
use crate::services::DrinkDraft;

/// A recipe sent either as one ingredient or as a list.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            RecipeInput::Many(ingredients) => ingredients,
            RecipeInput::One(ingredient) => vec![ingredient],
        }
    }
}

/// Body of `POST /drinks` and `PATCH /drinks/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

impl DrinkRequest {
    pub fn into_draft(self) -> DrinkDraft {
        DrinkDraft {
            title: self.title,
            recipe: self.recipe.map(RecipeInput::into_vec),
        }
    }
}

fn ingredients(drink: &Drink) -> Result<Vec<Ingredient>, AppError> {
    drink.ingredients().map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e).context(format!("drink {} has a malformed recipe", drink.id)),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<IngredientPortion>,
}

impl TryFrom<Drink> for DrinkShort {
    type Error = AppError;

    fn try_from(drink: Drink) -> Result<Self, Self::Error> {
        let recipe = short_recipe(&ingredients(&drink)?);
        Ok(Self {
            id: drink.id,
            title: drink.title,
            recipe,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl TryFrom<Drink> for DrinkLong {
    type Error = AppError;

    fn try_from(drink: Drink) -> Result<Self, Self::Error> {
        let recipe = ingredients(&drink)?;
        Ok(Self {
            id: drink.id,
            title: drink.title,
            recipe,
        })
    }
}

/// Converts a whole menu, failing on the first malformed recipe.
pub fn menu<T>(drinks: Vec<Drink>) -> Result<Vec<T>, AppError>
where
    T: TryFrom<Drink, Error = AppError>,
{
    drinks.into_iter().map(T::try_from).collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkMenuResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinkMenuResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// `POST /drinks` answers with the single created drink.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkCreatedResponse {
    pub success: bool,
    pub drinks: DrinkLong,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkDeletedResponse {
    pub success: bool,
    pub delete: i32,
}
