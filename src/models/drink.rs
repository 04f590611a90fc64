use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Drink row; `recipe` holds a JSON array of [`Ingredient`]s.
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::drinks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: serde_json::Value,
}

impl Drink {
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, serde_json::Error> {
        serde_json::from_value(self.recipe.clone())
    }
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::drinks)]
pub struct NewDrink {
    pub title: String,
    pub recipe: serde_json::Value,
}

#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::drinks)]
pub struct UpdateDrink {
    pub title: Option<String>,
    pub recipe: Option<serde_json::Value>,
}

/// One line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    pub color: String,
    pub parts: i32,
    /// Hidden ingredients only show up in the detailed representation.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// The public projection of an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IngredientPortion {
    pub color: String,
    pub parts: i32,
}

/// Short recipe form: visible ingredients only, colour and parts.
pub fn short_recipe(ingredients: &[Ingredient]) -> Vec<IngredientPortion> {
    ingredients
        .iter()
        .filter(|ingredient| ingredient.visible)
        .map(|ingredient| IngredientPortion {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ingredient(name: &str, color: &str, parts: i32, visible: bool) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            color: color.to_string(),
            parts,
            visible,
        }
    }

    #[test]
    fn test_short_recipe_drops_hidden_ingredients() {
        let recipe = vec![
            ingredient("espresso", "brown", 1, true),
            ingredient("secret syrup", "amber", 1, false),
            ingredient("milk", "white", 3, true),
        ];

        let short = short_recipe(&recipe);
        assert_eq!(short.len(), 2);
        assert!(short.iter().all(|portion| portion.color != "amber"));
        assert_eq!(short[1], IngredientPortion { color: "white".to_string(), parts: 3 });
    }

    #[test]
    fn test_visible_defaults_to_true() {
        let parsed: Ingredient =
            serde_json::from_value(json!({"name": "water", "color": "blue", "parts": 1})).unwrap();
        assert!(parsed.visible);
    }

    #[test]
    fn test_drink_ingredients_round_trip_from_row() {
        let drink = Drink {
            id: 1,
            title: "matcha shake".to_string(),
            recipe: json!([
                {"name": "milk", "color": "grey", "parts": 1},
                {"name": "matcha", "color": "green", "parts": 3, "visible": false}
            ]),
        };

        let ingredients = drink.ingredients().unwrap();
        assert_eq!(ingredients.len(), 2);
        assert!(!ingredients[1].visible);
        assert_eq!(short_recipe(&ingredients).len(), 1);
    }
}
