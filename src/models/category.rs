use std::collections::BTreeMap;

use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub id: i32,
    pub kind: String,
}

/// Categories keyed by id, the shape every trivia listing embeds.
///
/// Serializes as a JSON object whose keys are the ids rendered as strings.
pub type CategoryMap = BTreeMap<i32, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_map_serializes_with_string_keys() {
        let map = category_map(vec![
            Category { id: 2, kind: "Art".to_string() },
            Category { id: 1, kind: "Science".to_string() },
        ]);

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"1": "Science", "2": "Art"}));
    }
}
