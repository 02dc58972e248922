//! Category resolution for inventory items

use std::collections::HashMap;

use crate::models::{CategoryRef, InventoryItem};

const UNCATEGORIZED: &str = "Uncategorized";

/// Resolve an item's heterogeneous category encoding into a canonical
/// `(category_id, category_name)` pair.
///
/// Precedence, first match wins:
/// 1. embedded object: its id and name
/// 2. numeric id (bare or parsed from a numeric string): name from the
///    lookup table
/// 3. free-text string: the string itself is the name, id stays `None`
/// 4. direct `category_id`, then `categoryId` fields
/// 5. otherwise `(None, "Uncategorized")`
///
/// Unresolvable categories are not an error; the permissive default is
/// deliberate because the upstream is inconsistent about serialization.
pub fn resolve_category(
    item: &InventoryItem,
    names_by_id: &HashMap<i64, String>,
) -> (Option<i64>, String) {
    let lookup = |id: i64| {
        names_by_id
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UNCATEGORIZED.to_string())
    };

    match &item.category {
        CategoryRef::Embedded { id, name } => (
            *id,
            name.clone().unwrap_or_else(|| UNCATEGORIZED.to_string()),
        ),
        CategoryRef::Id(id) | CategoryRef::NamedId(id) => (Some(*id), lookup(*id)),
        CategoryRef::Name(s) => (None, s.clone()),
        CategoryRef::Absent => match item.category_id.or(item.category_id_camel) {
            Some(id) => (Some(id), lookup(id)),
            None => (None, UNCATEGORIZED.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> HashMap<i64, String> {
        HashMap::from([
            (2, "Safety".to_string()),
            (3, "Glassware".to_string()),
            (9, "Chemicals".to_string()),
        ])
    }

    fn item_from(json: serde_json::Value) -> InventoryItem {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_embedded_object_wins_over_direct_field() {
        let item = item_from(serde_json::json!({
            "id": 1,
            "category": { "id": 3, "name": "Glassware" },
            "category_id": 9
        }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(3), "Glassware".to_string())
        );
    }

    #[test]
    fn test_embedded_object_without_name_defaults() {
        let item = item_from(serde_json::json!({ "id": 1, "category": { "id": 3 } }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(3), "Uncategorized".to_string())
        );
    }

    #[test]
    fn test_numeric_id_looked_up() {
        let item = item_from(serde_json::json!({ "id": 1, "category": 2 }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(2), "Safety".to_string())
        );
    }

    #[test]
    fn test_numeric_id_not_in_table() {
        let item = item_from(serde_json::json!({ "id": 1, "category": 42 }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(42), "Uncategorized".to_string())
        );
    }

    #[test]
    fn test_numeric_string_treated_as_id() {
        let item = item_from(serde_json::json!({ "id": 1, "category": "9" }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(9), "Chemicals".to_string())
        );
    }

    #[test]
    fn test_free_text_is_the_name() {
        let item = item_from(serde_json::json!({ "id": 1, "category": "Consumables" }));
        assert_eq!(
            resolve_category(&item, &names()),
            (None, "Consumables".to_string())
        );
    }

    #[test]
    fn test_direct_field_fallback_order() {
        let item = item_from(serde_json::json!({ "id": 1, "category_id": 2, "categoryId": 3 }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(2), "Safety".to_string())
        );

        let item = item_from(serde_json::json!({ "id": 1, "categoryId": 3 }));
        assert_eq!(
            resolve_category(&item, &names()),
            (Some(3), "Glassware".to_string())
        );
    }

    #[test]
    fn test_nothing_resolves() {
        let item = item_from(serde_json::json!({ "id": 1 }));
        assert_eq!(
            resolve_category(&item, &names()),
            (None, "Uncategorized".to_string())
        );
    }
}
