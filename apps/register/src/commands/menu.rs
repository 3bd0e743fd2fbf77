//! # Menu Commands
//!
//! Read-only access to the menu panel shown beside a table.

use tabletop_core::menu::MenuCategory;
use tabletop_core::validation::validate_search_query;
use tabletop_core::MenuItem;
use tracing::debug;

use crate::error::ApiError;
use crate::state::MenuState;

pub fn get_menu(menu: &MenuState) -> Result<Vec<MenuItem>, ApiError> {
    debug!("get_menu command");
    Ok(menu.catalog().items().to_vec())
}

/// Case-insensitive match on item description.
pub fn search_menu(menu: &MenuState, query: &str) -> Result<Vec<MenuItem>, ApiError> {
    debug!(query = %query, "search_menu command");

    let query = validate_search_query(query)?;
    Ok(menu.catalog().search(&query).into_iter().cloned().collect())
}

pub fn menu_by_category(menu: &MenuState) -> Result<Vec<MenuCategory>, ApiError> {
    debug!("menu_by_category command");
    Ok(menu.catalog().by_category())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_get_menu() {
        let items = get_menu(&MenuState::default()).unwrap();
        assert_eq!(items.len(), 15);
        assert_eq!(items[2].description, "Caesar Salad");
    }

    #[test]
    fn test_search_menu() {
        let menu = MenuState::default();

        let ids: Vec<String> = search_menu(&menu, "classic")
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, ["1", "10"]);

        let err = search_menu(&menu, &"x".repeat(101)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_menu_by_category() {
        let groups = menu_by_category(&MenuState::default()).unwrap();
        let total: usize = groups.iter().map(|g| g.items.len()).sum();
        assert_eq!(total, 15);
        assert_eq!(groups[0].category, "Main");
    }
}
