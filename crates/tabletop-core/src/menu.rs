//! # Menu Catalog
//!
//! Read-only reference data: what staff can put on a table.
//!
//! A [`MenuItem`] is never stored on a table directly. Adding it copies its
//! billing fields into an [`ItemTemplate`], so later menu edits cannot change
//! what an open table already owes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ItemTemplate;

/// Product classification code used by every default menu item.
pub const DEFAULT_PRODUCT_KEY: &str = "80141503";

/// Unit-of-measure code used by every default menu item.
pub const DEFAULT_UNIT_KEY: &str = "E48";

// =============================================================================
// Menu Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub description: String,
    pub unit_price: Money,
    pub category: String,
    pub product_key: String,
    pub unit_key: String,
}

impl MenuItem {
    /// The data copied onto a table when this item is added.
    pub fn template(&self) -> ItemTemplate {
        ItemTemplate::new(
            self.description.clone(),
            self.unit_price,
            self.product_key.clone(),
            self.unit_key.clone(),
        )
    }
}

/// One category heading and its items, as the menu panel lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct MenuCategory {
    pub category: String,
    pub items: Vec<MenuItem>,
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        MenuCatalog { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items whose description contains `query`, ignoring case.
    ///
    /// A blank query returns the whole menu.
    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        let query = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| query.is_empty() || item.description.to_lowercase().contains(&query))
            .collect()
    }

    /// Groups items by category, categories in first-appearance order.
    pub fn by_category(&self) -> Vec<MenuCategory> {
        let mut groups: Vec<MenuCategory> = Vec::new();

        for item in &self.items {
            match groups.iter_mut().find(|g| g.category == item.category) {
                Some(group) => group.items.push(item.clone()),
                None => groups.push(MenuCategory {
                    category: item.category.clone(),
                    items: vec![item.clone()],
                }),
            }
        }

        groups
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuCatalog {
    /// The house menu.
    fn default() -> Self {
        const HOUSE_MENU: [(&str, &str, i64, &str); 15] = [
            ("1", "Classic Cheeseburger", 1299, "Main"),
            ("2", "Margherita Pizza", 1699, "Main"),
            ("3", "Caesar Salad", 949, "Salads"),
            ("4", "Fish and Chips", 1499, "Main"),
            ("5", "Grilled Salmon", 2299, "Main"),
            ("6", "Vegetarian Pad Thai", 1399, "Main"),
            ("7", "Belgian Waffles", 899, "Dessert"),
            ("8", "Shrimp Tacos", 1149, "Main"),
            ("9", "Greek Gyro Plate", 1399, "Main"),
            ("10", "Classic Lemonade", 449, "Drinks"),
            ("11", "Virgin Mojito", 599, "Drinks"),
            ("12", "Iced Coffee", 499, "Drinks"),
            ("13", "Chocolate Cake", 799, "Dessert"),
            ("14", "Garlic Bread", 549, "Starters"),
            ("15", "Soup of the Day", 699, "Starters"),
        ];

        let items = HOUSE_MENU
            .iter()
            .map(|&(id, description, cents, category)| MenuItem {
                id: id.to_string(),
                description: description.to_string(),
                unit_price: Money::from_cents(cents),
                category: category.to_string(),
                product_key: DEFAULT_PRODUCT_KEY.to_string(),
                unit_key: DEFAULT_UNIT_KEY.to_string(),
            })
            .collect();

        MenuCatalog::new(items)
    }
}
