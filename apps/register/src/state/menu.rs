//! # Menu State
//!
//! The catalog staff pick items from. Read-only after startup, so it is
//! shared without a lock.

use std::sync::Arc;

use tabletop_core::MenuCatalog;

#[derive(Debug, Clone, Default)]
pub struct MenuState {
    catalog: Arc<MenuCatalog>,
}

impl MenuState {
    pub fn new(catalog: MenuCatalog) -> Self {
        MenuState {
            catalog: Arc::new(catalog),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }
}
