//! Menu catalog types
//!
//! The catalog is static reference data: loaded once at process start and
//! never mutated. Orders snapshot the items they reference, so later
//! catalog edits never rewrite an existing order.

use serde::{Deserialize, Serialize};

/// A single purchasable menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    /// Only meaningful for main courses
    #[serde(default)]
    pub spicy: bool,
}

impl MenuItem {
    /// Dietary labels for display. Vegan takes precedence over vegetarian;
    /// spicy is appended after either.
    pub fn dietary_tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        if self.vegan {
            tags.push("Vegan");
        } else if self.vegetarian {
            tags.push("Vegetarian");
        }
        if self.spicy {
            tags.push("Spicy");
        }
        tags
    }
}

/// The categorized menu. Category order is also the extraction scan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCatalog {
    pub appetizers: Vec<MenuItem>,
    pub main_courses: Vec<MenuItem>,
    pub desserts: Vec<MenuItem>,
    pub beverages: Vec<MenuItem>,
}

impl MenuCatalog {
    /// All items flattened in catalog-definition order:
    /// appetizers, main courses, desserts, beverages.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.appetizers
            .iter()
            .chain(self.main_courses.iter())
            .chain(self.desserts.iter())
            .chain(self.beverages.iter())
    }

    /// Look a category up by its wire name.
    pub fn category(&self, name: &str) -> Option<&[MenuItem]> {
        match name {
            "appetizers" => Some(&self.appetizers),
            "main_courses" => Some(&self.main_courses),
            "desserts" => Some(&self.desserts),
            "beverages" => Some(&self.beverages),
            _ => None,
        }
    }
}

/// Opening hours, one line per block as displayed to customers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantHours {
    pub monday_thursday: String,
    pub friday_saturday: String,
    pub sunday: String,
}

/// Static restaurant details served by `/api/config` and embedded in the
/// assistant system prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantInfo {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub hours: RestaurantHours,
}
