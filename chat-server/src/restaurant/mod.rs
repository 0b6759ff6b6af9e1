//! Static restaurant configuration
//!
//! Taste Haven's contact details, opening hours and menu catalog. Built
//! once at startup and shared read-only; order flows snapshot the items
//! they sell, so the catalog itself is never mutated at runtime.

pub mod prompt;

use shared::models::{MenuCatalog, MenuItem, RestaurantHours, RestaurantInfo};

/// The restaurant the assistant works for: info + menu + prebuilt prompt.
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub info: RestaurantInfo,
    pub menu: MenuCatalog,
    /// Fixed system prompt handed to the text generator on every fallback turn
    pub system_prompt: String,
}

impl Restaurant {
    pub fn taste_haven() -> Self {
        let info = taste_haven_info();
        let menu = taste_haven_menu();
        let system_prompt = prompt::system_prompt(&info, &menu);
        Self {
            info,
            menu,
            system_prompt,
        }
    }
}

fn taste_haven_info() -> RestaurantInfo {
    RestaurantInfo {
        name: "Taste Haven".to_string(),
        location: "123 Food Street, Downtown".to_string(),
        phone: "(555) 123-4567".to_string(),
        email: "info@tastehaven.com".to_string(),
        website: "www.tastehaven.com".to_string(),
        hours: RestaurantHours {
            monday_thursday: "11:00 AM - 10:00 PM".to_string(),
            friday_saturday: "11:00 AM - 11:00 PM".to_string(),
            sunday: "10:00 AM - 9:00 PM".to_string(),
        },
    }
}

/// Plain item with no dietary flags; set flags with struct update syntax.
fn item(id: &str, name: &str, price: f64, description: &str) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: description.to_string(),
        vegetarian: false,
        vegan: false,
        spicy: false,
    }
}

fn taste_haven_menu() -> MenuCatalog {
    MenuCatalog {
        appetizers: vec![
            MenuItem {
                vegetarian: true,
                vegan: true,
                ..item(
                    "app_1",
                    "Spring Rolls",
                    8.99,
                    "Crispy spring rolls with sweet chili dipping sauce",
                )
            },
            MenuItem {
                vegetarian: true,
                ..item(
                    "app_2",
                    "Bruschetta",
                    9.99,
                    "Toasted bread with fresh tomato, basil, and garlic",
                )
            },
            item(
                "app_3",
                "Calamari",
                11.99,
                "Fried squid rings with lemon and marinara sauce",
            ),
            MenuItem {
                vegetarian: true,
                ..item(
                    "app_4",
                    "Garlic Bread",
                    6.99,
                    "Crispy garlic bread with herb butter",
                )
            },
            MenuItem {
                vegetarian: true,
                vegan: true,
                ..item(
                    "app_5",
                    "Hummus Platter",
                    10.99,
                    "Assorted hummus with pita bread and vegetables",
                )
            },
        ],
        main_courses: vec![
            item(
                "main_1",
                "Grilled Salmon",
                24.99,
                "Fresh Atlantic salmon with seasonal vegetables and lemon butter sauce",
            ),
            MenuItem {
                vegetarian: true,
                ..item(
                    "main_2",
                    "Vegetable Risotto",
                    18.99,
                    "Creamy arborio rice with seasonal vegetables, peas, and parmesan",
                )
            },
            item(
                "main_3",
                "Ribeye Steak",
                32.99,
                "Premium 16oz ribeye with garlic mashed potatoes and grilled asparagus",
            ),
            MenuItem {
                vegetarian: true,
                vegan: true,
                ..item(
                    "main_4",
                    "Vegetable Pasta",
                    17.99,
                    "Fresh pappardelle with seasonal vegetables and light tomato sauce",
                )
            },
            item(
                "main_5",
                "Chicken Parmesan",
                21.99,
                "Crispy chicken breast with marinara sauce and melted mozzarella",
            ),
            MenuItem {
                spicy: true,
                ..item(
                    "main_6",
                    "Spicy Thai Curry",
                    19.99,
                    "Coconut curry with chicken, vegetables, and jasmine rice",
                )
            },
        ],
        desserts: vec![
            MenuItem {
                vegetarian: true,
                ..item(
                    "des_1",
                    "Tiramisu",
                    8.99,
                    "Classic Italian layered dessert with mascarpone and espresso",
                )
            },
            MenuItem {
                vegetarian: true,
                ..item(
                    "des_2",
                    "Cheesecake",
                    9.99,
                    "New York style cheesecake with berry compote",
                )
            },
            MenuItem {
                vegetarian: true,
                vegan: true,
                ..item(
                    "des_3",
                    "Chocolate Mousse",
                    7.99,
                    "Rich and fluffy dark chocolate mousse",
                )
            },
            MenuItem {
                vegetarian: true,
                ..item(
                    "des_4",
                    "Panna Cotta",
                    8.99,
                    "Silky Italian cream dessert with fresh fruit",
                )
            },
            MenuItem {
                vegetarian: true,
                vegan: true,
                ..item(
                    "des_5",
                    "Sorbet Trio",
                    8.99,
                    "Three flavors of refreshing homemade sorbet",
                )
            },
        ],
        beverages: vec![
            item("bev_1", "Soft Drinks", 3.50, "Coke, Sprite, Fanta, Iced Tea"),
            item(
                "bev_2",
                "Coffee",
                4.50,
                "Espresso, Cappuccino, Latte, Americano",
            ),
            item("bev_3", "Wine Selection", 8.00, "Red, White, and Rosé wines"),
            item("bev_4", "Beer", 5.50, "Domestic and imported craft beers"),
            item(
                "bev_5",
                "Cocktails",
                9.99,
                "House special cocktails and classics",
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_iterates_in_definition_order() {
        let menu = taste_haven_menu();
        let ids: Vec<&str> = menu.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), 21);
        assert_eq!(ids[0], "app_1");
        assert_eq!(ids[5], "main_1");
        assert_eq!(ids[11], "des_1");
        assert_eq!(ids[16], "bev_1");
    }

    #[test]
    fn vegan_takes_precedence_in_dietary_tags() {
        let menu = taste_haven_menu();
        let rolls = &menu.appetizers[0];
        assert_eq!(rolls.dietary_tags(), vec!["Vegan"]);
        let bruschetta = &menu.appetizers[1];
        assert_eq!(bruschetta.dietary_tags(), vec!["Vegetarian"]);
        let curry = &menu.main_courses[5];
        assert_eq!(curry.dietary_tags(), vec!["Spicy"]);
    }

    #[test]
    fn category_lookup_by_wire_name() {
        let menu = taste_haven_menu();
        assert_eq!(menu.category("main_courses").unwrap().len(), 6);
        assert!(menu.category("breakfast").is_none());
    }
}
