//! Menu item extraction
//!
//! Scans a message for catalog item names. Results follow catalog order,
//! not mention order, and every match gets quantity 1. Known limitation
//! of the substring heuristic: a short item name inside an unrelated word
//! still matches.

use std::sync::Arc;

use shared::models::{MenuCatalog, OrderLineItem};

#[derive(Clone)]
pub struct ItemExtractor {
    catalog: Arc<MenuCatalog>,
}

impl ItemExtractor {
    pub fn new(catalog: Arc<MenuCatalog>) -> Self {
        Self { catalog }
    }

    /// All catalog items whose name occurs in the message,
    /// case-insensitively, as snapshot line items.
    pub fn extract(&self, message: &str) -> Vec<OrderLineItem> {
        let lowered = message.to_lowercase();
        self.catalog
            .iter()
            .filter(|item| lowered.contains(&item.name.to_lowercase()))
            .map(|item| OrderLineItem {
                id: item.id.clone(),
                name: item.name.clone(),
                price: item.price,
                quantity: 1,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant::Restaurant;

    fn extractor() -> ItemExtractor {
        ItemExtractor::new(Arc::new(Restaurant::taste_haven().menu))
    }

    #[test]
    fn finds_single_item_with_quantity_one() {
        let items = extractor().extract("I want Spring Rolls");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "app_1");
        assert_eq!(items[0].name, "Spring Rolls");
        assert_eq!(items[0].price, 8.99);
        assert_eq!(items[0].quantity, 1);
    }

    #[test]
    fn matching_ignores_case() {
        let items = extractor().extract("one TIRAMISU please");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "des_1");
    }

    #[test]
    fn results_follow_catalog_order_not_mention_order() {
        let items = extractor().extract("a Tiramisu, then Calamari, then Grilled Salmon");
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["app_3", "main_1", "des_1"]);
    }

    #[test]
    fn no_mention_no_items() {
        assert!(extractor().extract("what time do you close?").is_empty());
    }
}
