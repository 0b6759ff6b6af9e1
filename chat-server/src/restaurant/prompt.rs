//! Assistant system prompt
//!
//! Renders the restaurant details and the full menu into the fixed prompt
//! that precedes every conversational-fallback generation call.

use std::fmt::Write;

use shared::models::{MenuCatalog, MenuItem, RestaurantInfo};

/// Build the complete system prompt for the given restaurant.
pub fn system_prompt(info: &RestaurantInfo, menu: &MenuCatalog) -> String {
    let mut prompt = format!(
        "You are a professional AI assistant for {name}, a fine dining restaurant.\n\
         \n\
         RESTAURANT DETAILS:\n\
         - Name: {name}\n\
         - Location: {location}\n\
         - Phone: {phone}\n\
         - Email: {email}\n\
         - Website: {website}\n\
         \n\
         HOURS OF OPERATION:\n\
         - Monday to Thursday: {mon_thu}\n\
         - Friday to Saturday: {fri_sat}\n\
         - Sunday: {sun}\n\
         \n\
         MENU CATEGORIES:\n",
        name = info.name,
        location = info.location,
        phone = info.phone,
        email = info.email,
        website = info.website,
        mon_thu = info.hours.monday_thursday,
        fri_sat = info.hours.friday_saturday,
        sun = info.hours.sunday,
    );

    write_category(&mut prompt, "\nAPPETIZERS:\n", &menu.appetizers, true);
    write_category(&mut prompt, "\nMAIN COURSES:\n", &menu.main_courses, true);
    write_category(&mut prompt, "\nDESSERTS:\n", &menu.desserts, true);
    write_category(&mut prompt, "\nBEVERAGES:\n", &menu.beverages, false);

    prompt.push_str(
        "\n\
         YOUR RESPONSIBILITIES:\n\
         1. Provide friendly, natural conversation with customers\n\
         2. Answer questions about menu items, ingredients, and preparation\n\
         3. Suggest personalized menu recommendations based on preferences and dietary restrictions\n\
         4. Assist with order placement (confirm items, quantities, special requests)\n\
         5. Help with table reservations (collect name, party size, date, time, preferences)\n\
         6. Provide restaurant information (hours, location, contact details)\n\
         7. Handle dietary restrictions and allergies carefully\n\
         8. Be professional yet warm and welcoming\n\
         \n\
         INTERACTION GUIDELINES:\n\
         - Keep responses concise and conversational (2-3 sentences typically)\n\
         - Use occasional emojis for warmth 😊\n\
         - When customers show interest in ordering, summarize items before final confirmation\n\
         - For reservations, collect: name, party size, date, time, and any special requests\n\
         - Always highlight dietary options (vegan, vegetarian) when relevant\n\
         - If uncertain about menu details, acknowledge and suggest calling the restaurant\n\
         - Be helpful about accommodating special needs and preferences\n\
         \n\
         RESPONSE STYLE:\n\
         - Warm and professional\n\
         - Helpful and informative\n\
         - Conversational and engaging\n\
         - Respectful of dietary choices\n",
    );

    prompt
}

fn write_category(prompt: &mut String, heading: &str, items: &[MenuItem], with_tags: bool) {
    prompt.push_str(heading);
    for item in items {
        let tags = if with_tags { item.dietary_tags() } else { vec![] };
        let tag_str = if tags.is_empty() {
            String::new()
        } else {
            format!(" ({})", tags.join(", "))
        };
        let _ = writeln!(
            prompt,
            "- {} (${:.2}){}: {}",
            item.name, item.price, tag_str, item.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::restaurant::Restaurant;

    #[test]
    fn prompt_lists_every_item_with_price() {
        let r = Restaurant::taste_haven();
        for item in r.menu.iter() {
            assert!(r.system_prompt.contains(&item.name), "missing {}", item.name);
        }
        assert!(r.system_prompt.contains("- Spring Rolls ($8.99) (Vegan):"));
        assert!(r.system_prompt.contains("- Soft Drinks ($3.50):"));
    }

    #[test]
    fn prompt_carries_restaurant_details() {
        let r = Restaurant::taste_haven();
        assert!(r.system_prompt.contains("Taste Haven"));
        assert!(r.system_prompt.contains("123 Food Street, Downtown"));
        assert!(r.system_prompt.contains("Monday to Thursday: 11:00 AM - 10:00 PM"));
    }
}
