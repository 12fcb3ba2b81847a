//! Pure text → structure parsing for the model's free-form replies.
//!
//! The model is only *asked* to follow the "Item: Quantity" and
//! "Calories: X kcal, Protein: Y g" formats; nothing enforces it. Everything
//! here therefore degrades gracefully: unmatched fields become the `"N/A"`
//! sentinel and never abort a run. Keeping these functions free of any
//! request plumbing lets them be tested against literal fixture strings.

use crate::models::{FoodItem, NOT_AVAILABLE};

/// One line of the vision reply, split on its first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLine {
    pub name: String,
    pub quantity: Option<String>,
}

/// Calorie/protein strings extracted from one nutrition reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionFacts {
    pub calories: String,
    pub protein: String,
}

/// Split the vision reply into items, one per non-empty line, in original
/// order. Name and quantity are the trimmed substrings around the first
/// colon. A line without a colon keeps its text as the name and carries no
/// quantity.
pub fn parse_item_list(reply: &str) -> Vec<ItemLine> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((name, quantity)) => ItemLine {
                name: name.trim().to_string(),
                quantity: Some(quantity.trim().to_string()),
            },
            None => {
                log::warn!("⚠️ Item line without a colon, no quantity: '{}'", line);
                ItemLine {
                    name: line.to_string(),
                    quantity: None,
                }
            }
        })
        .collect()
}

/// Pull the calorie and protein fields out of a nutrition reply.
///
/// Segments are split on ", " and each on its first colon; keys are matched
/// by lowercase substring ("calories", "protein") to tolerate minor phrasing
/// variation. Fields that never match stay `"N/A"`.
pub fn parse_nutrition_reply(reply: &str) -> NutritionFacts {
    let mut facts = NutritionFacts {
        calories: NOT_AVAILABLE.to_string(),
        protein: NOT_AVAILABLE.to_string(),
    };

    for segment in reply.split(", ") {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        if key.contains("calories") {
            facts.calories = value.to_string();
        } else if key.contains("protein") {
            facts.protein = value.to_string();
        }
    }

    facts
}

/// Parse the leading integer of a display value, but only when the expected
/// unit token is present (case-insensitive). `None` means "leave it out of
/// the total" — sentinels and free-prose values are skipped, never counted
/// as zero.
pub fn leading_amount(value: &str, unit: &str) -> Option<u32> {
    if !value.to_lowercase().contains(&unit.to_lowercase()) {
        return None;
    }

    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

/// Sum the confidently-parsed calorie and protein values across all items.
pub fn aggregate_totals(items: &[FoodItem]) -> (u32, u32) {
    let mut total_calories = 0;
    let mut total_protein = 0;

    for item in items {
        if let Some(kcal) = leading_amount(&item.calories, "kcal") {
            total_calories += kcal;
        }
        if let Some(grams) = leading_amount(&item.protein, "g") {
            total_protein += grams;
        }
    }

    (total_calories, total_protein)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(calories: &str, protein: &str) -> FoodItem {
        FoodItem {
            name: "test".to_string(),
            quantity: None,
            calories: calories.to_string(),
            protein: protein.to_string(),
        }
    }

    #[test]
    fn test_parse_item_list() {
        let reply = "Grilled chicken: 150 g\nRice: 1 cup\nBroccoli: 3 florets";
        let items = parse_item_list(reply);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Grilled chicken");
        assert_eq!(items[0].quantity.as_deref(), Some("150 g"));
        assert_eq!(items[2].name, "Broccoli");
        assert_eq!(items[2].quantity.as_deref(), Some("3 florets"));
    }

    #[test]
    fn test_parse_item_list_trims_and_drops_blank_lines() {
        let reply = "\n  Apple : 1 medium  \n\n   \nToast: 2 slices\n";
        let items = parse_item_list(reply);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Apple");
        assert_eq!(items[0].quantity.as_deref(), Some("1 medium"));
        assert_eq!(items[1].name, "Toast");
    }

    #[test]
    fn test_parse_item_list_splits_on_first_colon_only() {
        let items = parse_item_list("Yogurt: plain: 200 g");

        assert_eq!(items[0].name, "Yogurt");
        assert_eq!(items[0].quantity.as_deref(), Some("plain: 200 g"));
    }

    #[test]
    fn test_parse_item_list_line_without_colon_has_no_quantity() {
        let items = parse_item_list("A bowl of soup");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "A bowl of soup");
        assert_eq!(items[0].quantity, None);
    }

    #[test]
    fn test_parse_nutrition_reply() {
        let facts = parse_nutrition_reply("Calories: 250 kcal, Protein: 12 g");

        assert_eq!(facts.calories, "250 kcal");
        assert_eq!(facts.protein, "12 g");
    }

    #[test]
    fn test_parse_nutrition_reply_keyword_is_substring_matched() {
        let facts =
            parse_nutrition_reply("Estimated calories: 320 kcal, Total protein content: 9 g");

        assert_eq!(facts.calories, "320 kcal");
        assert_eq!(facts.protein, "9 g");
    }

    #[test]
    fn test_parse_nutrition_reply_missing_protein_defaults_to_sentinel() {
        let facts = parse_nutrition_reply("Calories: 180 kcal");

        assert_eq!(facts.calories, "180 kcal");
        assert_eq!(facts.protein, NOT_AVAILABLE);
    }

    #[test]
    fn test_parse_nutrition_reply_prose_yields_sentinels() {
        let facts = parse_nutrition_reply("I cannot identify this item.");

        assert_eq!(facts.calories, NOT_AVAILABLE);
        assert_eq!(facts.protein, NOT_AVAILABLE);
    }

    #[test]
    fn test_leading_amount_requires_unit_token() {
        assert_eq!(leading_amount("250 kcal", "kcal"), Some(250));
        assert_eq!(leading_amount("250 KCAL", "kcal"), Some(250));
        assert_eq!(leading_amount("250", "kcal"), None);
        assert_eq!(leading_amount("N/A", "kcal"), None);
    }

    #[test]
    fn test_leading_amount_requires_leading_digits() {
        // parse only a confident digit prefix; prose framing is excluded
        assert_eq!(leading_amount("about 250 kcal", "kcal"), None);
        assert_eq!(leading_amount("12 g", "g"), Some(12));
    }

    #[test]
    fn test_aggregate_totals_skips_sentinels() {
        let items = vec![
            item("100 kcal", "5 g"),
            item("N/A", "N/A"),
            item("50 kcal", "12 g"),
        ];

        let (calories, protein) = aggregate_totals(&items);

        assert_eq!(calories, 150);
        assert_eq!(protein, 17);
    }

    #[test]
    fn test_aggregate_totals_skips_values_without_units() {
        let items = vec![item("300", "8"), item("120 kcal", "4 g")];

        let (calories, protein) = aggregate_totals(&items);

        assert_eq!(calories, 120);
        assert_eq!(protein, 4);
    }
}
