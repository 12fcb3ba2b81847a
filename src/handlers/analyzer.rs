use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, FoodItem};
use crate::parser;
use crate::services::{ImageUpload, VisionModel};

/// Runs the image → items → nutrition → totals pipeline against whatever
/// backend implements [`VisionModel`].
pub struct Analyzer {
    model: Arc<dyn VisionModel>,
}

impl Analyzer {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    /// Full pipeline run. Any remote failure aborts the whole attempt — the
    /// caller never sees a partially-filled result.
    pub async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisResult, AnalysisError> {
        let listing = self.model.list_food_items(image).await?;

        let lines = parser::parse_item_list(&listing);
        log::info!("🍽️ Detected {} item(s)", lines.len());

        // One request per item, strictly sequential: item N+1 is not issued
        // until item N's reply has been received and parsed.
        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let reply = self.model.nutrition_for(&line.name).await?;
            let facts = parser::parse_nutrition_reply(&reply);

            items.push(FoodItem {
                name: line.name,
                quantity: line.quantity,
                calories: facts.calories,
                protein: facts.protein,
            });
        }

        let (total_calories, total_protein) = parser::aggregate_totals(&items);
        log::info!(
            "✅ Analysis complete: {} item(s), {} kcal, {} g protein",
            items.len(),
            total_calories,
            total_protein
        );

        Ok(AnalysisResult {
            items,
            total_calories,
            total_protein,
        })
    }
}
