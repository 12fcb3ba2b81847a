//! Plain-text rendering of the preview and result screens.

use crate::models::AnalysisResult;
use crate::services::ImageUpload;

pub fn render_preview(image: &ImageUpload) -> String {
    format!(
        "🖼️ {} ({}, {} bytes)",
        image.path().display(),
        image.mime_type(),
        image.byte_len()
    )
}

/// The nutritional table plus the totals card.
pub fn render_result(result: &AnalysisResult) -> String {
    const HEADERS: [&str; 4] = ["Item", "Quantity", "Calories", "Protein"];

    let rows: Vec<[String; 4]> = result
        .items
        .iter()
        .map(|item| {
            [
                item.name.clone(),
                item.quantity.clone().unwrap_or_else(|| "—".to_string()),
                item.calories.clone(),
                item.protein.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 4] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::from("🍽️ Nutritional Table\n\n");
    out.push_str(&format_row(&HEADERS.map(str::to_string), &widths));
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 3 * 2));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
    }

    out.push_str(&format!(
        "\n📊 Total Count\nCalories: {} kcal\nProtein: {} g\n",
        result.total_calories, result.total_protein
    ));

    out
}

fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i < cells.len() - 1 {
            line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
        }
    }
    line.push('\n');
    line
}
