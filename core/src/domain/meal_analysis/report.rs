use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::meal_analysis::entities::{FoodItem, NutritionResult};

/// One macronutrient with its share of the total macro mass.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MacroShare {
    pub name: String,
    pub grams: f64,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemLine {
    pub name: String,
    pub quantity: String,
    pub calories: f64,
    pub macros: Vec<MacroShare>,
}

/// Presentation model of a finished analysis.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealReport {
    pub headline: String,
    pub meal_name: String,
    pub calories: u32,
    pub description: String,
    pub macros: Vec<MacroShare>,
    pub items: Vec<FoodItemLine>,
}

/// Percent of each macro in `protein + carbs + fat`, rounded to whole
/// numbers. A zero total yields zero for every macro.
pub fn macro_percentages(protein: f64, carbs: f64, fat: f64) -> [u32; 3] {
    let total = protein + carbs + fat;
    let divisor = if total > 0.0 { total } else { 1.0 };

    [protein, carbs, fat].map(|part| (100.0 * part / divisor).round().max(0.0) as u32)
}

pub fn macro_shares(protein: f64, carbs: f64, fat: f64) -> Vec<MacroShare> {
    let [protein_pct, carbs_pct, fat_pct] = macro_percentages(protein, carbs, fat);

    vec![
        MacroShare {
            name: "Protein".to_string(),
            grams: protein,
            percent: protein_pct,
        },
        MacroShare {
            name: "Carbs".to_string(),
            grams: carbs,
            percent: carbs_pct,
        },
        MacroShare {
            name: "Fat".to_string(),
            grams: fat,
            percent: fat_pct,
        },
    ]
}

/// `612 kcal / 34.2g P / 58.7g C / 21.3g F`
pub fn format_totals(result: &NutritionResult) -> String {
    format!(
        "{} kcal / {}g P / {}g C / {}g F",
        result.calories, result.protein, result.carbs, result.fat
    )
}

impl From<&FoodItem> for FoodItemLine {
    fn from(item: &FoodItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity.clone(),
            calories: item.calories,
            macros: macro_shares(item.protein, item.carbs, item.fat),
        }
    }
}

impl From<&NutritionResult> for MealReport {
    fn from(result: &NutritionResult) -> Self {
        Self {
            headline: format_totals(result),
            meal_name: result.meal_name.clone(),
            calories: result.calories,
            description: result.description.clone(),
            macros: macro_shares(result.protein, result.carbs, result.fat),
            items: result.detailed_foods().iter().map(FoodItemLine::from).collect(),
        }
    }
}
