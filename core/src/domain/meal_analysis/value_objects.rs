use serde::Deserialize;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::entities::{FoodItem, NutritionResult},
};

/// Structured payload exactly as the model returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNutritionResponse {
    pub meal_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub description: String,
    pub detailed_foods: Vec<RawFoodItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFoodItem {
    pub name: String,
    pub quantity: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl RawNutritionResponse {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.trim().is_empty() {
            return Err(CoreError::InvalidResponse("empty response body".to_string()));
        }

        serde_json::from_str(raw).map_err(|e| {
            CoreError::InvalidResponse(format!("response does not match schema: {}", e))
        })
    }

    /// Validates every number and produces the rounded domain result.
    pub fn into_result(self) -> Result<NutritionResult, CoreError> {
        ensure_quantity("calories", self.calories)?;
        ensure_quantity("protein", self.protein)?;
        ensure_quantity("carbs", self.carbs)?;
        ensure_quantity("fat", self.fat)?;

        let detailed_foods = self
            .detailed_foods
            .into_iter()
            .enumerate()
            .map(|(index, item)| item.into_food_item(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NutritionResult::new(
            self.meal_name,
            round_calories(self.calories),
            round_to_tenth(self.protein),
            round_to_tenth(self.carbs),
            round_to_tenth(self.fat),
            self.description,
            detailed_foods,
        ))
    }
}

impl RawFoodItem {
    fn into_food_item(self, index: usize) -> Result<FoodItem, CoreError> {
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            ensure_quantity(&format!("detailedFoods[{index}].{field}"), value)?;
        }

        Ok(FoodItem {
            name: self.name,
            quantity: self.quantity,
            calories: unsigned_zero(self.calories),
            protein: unsigned_zero(self.protein),
            carbs: unsigned_zero(self.carbs),
            fat: unsigned_zero(self.fat),
        })
    }
}

fn ensure_quantity(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidResponse(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

/// Nearest whole kilocalorie.
pub fn round_calories(value: f64) -> u32 {
    value.round().clamp(0.0, u32::MAX as f64) as u32
}

/// One decimal place, as shown for grams of protein, carbs and fat.
pub fn round_to_tenth(value: f64) -> f64 {
    unsigned_zero((value * 10.0).round() / 10.0)
}

/// Folds `-0.0` into `0.0` so it never renders as "-0".
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}
