use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

/// Nutritional estimate for one photographed meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionResult {
    pub id: Uuid,
    pub meal_name: String,
    pub calories: u32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub ingredients: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_foods: Option<Vec<FoodItem>>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodItem {
    pub name: String,
    pub quantity: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionResult {
    pub fn new(
        meal_name: String,
        calories: u32,
        protein: f64,
        carbs: f64,
        fat: f64,
        description: String,
        detailed_foods: Vec<FoodItem>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();
        let ingredients = detailed_foods.iter().map(|f| f.name.clone()).collect();

        Self {
            id: Uuid::new_v7(timestamp),
            meal_name,
            calories,
            protein,
            carbs,
            fat,
            ingredients,
            description,
            detailed_foods: Some(detailed_foods),
            analyzed_at: now,
        }
    }

    pub fn detailed_foods(&self) -> &[FoodItem] {
        self.detailed_foods.as_deref().unwrap_or_default()
    }
}
