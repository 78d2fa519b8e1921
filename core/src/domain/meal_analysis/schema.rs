use serde_json::json;

/// Returns the JSON schema for meal analysis LLM responses
pub fn get_nutrition_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "mealName": { "type": "string" },
            "calories": { "type": "number" },
            "protein": { "type": "number" },
            "carbs": { "type": "number" },
            "fat": { "type": "number" },
            "description": { "type": "string" },
            "detailedFoods": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "quantity": { "type": "string" },
                        "calories": { "type": "number" },
                        "protein": { "type": "number" },
                        "carbs": { "type": "number" },
                        "fat": { "type": "number" }
                    },
                    "required": ["name", "quantity", "calories", "protein", "carbs", "fat"]
                }
            }
        },
        "required": [
            "mealName", "calories", "protein", "carbs", "fat",
            "description", "detailedFoods"
        ]
    })
}
