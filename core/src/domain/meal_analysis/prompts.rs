/// Instruction sent with every meal photo.
pub const MEAL_ANALYSIS_PROMPT: &str = "Identify all food items in this image. \
Estimate the volume/weight (e.g. 150g) of each item based on visual cues. \
Calculate calories, protein, carbs, and fat for each item. \
Be specific about preparation (e.g. fried vs grilled), since it changes caloric density. \
Cross-reference with standard nutritional databases. \
Sum the items into meal-level totals for calories, protein, carbs, and fat.";
