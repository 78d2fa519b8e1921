use crate::domain::{
    capture::entities::EncodedImage,
    common::{entities::app_errors::CoreError, services::Service},
    meal_analysis::{
        entities::NutritionResult,
        ports::{LLMClient, MealAnalysisService},
        prompts::MEAL_ANALYSIS_PROMPT,
        schema::get_nutrition_schema,
        value_objects::RawNutritionResponse,
    },
};

impl<LLM> MealAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    async fn analyze(&self, image: EncodedImage) -> Result<NutritionResult, CoreError> {
        let result = request_nutrition(&*self.llm_client, image).await;

        match result {
            Ok(result) => {
                tracing::info!(
                    meal_id = %result.id,
                    calories = result.calories,
                    items = result.ingredients.len(),
                    "Meal analysis completed"
                );
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Analysis failure: {}", e);
                Err(CoreError::AnalysisFailed)
            }
        }
    }
}

async fn request_nutrition<LLM>(
    llm_client: &LLM,
    image: EncodedImage,
) -> Result<NutritionResult, CoreError>
where
    LLM: LLMClient,
{
    let raw_response = llm_client
        .generate_with_image(
            MEAL_ANALYSIS_PROMPT.to_string(),
            image,
            get_nutrition_schema(),
        )
        .await?;

    RawNutritionResponse::parse(&raw_response)?.into_result()
}
