use std::future::Future;

use crate::domain::{
    capture::entities::EncodedImage, common::entities::app_errors::CoreError,
    meal_analysis::entities::NutritionResult,
};

/// LLM Client trait for calling multimodal models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends one image plus instruction and returns the raw structured text.
    fn generate_with_image(
        &self,
        prompt: String,
        image: EncodedImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for meal analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait MealAnalysisService: Send + Sync {
    /// Single attempt, no retry. Every failure surfaces as
    /// [`CoreError::AnalysisFailed`].
    fn analyze(
        &self,
        image: EncodedImage,
    ) -> impl Future<Output = Result<NutritionResult, CoreError>> + Send;
}
