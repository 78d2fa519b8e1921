use crate::{
    domain::common::{HillCaloriesConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type HillCaloriesService = Service<GeminiLLMClient>;

/// Builds the process-wide service. Fails when the Gemini API key is absent.
pub fn create_service(config: HillCaloriesConfig) -> Result<HillCaloriesService, CoreError> {
    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(model = %llm_client.model_name(), "Gemini client ready");

    Ok(Service::new(llm_client))
}
