use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    capture::{ports::ImageSource, services::capture_image},
    meal_analysis::ports::MealAnalysisService,
    view_state::{
        entities::{CaptureTicket, ViewState},
        machine::ViewStateMachine,
    },
};

/// Drives one view: capture, analysis and the resulting transitions.
///
/// The lock on the state machine is only held for the transitions, never
/// across the image read or the analysis call.
pub struct MealScanner<S>
where
    S: MealAnalysisService,
{
    service: Arc<S>,
    machine: Arc<Mutex<ViewStateMachine>>,
}

impl<S> Clone for MealScanner<S>
where
    S: MealAnalysisService,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            machine: Arc::clone(&self.machine),
        }
    }
}

impl<S> MealScanner<S>
where
    S: MealAnalysisService,
{
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            machine: Arc::new(Mutex::new(ViewStateMachine::new())),
        }
    }

    pub async fn view(&self) -> ViewState {
        self.machine.lock().await.state().clone()
    }

    pub async fn begin(&self) -> CaptureTicket {
        let ticket = self.machine.lock().await.begin_capture();
        tracing::info!(ticket = ticket.0, "Meal capture started");
        ticket
    }

    /// Reads and analyzes the image for `ticket`, then applies the outcome.
    /// A read failure never reaches the analysis service.
    pub async fn finish<I>(&self, ticket: CaptureTicket, source: &I) -> bool
    where
        I: ImageSource,
    {
        let outcome = match capture_image(source).await {
            Ok(image) => self.service.analyze(image).await,
            Err(e) => {
                tracing::error!(ticket = ticket.0, "Image capture failed: {}", e);
                Err(e)
            }
        };

        let succeeded = outcome.is_ok();
        let applied = self.machine.lock().await.complete(ticket, outcome);
        if applied {
            tracing::info!(ticket = ticket.0, succeeded, "Meal capture finished");
        }

        applied
    }

    pub async fn capture<I>(&self, source: &I) -> bool
    where
        I: ImageSource,
    {
        let ticket = self.begin().await;
        self.finish(ticket, source).await
    }

    pub async fn reset(&self) -> bool {
        self.machine.lock().await.reset()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        capture::value_objects::UploadedImage,
        common::entities::app_errors::{
            ANALYSIS_FAILED_MESSAGE, CAPTURE_FAILED_MESSAGE, CoreError,
        },
        meal_analysis::{entities::NutritionResult, ports::MockMealAnalysisService},
    };

    fn photo() -> UploadedImage {
        UploadedImage::new(
            Some("plate.jpg".to_string()),
            Some("image/jpeg".to_string()),
            Bytes::from_static(b"jpeg bytes"),
        )
    }

    fn result() -> NutritionResult {
        NutritionResult::new(
            "Salmon plate".to_string(),
            612,
            34.2,
            58.7,
            21.3,
            "Pan-seared salmon.".to_string(),
            vec![],
        )
    }

    #[tokio::test]
    async fn test_successful_capture_shows_result() {
        let mut service = MockMealAnalysisService::new();
        service
            .expect_analyze()
            .times(1)
            .returning(|_| Box::pin(async { Ok(result()) }));

        let scanner = MealScanner::new(Arc::new(service));
        assert_eq!(scanner.view().await, ViewState::Landing);

        assert!(scanner.capture(&photo()).await);
        let view = scanner.view().await;
        assert_eq!(view.result().unwrap().calories, 612);
    }

    #[tokio::test]
    async fn test_failed_analysis_shows_fixed_message() {
        let mut service = MockMealAnalysisService::new();
        service
            .expect_analyze()
            .times(1)
            .returning(|_| Box::pin(async { Err(CoreError::AnalysisFailed) }));

        let scanner = MealScanner::new(Arc::new(service));
        scanner.capture(&photo()).await;

        assert_eq!(scanner.view().await.error(), Some(ANALYSIS_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_read_failure_skips_analysis() {
        let mut service = MockMealAnalysisService::new();
        service.expect_analyze().times(0);

        let scanner = MealScanner::new(Arc::new(service));
        scanner
            .capture(&UploadedImage::failed("stream closed"))
            .await;

        let view = scanner.view().await;
        assert_eq!(view.error(), Some(CAPTURE_FAILED_MESSAGE));
        assert!(!view.is_analyzing());
    }

    #[tokio::test]
    async fn test_reset_discards_result() {
        let mut service = MockMealAnalysisService::new();
        service
            .expect_analyze()
            .times(2)
            .returning(|_| Box::pin(async { Ok(result()) }));

        let scanner = MealScanner::new(Arc::new(service));
        scanner.capture(&photo()).await;
        let first = scanner.view().await.result().unwrap().id;

        assert!(scanner.reset().await);
        assert_eq!(scanner.view().await, ViewState::Landing);

        scanner.capture(&photo()).await;
        let second = scanner.view().await.result().unwrap().id;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_superseded_capture_does_not_overwrite_newer_one() {
        let mut service = MockMealAnalysisService::new();
        service
            .expect_analyze()
            .times(2)
            .returning(|_| Box::pin(async { Ok(result()) }));

        let scanner = MealScanner::new(Arc::new(service));
        let stale = scanner.begin().await;
        let fresh = scanner.begin().await;

        assert!(!scanner.finish(stale, &photo()).await);
        assert!(scanner.view().await.is_analyzing());

        assert!(scanner.finish(fresh, &photo()).await);
        assert!(scanner.view().await.result().is_some());
    }
}
