use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_analysis::entities::NutritionResult,
    view_state::entities::{CaptureTicket, ViewState},
};

/// Cyclic, user-driven view state machine.
///
/// Every capture gets a ticket; only the completion carrying the ticket of
/// the capture currently in flight is applied.
#[derive(Debug, Default)]
pub struct ViewStateMachine {
    state: ViewState,
    issued: u64,
    in_flight: Option<CaptureTicket>,
}

impl ViewStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        self.state.is_analyzing()
    }

    /// Starts a capture from any state, dropping any held result or error.
    pub fn begin_capture(&mut self) -> CaptureTicket {
        self.issued += 1;
        let ticket = CaptureTicket(self.issued);

        if let Some(previous) = self.in_flight.replace(ticket) {
            tracing::debug!(
                superseded = previous.0,
                ticket = ticket.0,
                "Capture superseded by a newer one"
            );
        }
        self.state = ViewState::Analyzing;

        ticket
    }

    /// Applies the outcome of a capture. Returns `false` when the ticket was
    /// superseded or reset in the meantime.
    pub fn complete(
        &mut self,
        ticket: CaptureTicket,
        outcome: Result<NutritionResult, CoreError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "Dropping stale capture outcome");
            return false;
        }

        self.in_flight = None;
        self.state = match outcome {
            Ok(result) => ViewState::Result { result },
            Err(e) => ViewState::Error {
                message: e.user_message().to_string(),
            },
        };

        true
    }

    /// Returns to landing. A capture still in flight is abandoned.
    pub fn reset(&mut self) -> bool {
        if matches!(self.state, ViewState::Landing) {
            return false;
        }

        self.in_flight = None;
        self.state = ViewState::Landing;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::entities::app_errors::{
        ANALYSIS_FAILED_MESSAGE, CAPTURE_FAILED_MESSAGE,
    };

    fn result() -> NutritionResult {
        NutritionResult::new(
            "Toast".to_string(),
            120,
            4.0,
            20.0,
            2.0,
            "Buttered toast.".to_string(),
            vec![],
        )
    }

    #[test]
    fn test_starts_on_landing() {
        let machine = ViewStateMachine::new();
        assert_eq!(machine.state(), &ViewState::Landing);
        assert!(!machine.is_analyzing());
    }

    #[test]
    fn test_capture_then_success_shows_result() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();
        assert!(machine.is_analyzing());

        assert!(machine.complete(ticket, Ok(result())));
        assert!(!machine.is_analyzing());
        assert_eq!(machine.state().result().unwrap().meal_name, "Toast");
        assert!(machine.state().error().is_none());
    }

    #[test]
    fn test_capture_then_failure_shows_error() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();

        assert!(machine.complete(ticket, Err(CoreError::AnalysisFailed)));
        assert!(!machine.is_analyzing());
        assert_eq!(machine.state().error(), Some(ANALYSIS_FAILED_MESSAGE));
        assert!(machine.state().result().is_none());
    }

    #[test]
    fn test_read_failure_uses_capture_message() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();

        machine.complete(ticket, Err(CoreError::ImageRead("eof".to_string())));
        assert_eq!(machine.state().error(), Some(CAPTURE_FAILED_MESSAGE));
    }

    #[test]
    fn test_reset_from_result_and_error() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();
        machine.complete(ticket, Ok(result()));
        assert!(machine.reset());
        assert_eq!(machine.state(), &ViewState::Landing);

        let ticket = machine.begin_capture();
        machine.complete(ticket, Err(CoreError::AnalysisFailed));
        assert!(machine.reset());
        assert_eq!(machine.state(), &ViewState::Landing);

        assert!(!machine.reset());
    }

    #[test]
    fn test_retry_from_error_skips_landing() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();
        machine.complete(ticket, Err(CoreError::AnalysisFailed));

        let retry = machine.begin_capture();
        assert_eq!(machine.state(), &ViewState::Analyzing);
        assert!(machine.complete(retry, Ok(result())));
        assert!(machine.state().result().is_some());
    }

    #[test]
    fn test_new_capture_clears_previous_result() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();
        machine.complete(ticket, Ok(result()));

        machine.begin_capture();
        assert!(machine.state().result().is_none());
        assert!(machine.is_analyzing());
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut machine = ViewStateMachine::new();
        let first = machine.begin_capture();
        let second = machine.begin_capture();
        assert!(second > first);

        assert!(!machine.complete(first, Ok(result())));
        assert!(machine.is_analyzing());

        assert!(machine.complete(second, Err(CoreError::AnalysisFailed)));
        assert!(!machine.complete(first, Ok(result())));
        assert!(machine.state().error().is_some());
    }

    #[test]
    fn test_reset_while_analyzing_abandons_capture() {
        let mut machine = ViewStateMachine::new();
        let ticket = machine.begin_capture();

        assert!(machine.reset());
        assert!(!machine.complete(ticket, Ok(result())));
        assert_eq!(machine.state(), &ViewState::Landing);
    }
}
