use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meal_analysis::entities::NutritionResult;

/// Which screen is shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Landing,
    Analyzing,
    Result {
        result: NutritionResult,
    },
    Error {
        #[serde(rename = "error")]
        message: String,
    },
}

impl ViewState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, ViewState::Analyzing)
    }

    pub fn result(&self) -> Option<&NutritionResult> {
        match self {
            ViewState::Result { result } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Landing => "landing",
            ViewState::Analyzing => "analyzing",
            ViewState::Result { .. } => "result",
            ViewState::Error { .. } => "error",
        }
    }
}

/// Sequence number of one capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaptureTicket(pub u64);
