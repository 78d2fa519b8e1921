use std::future::Future;

use crate::domain::{capture::entities::CapturedImage, common::entities::app_errors::CoreError};

/// Anything a meal photo can be read from.
#[cfg_attr(test, mockall::automock)]
pub trait ImageSource: Send + Sync {
    fn read(&self) -> impl Future<Output = Result<CapturedImage, CoreError>> + Send;
}
