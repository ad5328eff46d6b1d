use crate::domain::model::{FormKind, Payload};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Optional user-facing message replacing the form's default banner text.
    pub message: Option<String>,
}

/// Where validated form payloads go. A real integration replaces the
/// simulated one; an `Err` is surfaced next to the submit control.
#[async_trait]
pub trait SubmissionBackend: Send + Sync {
    async fn submit(&self, form: FormKind, payload: &Payload) -> Result<SubmissionReceipt>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
