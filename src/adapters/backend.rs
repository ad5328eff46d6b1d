use crate::domain::model::{FormKind, Payload};
use crate::domain::ports::{SubmissionBackend, SubmissionReceipt};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Accepts every payload. The latency is simulated by the form's timer, so
/// this answers immediately.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend;

impl SimulatedBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SubmissionBackend for SimulatedBackend {
    async fn submit(&self, form: FormKind, payload: &Payload) -> Result<SubmissionReceipt> {
        tracing::info!("📨 Simulated {} submission with {} fields", form, payload.len());
        tracing::debug!("Payload: {:?}", payload);
        Ok(SubmissionReceipt { message: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_backend_always_succeeds() {
        let backend = SimulatedBackend::new();
        let mut payload = Payload::new();
        payload.insert("name".to_string(), "Jane".to_string());

        let receipt = tokio_test::block_on(backend.submit(FormKind::Contact, &payload)).unwrap();
        assert_eq!(receipt, SubmissionReceipt { message: None });
    }
}
