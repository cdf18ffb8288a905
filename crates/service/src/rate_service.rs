use std::sync::Arc;
use tracing::{info, instrument};

use models::setting::{validate_rate, MEAL_RATE_KEY};

use crate::domain::RateSetting;
use crate::errors::ServiceError;
use crate::repository::RateRepository;

/// Singleton per-meal price.
pub struct RateService<R: RateRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: RateRepository + ?Sized> RateService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn set_rate(&self, value: f64) -> Result<RateSetting, ServiceError> {
        validate_rate(value)?;
        let stored = self.repo.upsert_setting(MEAL_RATE_KEY, value).await?;
        info!(value = stored.value, "meal_rate_set");
        Ok(stored)
    }

    /// Current rate, `0` until one has been set.
    pub async fn get_rate(&self) -> Result<f64, ServiceError> {
        Ok(self.repo.get_setting(MEAL_RATE_KEY).await?.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::InMemoryRepository;

    #[tokio::test]
    async fn rate_defaults_to_zero_then_reads_back_last_write() {
        let svc = RateService::new(Arc::new(InMemoryRepository::default()));
        assert_eq!(svc.get_rate().await.unwrap(), 0.0);
        svc.set_rate(55.0).await.unwrap();
        let stored = svc.set_rate(57.5).await.unwrap();
        assert_eq!(stored.key, "mealRate");
        assert_eq!(svc.get_rate().await.unwrap(), 57.5);
    }

    #[tokio::test]
    async fn negative_rate_is_rejected_and_not_stored() {
        let svc = RateService::new(Arc::new(InMemoryRepository::default()));
        assert!(matches!(svc.set_rate(-1.0).await, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get_rate().await.unwrap(), 0.0);
    }
}
