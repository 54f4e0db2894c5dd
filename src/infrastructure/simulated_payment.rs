use crate::domain::money::Money;
use crate::domain::ports::{Authorization, AuthorizationMetadata, PaymentGateway};
use crate::error::{OrderError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// An in-process stand-in for the card payment provider.
///
/// Issues `pi_…` references with `…_secret_…` handles and confirms only
/// handles it issued, each at most once. Either step can be told to decline,
/// which is how the CLI and tests exercise the failure paths.
#[derive(Default)]
pub struct SimulatedPaymentGateway {
    issued: Mutex<HashSet<String>>,
    decline_authorization: AtomicBool,
    decline_confirmation: AtomicBool,
}

impl SimulatedPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decline_authorizations(&self, decline: bool) {
        self.decline_authorization.store(decline, Ordering::SeqCst);
    }

    pub fn decline_confirmations(&self, decline: bool) {
        self.decline_confirmation.store(decline, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn create_authorization(
        &self,
        amount: Money,
        metadata: &AuthorizationMetadata,
    ) -> Result<Authorization> {
        if self.decline_authorization.load(Ordering::SeqCst) {
            return Err(OrderError::Gateway("authorization declined".to_string()));
        }
        if amount <= Money::ZERO {
            return Err(OrderError::Gateway(format!(
                "amount must be positive, got {amount}"
            )));
        }

        let reference = format!("pi_{}", Uuid::new_v4().simple());
        let handle = format!("{reference}_secret_{}", Uuid::new_v4().simple());
        self.issued.lock().await.insert(handle.clone());
        debug!(%reference, %amount, item_count = metadata.item_count, "authorization issued");

        Ok(Authorization { handle, reference })
    }

    async fn confirm(&self, handle: &str) -> Result<()> {
        if self.decline_confirmation.load(Ordering::SeqCst) {
            return Err(OrderError::Gateway("card declined".to_string()));
        }
        if self.issued.lock().await.remove(handle) {
            Ok(())
        } else {
            Err(OrderError::Gateway("unknown payment handle".to_string()))
        }
    }
}
