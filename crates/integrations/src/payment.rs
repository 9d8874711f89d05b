//! Simulated payment gateway.
//!
//! Stands in for a real acquirer: approves with a configurable
//! probability (1.0 by default) and mints transaction ids. Real
//! settlement is out of scope.

use rand::{distributions::Alphanumeric, Rng};
use rust_decimal::Decimal;

use skyfare_core::booking::{ChargeOutcome, PaymentAdapter};
use skyfare_types::enums::PaymentMethod;

#[derive(Debug, Clone)]
pub struct PaymentGateway {
    success_probability: f64,
}

impl PaymentGateway {
    pub fn new(success_probability: f64) -> Self {
        Self {
            success_probability: success_probability.clamp(0.0, 1.0),
        }
    }

    fn new_transaction_id() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();

        format!("txn_{}", suffix.to_lowercase())
    }
}

impl PaymentAdapter for PaymentGateway {
    async fn charge(
        &self,
        booking_reference: &str,
        amount: Decimal,
        method: PaymentMethod,
    ) -> anyhow::Result<ChargeOutcome> {
        let approved = rand::thread_rng().gen_bool(self.success_probability);
        let transaction_id = Self::new_transaction_id();

        tracing::debug!(
            booking_reference,
            %amount,
            method = method.as_str(),
            approved,
            %transaction_id,
            "Simulated charge"
        );

        Ok(ChargeOutcome {
            approved,
            transaction_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_certain_success() {
        let gateway = PaymentGateway::new(1.0);
        for _ in 0..50 {
            let outcome = gateway
                .charge("SF-TEST0001", Decimal::from(5000), PaymentMethod::Card)
                .await
                .unwrap();
            assert!(outcome.approved);
        }
    }

    #[tokio::test]
    async fn test_certain_failure() {
        let gateway = PaymentGateway::new(0.0);
        for _ in 0..50 {
            let outcome = gateway
                .charge("SF-TEST0001", Decimal::from(5000), PaymentMethod::Upi)
                .await
                .unwrap();
            assert!(!outcome.approved);
        }
    }

    #[tokio::test]
    async fn test_transaction_ids_are_distinct() {
        let gateway = PaymentGateway::new(1.0);
        let a = gateway
            .charge("SF-A", Decimal::ONE, PaymentMethod::Card)
            .await
            .unwrap();
        let b = gateway
            .charge("SF-B", Decimal::ONE, PaymentMethod::Card)
            .await
            .unwrap();
        assert!(a.transaction_id.starts_with("txn_"));
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[test]
    fn test_probability_is_clamped() {
        let gateway = PaymentGateway::new(7.5);
        assert_eq!(gateway.success_probability, 1.0);
    }
}
