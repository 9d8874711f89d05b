use crate::models::Payment;
use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;

use skyfare_types::enums::{PaymentMethod, PaymentStatus};

/// Record one gateway attempt, successful or failed
pub async fn insert(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    booking_reference: &str,
    amount: Decimal,
    method: PaymentMethod,
    status: PaymentStatus,
    transaction_id: Option<&str>,
) -> Result<Payment> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        INSERT INTO payments (booking_reference, amount, method, status, transaction_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(booking_reference)
    .bind(amount)
    .bind(method)
    .bind(status)
    .bind(transaction_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(payment)
}

/// Most recent successful payment for a booking, for receipts
pub async fn latest_success(pool: &PgPool, booking_reference: &str) -> Result<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(
        r#"
        SELECT * FROM payments
        WHERE booking_reference = $1 AND status = 'success'
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(booking_reference)
    .fetch_optional(pool)
    .await?;

    Ok(payment)
}
