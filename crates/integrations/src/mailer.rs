//! Receipt email hand-off.
//!
//! Fire-and-forget: confirmation never waits on (or rolls back for)
//! mail delivery. The transport is a stub; a real SMTP or provider
//! client would replace the body of `send`.

use anyhow::Result;

use skyfare_types::api::receipts::ReceiptDocument;

#[derive(Debug, Clone, Default)]
pub struct ReceiptMailer;

impl ReceiptMailer {
    pub fn new() -> Self {
        Self
    }

    /// Queue a receipt email for the booking's traveller.
    pub async fn send(&self, recipient: &str, document: &ReceiptDocument) -> Result<()> {
        tracing::info!(
            recipient,
            pnr = %document.pnr,
            booking_reference = %document.booking_reference,
            "Receipt email queued (stub transport)"
        );
        Ok(())
    }
}
