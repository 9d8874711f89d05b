pub mod cancel;
pub mod create;
pub mod expire;
pub mod pay;
pub mod utils;

pub use cancel::cancel_booking;
pub use create::create_hold;
pub use expire::expire_stale_holds;
pub use pay::{pay_booking, ChargeOutcome, PaymentAdapter};
