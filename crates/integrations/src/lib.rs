pub mod mailer;
pub mod payment;
pub mod receipts;

pub use mailer::ReceiptMailer;
pub use payment::PaymentGateway;
pub use receipts::{HtmlReceiptRenderer, ReceiptRenderer};
