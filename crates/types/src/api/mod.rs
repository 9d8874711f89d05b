pub mod admin;
pub mod bookings;
pub mod flights;
pub mod payments;
pub mod receipts;
pub mod search;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pagination block attached to every paginated response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageInfo {
    pub page: i32,
    pub page_size: i32,
    pub total: i64,
    pub total_pages: i32,
}

impl PageInfo {
    pub fn new(page: i32, page_size: i32, total: i64) -> Self {
        let total_pages = ((total as f64) / (page_size as f64)).ceil() as i32;
        Self {
            page,
            page_size,
            total,
            total_pages,
        }
    }
}
