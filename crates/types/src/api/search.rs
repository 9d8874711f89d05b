use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::flights::FlightSummary;
use super::PageInfo;
use crate::enums::CabinClass;

/// Sort key for search results. Ties break on flight id so paging is
/// stable across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SearchQuery {
    pub origin: String,
    pub destination: String,
    /// UTC calendar day of departure. Omitted means any upcoming day.
    pub date: Option<NaiveDate>,
    #[serde(default = "default_passengers")]
    #[validate(range(min = 1, max = 9))]
    pub passengers: i32,
    pub tier: Option<CabinClass>,
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_passengers() -> i32 {
    1
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub data: Vec<FlightSummary>,
    pub page_info: PageInfo,
}
