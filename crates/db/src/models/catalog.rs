use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

use skyfare_types::enums::CabinClass;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Airline {
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Aircraft {
    pub id: Uuid,
    pub registration: String,
    pub model: String,
    pub total_seats: i32,
    pub class_distribution: sqlx::types::Json<BTreeMap<CabinClass, i32>>,
    pub created_at: DateTime<Utc>,
}
