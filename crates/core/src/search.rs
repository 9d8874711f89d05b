//! Flight search: filter by route and day, attach live fares and
//! per-class availability, sort and paginate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use skyfare_db::models::Flight;
use skyfare_db::queries::{catalog, flights, seats};
use skyfare_db::PgPool;
use skyfare_types::api::flights::FlightSummary;
use skyfare_types::api::search::{SearchQuery, SearchResponse, SortKey};
use skyfare_types::api::PageInfo;
use skyfare_types::enums::CabinClass;
use skyfare_types::{validate_airport_code, AppError, Result};

use crate::pricing::{self, FareSnapshot};

pub async fn search_flights(
    pool: &PgPool,
    query: &SearchQuery,
    now: DateTime<Utc>,
) -> Result<SearchResponse> {
    if query.passengers < 1 {
        return Err(AppError::InvalidArgument(
            "Passenger count must be at least 1".to_string(),
        ));
    }
    validate_airport_code(&query.origin).map_err(AppError::InvalidArgument)?;
    validate_airport_code(&query.destination).map_err(AppError::InvalidArgument)?;

    for code in [&query.origin, &query.destination] {
        catalog::find_airport(pool, code)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Unknown airport code {}", code)))?;
    }

    let matches = flights::search_route(pool, &query.origin, &query.destination, query.date, now)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut summaries = Vec::with_capacity(matches.len());
    for flight in matches {
        summaries.push(summarize(pool, flight, now).await?);
    }

    // A tier filter narrows to flights that actually offer the tier.
    if let Some(tier) = query.tier {
        summaries.retain(|s| s.price_map.contains_key(&tier));
    }

    sort_summaries(&mut summaries, query.sort, query.tier);

    let total = summaries.len() as i64;
    let page = query.page.max(1);
    let page_size = query.page_size.clamp(1, 100);
    let data = page_window(summaries, page, page_size);

    Ok(SearchResponse {
        data,
        page_info: PageInfo::new(page, page_size, total),
    })
}

/// One flight with live fares, for the flight-detail lookup.
pub async fn get_flight(pool: &PgPool, id: Uuid, now: DateTime<Utc>) -> Result<FlightSummary> {
    let flight = flights::find_by_id(pool, id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Flight not found".to_string()))?;

    summarize(pool, flight, now).await
}

/// Attach price_map and seats_by_class to a flight row. Tiers that are
/// priced but cannot be quoted (no seats of that class) are omitted
/// from the map rather than failing the whole summary.
async fn summarize(pool: &PgPool, flight: Flight, now: DateTime<Utc>) -> Result<FlightSummary> {
    let counts = seats::count_by_class(pool, flight.id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let mut price_map = BTreeMap::new();
    let mut seats_by_class = BTreeMap::new();

    for count in &counts {
        seats_by_class.insert(count.cabin_class, count.available);
    }

    for tier in flight.base_fare.keys().copied() {
        let Ok(snapshot) = FareSnapshot::from_flight(&flight, &counts, tier, now) else {
            continue;
        };
        match pricing::quote(&snapshot) {
            Ok(fare) => {
                price_map.insert(tier, fare);
            }
            Err(e) => {
                tracing::warn!(flight_id = %flight.id, tier = tier.as_str(), "Unpriceable tier: {}", e);
            }
        }
    }

    Ok(FlightSummary {
        id: flight.id,
        duration_minutes: flight.duration_minutes(),
        flight_number: flight.flight_number,
        airline_code: flight.airline_code,
        origin_code: flight.origin_code,
        destination_code: flight.destination_code,
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
        status: flight.status,
        gate: flight.gate,
        delay_minutes: flight.delay_minutes,
        delay_reason: flight.delay_reason,
        price_map,
        seats_by_class,
    })
}

/// Sort with the flight id as the stable secondary key.
fn sort_summaries(summaries: &mut [FlightSummary], sort: SortKey, tier: Option<CabinClass>) {
    match sort {
        SortKey::Price => summaries.sort_by(|a, b| {
            price_key(a, tier)
                .cmp(&price_key(b, tier))
                .then(a.id.cmp(&b.id))
        }),
        SortKey::Duration => summaries.sort_by(|a, b| {
            a.duration_minutes
                .cmp(&b.duration_minutes)
                .then(a.id.cmp(&b.id))
        }),
        SortKey::Departure => summaries.sort_by(|a, b| {
            a.departure_time
                .cmp(&b.departure_time)
                .then(a.id.cmp(&b.id))
        }),
    }
}

/// Price to sort on: the filtered tier's fare, or the cheapest offered.
/// Unpriced flights sink to the bottom.
fn price_key(summary: &FlightSummary, tier: Option<CabinClass>) -> Decimal {
    let fare = match tier {
        Some(tier) => summary.price_map.get(&tier).copied(),
        None => summary.price_map.values().min().copied(),
    };
    fare.unwrap_or(Decimal::MAX)
}

fn page_window(summaries: Vec<FlightSummary>, page: i32, page_size: i32) -> Vec<FlightSummary> {
    let start = ((page - 1) as usize).saturating_mul(page_size as usize);
    summaries
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use skyfare_types::enums::FlightStatus;

    fn summary(id: u128, price: i64, duration: i64, hour: u32) -> FlightSummary {
        let departure = Utc.with_ymd_and_hms(2026, 9, 1, hour, 0, 0).unwrap();
        let mut price_map = BTreeMap::new();
        price_map.insert(CabinClass::Economy, Decimal::from(price));
        FlightSummary {
            id: Uuid::from_u128(id),
            flight_number: format!("SF{}", id),
            airline_code: "SF".to_string(),
            origin_code: "DEL".to_string(),
            destination_code: "BOM".to_string(),
            departure_time: departure,
            arrival_time: departure + chrono::Duration::minutes(duration),
            duration_minutes: duration,
            status: FlightStatus::Scheduled,
            gate: None,
            delay_minutes: None,
            delay_reason: None,
            price_map,
            seats_by_class: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sort_by_price_with_stable_ties() {
        let mut summaries = vec![
            summary(3, 4000, 120, 10),
            summary(1, 4000, 120, 11),
            summary(2, 3000, 120, 12),
        ];
        sort_summaries(&mut summaries, SortKey::Price, None);

        let ids: Vec<u128> = summaries.iter().map(|s| s.id.as_u128()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_sort_by_duration_and_departure() {
        let mut summaries = vec![
            summary(1, 5000, 180, 8),
            summary(2, 4000, 90, 9),
            summary(3, 3000, 150, 7),
        ];
        sort_summaries(&mut summaries, SortKey::Duration, None);
        assert_eq!(summaries[0].id.as_u128(), 2);

        sort_summaries(&mut summaries, SortKey::Departure, None);
        assert_eq!(summaries[0].id.as_u128(), 3);
    }

    #[test]
    fn test_unpriced_flights_sort_last() {
        let mut unpriced = summary(9, 0, 100, 6);
        unpriced.price_map.clear();
        let mut summaries = vec![unpriced, summary(1, 9000, 100, 6)];
        sort_summaries(&mut summaries, SortKey::Price, None);
        assert_eq!(summaries[0].id.as_u128(), 1);
    }

    #[test]
    fn test_page_window() {
        let summaries: Vec<FlightSummary> =
            (1..=5).map(|i| summary(i, 1000, 60, 10)).collect();

        let page2 = page_window(summaries.clone(), 2, 2);
        let ids: Vec<u128> = page2.iter().map(|s| s.id.as_u128()).collect();
        assert_eq!(ids, vec![3, 4]);

        assert!(page_window(summaries, 4, 2).is_empty());
    }
}
