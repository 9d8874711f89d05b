use crate::models::{Aircraft, Airline, Airport};
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Find airport by IATA code
pub async fn find_airport(pool: &PgPool, code: &str) -> Result<Option<Airport>> {
    let airport = sqlx::query_as::<_, Airport>("SELECT * FROM airports WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(airport)
}

/// List all airports
pub async fn list_airports(pool: &PgPool) -> Result<Vec<Airport>> {
    let airports = sqlx::query_as::<_, Airport>("SELECT * FROM airports ORDER BY code ASC")
        .fetch_all(pool)
        .await?;

    Ok(airports)
}

/// Create airport
pub async fn insert_airport(
    pool: &PgPool,
    code: &str,
    name: &str,
    city: &str,
    country: &str,
) -> Result<Airport> {
    let airport = sqlx::query_as::<_, Airport>(
        r#"
        INSERT INTO airports (code, name, city, country)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(code)
    .bind(name)
    .bind(city)
    .bind(country)
    .fetch_one(pool)
    .await?;

    Ok(airport)
}

/// Find airline by IATA code
pub async fn find_airline(pool: &PgPool, code: &str) -> Result<Option<Airline>> {
    let airline = sqlx::query_as::<_, Airline>("SELECT * FROM airlines WHERE code = $1")
        .bind(code)
        .fetch_optional(pool)
        .await?;

    Ok(airline)
}

/// Create airline
pub async fn insert_airline(pool: &PgPool, code: &str, name: &str) -> Result<Airline> {
    let airline = sqlx::query_as::<_, Airline>(
        r#"
        INSERT INTO airlines (code, name)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(code)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(airline)
}

/// Find aircraft by ID
pub async fn find_aircraft(pool: &PgPool, id: Uuid) -> Result<Option<Aircraft>> {
    let aircraft = sqlx::query_as::<_, Aircraft>("SELECT * FROM aircraft WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(aircraft)
}

/// Create aircraft
pub async fn insert_aircraft(
    pool: &PgPool,
    registration: &str,
    model: &str,
    total_seats: i32,
    class_distribution: serde_json::Value,
) -> Result<Aircraft> {
    let aircraft = sqlx::query_as::<_, Aircraft>(
        r#"
        INSERT INTO aircraft (registration, model, total_seats, class_distribution)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(registration)
    .bind(model)
    .bind(total_seats)
    .bind(class_distribution)
    .fetch_one(pool)
    .await?;

    Ok(aircraft)
}
