//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationInput};
use shared::time;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, customer_name, phone, party_size, reserved_at, status, created_at, updated_at";

/// Every reservation, earliest `reserved_at` first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Reservation>> {
    let sql = format!("SELECT {COLUMNS} FROM reservation ORDER BY reserved_at ASC, id ASC");
    let rows = sqlx::query_as::<_, Reservation>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("SELECT {COLUMNS} FROM reservation WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Like [`find_by_id`], but a missing row is an error
pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Reservation> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

pub async fn create(pool: &SqlitePool, data: ReservationInput) -> RepoResult<Reservation> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO reservation \
         (id, customer_name, phone, party_size, reserved_at, status, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.customer_name)
    .bind(&data.phone)
    .bind(data.party_size)
    .bind(time::format_storage(&data.reserved_at))
    .bind(data.status.unwrap_or_default())
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Overwrite every field; a `None` status keeps the stored one
pub async fn update(pool: &SqlitePool, id: i64, data: ReservationInput) -> RepoResult<Reservation> {
    let rows = sqlx::query(
        "UPDATE reservation SET customer_name = ?1, phone = ?2, party_size = ?3, reserved_at = ?4, \
         status = COALESCE(?5, status), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.customer_name)
    .bind(&data.phone)
    .bind(data.party_size)
    .bind(time::format_storage(&data.reserved_at))
    .bind(data.status)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM reservation WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Reservation {id} not found")));
    }
    Ok(true)
}
