use crate::models::DbBookingSlot;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Inserts all slot rows of one booking in a single transaction.
///
/// The transaction rolls back when dropped, so any failed insert leaves none
/// of the rows behind.
pub async fn insert_booking_slots(pool: &Pool<Postgres>, slots: &[DbBookingSlot]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for slot in slots {
        sqlx::query(
            r#"
            INSERT INTO bookings (booking_id, room_id, date, slot, reserved_by)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&slot.booking_id)
        .bind(&slot.room_id)
        .bind(slot.date)
        .bind(slot.slot)
        .bind(&slot.reserved_by)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn get_booking_slots(
    pool: &Pool<Postgres>,
    booking_id: &str,
) -> Result<Vec<DbBookingSlot>> {
    let slots = sqlx::query_as::<_, DbBookingSlot>(
        r#"
        SELECT booking_id, room_id, date, slot, reserved_by
        FROM bookings
        WHERE booking_id = $1
        ORDER BY room_id, date, slot
        "#,
    )
    .bind(booking_id)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn find_booking_slots(
    pool: &Pool<Postgres>,
    room_id: Option<&str>,
    date: NaiveDate,
    onward: bool,
    reserved_by: Option<&str>,
) -> Result<Vec<DbBookingSlot>> {
    let slots = sqlx::query_as::<_, DbBookingSlot>(
        r#"
        SELECT booking_id, room_id, date, slot, reserved_by
        FROM bookings
        WHERE ($1::VARCHAR IS NULL OR room_id = $1)
          AND ((NOT $3 AND date = $2) OR ($3 AND date >= $2))
          AND ($4::VARCHAR IS NULL OR reserved_by = $4)
        ORDER BY room_id, date, slot, booking_id
        "#,
    )
    .bind(room_id)
    .bind(date)
    .bind(onward)
    .bind(reserved_by)
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn delete_booking_slots(pool: &Pool<Postgres>, booking_id: &str) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM bookings
        WHERE booking_id = $1
        "#,
    )
    .bind(booking_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
