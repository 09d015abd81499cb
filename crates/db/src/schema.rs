use eyre::Result;
use roombook_core::models::room::Room;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Rooms are listed in insertion order
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            seq BIGSERIAL NOT NULL,
            room_id VARCHAR(64) PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            location VARCHAR(255) NOT NULL DEFAULT ''
        );
        "#,
    )
    .execute(pool)
    .await?;

    // One row per booked slot
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            booking_id VARCHAR(128) NOT NULL,
            room_id VARCHAR(64) NOT NULL REFERENCES rooms(room_id),
            date DATE NOT NULL,
            slot SMALLINT NOT NULL,
            reserved_by VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (booking_id, slot),
            CONSTRAINT valid_slot CHECK (slot BETWEEN 0 AND 95)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Postgres prepares each query, so every index needs its own statement
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_bookings_room_date_slot ON bookings(room_id, date, slot)",
        "CREATE INDEX IF NOT EXISTS idx_bookings_reserved_by ON bookings(reserved_by, date)",
        "CREATE INDEX IF NOT EXISTS idx_rooms_seq ON rooms(seq)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Inserts rooms, or refreshes name and location of rooms that already exist.
pub async fn seed_rooms(pool: &Pool<Postgres>, rooms: &[Room]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for room in rooms {
        sqlx::query(
            r#"
            INSERT INTO rooms (room_id, name, location)
            VALUES ($1, $2, $3)
            ON CONFLICT (room_id) DO UPDATE
            SET name = EXCLUDED.name, location = EXCLUDED.location
            "#,
        )
        .bind(&room.room_id)
        .bind(&room.name)
        .bind(&room.location)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!("Seeded {} rooms", rooms.len());
    Ok(())
}
