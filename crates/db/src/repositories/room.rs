use crate::models::DbRoom;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn list_rooms(pool: &Pool<Postgres>) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT room_id, name, location
        FROM rooms
        ORDER BY seq ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, room_id: &str) -> Result<Option<DbRoom>> {
    tracing::debug!("Getting room by id: {}", room_id);

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT room_id, name, location
        FROM rooms
        WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}
