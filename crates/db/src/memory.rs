//! In-process [`BookingRepository`] with the same row-per-slot layout and
//! all-or-nothing inserts as the Postgres store.

use async_trait::async_trait;
#[cfg(test)]
use roombook_core::calendar::Slot;
use roombook_core::{
    errors::{TimeError, TimeResult},
    models::booking::{Booking, BookingFilter, SlotRow},
    models::room::Room,
    repository::{BookingRepository, coalesce_rows},
};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryRepository {
    rooms: Vec<Room>,
    rows: RwLock<Vec<SlotRow>>,
    #[cfg(test)]
    fail_at: Option<Slot>,
}

impl MemoryRepository {
    pub fn new(rooms: Vec<Room>) -> Self {
        Self {
            rooms,
            ..Self::default()
        }
    }

    /// Number of stored slot rows, across all bookings.
    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    #[cfg(test)]
    fn failing_at(mut self, slot: Slot) -> Self {
        self.fail_at = Some(slot);
        self
    }

    #[cfg(test)]
    fn check_slot_write(&self, row: &SlotRow) -> TimeResult<()> {
        if self.fail_at == Some(row.slot) {
            return Err(TimeError::Storage(eyre::eyre!(
                "injected failure at slot {}",
                row.slot.index()
            )));
        }
        Ok(())
    }

    #[cfg(not(test))]
    fn check_slot_write(&self, _row: &SlotRow) -> TimeResult<()> {
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryRepository {
    async fn list_rooms(&self) -> TimeResult<Vec<Room>> {
        Ok(self.rooms.clone())
    }

    async fn get_room(&self, room_id: &str) -> TimeResult<Room> {
        self.rooms
            .iter()
            .find(|room| room.room_id == room_id)
            .cloned()
            .ok_or_else(|| TimeError::NotFound(format!("Room {room_id} not found")))
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> TimeResult<Vec<Booking>> {
        if filter.date.is_unset() {
            return Err(TimeError::Validation("booking filter needs a date".to_string()));
        }

        let rows: Vec<SlotRow> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| filter.admits(&row.room_id, row.date, &row.reserved_by))
            .cloned()
            .collect();

        debug!("Fetched {} booking slots for {:?}", rows.len(), filter);
        coalesce_rows(rows)
    }

    async fn get_booking(&self, booking_id: &str) -> TimeResult<Option<Booking>> {
        let rows: Vec<SlotRow> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.booking_id == booking_id)
            .cloned()
            .collect();

        Ok(coalesce_rows(rows)?.into_iter().next())
    }

    async fn create_booking(&self, booking: &Booking) -> TimeResult<()> {
        if booking.date.is_unset() {
            return Err(TimeError::Validation(format!(
                "Booking {} has no date",
                booking.booking_id
            )));
        }
        if booking.end < booking.start {
            return Err(TimeError::Validation(format!(
                "Booking {} ends before it starts",
                booking.booking_id
            )));
        }
        self.get_room(&booking.room_id).await?;

        // Holding the write lock for the whole insert keeps readers from
        // seeing a partial range; staged rows are discarded on any failure.
        let mut rows = self.rows.write().await;
        let mut staged: Vec<SlotRow> = Vec::new();

        for row in booking.rows() {
            let taken = rows
                .iter()
                .chain(staged.iter())
                .any(|existing| existing.booking_id == row.booking_id && existing.slot == row.slot);
            if taken {
                return Err(TimeError::Conflict(format!(
                    "Booking {} already exists",
                    booking.booking_id
                )));
            }

            self.check_slot_write(&row)?;
            staged.push(row);
        }

        debug!(
            "Inserting {} slots for booking {}",
            staged.len(),
            booking.booking_id
        );
        rows.extend(staged);
        Ok(())
    }

    async fn delete_booking(&self, booking_id: &str) -> TimeResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.booking_id != booking_id);

        debug!("Deleted {} slots of booking {}", before - rows.len(), booking_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roombook_core::calendar::{Date, booking_id};
    use rstest::rstest;

    fn rooms() -> Vec<Room> {
        vec![Room {
            room_id: "R1".to_string(),
            name: "Kenari".to_string(),
            location: "3rd floor".to_string(),
        }]
    }

    fn booking(start: i32, end: i32) -> Booking {
        let date = Date::parse("010124").unwrap();
        let start = Slot::new(start).unwrap();
        Booking {
            booking_id: booking_id("R1", date, start).unwrap(),
            room_id: "R1".to_string(),
            date,
            start,
            end: Slot::new(end).unwrap(),
            reserved_by: "alice".to_string(),
        }
    }

    #[rstest]
    #[case(4, 4, 5)]
    #[case(4, 7, 6)]
    #[case(0, 95, 50)]
    #[case(10, 12, 12)]
    #[tokio::test]
    async fn failed_insert_leaves_no_rows(#[case] start: i32, #[case] end: i32, #[case] fail: i32) {
        let repo = MemoryRepository::new(rooms()).failing_at(Slot::new(fail).unwrap());
        let booking = booking(start, end);

        let result = repo.create_booking(&booking).await;

        if (start..=end).contains(&fail) {
            assert!(matches!(result, Err(TimeError::Storage(_))));
            assert_eq!(repo.get_booking(&booking.booking_id).await.unwrap(), None);
            assert_eq!(repo.row_count().await, 0);
        } else {
            result.unwrap();
            assert_eq!(repo.row_count().await, (end - start + 1) as usize);
        }
    }

    #[tokio::test]
    async fn stores_one_row_per_slot() {
        let repo = MemoryRepository::new(rooms());
        repo.create_booking(&booking(4, 7)).await.unwrap();

        assert_eq!(repo.row_count().await, 4);
        let stored = repo.get_booking("R1-010124-0100").await.unwrap().unwrap();
        assert_eq!((stored.start.index(), stored.end.index()), (4, 7));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let repo = MemoryRepository::new(rooms());
        let mut booking = booking(4, 7);
        booking.room_id = "R9".to_string();

        let result = repo.create_booking(&booking).await;
        assert!(matches!(result, Err(TimeError::NotFound(_))));
        assert_eq!(repo.row_count().await, 0);
    }

    #[tokio::test]
    async fn reversed_range_is_rejected() {
        let repo = MemoryRepository::new(rooms());
        let mut booking = booking(7, 7);
        booking.end = Slot::new(4).unwrap();

        let result = repo.create_booking(&booking).await;
        assert!(matches!(result, Err(TimeError::Validation(_))));
    }
}
