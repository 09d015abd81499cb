use async_trait::async_trait;
use mockall::mock;

use crate::errors::TimeResult;
use crate::models::booking::{Booking, BookingFilter};
use crate::models::room::Room;
use crate::repository::BookingRepository;

// Mock repository for service and handler tests
mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn list_rooms(&self) -> TimeResult<Vec<Room>>;

        async fn get_room(&self, room_id: &str) -> TimeResult<Room>;

        async fn list_bookings(&self, filter: &BookingFilter) -> TimeResult<Vec<Booking>>;

        async fn get_booking(&self, booking_id: &str) -> TimeResult<Option<Booking>>;

        async fn create_booking(&self, booking: &Booking) -> TimeResult<()>;

        async fn delete_booking(&self, booking_id: &str) -> TimeResult<()>;
    }
}
