pub mod booking;
pub mod reservation;
pub mod room;
