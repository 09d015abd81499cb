//! # RoomBook core
//!
//! Slot-based room booking: calendar primitives, the booking model, the
//! storage contract every backend implements, and the service that the HTTP
//! layer drives.

pub mod aggregate;
pub mod calendar;
pub mod errors;
pub mod mock;
pub mod models;
pub mod repository;
pub mod service;
