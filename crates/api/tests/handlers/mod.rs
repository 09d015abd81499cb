mod booking_test;
mod middleware_test;
mod room_test;
