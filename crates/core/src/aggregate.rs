use crate::models::{booking::Booking, reservation::Reservation, room::Room};

/// Pairs every room with the bookings that reference it.
///
/// Room order is the display order and is kept as given; rooms without any
/// booking still get an entry with an empty list. Bookings keep their input
/// order within each room.
pub fn build_reservations(rooms: Vec<Room>, bookings: Vec<Booking>) -> Vec<Reservation> {
    rooms
        .into_iter()
        .map(|room| {
            let bookings = bookings
                .iter()
                .filter(|booking| booking.room_id == room.room_id)
                .cloned()
                .collect();
            Reservation { room, bookings }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Date, Slot};
    use pretty_assertions::assert_eq;

    fn room(id: &str) -> Room {
        Room {
            room_id: id.to_string(),
            name: format!("Room {id}"),
            location: "Floor 1".to_string(),
        }
    }

    fn booking(room_id: &str, start: i32) -> Booking {
        Booking {
            booking_id: format!("{room_id}-010124-{start}"),
            room_id: room_id.to_string(),
            date: Date::from_ymd(2024, 1, 1).unwrap(),
            start: Slot::new(start).unwrap(),
            end: Slot::new(start + 1).unwrap(),
            reserved_by: "alice".to_string(),
        }
    }

    #[test]
    fn keeps_room_order_and_empty_rooms() {
        let rooms = vec![room("A"), room("B"), room("C")];
        let reservations = build_reservations(rooms, vec![booking("B", 4)]);

        let ids: Vec<&str> = reservations.iter().map(|r| r.room.room_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(reservations[0].bookings.is_empty());
        assert_eq!(reservations[1].bookings, vec![booking("B", 4)]);
        assert!(reservations[2].bookings.is_empty());
    }

    #[test]
    fn bookings_keep_input_order_per_room() {
        let bookings = vec![booking("A", 10), booking("B", 2), booking("A", 3)];
        let reservations = build_reservations(vec![room("B"), room("A")], bookings);

        assert_eq!(reservations[0].bookings, vec![booking("B", 2)]);
        assert_eq!(reservations[1].bookings, vec![booking("A", 10), booking("A", 3)]);
    }

    #[test]
    fn bookings_for_unknown_rooms_are_dropped() {
        let reservations = build_reservations(vec![room("A")], vec![booking("Z", 1)]);
        assert_eq!(reservations.len(), 1);
        assert!(reservations[0].bookings.is_empty());
    }
}
