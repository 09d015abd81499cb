//! # Calendar primitives
//!
//! Day-granular dates, quarter-hour slot indexes and the booking identifier
//! derived from them.
//!
//! Every date crossing the wire or entering a booking identifier uses the
//! same fixed `DDMMYY` layout. A [`Date`] may also be *unset*, which is a
//! distinct value from today or any other day; callers decide what an unset
//! date defaults to.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{TimeError, TimeResult};

/// chrono layout of the 6-character day-month-year text form.
pub const DATE_LAYOUT: &str = "%d%m%y";

/// Number of quarter-hour slots in a day.
pub const SLOTS_PER_DAY: u8 = 96;

/// A calendar day without time of day, or the unset sentinel.
///
/// Unset sorts before every real day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(Option<NaiveDate>);

impl Date {
    pub const UNSET: Date = Date(None);

    pub fn new(day: NaiveDate) -> Self {
        Date(Some(day))
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> TimeResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date::new)
            .ok_or_else(|| {
                TimeError::Format(format!(
                    "{year:04}-{month:02}-{day:02} is not a calendar day"
                ))
            })
    }

    /// The current local day.
    pub fn today() -> Self {
        Date::new(Local::now().date_naive())
    }

    /// Parses the `DDMMYY` text form. An empty string yields [`Date::UNSET`].
    ///
    /// # Errors
    ///
    /// Returns [`TimeError::Format`] when the text is not six digits or does
    /// not name a real day.
    pub fn parse(text: &str) -> TimeResult<Self> {
        if text.is_empty() {
            return Ok(Date::UNSET);
        }
        if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::Format(format!("date {text:?} must be DDMMYY")));
        }
        NaiveDate::parse_from_str(text, DATE_LAYOUT)
            .map(Date::new)
            .map_err(|e| TimeError::Format(format!("date {text:?} is invalid: {e}")))
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Replaces an unset date with today, leaving real days alone.
    pub fn or_today(self) -> Self {
        if self.is_unset() { Date::today() } else { self }
    }

    /// The `DDMMYY` text form, or `None` when unset.
    pub fn format(&self) -> Option<String> {
        self.0.map(|day| day.format(DATE_LAYOUT).to_string())
    }
}

impl From<NaiveDate> for Date {
    fn from(day: NaiveDate) -> Self {
        Date::new(day)
    }
}

impl FromStr for Date {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(day) => write!(f, "{}", day.format(DATE_LAYOUT)),
            None => Ok(()),
        }
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format() {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = Date;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a DDMMYY date string, an empty string or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Date, E> {
        Date::parse(v).map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<Date, E> {
        Ok(Date::UNSET)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Date, E> {
        Ok(Date::UNSET)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Date, D::Error> {
        deserializer.deserialize_str(DateVisitor)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(DateVisitor)
    }
}

/// Index of a 15-minute increment of a day: 0 is 00:00-00:15, 95 is 23:45-24:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "u8")]
pub struct Slot(u8);

impl Slot {
    pub const FIRST: Slot = Slot(0);
    pub const LAST: Slot = Slot(SLOTS_PER_DAY - 1);

    pub fn new(index: i32) -> TimeResult<Self> {
        if (0..SLOTS_PER_DAY as i32).contains(&index) {
            Ok(Slot(index as u8))
        } else {
            Err(TimeError::Validation(format!(
                "slot {index} is outside 0..={}",
                SLOTS_PER_DAY - 1
            )))
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn hours(self) -> u8 {
        self.0 / 4
    }

    pub fn minutes(self) -> u8 {
        (self.0 % 4) * 15
    }

    /// Every slot from `self` to `end`, both inclusive. Empty when `end < self`.
    pub fn through(self, end: Slot) -> impl Iterator<Item = Slot> {
        (self.0..=end.0).map(Slot)
    }
}

impl TryFrom<i32> for Slot {
    type Error = TimeError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Slot::new(index)
    }
}

impl From<Slot> for u8 {
    fn from(slot: Slot) -> u8 {
        slot.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// The key a booking identifier names: one room, one day, one start slot.
///
/// Two bookings with the same key share an identifier, so at most one of
/// them can be stored. Bookings whose ranges overlap but start on different
/// slots have distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub room_id: String,
    pub date: Date,
    pub start: Slot,
}

impl BookingKey {
    pub fn new(room_id: impl Into<String>, date: Date, start: Slot) -> TimeResult<Self> {
        let room_id = room_id.into();
        if room_id.is_empty() {
            return Err(TimeError::Format("booking key needs a room id".to_string()));
        }
        if date.is_unset() {
            return Err(TimeError::Format("booking key needs a date".to_string()));
        }
        Ok(Self { room_id, date, start })
    }
}

impl fmt::Display for BookingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:02}{:02}",
            self.room_id,
            self.date,
            self.start.hours(),
            self.start.minutes()
        )
    }
}

impl FromStr for BookingKey {
    type Err = TimeError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeError::Format(format!("booking id {id:?} is malformed"));

        // Room ids may themselves contain '-', so split from the right.
        let mut parts = id.rsplitn(3, '-');
        let hhmm = parts.next().ok_or_else(malformed)?;
        let date = parts.next().ok_or_else(malformed)?;
        let room_id = parts.next().ok_or_else(malformed)?;

        if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let hours: i32 = hhmm[..2].parse().map_err(|_| malformed())?;
        let minutes: i32 = hhmm[2..].parse().map_err(|_| malformed())?;
        if hours >= 24 || minutes % 15 != 0 || minutes >= 60 {
            return Err(malformed());
        }
        let start = Slot::new(hours * 4 + minutes / 15)?;
        let date = Date::parse(date)?;

        BookingKey::new(room_id, date, start)
    }
}

/// Derives the identifier of a booking starting at `start` in `room_id` on `date`.
///
/// # Errors
///
/// Returns [`TimeError::Format`] when the room id is empty or the date is unset.
pub fn booking_id(room_id: &str, date: Date, start: Slot) -> TimeResult<String> {
    Ok(BookingKey::new(room_id, date, start)?.to_string())
}
