use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Whether the stay still occupies the establishment's calendar.
    pub fn holds_dates(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Edges of the lifecycle graph, independent of who asks.
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled | Self::Completed)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Confirmed => write!(f, "CONFIRMED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Half-open date interval `[check_in, check_out)` with `check_in < check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStay")]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStay> for StayRange {
    type Error = BookingError;

    fn try_from(raw: RawStay) -> Result<Self> {
        Self::new(raw.check_in, raw.check_out)
    }
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_in >= check_out {
            return Err(BookingError::invalid_range(format!(
                "check-out {check_out} must be after check-in {check_in}"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Parse two `YYYY-MM-DD` strings.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self> {
        Self::new(parse_date(check_in)?, parse_date(check_out)?)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::invalid_range(format!("invalid date '{value}', expected YYYY-MM-DD"))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub establishment_id: String,
    #[serde(flatten)]
    pub stay: StayRange,
    pub guests: u32,
    pub total_price: u64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub establishment_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub establishment_ids: Option<Vec<String>>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        if let Some(ref user_id) = self.user_id
            && booking.user_id != *user_id
        {
            return false;
        }
        if let Some(ref ids) = self.establishment_ids
            && !ids.contains(&booking.establishment_id)
        {
            return false;
        }
        self.status.is_none_or(|s| booking.status == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstablishmentSummary {
    pub name: String,
    pub images: Vec<String>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A booking as shown on dashboards, with display summaries attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub establishment: Option<EstablishmentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}
