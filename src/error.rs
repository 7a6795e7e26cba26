use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::domain::booking::BookingStatus;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid date range: {reason}")]
    InvalidRange { reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Establishment {id} is awaiting moderation and cannot be booked")]
    NotVerified { id: String },

    #[error("Dates {check_in} to {check_out} overlap an existing reservation")]
    Conflict {
        check_in: NaiveDate,
        check_out: NaiveDate,
        /// Set when the overlapping reservation is the caller's own identical
        /// stay, i.e. the request is a resubmission.
        duplicate_of: Option<String>,
    },

    #[error("Establishment {id} has {bookings} booking(s) on record and cannot be deleted")]
    HasBookings { id: String, bookings: usize },

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Not allowed: {reason}")]
    Unauthorized { reason: String },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code surfaced to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::NotVerified { .. } => "NOT_VERIFIED",
            Self::Conflict { .. } | Self::HasBookings { .. } => "CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => "INTERNAL",
        }
    }

    /// HTTP-equivalent status for the REST contracts.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidRange { .. } | Self::NotVerified { .. } | Self::InvalidRequest { .. } => {
                400
            }
            Self::Unauthorized { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } | Self::HasBookings { .. } | Self::InvalidTransition { .. } => {
                409
            }
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Yaml(_) => 500,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Conflict {
                check_in,
                check_out,
                duplicate_of,
            } => Some(serde_json::json!({
                "checkIn": check_in,
                "checkOut": check_out,
                "duplicateOf": duplicate_of,
            })),
            Self::HasBookings { bookings, .. } => Some(serde_json::json!({
                "bookings": bookings,
            })),
            Self::InvalidTransition { from, to } => Some(serde_json::json!({
                "from": from,
                "to": to,
            })),
            _ => None,
        }
    }

    /// The `{ success: false, error: {...} }` envelope returned to clients.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: ErrorDetail {
                code: self.code(),
                message: self.to_string(),
                status: self.http_status(),
                details: self.details(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
