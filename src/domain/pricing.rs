use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Discount applied to stays of at least `min_nights`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StayTier {
    pub min_nights: u32,
    pub discount_percent: u8,
}

/// Guest surcharge and long-stay tiering applied on top of the nightly rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PricingPolicy {
    #[serde(default = "default_free_guests")]
    pub free_guests: u32,
    /// Charged per guest above `free_guests`, per night.
    #[serde(default)]
    pub surcharge_per_extra_guest: u64,
    #[serde(default)]
    pub long_stay_tiers: Vec<StayTier>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            free_guests: default_free_guests(),
            surcharge_per_extra_guest: 0,
            long_stay_tiers: Vec::new(),
        }
    }
}

fn default_free_guests() -> u32 {
    2
}

fn overflow() -> BookingError {
    BookingError::invalid_request("total price exceeds the representable range")
}

impl PricingPolicy {
    /// Total price of a stay. Pure: the same inputs always give the same total.
    pub fn compute_total(
        &self,
        nightly_price: u64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> Result<u64> {
        let nights = (check_out - check_in).num_days();
        if nights <= 0 {
            return Err(BookingError::invalid_range(format!(
                "stay from {check_in} to {check_out} has no nights"
            )));
        }
        let nights = u64::try_from(nights).map_err(|_| overflow())?;

        let extra_guests = u64::from(guests.saturating_sub(self.free_guests));
        let per_night = extra_guests
            .checked_mul(self.surcharge_per_extra_guest)
            .and_then(|surcharge| surcharge.checked_add(nightly_price))
            .ok_or_else(overflow)?;
        let subtotal = per_night.checked_mul(nights).ok_or_else(overflow)?;

        let percent = u64::from(self.discount_percent(nights).min(100));
        // u128 keeps `subtotal * percent` exact for any u64 subtotal.
        let discount = u128::from(subtotal) * u128::from(percent) / 100;
        let discount = u64::try_from(discount).map_err(|_| overflow())?;
        Ok(subtotal - discount)
    }

    fn discount_percent(&self, nights: u64) -> u8 {
        self.long_stay_tiers
            .iter()
            .filter(|tier| u64::from(tier.min_nights) <= nights)
            .map(|tier| tier.discount_percent)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_nights_two_guests_default_policy() {
        let total = PricingPolicy::default()
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 4), 2)
            .unwrap();
        assert_eq!(total, 30000);
    }

    #[test]
    fn zero_nights_is_invalid_range() {
        let err = PricingPolicy::default()
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 1), 2)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidRange { .. }));
    }

    #[test]
    fn reversed_range_is_invalid() {
        let err = PricingPolicy::default()
            .compute_total(10000, date(2024, 1, 4), date(2024, 1, 1), 1)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidRange { .. }));
    }

    #[test]
    fn extra_guests_pay_surcharge_per_night() {
        let policy = PricingPolicy {
            free_guests: 2,
            surcharge_per_extra_guest: 1500,
            long_stay_tiers: Vec::new(),
        };
        // 2 nights × (10000 + 2 × 1500)
        let total = policy
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 3), 4)
            .unwrap();
        assert_eq!(total, 26000);
    }

    #[test]
    fn best_long_stay_tier_applies() {
        let policy = PricingPolicy {
            long_stay_tiers: vec![
                StayTier {
                    min_nights: 7,
                    discount_percent: 10,
                },
                StayTier {
                    min_nights: 28,
                    discount_percent: 25,
                },
            ],
            ..Default::default()
        };
        let week = policy
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 8), 1)
            .unwrap();
        assert_eq!(week, 63000);
        let short = policy
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 7), 1)
            .unwrap();
        assert_eq!(short, 60000);
        let month = policy
            .compute_total(1000, date(2024, 1, 1), date(2024, 1, 31), 1)
            .unwrap();
        assert_eq!(month, 22500);
    }

    #[test]
    fn discount_is_capped_at_full_price() {
        let policy = PricingPolicy {
            long_stay_tiers: vec![StayTier {
                min_nights: 1,
                discount_percent: 150,
            }],
            ..Default::default()
        };
        let total = policy
            .compute_total(10000, date(2024, 1, 1), date(2024, 1, 2), 1)
            .unwrap();
        assert_eq!(total, 0);
    }

    #[test]
    fn overflow_is_rejected() {
        let err = PricingPolicy::default()
            .compute_total(u64::MAX, date(2024, 1, 1), date(2024, 1, 3), 1)
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidRequest { .. }));
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: PricingPolicy = serde_yml::from_str("surcharge_per_extra_guest: 500").unwrap();
        assert_eq!(policy.free_guests, 2);
        assert_eq!(policy.surcharge_per_extra_guest, 500);
        assert!(policy.long_stay_tiers.is_empty());
    }
}
