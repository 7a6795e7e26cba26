//! Who may move a booking between states, and when.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::domain::actor::{Actor, Role};
use crate::domain::booking::{Booking, BookingStatus};
use crate::error::{BookingError, Result};

/// Checks a requested status change against the lifecycle graph, then the
/// actor's authority over this booking, then time preconditions.
///
/// `operator_id` is the operator owning the booking's establishment.
pub fn authorize(
    booking: &Booking,
    operator_id: &str,
    actor: &Actor,
    target: BookingStatus,
    now: DateTime<Utc>,
    user_cancellation_cutoff: Duration,
) -> Result<()> {
    let from = booking.status;
    if !from.can_transition_to(target) {
        return Err(BookingError::InvalidTransition { from, to: target });
    }

    let is_owner = actor.role == Role::User && actor.id == booking.user_id;
    let is_operator = actor.operates(operator_id);
    let is_admin = actor.is_admin();

    match (from, target) {
        (BookingStatus::Pending, BookingStatus::Confirmed) => {
            if is_operator || is_admin {
                Ok(())
            } else {
                Err(BookingError::unauthorized(
                    "only the establishment's operator or an administrator can confirm a booking",
                ))
            }
        }
        (BookingStatus::Pending, BookingStatus::Cancelled) => {
            if is_owner || is_operator || is_admin {
                Ok(())
            } else {
                Err(BookingError::unauthorized(
                    "only the guest, the establishment's operator or an administrator can cancel",
                ))
            }
        }
        (BookingStatus::Confirmed, BookingStatus::Cancelled) => {
            if is_operator || is_admin {
                return Ok(());
            }
            if !is_owner {
                return Err(BookingError::unauthorized(
                    "only the guest, the establishment's operator or an administrator can cancel",
                ));
            }
            let deadline = start_of(booking.stay.check_in()) - user_cancellation_cutoff;
            if now <= deadline {
                Ok(())
            } else {
                Err(BookingError::unauthorized(format!(
                    "confirmed bookings can only be cancelled by the guest until {deadline}"
                )))
            }
        }
        (BookingStatus::Confirmed, BookingStatus::Completed) => {
            if actor.role != Role::System && !is_admin {
                return Err(BookingError::unauthorized(
                    "bookings are completed by the system or an administrator",
                ));
            }
            if start_of(booking.stay.check_out()) <= now {
                Ok(())
            } else {
                Err(BookingError::InvalidTransition { from, to: target })
            }
        }
        _ => Err(BookingError::InvalidTransition { from, to: target }),
    }
}

fn start_of(date: chrono::NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus::{Cancelled, Completed, Confirmed, Pending};
    use crate::domain::booking::StayRange;
    use chrono::{NaiveDate, TimeZone};

    const OPERATOR: &str = "op-1";

    fn booking(status: BookingStatus) -> Booking {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Booking {
            id: "b1".into(),
            user_id: "guest-1".into(),
            establishment_id: "e1".into(),
            stay: StayRange::new(
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            )
            .unwrap(),
            guests: 2,
            total_price: 40000,
            status,
            created_at: created,
            updated_at: created,
        }
    }

    fn may_20() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap()
    }

    fn check(
        status: BookingStatus,
        actor: &Actor,
        target: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<()> {
        authorize(
            &booking(status),
            OPERATOR,
            actor,
            target,
            now,
            Duration::hours(24),
        )
    }

    fn all_actors() -> Vec<Actor> {
        vec![
            Actor::user("guest-1"),
            Actor::user("someone-else"),
            Actor::operator(OPERATOR),
            Actor::operator("op-2"),
            Actor::admin("admin"),
            Actor::new("root", Role::SuperAdmin),
            Actor::system(),
        ]
    }

    #[test]
    fn operator_and_admin_confirm() {
        let now = may_20();
        let operator = Actor::operator(OPERATOR);
        assert!(check(Pending, &operator, Confirmed, now).is_ok());
        assert!(check(Pending, &Actor::admin("a"), Confirmed, now).is_ok());
    }

    #[test]
    fn guest_and_foreign_operator_cannot_confirm() {
        let now = may_20();
        for actor in [Actor::user("guest-1"), Actor::operator("op-2"), Actor::system()] {
            let err = check(Pending, &actor, Confirmed, now).unwrap_err();
            assert!(matches!(err, BookingError::Unauthorized { .. }), "{actor:?}");
        }
    }

    #[test]
    fn guest_cancels_own_pending_booking_only() {
        let now = may_20();
        assert!(check(Pending, &Actor::user("guest-1"), Cancelled, now).is_ok());
        let err = check(Pending, &Actor::user("someone-else"), Cancelled, now).unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));
    }

    #[test]
    fn guest_cancellation_of_confirmed_respects_cutoff() {
        let guest = Actor::user("guest-1");
        let just_in_time = Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 0).unwrap();
        let too_late = Utc.with_ymd_and_hms(2024, 5, 31, 0, 0, 1).unwrap();
        assert!(check(Confirmed, &guest, Cancelled, just_in_time).is_ok());
        let err = check(Confirmed, &guest, Cancelled, too_late).unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));
        // Operators are not bound by the guest window.
        assert!(check(Confirmed, &Actor::operator(OPERATOR), Cancelled, too_late).is_ok());
    }

    #[test]
    fn completion_requires_checkout_passed() {
        let before = Utc.with_ymd_and_hms(2024, 6, 2, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        let err = check(Confirmed, &Actor::system(), Completed, before).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
        assert!(check(Confirmed, &Actor::system(), Completed, after).is_ok());
        assert!(check(Confirmed, &Actor::admin("a"), Completed, after).is_ok());
        let err = check(Confirmed, &Actor::operator(OPERATOR), Completed, after).unwrap_err();
        assert!(matches!(err, BookingError::Unauthorized { .. }));
    }

    #[test]
    fn pending_cannot_complete() {
        let after = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let err = check(Pending, &Actor::system(), Completed, after).unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[test]
    fn terminal_states_reject_every_actor() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        for from in [Cancelled, Completed] {
            for actor in all_actors() {
                for target in [Pending, Confirmed, Cancelled, Completed] {
                    let err = check(from, &actor, target, now).unwrap_err();
                    assert!(
                        matches!(err, BookingError::InvalidTransition { .. }),
                        "{from} -> {target} by {actor:?}"
                    );
                }
            }
        }
    }
}
