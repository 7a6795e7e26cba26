use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::adapters::clock::FixedClock;
use crate::adapters::memory::{MemoryBookingStore, MemoryEstablishmentStore, MemoryUserDirectory};
use crate::domain::actor::{Role, UserProfile};
use crate::domain::booking::CreateBookingRequest;
use crate::domain::establishment::{Category, Establishment};
use crate::domain::pricing::PricingPolicy;
use crate::engine::coordinator::{BookingPolicy, ReservationCoordinator, Stores};
use crate::engine::{AvailabilityIndex, Catalog};

pub const GUEST: &str = "guest-1";
pub const OPERATOR: &str = "op-1";
pub const VENUE: &str = "e-reve";
pub const UNVERIFIED_VENUE: &str = "e-pending";

/// A wired engine over in-memory stores, clock frozen at 2024-05-20 09:00 UTC.
pub struct Fixture {
    pub coordinator: Arc<ReservationCoordinator>,
    pub catalog: Arc<Catalog>,
    pub clock: Arc<FixedClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_policy(BookingPolicy::default())
    }

    pub fn with_policy(policy: BookingPolicy) -> Self {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
        ));
        let stores = Stores {
            establishments: Arc::new(MemoryEstablishmentStore::with_establishments([
                make_establishment(VENUE, "Hôtel Le Rêve", Some(20000), true),
                make_establishment(UNVERIFIED_VENUE, "Lodge en attente", Some(30000), false),
            ])),
            bookings: Arc::new(MemoryBookingStore::new()),
            users: Arc::new(MemoryUserDirectory::with_users([
                make_profile(GUEST, "Jean", "Dupont", Role::User),
                make_profile(OPERATOR, "Marie", "Curie", Role::Operator),
            ])),
        };
        let availability = Arc::new(AvailabilityIndex::new());
        let coordinator = Arc::new(ReservationCoordinator::new(
            stores.clone(),
            Arc::clone(&availability),
            PricingPolicy::default(),
            policy,
            clock.clone(),
        ));
        let catalog = Arc::new(Catalog::new(stores, availability));
        Self {
            coordinator,
            catalog,
            clock,
        }
    }
}

// --- Factory functions ---

pub fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn request(
    establishment_id: &str,
    check_in: (u32, u32),
    check_out: (u32, u32),
    guests: u32,
) -> CreateBookingRequest {
    CreateBookingRequest {
        establishment_id: establishment_id.to_string(),
        check_in: d(check_in.0, check_in.1),
        check_out: d(check_out.0, check_out.1),
        guests,
    }
}

pub fn make_establishment(
    id: &str,
    name: &str,
    price: Option<u64>,
    verified: bool,
) -> Establishment {
    Establishment {
        id: id.to_string(),
        operator_id: OPERATOR.to_string(),
        name: name.to_string(),
        description: "Vue sur l'océan".to_string(),
        category: Category::Hotel,
        location: "Pointe-Noire".to_string(),
        address: "Av. du Général de Gaulle".to_string(),
        city: "Pointe-Noire".to_string(),
        images: vec!["https://example.com/reve.jpg".to_string()],
        price,
        rating: Some(4.5),
        latitude: None,
        longitude: None,
        is_verified: verified,
    }
}

pub fn make_profile(id: &str, first_name: &str, last_name: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        role,
        avatar: None,
    }
}
