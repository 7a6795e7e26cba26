use serde::{Deserialize, Serialize};

use crate::domain::booking::EstablishmentSummary;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Hotel,
    Restaurant,
    Activity,
    SiteTouristique,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotel => write!(f, "HOTEL"),
            Self::Restaurant => write!(f, "RESTAURANT"),
            Self::Activity => write!(f, "ACTIVITY"),
            Self::SiteTouristique => write!(f, "SITE_TOURISTIQUE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    pub id: String,
    pub operator_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Nightly price in whole currency units.
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Establishment {
    pub fn summary(&self) -> EstablishmentSummary {
        EstablishmentSummary {
            name: self.name.clone(),
            images: self.images.clone(),
            location: self.location.clone(),
        }
    }

    pub fn apply(&mut self, patch: EstablishmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if patch.latitude.is_some() {
            self.latitude = patch.latitude;
        }
        if patch.longitude.is_some() {
            self.longitude = patch.longitude;
        }
    }
}

/// Fields an operator supplies when listing a new venue.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEstablishment {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

/// Partial update; moderation state is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<u64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub location: Option<String>,
}

impl SearchFilters {
    /// Attribute filters only; verification and availability are applied by the catalog.
    pub fn matches(&self, establishment: &Establishment) -> bool {
        if let Some(ref query) = self.query {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty()
                && !establishment.name.to_lowercase().contains(&needle)
                && !establishment.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = self.category
            && establishment.category != category
        {
            return false;
        }
        if let Some(min) = self.min_price
            && establishment.price.is_none_or(|p| p < min)
        {
            return false;
        }
        if let Some(max) = self.max_price
            && establishment.price.is_none_or(|p| p > max)
        {
            return false;
        }
        if let Some(ref location) = self.location {
            let needle = location.trim().to_lowercase();
            if !needle.is_empty()
                && !establishment.location.to_lowercase().contains(&needle)
                && !establishment.city.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
