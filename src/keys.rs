//! Cache key and TTL registry.
//!
//! Pure functions that name cache regions consistently across handlers.
//! Identical input always yields the identical key.

use std::fmt::Display;
use std::time::Duration;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

// == TTL Tiers ==
/// Expiration policy chosen by how volatile the data is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlTier {
    /// Reference data that rarely changes (24h)
    Static,
    /// Per-user data such as profiles and permissions (15min)
    UserSession,
    /// Listing and search results (10min)
    QueryResult,
    /// Fast-moving aggregates (5min)
    Short,
}

impl TtlTier {
    pub const fn seconds(self) -> u64 {
        match self {
            TtlTier::Static => 24 * 60 * 60,
            TtlTier::UserSession => 15 * 60,
            TtlTier::QueryResult => 10 * 60,
            TtlTier::Short => 5 * 60,
        }
    }

    pub const fn duration(self) -> Duration {
        Duration::from_secs(self.seconds())
    }
}

// == Key Builders ==
pub fn user_profile(user_id: impl Display) -> String {
    format!("user:{}:profile", user_id)
}

pub fn user_permissions(user_id: impl Display) -> String {
    format!("user:{}:permissions", user_id)
}

/// Every key scoped to one user.
pub fn user_pattern(user_id: impl Display) -> String {
    format!("user:{}:*", user_id)
}

pub fn property(property_id: impl Display) -> String {
    format!("property:{}", property_id)
}

/// Search results keyed by a hash of the filter set.
///
/// Fails when the filters cannot be serialized; callers skip caching then.
pub fn properties_search<F: Serialize + ?Sized>(filters: &F) -> Result<String> {
    Ok(format!("{}{}", PROPERTIES_SEARCH_PREFIX, hash_filters(filters)?))
}

pub const PROPERTIES_SEARCH_PREFIX: &str = "properties:search:";

pub fn properties_by_agency(agency_id: impl Display) -> String {
    format!("properties:agency:{}", agency_id)
}

/// Every property list, search and agency listing.
pub const PROPERTIES_PATTERN: &str = "properties:*";

pub const CONDOMINIUMS_APPROVED: &str = "condominiums:approved";

pub fn condominium(condominium_id: impl Display) -> String {
    format!("condominium:{}", condominium_id)
}

pub const AGENCIES_LIST: &str = "agencies:list";

pub fn agency(agency_id: impl Display) -> String {
    format!("agency:{}", agency_id)
}

pub fn contracts_by_user(user_id: impl Display) -> String {
    format!("contracts:user:{}", user_id)
}

pub fn appointments_by_user(user_id: impl Display) -> String {
    format!("appointments:user:{}", user_id)
}

pub fn dashboard_stats(user_id: impl Display) -> String {
    format!("dashboard:{}:stats", user_id)
}

pub fn locations(city: &str) -> String {
    format!("locations:{}", city.trim().to_lowercase())
}

// == Filter Hashing ==
/// Deterministic short hash of a filter set.
///
/// Filters go through `serde_json::Value`, whose maps are ordered, so two
/// filter objects with the same fields in a different order hash equally.
pub fn hash_filters<F: Serialize + ?Sized>(filters: &F) -> Result<String> {
    let canonical = serde_json::to_value(filters)?.to_string();
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{:x}", digest)[..16].to_string())
}
