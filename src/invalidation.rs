//! Invalidation helpers called by handlers after writes.
//!
//! Each helper names the cache regions a mutation makes stale, so call sites
//! never hard-code key strings.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::CacheService;
use crate::keys;

// == Resource Tags ==
/// Global resource lists that can be invalidated in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTag {
    Condominiums,
    Properties,
    Agencies,
    Contracts,
    Appointments,
    Dashboards,
    Locations,
}

impl ResourceTag {
    /// Keys and patterns this tag covers.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            ResourceTag::Condominiums => &[keys::CONDOMINIUMS_APPROVED, "condominium:*"],
            ResourceTag::Properties => &[keys::PROPERTIES_PATTERN, "property:*"],
            ResourceTag::Agencies => &[keys::AGENCIES_LIST, "agency:*"],
            // Dashboards aggregate contracts and appointments
            ResourceTag::Contracts => &["contracts:*", "dashboard:*"],
            ResourceTag::Appointments => &["appointments:*", "dashboard:*"],
            ResourceTag::Dashboards => &["dashboard:*"],
            ResourceTag::Locations => &["locations:*"],
        }
    }
}

// == Invalidator ==
#[derive(Debug, Clone)]
pub struct Invalidator {
    cache: CacheService,
}

impl Invalidator {
    pub fn new(cache: CacheService) -> Self {
        Self { cache }
    }

    /// After a condominium is created, approved or removed.
    pub async fn condominiums(&self) {
        self.cache.invalidate(keys::CONDOMINIUMS_APPROVED).await;
    }

    pub async fn condominium(&self, condominium_id: impl std::fmt::Display) {
        join_all([
            self.cache.invalidate(&keys::condominium(condominium_id)),
            self.cache.invalidate(keys::CONDOMINIUMS_APPROVED),
        ])
        .await;
    }

    /// Drops every listing, search result and agency listing.
    pub async fn properties(&self) {
        self.cache.invalidate(keys::PROPERTIES_PATTERN).await;
    }

    /// A single property changed: its own key plus every list it may appear in.
    pub async fn property(&self, property_id: impl std::fmt::Display) {
        join_all([
            self.cache.invalidate(&keys::property(property_id)),
            self.cache.invalidate(keys::PROPERTIES_PATTERN),
        ])
        .await;
    }

    pub async fn agencies(&self) {
        self.cache.invalidate(keys::AGENCIES_LIST).await;
    }

    pub async fn agency(&self, agency_id: impl std::fmt::Display) {
        let agency_id = agency_id.to_string();
        join_all([
            self.cache.invalidate(&keys::agency(&agency_id)),
            self.cache.invalidate(keys::AGENCIES_LIST),
            self.cache.invalidate(&keys::properties_by_agency(&agency_id)),
        ])
        .await;
    }

    /// Every key scoped to the user (profile, permissions).
    pub async fn user(&self, user_id: impl std::fmt::Display) {
        self.cache.invalidate(&keys::user_pattern(user_id)).await;
    }

    pub async fn contracts(&self, user_id: impl std::fmt::Display) {
        let user_id = user_id.to_string();
        join_all([
            self.cache.invalidate(&keys::contracts_by_user(&user_id)),
            self.cache.invalidate(&keys::dashboard_stats(&user_id)),
        ])
        .await;
    }

    pub async fn appointments(&self, user_id: impl std::fmt::Display) {
        let user_id = user_id.to_string();
        join_all([
            self.cache.invalidate(&keys::appointments_by_user(&user_id)),
            self.cache.invalidate(&keys::dashboard_stats(&user_id)),
        ])
        .await;
    }

    pub async fn dashboard(&self, user_id: impl std::fmt::Display) {
        self.cache.invalidate(&keys::dashboard_stats(user_id)).await;
    }

    /// Invalidates every pattern of every tag in one concurrent wait.
    ///
    /// Each call degrades on its own, so one failing pattern never holds up
    /// the rest.
    pub async fn batch(&self, tags: &[ResourceTag]) {
        let patterns: Vec<&str> = tags.iter().flat_map(|tag| tag.patterns().iter().copied()).collect();
        debug!(?tags, count = patterns.len(), "batch invalidation");
        join_all(patterns.into_iter().map(|pattern| self.cache.invalidate(pattern))).await;
    }
}
