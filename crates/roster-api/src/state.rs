//! Application state shared across handlers.

use std::sync::Arc;

use governor::{Quota, RateLimiter};

use roster_core::defaults::LOGIN_RATE_LIMIT_PER_MIN;
use roster_core::jenjang::JenjangThresholds;
use roster_core::taxonomy::LocationTaxonomy;
use roster_core::{ConfigStore, RecordStore};
use roster_sheets::TrashFlow;

use crate::session::SessionKey;

/// Global rate limiter type (direct quota, no keyed bucketing — the admin
/// gate has a single shared credential).
pub type LoginRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Env-driven switches for the mutation affordances.
///
/// Disabled operations answer 403 regardless of session state.
#[derive(Debug, Clone, Copy)]
pub struct FeatureFlags {
    pub allow_add: bool,
    pub allow_edit: bool,
    pub allow_delete: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            allow_add: true,
            allow_edit: true,
            allow_delete: true,
        }
    }
}

impl FeatureFlags {
    /// Read flags from `ROSTER_ALLOW_ADD` / `ROSTER_ALLOW_EDIT` /
    /// `ROSTER_ALLOW_DELETE` ("false"/"0" disable; anything else enables).
    pub fn from_env() -> Self {
        fn flag(var: &str) -> bool {
            std::env::var(var)
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true)
        }
        Self {
            allow_add: flag("ROSTER_ALLOW_ADD"),
            allow_edit: flag("ROSTER_ALLOW_EDIT"),
            allow_delete: flag("ROSTER_ALLOW_DELETE"),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Live/trash record store.
    pub store: Arc<dyn RecordStore>,
    /// Shared config blob.
    pub config: Arc<dyn ConfigStore>,
    /// Trash move/restore flow.
    pub trash: Arc<TrashFlow>,
    /// Canonical location taxonomy.
    pub taxonomy: Arc<LocationTaxonomy>,
    /// Class-tier thresholds used for derived fields.
    pub thresholds: Arc<JenjangThresholds>,
    /// Session token signing key.
    pub session_key: SessionKey,
    /// Mutation affordance switches.
    pub flags: FeatureFlags,
    /// Login attempt limiter (None disables rate limiting).
    pub login_limiter: Option<Arc<LoginRateLimiter>>,
}

impl AppState {
    /// Assemble state over the given stores with default taxonomy,
    /// thresholds, and flags.
    pub fn new(
        store: Arc<dyn RecordStore>,
        config: Arc<dyn ConfigStore>,
        session_key: SessionKey,
    ) -> Self {
        let trash = Arc::new(TrashFlow::new(store.clone()));
        Self {
            store,
            config,
            trash,
            taxonomy: Arc::new(LocationTaxonomy::default()),
            thresholds: Arc::new(JenjangThresholds::default()),
            session_key,
            flags: FeatureFlags::default(),
            login_limiter: None,
        }
    }

    /// Enable the login rate limiter with the given per-minute attempt cap.
    pub fn with_login_rate_limit(mut self, per_minute: u32) -> Self {
        self.login_limiter = std::num::NonZeroU32::new(per_minute)
            .map(|n| Arc::new(RateLimiter::direct(Quota::per_minute(n))));
        self
    }

    /// Enable the default login rate limit.
    pub fn with_default_login_rate_limit(self) -> Self {
        self.with_login_rate_limit(LOGIN_RATE_LIMIT_PER_MIN)
    }

    /// Override the feature flags.
    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Override the class-tier thresholds.
    pub fn with_thresholds(mut self, thresholds: JenjangThresholds) -> Self {
        self.thresholds = Arc::new(thresholds);
        self
    }
}
