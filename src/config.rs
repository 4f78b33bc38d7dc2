use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// What to do when the known-payee registry cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryPolicy {
    /// Warn once and continue with an empty registry.
    #[default]
    FailSoft,
    /// Abort the batch.
    FailFast,
}

/// Settings for one import run. Defaults match a Commerzbank CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub delimiter: u8,
    pub has_header: bool,
    /// Civil time zone the statement dates are anchored to.
    pub timezone: Tz,
    /// Payee used for fee bookings.
    pub institution: String,
    pub registry_policy: RegistryPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            has_header: true,
            timezone: chrono_tz::Europe::Berlin,
            institution: "Commerzbank".to_string(),
            registry_policy: RegistryPolicy::default(),
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn institution(mut self, institution: &str) -> Self {
        self.institution = institution.to_string();
        self
    }

    pub fn registry_policy(mut self, policy: RegistryPolicy) -> Self {
        self.registry_policy = policy;
        self
    }
}
