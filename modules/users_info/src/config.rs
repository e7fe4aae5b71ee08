use serde::{Deserialize, Serialize};

/// Configuration for the users_info module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersInfoConfig {
    /// Users younger than this many years cannot register.
    #[serde(default = "default_minimum_age_years")]
    pub minimum_age_years: u32,
}

impl Default for UsersInfoConfig {
    fn default() -> Self {
        Self {
            minimum_age_years: default_minimum_age_years(),
        }
    }
}

fn default_minimum_age_years() -> u32 {
    18
}
