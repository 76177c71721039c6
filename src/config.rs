use thiserror::Error;

use crate::domain::{Competitor, RivalrySides, Side};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_TABLE: &str = "pink-room-main";
/// Matches fetched per table when computing statistics
pub const DEFAULT_MATCH_LIMIT: usize = 100;

const DEFAULT_SIDE_A_ID: &str = "c3d4e5f6-a7b8-9012-cdef-123456789012";
const DEFAULT_SIDE_A_NAME: &str = "Bachi";
const DEFAULT_SIDE_B_ID: &str = "d4e5f6a7-b8c9-0123-def0-234567890123";
const DEFAULT_SIDE_B_NAME: &str = "Crimebaker";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Both sides use the id {0}")]
    DuplicateSides(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub default_table: String,
    pub match_limit: usize,
    pub sides: RivalrySides,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            default_table: DEFAULT_TABLE.to_string(),
            match_limit: DEFAULT_MATCH_LIMIT,
            sides: RivalrySides::new(
                Competitor::new(DEFAULT_SIDE_A_ID, DEFAULT_SIDE_A_NAME),
                Competitor::new(DEFAULT_SIDE_B_ID, DEFAULT_SIDE_B_NAME),
            ),
        }
    }
}

impl AppConfig {
    /// Reads `RIVALRY_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(var) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(var)),
                Some(value) => Ok(value.trim().to_string()),
                None => Ok(default.to_string()),
            }
        };

        let match_limit = match lookup("RIVALRY_MATCH_LIMIT") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "RIVALRY_MATCH_LIMIT",
                        value,
                    })
                }
            },
            None => defaults.match_limit,
        };

        let side_a = Competitor::new(
            text("RIVALRY_SIDE_A_ID", defaults.sides.id(Side::A))?,
            text(
                "RIVALRY_SIDE_A_NAME",
                &defaults.sides.competitor(Side::A).display_name,
            )?,
        );
        let side_b = Competitor::new(
            text("RIVALRY_SIDE_B_ID", defaults.sides.id(Side::B))?,
            text(
                "RIVALRY_SIDE_B_NAME",
                &defaults.sides.competitor(Side::B).display_name,
            )?,
        );
        if side_a.id == side_b.id {
            return Err(ConfigError::DuplicateSides(side_a.id));
        }

        Ok(Self {
            bind_addr: text("RIVALRY_BIND_ADDR", &defaults.bind_addr)?,
            default_table: text("RIVALRY_TABLE", &defaults.default_table)?,
            match_limit,
            sides: RivalrySides::new(side_a, side_b),
        })
    }
}
