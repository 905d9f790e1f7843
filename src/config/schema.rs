use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;

pub const DEFAULT_INPUT_PATH: &str = "data.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "contact_plan.csv";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Contacts to rank (default: data.csv)
    #[serde(default)]
    pub input_path: Option<PathBuf>,

    /// Where the ranked list is written (default: contact_plan.csv)
    #[serde(default)]
    pub output_path: Option<PathBuf>,

    /// Lookup tables; built-in tables when omitted
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: Some(PathBuf::from(DEFAULT_INPUT_PATH)),
            output_path: Some(PathBuf::from(DEFAULT_OUTPUT_PATH)),
            scoring: Some(ScoringConfig::default()),
        }
    }
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        self.input_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH))
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }

    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}
