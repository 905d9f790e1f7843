pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{parse_company_size, RangeOp};
pub use engine::{FactorContribution, ScoreBreakdown, ScoreResult, Scorer};
pub use validation::validate_scoring;
