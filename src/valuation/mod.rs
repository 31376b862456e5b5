pub mod config;
pub mod engine;
pub mod factors;
pub mod record;
pub mod validation;

pub use config::{FactorWeights, ValuationConfig};
pub use engine::{evaluate, evaluate_batch, FactorScores, Recommendation, ScoreResult};
pub use record::RawDomainRecord;
pub use validation::validate_valuation;
