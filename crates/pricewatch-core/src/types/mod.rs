//! Record types flowing through the pricing pipeline.

pub mod collections;
pub mod enriched;
pub mod outcome;
pub mod record;
pub mod tier;

pub use collections::{FxHashMap, FxHashSet};
pub use enriched::EnrichedRecord;
pub use outcome::RuleOutcome;
pub use record::{RawSalesRow, SalesRecord};
pub use tier::DealerTier;
