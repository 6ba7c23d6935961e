/// Data model shared by both report parsers and the aggregator.
pub mod record;
pub mod size;

pub use record::{Histogram, HistogramValue, StatsRecord};
