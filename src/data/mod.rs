pub mod dataset;
pub mod split;

pub use dataset::{Dataset, Sample};
pub use split::split;
