pub mod network;
pub mod scaling;

pub use network::{Network, OutputRange};
pub use scaling::ScalingParams;
