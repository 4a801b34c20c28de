pub mod deriver;
pub mod types;

pub use deriver::{derive_composition, derive_from_preview, reset_composition};
pub use types::{ChartData, ChartSwap};
