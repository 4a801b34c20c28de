//! Swap form state: immutable snapshots and the store that publishes them.

pub mod state;
pub mod store;

pub use state::{
    AssetModalPatch, AssetModalState, FormState, Inputs, InputsPatch, Outputs, OutputsPatch,
};
pub use store::SwapFormStore;
