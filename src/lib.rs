//! Core library for the swap-form project.
//!
//! Tracks what the user typed into a token-swap form, validates numeric
//! input, and turns route previews from an external pricing engine into a
//! chart-ready breakdown of the trade across pools.

pub mod composition;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod utils;
pub mod validation;
