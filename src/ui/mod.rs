//! Terminal output components.
//!
//! A small status layer: colored status lines via `console`, spinners via
//! `indicatif`, and output modes to suppress both for quiet/CI runs.

pub mod output;
pub mod spinner;

pub use output::{Output, OutputMode};
pub use spinner::ProgressSpinner;
