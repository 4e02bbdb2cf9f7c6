//! Core business logic modules

pub mod dutching;

// Re-export commonly used types
pub use dutching::{dutch_banker_quinella, resolve_pair, DutchBet, DutchingAllocation};
