//! Work-order lifecycle and cost computation for the preservation platform,
//! following the hexagonal architecture pattern

pub mod domain;
pub mod outbound;
