//! The domain layer: pure models and logic plus the ports the outbound
//! adapters implement

pub mod catalog;
pub mod lifecycle;
pub mod models;
pub mod numbering;
pub mod ports;
pub mod pricing;
pub mod services;
