//! Database models

pub mod order;

pub use order::OrderRecord;
