//! Amber Cart
//!
//! Amber Cart is the shopping cart engine behind the Amber storefront: member-aware
//! pricing, configuration-level line merging and write-through persistence.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod fixtures;
pub mod members;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod storage;
