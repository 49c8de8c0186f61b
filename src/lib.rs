//! Trolley
//!
//! Trolley is a shopping cart library with a pluggable discount code catalog and injectable cart instrumentation.

pub mod carts;
pub mod catalog;
pub mod discounts;
pub mod fixtures;
pub mod instrumentation;
pub mod products;
pub mod uuids;
