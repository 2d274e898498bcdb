//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod orders;
pub mod product;
pub mod report;
