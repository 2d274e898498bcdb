//! Core types for Albarka Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod rating;
pub mod theme;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use rating::{Rating, RatingError};
pub use theme::Theme;
