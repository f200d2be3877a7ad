//! Explore — finding study partners.

pub mod demo;
pub mod directory;
pub mod filter;
pub mod routes;

pub use directory::{ContactReceipt, StudentDirectory};
pub use filter::{FilterField, FilterOptions, FilterSelection, filter_profiles};
pub use routes::{ExploreRouteState, explore_routes};
