//! `dispatch-selection` – the robot selection policy.
//!
//! Everything here is synchronous and pure: inputs are borrowed, outputs are
//! freshly allocated, and nothing reaches the network.
//!
//! # Modules
//!
//! - [`enrich`] – [`distance`][enrich::distance] and
//!   [`enrich`][enrich::enrich]: attach each robot's Euclidean distance to the
//!   target point.
//! - [`policy`] – [`select`][policy::select]: gate robots by distance, then
//!   pick the highest battery among the survivors.  The building blocks
//!   ([`filter_by_distance`][policy::filter_by_distance],
//!   [`sort_by_distance`][policy::sort_by_distance],
//!   [`sort_by_battery`][policy::sort_by_battery]) are public as well.

pub mod enrich;
pub mod policy;

pub use enrich::{distance, enrich};
pub use policy::{filter_by_distance, select, sort_by_battery, sort_by_distance};
