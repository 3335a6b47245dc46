//! Route queries between cities.
//!
//! Validates a query, finds the shortest path on the current graph and
//! turns the distance into a driving-time estimate. [`RouteService`] owns
//! the graph and swaps in a rebuilt one when the dataset is refreshed.

mod error;
mod planner;
mod query;
mod service;

pub use error::RouteError;
pub use planner::RouteResult;
pub use query::RouteQuery;
pub use service::{GraphSnapshot, RouteService};
