//! Domain types for the route server.
//!
//! This module contains the validated values that flow through the
//! routing core. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod city;
mod speed;
mod travel_time;

pub use city::{City, InvalidCity};
pub use speed::{AvgSpeed, InvalidSpeed};
pub use travel_time::TravelTime;
