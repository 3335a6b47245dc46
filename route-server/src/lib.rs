//! Inter-city route server.
//!
//! A web application that answers: "What is the shortest way by road
//! between these two cities, and how long will the drive take?"

pub mod cache;
pub mod cities;
pub mod config;
pub mod domain;
pub mod graph;
pub mod routing;
pub mod web;
