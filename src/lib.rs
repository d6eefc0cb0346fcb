//! Command-line air quality advisor.
//!
//! Supplies readings and a stored health profile to the [`aqi`] engine and
//! renders the results.

pub mod alerts;
pub mod chat;
pub mod config;
pub mod forecast;
pub mod report;
pub mod sensors;
