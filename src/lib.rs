//! Hospital inventory and demand dashboard over synthetic data.
//!
//! The `data` layer is UI-free: it generates seeded sample tables, filters
//! them against a threshold, aggregates demand and shapes chart series. The
//! `ward-stock` binary wires it to an egui window.

pub mod config;
pub mod data;
