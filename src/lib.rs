//! Donor/surgery progress aggregation.
//!
//! The pure core lives in [`window`], [`aggregate`], [`tally`], [`report`] and
//! [`summary`]; everything else loads snapshots and renders views for the CLI.

pub mod aggregate;
pub mod cli;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod params;
pub mod processor;
pub mod render;
pub mod report;
pub mod snapshot;
pub mod summary;
pub mod tally;
pub mod util;
pub mod window;
