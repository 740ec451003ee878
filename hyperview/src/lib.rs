//! Hyperview API samples.
//!
//! This crate serves as a facade over `hyperview-core` and `hyperview-flow` and
//! adds the pieces that turn the raw calls into a report: the console
//! [`report`], the CSV [`export`] and the [`workflow`] that runs them in order.

#![warn(missing_docs)]

pub use hyperview_core as core;
pub use hyperview_flow as flow;

pub use hyperview_core::{
    AccessToken, Asset, AssetPage, AssetSensor, BusinessEntityPage, Credentials, HyperviewError,
    Result, Sensor,
};
pub use hyperview_flow::ApiClient;

/// CSV input and output for the sensor export.
pub mod export;
/// Console formatting.
pub mod report;
/// The authenticate, list and fan-out sequence.
pub mod workflow;

pub use workflow::{
    authenticate, get_sensors, list_assets, list_business_entities, run, run_business_entities,
    run_export,
};
