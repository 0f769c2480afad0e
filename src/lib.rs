//! Facade crate for the Waymark localisation engine.
//!
//! This crate re-exports the core domain types so that consumers depend on
//! a single package: validated landmark entities, the keyed store with JSON
//! persistence, the localisation resolvers, and the Wi-Fi adapter.

#![forbid(unsafe_code)]

pub use waymark_core::{
    AccessPoint, CartesianLandmark, CartesianRecord, CartesianResolver, GeodeticLandmark,
    GeodeticRecord, GeodeticResolver, Landmark, LandmarkError, LandmarkStore, MacAddress,
    Resolver, StoreError, WifiError, WifiLocaliser,
};
