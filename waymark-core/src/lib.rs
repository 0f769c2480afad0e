//! Core domain types for the Waymark localisation engine.
//!
//! Waymark manages a small set of named spatial landmarks and resolves a
//! lookup key — a landmark identifier, or a Wi-Fi SSID+MAC pair — to an
//! approximate real-world position. Resolution is an exact key lookup by
//! design: the engine localises by association, never by estimation.
//!
//! The pieces, leaf to root:
//! - [`GeodeticLandmark`] / [`CartesianLandmark`] — validated, immutable
//!   entities unified by the [`Landmark`] trait;
//! - [`LandmarkStore`] — keyed ownership container with JSON persistence;
//! - [`Resolver`] — façade answering "where is landmark X";
//! - [`WifiLocaliser`] — adapter binding access point identities to
//!   geodetic landmarks.
//!
//! # Examples
//! ```
//! use waymark_core::{GeodeticResolver, LandmarkStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = LandmarkStore::new();
//! let mut resolver = GeodeticResolver::new(&mut store);
//! resolver.add_data("obelisk", 48.8584, 2.2945, 33.0)?;
//! assert_eq!(resolver.get_data("obelisk")?.altitude_m(), 33.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod landmark;
pub mod resolver;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod wifi;

pub use landmark::{
    CartesianLandmark, CartesianRecord, GeodeticLandmark, GeodeticRecord, Landmark, LandmarkError,
};
pub use resolver::{CartesianResolver, GeodeticResolver, Resolver};
pub use store::{LandmarkStore, StoreError};
pub use wifi::{AccessPoint, MacAddress, WifiError, WifiLocaliser};
