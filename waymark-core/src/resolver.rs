//! Localisation resolvers: thin façades answering "where is landmark X".
//!
//! A [`Resolver`] borrows a [`LandmarkStore`] for its lifetime and exposes
//! the store's contract under the localisation vocabulary. Resolution is an
//! exact, deterministic key lookup — the engine localises by association,
//! not by geometric computation, so there is no distance metric, no
//! interpolation, and no partial matching.

use camino::Utf8Path;

use crate::landmark::{CartesianLandmark, GeodeticLandmark, Landmark, LandmarkError};
use crate::store::{LandmarkStore, StoreError};

/// Resolver over a store of geodetic landmarks.
pub type GeodeticResolver<'s> = Resolver<'s, GeodeticLandmark>;

/// Resolver over a store of Cartesian landmarks.
pub type CartesianResolver<'s> = Resolver<'s, CartesianLandmark>;

/// Façade translating landmark identifiers into stored positions.
///
/// The resolver holds a mutable borrow of the store rather than owning it;
/// callers that need direct store access in between scope the resolver.
///
/// # Examples
/// ```
/// use waymark_core::{GeodeticResolver, LandmarkStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = LandmarkStore::new();
/// let mut resolver = GeodeticResolver::new(&mut store);
/// resolver.add_data("library", 52.2053, 0.1218, 6.0)?;
/// assert_eq!(resolver.get_data("library")?.latitude_deg(), 52.2053);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Resolver<'s, T: Landmark> {
    store: &'s mut LandmarkStore<T>,
}

impl<'s, T: Landmark> Resolver<'s, T> {
    /// Wrap a store in a resolver.
    pub fn new(store: &'s mut LandmarkStore<T>) -> Self {
        Self { store }
    }

    /// Resolve an identifier to its stored landmark.
    ///
    /// # Errors
    /// Propagates [`StoreError::NotFound`] when the identifier is absent.
    pub fn get_data(&self, identifier: &str) -> Result<T, StoreError> {
        self.store.get(identifier).cloned()
    }

    /// Persist the underlying store to `path`.
    ///
    /// # Errors
    /// Propagates the store's encode and write errors.
    pub fn save(&self, path: &Utf8Path) -> Result<(), StoreError> {
        self.store.save(path)
    }

    /// Replace the underlying store with the contents of `path`, returning
    /// how many landmarks were loaded.
    ///
    /// # Errors
    /// Propagates the store's read, parse, and validation errors; on any
    /// failure the store is left unchanged.
    pub fn load(&mut self, path: &Utf8Path) -> Result<usize, StoreError> {
        self.store.load(path)
    }

    /// Read-only view of the underlying store.
    #[must_use]
    pub fn store(&self) -> &LandmarkStore<T> {
        self.store
    }

    /// Number of landmarks in the underlying store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the underlying store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Resolver<'_, GeodeticLandmark> {
    /// Validate and insert a geodetic landmark.
    ///
    /// An existing landmark under the same identifier is replaced wholesale.
    ///
    /// # Errors
    /// Propagates [`LandmarkError`] from entity validation unchanged.
    pub fn add_data(
        &mut self,
        identifier: &str,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<(), LandmarkError> {
        let landmark = GeodeticLandmark::new(identifier, latitude_deg, longitude_deg, altitude_m)?;
        self.store.add(landmark);
        Ok(())
    }
}

impl Resolver<'_, CartesianLandmark> {
    /// Validate and insert a Cartesian landmark.
    ///
    /// An existing landmark under the same identifier is replaced wholesale.
    ///
    /// # Errors
    /// Propagates [`LandmarkError`] from entity validation unchanged.
    pub fn add_data(
        &mut self,
        identifier: &str,
        x_m: f64,
        y_m: f64,
        z_m: f64,
    ) -> Result<(), LandmarkError> {
        let landmark = CartesianLandmark::new(identifier, x_m, y_m, z_m)?;
        self.store.add(landmark);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn add_then_get_returns_equal_record() {
        let mut store = LandmarkStore::new();
        let mut resolver = GeodeticResolver::new(&mut store);
        resolver
            .add_data("summit", 27.9881, 86.925, 8848.86)
            .expect("valid landmark");

        let record = resolver.get_data("summit").expect("record exists");
        assert_eq!(record.latitude_deg(), 27.9881);
        assert_eq!(record.longitude_deg(), 86.925);
        assert_eq!(record.altitude_m(), 8848.86);
    }

    #[rstest]
    #[case(91.0, 0.0)]
    #[case(0.0, 200.0)]
    fn add_data_propagates_validation_errors(#[case] latitude: f64, #[case] longitude: f64) {
        let mut store = LandmarkStore::new();
        let mut resolver = GeodeticResolver::new(&mut store);
        assert!(resolver.add_data("bad", latitude, longitude, 0.0).is_err());
        assert!(resolver.is_empty());
    }

    #[rstest]
    fn get_data_on_empty_store_is_not_found() {
        let mut store: LandmarkStore<GeodeticLandmark> = LandmarkStore::new();
        let resolver = GeodeticResolver::new(&mut store);
        assert!(matches!(
            resolver.get_data("missing"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[rstest]
    fn cartesian_add_then_get() {
        let mut store = LandmarkStore::new();
        let mut resolver = CartesianResolver::new(&mut store);
        resolver
            .add_data("charger", 4.2, -1.0, 0.5)
            .expect("valid landmark");

        let record = resolver.get_data("charger").expect("record exists");
        assert_eq!(record.x_m(), 4.2);
        assert_eq!(record.y_m(), -1.0);
        assert_eq!(record.z_m(), 0.5);
    }

    #[rstest]
    fn store_remains_usable_after_resolver_is_dropped() {
        let mut store = LandmarkStore::new();
        {
            let mut resolver = GeodeticResolver::new(&mut store);
            resolver
                .add_data("gate", 1.0, 2.0, 3.0)
                .expect("valid landmark");
        }
        assert!(store.contains("gate"));
    }
}
