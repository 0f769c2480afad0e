//! Validated landmark entities.
//!
//! Two variants exist: [`GeodeticLandmark`] for Earth-surface positions and
//! [`CartesianLandmark`] for positions in an arbitrary local frame. Both are
//! immutable value objects: the fallible constructor is the only way to
//! obtain one, and an update replaces the stored record wholesale rather
//! than mutating fields in place. The [`Landmark`] trait is the capability
//! set the store and resolvers are generic over.

use geo::Coord;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors returned when landmark construction fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    /// The identifier was empty.
    #[error("landmark identifier must not be empty")]
    EmptyIdentifier,
    /// Latitude fell outside the valid range.
    #[error("latitude {value} is outside the valid range [-90, 90]")]
    LatitudeOutOfRange {
        /// The rejected latitude in degrees.
        value: f64,
    },
    /// Longitude fell outside the valid range.
    #[error("longitude {value} is outside the valid range [-180, 180]")]
    LongitudeOutOfRange {
        /// The rejected longitude in degrees.
        value: f64,
    },
    /// A numeric field was NaN or infinite.
    ///
    /// Non-finite values have no JSON representation, so accepting them
    /// would break the exactness of the save/load round trip.
    #[error("{field} must be finite, got {value}")]
    NonFiniteField {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Capability set shared by the landmark variants.
///
/// A landmark exposes its identifier and converts to and from a flat wire
/// record. Reconstruction re-runs full validation, so a record loaded from
/// disk meets the same invariants as one built in memory.
pub trait Landmark: Clone {
    /// Flat record persisted for this variant.
    type Record: Serialize + DeserializeOwned;

    /// Unique identifier of this landmark within a store.
    fn identifier(&self) -> &str;

    /// Convert to the persisted record shape. The identifier is carried
    /// separately as the enclosing map key.
    fn to_record(&self) -> Self::Record;

    /// Validate and reconstruct a landmark from a persisted record.
    ///
    /// # Errors
    /// Returns [`LandmarkError`] when the identifier or any field fails
    /// validation.
    fn from_record(identifier: String, record: Self::Record) -> Result<Self, LandmarkError>;
}

/// A position expressed in WGS84 latitude/longitude/altitude.
///
/// The horizontal position follows the workspace convention of
/// `x = longitude` and `y = latitude`, both in degrees; altitude is metres
/// above the reference ellipsoid.
///
/// # Examples
/// ```
/// use waymark_core::GeodeticLandmark;
///
/// # fn main() -> Result<(), waymark_core::LandmarkError> {
/// let landmark = GeodeticLandmark::new("pier-head", 53.4034, -2.9953, 8.0)?;
/// assert_eq!(landmark.latitude_deg(), 53.4034);
/// assert_eq!(landmark.longitude_deg(), -2.9953);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeodeticLandmark {
    identifier: String,
    location: Coord<f64>,
    altitude_m: f64,
}

/// Persisted record shape for [`GeodeticLandmark`].
///
/// Unknown fields are rejected so that a file written for one variant
/// cannot be silently loaded as another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeodeticRecord {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude_deg: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude_deg: f64,
    /// Altitude in metres.
    pub altitude_m: f64,
}

impl GeodeticLandmark {
    /// Validates and constructs a [`GeodeticLandmark`].
    ///
    /// # Errors
    /// Returns [`LandmarkError`] when the identifier is empty, latitude is
    /// outside `[-90, 90]`, longitude is outside `[-180, 180]`, or altitude
    /// is not finite. NaN coordinates fail the range checks.
    pub fn new(
        identifier: impl Into<String>,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<Self, LandmarkError> {
        let identifier = non_empty_identifier(identifier.into())?;
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(LandmarkError::LatitudeOutOfRange {
                value: latitude_deg,
            });
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(LandmarkError::LongitudeOutOfRange {
                value: longitude_deg,
            });
        }
        if !altitude_m.is_finite() {
            return Err(LandmarkError::NonFiniteField {
                field: "altitude_m",
                value: altitude_m,
            });
        }
        Ok(Self {
            identifier,
            location: Coord {
                x: longitude_deg,
                y: latitude_deg,
            },
            altitude_m,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude_deg(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude_deg(&self) -> f64 {
        self.location.x
    }

    /// Altitude in metres.
    #[must_use]
    pub const fn altitude_m(&self) -> f64 {
        self.altitude_m
    }

    /// Horizontal position with `x = longitude` and `y = latitude`.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }
}

impl Landmark for GeodeticLandmark {
    type Record = GeodeticRecord;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn to_record(&self) -> GeodeticRecord {
        GeodeticRecord {
            latitude_deg: self.location.y,
            longitude_deg: self.location.x,
            altitude_m: self.altitude_m,
        }
    }

    fn from_record(identifier: String, record: GeodeticRecord) -> Result<Self, LandmarkError> {
        Self::new(
            identifier,
            record.latitude_deg,
            record.longitude_deg,
            record.altitude_m,
        )
    }
}

/// A position expressed as linear x/y/z offsets from an arbitrary origin,
/// in metres.
///
/// # Examples
/// ```
/// use waymark_core::CartesianLandmark;
///
/// # fn main() -> Result<(), waymark_core::LandmarkError> {
/// let landmark = CartesianLandmark::new("dock-3", 12.5, -4.0, 0.0)?;
/// assert_eq!(landmark.x_m(), 12.5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CartesianLandmark {
    identifier: String,
    x_m: f64,
    y_m: f64,
    z_m: f64,
}

/// Persisted record shape for [`CartesianLandmark`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartesianRecord {
    /// Offset along the x axis in metres.
    pub x_m: f64,
    /// Offset along the y axis in metres.
    pub y_m: f64,
    /// Offset along the z axis in metres.
    pub z_m: f64,
}

impl CartesianLandmark {
    /// Validates and constructs a [`CartesianLandmark`].
    ///
    /// # Errors
    /// Returns [`LandmarkError`] when the identifier is empty or any offset
    /// is not finite.
    pub fn new(
        identifier: impl Into<String>,
        x_m: f64,
        y_m: f64,
        z_m: f64,
    ) -> Result<Self, LandmarkError> {
        let identifier = non_empty_identifier(identifier.into())?;
        for (field, value) in [("x_m", x_m), ("y_m", y_m), ("z_m", z_m)] {
            if !value.is_finite() {
                return Err(LandmarkError::NonFiniteField { field, value });
            }
        }
        Ok(Self {
            identifier,
            x_m,
            y_m,
            z_m,
        })
    }

    /// Offset along the x axis in metres.
    #[must_use]
    pub const fn x_m(&self) -> f64 {
        self.x_m
    }

    /// Offset along the y axis in metres.
    #[must_use]
    pub const fn y_m(&self) -> f64 {
        self.y_m
    }

    /// Offset along the z axis in metres.
    #[must_use]
    pub const fn z_m(&self) -> f64 {
        self.z_m
    }
}

impl Landmark for CartesianLandmark {
    type Record = CartesianRecord;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn to_record(&self) -> CartesianRecord {
        CartesianRecord {
            x_m: self.x_m,
            y_m: self.y_m,
            z_m: self.z_m,
        }
    }

    fn from_record(identifier: String, record: CartesianRecord) -> Result<Self, LandmarkError> {
        Self::new(identifier, record.x_m, record.y_m, record.z_m)
    }
}

fn non_empty_identifier(identifier: String) -> Result<String, LandmarkError> {
    if identifier.is_empty() {
        return Err(LandmarkError::EmptyIdentifier);
    }
    Ok(identifier)
}
