//! Test-only landmark fixtures shared by unit and behaviour tests.

use crate::{CartesianLandmark, GeodeticLandmark};

/// Build a geodetic landmark from known-valid fields.
#[expect(clippy::expect_used, reason = "fixtures take known-valid inputs")]
#[must_use]
pub fn geodetic(
    identifier: &str,
    latitude_deg: f64,
    longitude_deg: f64,
    altitude_m: f64,
) -> GeodeticLandmark {
    GeodeticLandmark::new(identifier, latitude_deg, longitude_deg, altitude_m)
        .expect("valid geodetic landmark")
}

/// Build a Cartesian landmark from known-valid fields.
#[expect(clippy::expect_used, reason = "fixtures take known-valid inputs")]
#[must_use]
pub fn cartesian(identifier: &str, x_m: f64, y_m: f64, z_m: f64) -> CartesianLandmark {
    CartesianLandmark::new(identifier, x_m, y_m, z_m).expect("valid cartesian landmark")
}
