//! Wi-Fi localisation adapter.
//!
//! Maps an access point identity — an (SSID, MAC) pair — to a geodetic
//! landmark. The adapter composes a [`GeodeticResolver`] with a binding map;
//! it performs no scanning itself. An external collaborator supplies the
//! SSID and MAC strings.
//!
//! Matching is exact: one binding per canonical (SSID, MAC) pair,
//! last-write-wins on re-registration, no partial SSID matching and no
//! signal-strength weighting. Several access points may share one physical
//! location, so many bindings may reference the same landmark.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use log::debug;
use thiserror::Error;

use crate::landmark::{GeodeticLandmark, Landmark, LandmarkError};
use crate::resolver::GeodeticResolver;
use crate::store::{LandmarkStore, StoreError};

/// Prefix of landmark identifiers minted by the Wi-Fi adapter.
const WIFI_IDENTIFIER_PREFIX: &str = "wifi:";

/// Errors raised by the Wi-Fi adapter.
#[derive(Debug, Error)]
pub enum WifiError {
    /// The MAC address string was not six hex octets.
    #[error("malformed MAC address {input:?}: expected six hex octets separated by ':' or '-'")]
    InvalidMac {
        /// The rejected input.
        input: String,
    },
    /// The (SSID, MAC) pair was never registered.
    #[error("no landmark bound to SSID {ssid:?} at MAC {mac}")]
    UnknownAccessPoint {
        /// SSID of the unregistered access point.
        ssid: String,
        /// Canonical MAC of the unregistered access point.
        mac: MacAddress,
    },
    /// Landmark construction failed validation.
    #[error(transparent)]
    Landmark(#[from] LandmarkError),
    /// The underlying store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A 48-bit IEEE 802 MAC address in canonical form.
///
/// Parsing accepts colon- or dash-separated hex octets and is
/// case-insensitive; display is lowercase and colon-separated, so two
/// spellings of the same address always compare equal.
///
/// # Examples
/// ```
/// use waymark_core::MacAddress;
///
/// let colons: MacAddress = "00:11:22:33:44:55".parse()?;
/// let dashes: MacAddress = "00-11-22-33-44-55".parse()?;
/// assert_eq!(colons, dashes);
/// assert_eq!(colons.to_string(), "00:11:22:33:44:55");
/// # Ok::<(), waymark_core::WifiError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The six octets of the address.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl FromStr for MacAddress {
    type Err = WifiError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || WifiError::InvalidMac {
            input: input.to_owned(),
        };
        let separator = if input.contains(':') { ':' } else { '-' };
        let mut octets = [0_u8; 6];
        let mut parts = input.split(separator);
        for octet in &mut octets {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Canonical identity of a Wi-Fi access point.
///
/// SSIDs compare byte-exact; the MAC is canonical, so case and separator
/// differences in the input never produce distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessPoint {
    /// Network name as broadcast by the access point.
    pub ssid: String,
    /// Hardware address of the access point.
    pub mac: MacAddress,
}

impl AccessPoint {
    /// The composite landmark identifier minted for this access point.
    ///
    /// The canonical MAC comes first and contains no `/`, so the mapping is
    /// unambiguous and invertible even for SSIDs containing `/`.
    #[must_use]
    pub fn landmark_identifier(&self) -> String {
        format!("{WIFI_IDENTIFIER_PREFIX}{mac}/{ssid}", mac = self.mac, ssid = self.ssid)
    }

    /// Recover the access point from a composite landmark identifier, or
    /// `None` when the identifier was not minted by the Wi-Fi adapter.
    #[must_use]
    pub fn from_landmark_identifier(identifier: &str) -> Option<Self> {
        let rest = identifier.strip_prefix(WIFI_IDENTIFIER_PREFIX)?;
        let (mac_part, ssid) = rest.split_once('/')?;
        let mac = mac_part.parse().ok()?;
        Some(Self {
            ssid: ssid.to_owned(),
            mac,
        })
    }
}

/// Resolves (SSID, MAC) pairs to geodetic landmarks.
///
/// # Examples
/// ```
/// use waymark_core::{LandmarkStore, WifiLocaliser};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = LandmarkStore::new();
/// let mut localiser = WifiLocaliser::new(&mut store);
/// localiser.add_wifi_data("HomeNetwork", "00:11:22:33:44:55", 47.6097, -122.3331, 30.0)?;
///
/// let landmark = localiser.localise_wifi("HomeNetwork", "00-11-22-33-44-55")?;
/// assert_eq!(landmark.latitude_deg(), 47.6097);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct WifiLocaliser<'s> {
    resolver: GeodeticResolver<'s>,
    bindings: HashMap<AccessPoint, String>,
}

impl<'s> WifiLocaliser<'s> {
    /// Wrap a geodetic store in a Wi-Fi localiser.
    ///
    /// Landmarks already in the store whose identifiers were minted by the
    /// adapter are rebound immediately, so a localiser over a previously
    /// populated store resolves without an explicit load.
    pub fn new(store: &'s mut LandmarkStore<GeodeticLandmark>) -> Self {
        let resolver = GeodeticResolver::new(store);
        let bindings = bindings_from(resolver.store());
        Self { resolver, bindings }
    }

    /// Register the position of an access point.
    ///
    /// The MAC is normalized to canonical form, a geodetic landmark is
    /// created (or replaced) under the composite identifier, and the
    /// binding is recorded. Re-registering a pair is last-write-wins.
    ///
    /// # Errors
    /// Returns [`WifiError::InvalidMac`] for malformed MAC syntax and
    /// propagates [`LandmarkError`] from coordinate validation unchanged.
    pub fn add_wifi_data(
        &mut self,
        ssid: &str,
        mac: &str,
        latitude_deg: f64,
        longitude_deg: f64,
        altitude_m: f64,
    ) -> Result<(), WifiError> {
        let access_point = AccessPoint {
            ssid: ssid.to_owned(),
            mac: mac.parse()?,
        };
        let identifier = access_point.landmark_identifier();
        self.resolver
            .add_data(&identifier, latitude_deg, longitude_deg, altitude_m)?;
        if self.bindings.insert(access_point, identifier).is_some() {
            debug!("rebound access point {ssid:?} at {mac}");
        }
        Ok(())
    }

    /// Resolve an access point to its registered landmark.
    ///
    /// # Errors
    /// Returns [`WifiError::InvalidMac`] for malformed MAC syntax,
    /// [`WifiError::UnknownAccessPoint`] when the pair was never
    /// registered, and the store's not-found error when the binding's
    /// landmark has since been removed from the store.
    pub fn localise_wifi(&self, ssid: &str, mac: &str) -> Result<GeodeticLandmark, WifiError> {
        let access_point = AccessPoint {
            ssid: ssid.to_owned(),
            mac: mac.parse()?,
        };
        let identifier =
            self.bindings
                .get(&access_point)
                .ok_or_else(|| WifiError::UnknownAccessPoint {
                    ssid: access_point.ssid.clone(),
                    mac: access_point.mac,
                })?;
        Ok(self.resolver.get_data(identifier)?)
    }

    /// Persist the underlying store to `path`.
    ///
    /// Bindings are not written separately: the composite identifiers are
    /// invertible, so [`WifiLocaliser::load`] can rebuild them.
    ///
    /// # Errors
    /// Propagates the store's encode and write errors.
    pub fn save(&self, path: &Utf8Path) -> Result<(), StoreError> {
        self.resolver.save(path)
    }

    /// Replace the underlying store with the contents of `path` and rebuild
    /// the binding map from the composite identifiers, returning how many
    /// landmarks were loaded.
    ///
    /// Records whose identifiers were not minted by the Wi-Fi adapter stay
    /// in the store but remain unbound; they are reachable by identifier
    /// through a plain resolver.
    ///
    /// # Errors
    /// Propagates the store's read, parse, and validation errors; on any
    /// failure both the store and the bindings are left unchanged.
    pub fn load(&mut self, path: &Utf8Path) -> Result<usize, StoreError> {
        let count = self.resolver.load(path)?;
        self.bindings = bindings_from(self.resolver.store());
        Ok(count)
    }

    /// Number of registered access point bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether any access point bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Derive the binding map from the store's adapter-minted identifiers.
fn bindings_from(store: &LandmarkStore<GeodeticLandmark>) -> HashMap<AccessPoint, String> {
    store
        .list()
        .iter()
        .filter_map(|landmark| {
            AccessPoint::from_landmark_identifier(landmark.identifier())
                .map(|access_point| (access_point, landmark.identifier().to_owned()))
        })
        .collect()
}
