//! Keyed ownership container for landmark records with JSON persistence.
//!
//! A [`LandmarkStore`] maps identifiers to records of one landmark variant.
//! Adding a record under an existing identifier silently replaces the old
//! record — last-write-wins is a deliberate design choice, not a missing
//! error path. The store is the exclusive owner of its records; resolvers
//! borrow it.
//!
//! Persistence writes one UTF-8 JSON document per store: a top-level object
//! whose keys are identifiers in insertion order and whose values are the
//! variant's flat records.
//!
//! The store is not safe for concurrent mutation from multiple threads or
//! processes. Callers that need multi-writer access must serialize it
//! themselves, e.g. with a lock around the store instance.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;

use crate::landmark::{Landmark, LandmarkError};

/// Errors raised by store lookups and persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists under the requested identifier.
    #[error("no landmark stored under identifier {identifier:?}")]
    NotFound {
        /// The identifier that was looked up.
        identifier: String,
    },
    /// The landmark file could not be read.
    #[error("failed to read landmark file {path}: {source}")]
    Read {
        /// Location of the landmark file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The landmark file could not be written.
    #[error("failed to write landmark file {path}: {source}")]
    Write {
        /// Location of the landmark file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The store contents could not be encoded as JSON.
    #[error("failed to encode landmark file {path}: {source}")]
    Encode {
        /// Location of the landmark file.
        path: Utf8PathBuf,
        /// Encoder failure from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The file was not valid JSON or a record had the wrong shape.
    #[error("failed to parse landmark file {path}: {source}")]
    Parse {
        /// Location of the landmark file.
        path: Utf8PathBuf,
        /// Decoder failure from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The file parsed as JSON but the top level was not an object.
    #[error("landmark file {path} must contain a top-level JSON object")]
    NotAnObject {
        /// Location of the landmark file.
        path: Utf8PathBuf,
    },
    /// A record parsed but failed entity validation.
    #[error("landmark {identifier:?} in {path} failed validation: {source}")]
    InvalidRecord {
        /// Location of the landmark file.
        path: Utf8PathBuf,
        /// Identifier of the offending record.
        identifier: String,
        /// The validation failure.
        #[source]
        source: LandmarkError,
    },
}

/// Ownership container mapping identifiers to landmark records.
///
/// Lookup is O(1) expected time; insertion order is tracked separately and
/// only affects [`LandmarkStore::list`] and the key order of the persisted
/// JSON document. A record that is overwritten keeps its original position.
///
/// # Examples
/// ```
/// use waymark_core::{GeodeticLandmark, Landmark, LandmarkStore};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = LandmarkStore::new();
/// store.add(GeodeticLandmark::new("mast", 51.5007, -0.1246, 96.0)?);
/// assert_eq!(store.get("mast")?.identifier(), "mast");
/// assert!(store.remove("mast"));
/// assert!(store.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LandmarkStore<T> {
    records: HashMap<String, T>,
    order: Vec<String>,
}

impl<T: Landmark> LandmarkStore<T> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert a record, silently replacing any record with the same
    /// identifier.
    pub fn add(&mut self, record: T) {
        let identifier = record.identifier().to_owned();
        if self.records.insert(identifier.clone(), record).is_some() {
            debug!("replaced landmark {identifier}");
        } else {
            self.order.push(identifier);
        }
    }

    /// Look up a record by identifier.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when no record exists under
    /// `identifier`.
    pub fn get(&self, identifier: &str) -> Result<&T, StoreError> {
        self.records.get(identifier).ok_or_else(|| StoreError::NotFound {
            identifier: identifier.to_owned(),
        })
    }

    /// Remove the record under `identifier`, reporting whether one existed.
    pub fn remove(&mut self, identifier: &str) -> bool {
        if self.records.remove(identifier).is_some() {
            self.order.retain(|existing| existing != identifier);
            true
        } else {
            false
        }
    }

    /// Whether a record exists under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.records.contains_key(identifier)
    }

    /// Snapshot of all records in insertion order.
    ///
    /// The returned vector is independent of the store; mutating the store
    /// afterwards does not affect it.
    #[must_use]
    pub fn list(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|identifier| self.records.get(identifier))
            .cloned()
            .collect()
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize all records to a JSON document at `path`.
    ///
    /// Missing parent directories are created. The document is written to a
    /// sibling temporary file and renamed into place, so a failed save never
    /// leaves a partial file at `path`.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] when serialization fails and
    /// [`StoreError::Write`] when the file cannot be created or written.
    pub fn save(&self, path: &Utf8Path) -> Result<(), StoreError> {
        let mut document = serde_json::Map::with_capacity(self.records.len());
        for identifier in &self.order {
            let Some(record) = self.records.get(identifier) else {
                continue;
            };
            let value =
                serde_json::to_value(record.to_record()).map_err(|source| StoreError::Encode {
                    path: path.to_path_buf(),
                    source,
                })?;
            document.insert(identifier.clone(), value);
        }

        let mut contents = serde_json::to_vec_pretty(&serde_json::Value::Object(document))
            .map_err(|source| StoreError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        contents.push(b'\n');

        waymark_fs::ensure_parent_dir(path).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        waymark_fs::write_atomic(path, &contents).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("saved {count} landmarks to {path}", count = self.records.len());
        Ok(())
    }

    /// Replace the store contents with the records parsed from `path`,
    /// returning how many were loaded.
    ///
    /// Loading is atomic with respect to the store: every record is parsed
    /// and validated into fresh storage first, and on any failure the
    /// current contents remain unchanged.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] when the file cannot be read,
    /// [`StoreError::Parse`] or [`StoreError::NotAnObject`] when it is not a
    /// JSON object of records with the expected shape, and
    /// [`StoreError::InvalidRecord`] when a record fails entity validation.
    pub fn load(&mut self, path: &Utf8Path) -> Result<usize, StoreError> {
        let contents = waymark_fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document: serde_json::Value =
            serde_json::from_slice(&contents).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let serde_json::Value::Object(entries) = document else {
            return Err(StoreError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        let mut records = HashMap::with_capacity(entries.len());
        let mut order = Vec::with_capacity(entries.len());
        for (identifier, value) in entries {
            let record: T::Record =
                serde_json::from_value(value).map_err(|source| StoreError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            let landmark = T::from_record(identifier.clone(), record).map_err(|source| {
                StoreError::InvalidRecord {
                    path: path.to_path_buf(),
                    identifier: identifier.clone(),
                    source,
                }
            })?;
            if records.insert(identifier.clone(), landmark).is_none() {
                order.push(identifier);
            }
        }

        self.records = records;
        self.order = order;
        debug!("loaded {count} landmarks from {path}", count = self.records.len());
        Ok(self.records.len())
    }
}

impl<T: Landmark> Default for LandmarkStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
