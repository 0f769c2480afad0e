//! Behaviour tests for the Wi-Fi localisation adapter.

use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;

use waymark_core::{LandmarkStore, StoreError, WifiError, WifiLocaliser};

const HOME_MAC: &str = "00:11:22:33:44:55";

#[rstest]
fn registered_pair_resolves_to_exact_coordinates() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("HomeNetwork", HOME_MAC, 47.6097, -122.3331, 30.0)
        .expect("register access point");

    let landmark = localiser
        .localise_wifi("HomeNetwork", HOME_MAC)
        .expect("pair is registered");

    assert_eq!(landmark.latitude_deg(), 47.6097);
    assert_eq!(landmark.longitude_deg(), -122.3331);
    assert_eq!(landmark.altitude_m(), 30.0);
}

#[rstest]
fn unregistered_mac_is_not_found() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("HomeNetwork", HOME_MAC, 47.6097, -122.3331, 30.0)
        .expect("register access point");

    let result = localiser.localise_wifi("HomeNetwork", "AA:BB:CC:DD:EE:FF");

    assert!(matches!(result, Err(WifiError::UnknownAccessPoint { .. })));
}

#[rstest]
fn unregistered_ssid_is_not_found() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("HomeNetwork", HOME_MAC, 47.6097, -122.3331, 30.0)
        .expect("register access point");

    let result = localiser.localise_wifi("OtherNetwork", HOME_MAC);

    assert!(matches!(result, Err(WifiError::UnknownAccessPoint { .. })));
}

#[rstest]
#[case("00:11:22:33:44:55", "00-11-22-33-44-55")]
#[case("aa:bb:cc:dd:ee:ff", "AA:BB:CC:DD:EE:FF")]
#[case("Aa-Bb-Cc-Dd-Ee-Ff", "aa:bb:cc:dd:ee:ff")]
fn mac_spellings_resolve_to_the_same_binding(#[case] registered: &str, #[case] queried: &str) {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("Lab", registered, 10.0, 20.0, 30.0)
        .expect("register access point");

    let landmark = localiser
        .localise_wifi("Lab", queried)
        .expect("spellings are equivalent");

    assert_eq!(landmark.latitude_deg(), 10.0);
    assert_eq!(localiser.len(), 1);
}

#[rstest]
fn five_octet_mac_is_a_validation_error() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);

    let result = localiser.add_wifi_data("Lab", "00:11:22:33:44", 0.0, 0.0, 0.0);

    assert!(matches!(result, Err(WifiError::InvalidMac { .. })));
    assert!(localiser.is_empty());
}

#[rstest]
fn invalid_coordinates_propagate_validation_error() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);

    let result = localiser.add_wifi_data("Lab", HOME_MAC, 91.0, 0.0, 0.0);

    assert!(matches!(result, Err(WifiError::Landmark(_))));
}

#[rstest]
fn re_registration_is_last_write_wins() {
    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("Lab", HOME_MAC, 1.0, 2.0, 3.0)
        .expect("register access point");
    localiser
        .add_wifi_data("Lab", HOME_MAC, 4.0, 5.0, 6.0)
        .expect("re-register access point");

    let landmark = localiser.localise_wifi("Lab", HOME_MAC).expect("bound");
    assert_eq!(landmark.latitude_deg(), 4.0);
    assert_eq!(localiser.len(), 1);
}

#[rstest]
fn fresh_localiser_rebinds_existing_landmarks() {
    let mut store = LandmarkStore::new();
    {
        let mut localiser = WifiLocaliser::new(&mut store);
        localiser
            .add_wifi_data("Lab", HOME_MAC, 1.0, 2.0, 3.0)
            .expect("register access point");
    }

    let localiser = WifiLocaliser::new(&mut store);

    assert_eq!(localiser.len(), 1);
    let landmark = localiser
        .localise_wifi("Lab", HOME_MAC)
        .expect("binding derived from store contents");
    assert_eq!(landmark.altitude_m(), 3.0);
}

#[rstest]
fn removed_landmark_no_longer_resolves() {
    let mut store = LandmarkStore::new();
    {
        let mut localiser = WifiLocaliser::new(&mut store);
        localiser
            .add_wifi_data("Lab", HOME_MAC, 1.0, 2.0, 3.0)
            .expect("register access point");
    }

    // Remove the backing landmark out from under the adapter.
    let identifiers: Vec<String> = store
        .list()
        .iter()
        .map(|landmark| waymark_core::Landmark::identifier(landmark).to_owned())
        .collect();
    for identifier in &identifiers {
        assert!(store.remove(identifier));
    }

    let localiser = WifiLocaliser::new(&mut store);
    let result = localiser.localise_wifi("Lab", HOME_MAC);
    assert!(matches!(result, Err(WifiError::UnknownAccessPoint { .. })));
}

#[rstest]
fn save_then_load_rebuilds_bindings() {
    let dir = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("wifi.json")).expect("UTF-8 path");

    let mut store = LandmarkStore::new();
    {
        let mut localiser = WifiLocaliser::new(&mut store);
        localiser
            .add_wifi_data("HomeNetwork", HOME_MAC, 47.6097, -122.3331, 30.0)
            .expect("register access point");
        localiser
            .add_wifi_data("Workshop", "aa:bb:cc:dd:ee:ff", -33.8568, 151.2153, 5.0)
            .expect("register access point");
        localiser.save(&path).expect("save localiser");
    }

    let mut fresh_store = LandmarkStore::new();
    let mut restored = WifiLocaliser::new(&mut fresh_store);
    let count = restored.load(&path).expect("load localiser");

    assert_eq!(count, 2);
    assert_eq!(restored.len(), 2);
    let landmark = restored
        .localise_wifi("Workshop", "AA-BB-CC-DD-EE-FF")
        .expect("binding rebuilt from identifier");
    assert_eq!(landmark.longitude_deg(), 151.2153);
}

#[rstest]
fn load_skips_bindings_for_foreign_identifiers() {
    let dir = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("mixed.json")).expect("UTF-8 path");

    let mut store = LandmarkStore::new();
    {
        let mut resolver = waymark_core::GeodeticResolver::new(&mut store);
        resolver
            .add_data("plain-site", 1.0, 2.0, 3.0)
            .expect("valid landmark");
        resolver.save(&path).expect("save store");
    }

    let mut fresh_store = LandmarkStore::new();
    {
        let mut localiser = WifiLocaliser::new(&mut fresh_store);
        let count = localiser.load(&path).expect("load localiser");

        assert_eq!(count, 1);
        assert!(localiser.is_empty());
    }
    assert!(fresh_store.contains("plain-site"));
}

#[rstest]
fn failed_load_keeps_existing_bindings() {
    let dir = TempDir::new().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("broken.json")).expect("UTF-8 path");
    std::fs::write(&path, "not json").expect("write file");

    let mut store = LandmarkStore::new();
    let mut localiser = WifiLocaliser::new(&mut store);
    localiser
        .add_wifi_data("HomeNetwork", HOME_MAC, 47.6097, -122.3331, 30.0)
        .expect("register access point");

    let result = localiser.load(&path);

    assert!(matches!(result, Err(StoreError::Parse { .. })));
    assert_eq!(localiser.len(), 1);
    assert!(localiser.localise_wifi("HomeNetwork", HOME_MAC).is_ok());
}
