#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Tests for init parameter partitioning

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use repository_locator::{
    DEFAULT_ADAPTER_FACTORY, InitParameters, LocatorConfig, ParameterSource, default_location,
};
use repository_locator_sdk::{
    ADAPTER_FACTORY_CLASS_KEY, LOCATION_KEY, REPOSITORY_ATTRIBUTE_KEY, RESERVED_KEYS,
};

fn sample_parameters() -> Vec<InitParameters> {
    vec![
        InitParameters::new(),
        InitParameters::new().with("env.timeout", "30"),
        InitParameters::new()
            .with(LOCATION_KEY, "svc/Remote")
            .with("directory.provider.url", "tcp://localhost:1099"),
        InitParameters::new()
            .with(REPOSITORY_ATTRIBUTE_KEY, "jcr")
            .with(ADAPTER_FACTORY_CLASS_KEY, "acme::Factory")
            .with(LOCATION_KEY, "svc/Remote")
            .with("env.timeout", "30")
            .with("env.retries", "3"),
        InitParameters::new()
            .with(REPOSITORY_ATTRIBUTE_KEY, "")
            .with("Location ", "trailing space is not reserved"),
    ]
}

#[test]
fn test_partition_is_complete_and_disjoint() {
    for params in sample_parameters() {
        let cfg = LocatorConfig::partition(&params);

        let input: BTreeSet<String> = params_keys(&params);
        let mut output: BTreeSet<String> =
            cfg.environment.keys().map(str::to_owned).collect();
        for key in RESERVED_KEYS {
            assert!(
                !cfg.environment.contains_key(key),
                "environment must not contain reserved key {key}"
            );
            if params.get(key).is_some() {
                output.insert(key.to_owned());
            }
        }
        assert_eq!(input, output);
    }
}

fn params_keys(params: &InitParameters) -> BTreeSet<String> {
    params.parameter_names().into_iter().collect()
}

// Reserved keys, near misses of them, and arbitrary dotted names.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(RESERVED_KEYS.to_vec()).prop_map(str::to_owned),
        prop::sample::select(RESERVED_KEYS.to_vec()).prop_map(str::to_lowercase),
        prop::sample::select(RESERVED_KEYS.to_vec()).prop_map(|key| format!("{key} ")),
        "[a-zA-Z][a-zA-Z0-9._]{0,16}",
    ]
}

fn arb_parameters() -> impl Strategy<Value = InitParameters> {
    prop::collection::vec((arb_key(), "[ -~]{0,12}"), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .fold(InitParameters::new(), |params, (name, value)| params.with(name, value))
    })
}

proptest! {
    #[test]
    fn partition_keeps_every_key_exactly_once(params in arb_parameters()) {
        let cfg = LocatorConfig::partition(&params);

        let mut output: BTreeSet<String> =
            cfg.environment.keys().map(str::to_owned).collect();
        for key in RESERVED_KEYS {
            prop_assert!(!cfg.environment.contains_key(key));
            if params.get(key).is_some() {
                prop_assert!(output.insert(key.to_owned()));
            }
        }
        prop_assert_eq!(params_keys(&params), output);
        prop_assert_eq!(
            cfg.location,
            params.get(LOCATION_KEY).map_or_else(default_location, str::to_owned)
        );
    }
}

#[test]
fn test_default_location_is_deterministic() {
    let a = LocatorConfig::partition(&InitParameters::new().with("env.timeout", "30"));
    let b = LocatorConfig::partition(&InitParameters::new().with("other", "x"));

    assert_eq!(a.location, b.location);
    assert_eq!(a.location, default_location());
    assert!(a.location.starts_with("//localhost/"));
    assert!(!a.location.contains("::"));
}

#[test]
fn test_location_override_wins() {
    let params = InitParameters::new()
        .with(LOCATION_KEY, "X")
        .with(ADAPTER_FACTORY_CLASS_KEY, "acme::Factory")
        .with("env.provider", "//otherhost/");

    let cfg = LocatorConfig::partition(&params);
    assert_eq!(cfg.location, "X");
}

#[test]
fn test_factory_override_and_default() {
    let cfg = LocatorConfig::partition(&InitParameters::new());
    assert_eq!(cfg.factory_class_name, DEFAULT_ADAPTER_FACTORY);

    let cfg = LocatorConfig::partition(
        &InitParameters::new().with(ADAPTER_FACTORY_CLASS_KEY, "acme::Factory"),
    );
    assert_eq!(cfg.factory_class_name, "acme::Factory");
}

#[test]
fn test_repository_attribute_is_passed_through_untouched() {
    let cfg = LocatorConfig::partition(&InitParameters::new().with(REPOSITORY_ATTRIBUTE_KEY, ""));
    assert_eq!(cfg.repository_attribute.as_deref(), Some(""));
    assert!(cfg.environment.is_empty());
}

#[test]
fn test_hash_map_source() {
    let mut params: HashMap<String, String> = HashMap::new();
    params.insert(LOCATION_KEY.to_owned(), "svc/Remote".to_owned());
    params.insert("env.timeout".to_owned(), "30".to_owned());

    let cfg = LocatorConfig::partition(&params);
    assert_eq!(cfg.location, "svc/Remote");
    assert_eq!(cfg.environment.len(), 1);
    assert_eq!(cfg.environment.get("env.timeout"), Some("30"));
}
