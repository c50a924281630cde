//! Property-based tests for port validity, classification and generation.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;
use regex::Regex;

use autodock_cli::domain::config::{VALID_CONFIG_KEYS, validate_config_key};
use autodock_cli::domain::descriptor::{BaseImages, generate};
use autodock_cli::domain::detect::{FORBIDDEN_PORTS, Port, SignalBag, StaticProject, classify, is_valid_port};
use autodock_cli::domain::naming::{FALLBACK_NAME, NAME_PREFIX, derive_default_name};
use autodock_common::ProjectType;

// ============================================================================
// Port validity
// ============================================================================

proptest! {
    /// The predicate accepts exactly 1025..=65534 minus the forbidden set.
    #[test]
    fn prop_port_predicate_matches_range(n in 0u32..70_000) {
        let expected = n > 1024 && n < 65535 && !FORBIDDEN_PORTS.iter().any(|p| u32::from(*p) == n);
        prop_assert_eq!(is_valid_port(&n.to_string()), expected, "port {}", n);
    }

    /// Non-numeric input is never a port.
    #[test]
    fn prop_non_numeric_is_rejected(s in "[a-zA-Z_ .:-]{1,12}") {
        prop_assert!(!is_valid_port(&s));
    }

    /// A parsed port always round-trips through its display form.
    #[test]
    fn prop_parsed_port_displays_digits(n in 1025u16..65535) {
        if let Some(port) = Port::new(n) {
            prop_assert_eq!(port.to_string(), n.to_string());
            prop_assert_eq!(Port::parse(&port.to_string()), Some(port));
        }
    }
}

#[test]
fn test_port_boundaries() {
    for bad in ["1024", "65535", "0", "-1", "", " ", "99999", "3000.5"] {
        assert!(!is_valid_port(bad), "accepted {bad:?}");
    }
    for good in ["1025", "65534", "3000", " 8080 "] {
        assert!(is_valid_port(good), "rejected {good:?}");
    }
    for forbidden in FORBIDDEN_PORTS {
        assert!(Port::new(*forbidden).is_none());
    }
}

// ============================================================================
// Classification
// ============================================================================

fn manifest_strategy() -> impl Strategy<Value = String> {
    let deps = prop::sample::subsequence(
        vec!["express", "react", "vite", "react-scripts", "next", "lodash", "mongoose"],
        0..4,
    );
    deps.prop_map(|names| {
        let body: Vec<String> = names.iter().map(|n| format!(r#""{n}":"1.0.0""#)).collect();
        format!(r#"{{"dependencies":{{{}}}}}"#, body.join(","))
    })
}

proptest! {
    /// Classifying the same signals twice gives the same type.
    #[test]
    fn prop_classifier_is_deterministic(
        manifest in manifest_strategy(),
        server in prop::bool::ANY,
        python in prop::bool::ANY,
    ) {
        let mut project = StaticProject::new().with("package.json", &manifest);
        if server {
            project = project.with("index.js", "const app = express();\napp.listen(3000);");
        }
        if python {
            project = project.with("requirements.txt", "flask\n");
        }
        let first = classify(&SignalBag::new(&project));
        let second = classify(&SignalBag::new(&project));
        prop_assert_eq!(first, second);
        prop_assert_ne!(first, ProjectType::Unknown);
        prop_assert_ne!(first, ProjectType::ScriptingApp);
    }
}

// ============================================================================
// Descriptor generation
// ============================================================================

fn type_strategy() -> impl Strategy<Value = ProjectType> {
    prop_oneof![
        Just(ProjectType::BackendRuntime),
        Just(ProjectType::FrontendAssets),
        Just(ProjectType::FullstackFramework),
        Just(ProjectType::ScriptingApp),
    ]
}

proptest! {
    /// Identical inputs render byte-identical descriptors that expose the port.
    #[test]
    fn prop_descriptor_is_idempotent(
        ty in type_strategy(),
        n in 1025u16..65535,
        entry in "[a-z]{1,8}\\.(js|py)",
    ) {
        let Some(port) = Port::new(n) else { return Ok(()); };
        let images = BaseImages::default();
        let a = generate(ty, port, Some(&entry), &images).expect("generate");
        let b = generate(ty, port, Some(&entry), &images).expect("generate");
        prop_assert_eq!(a.render(), b.render());
        prop_assert_eq!(a.exposed_port(), Some(n));
    }
}

// ============================================================================
// Naming and config keys
// ============================================================================

fn image_component() -> Regex {
    Regex::new("^[a-z0-9]+(?:-+[a-z0-9]+)*$").expect("valid regex")
}

#[test]
fn test_awkward_directory_names_become_valid_tags() {
    for base in ["project (1)", "shop.", "api_", "\u{4e2d}\u{6587}\u{9879}\u{76ee}", "..", "-x-"] {
        let name = derive_default_name(&std::path::Path::new("/work").join(base));
        assert!(image_component().is_match(&name), "{base:?} -> {name}");
    }
}

proptest! {
    /// Derived names are prefixed and valid image reference components.
    #[test]
    fn prop_derived_names_are_engine_safe(base in "[A-Za-z0-9 _.@()\u{4e00}-\u{4e20}-]{0,20}") {
        let dir = std::path::Path::new("/work").join(&base);
        let name = derive_default_name(&dir);
        prop_assert!(name.starts_with(NAME_PREFIX) || name == FALLBACK_NAME, "{}", name);
        prop_assert!(image_component().is_match(&name), "{}", name);
    }

    /// Arbitrary keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,10}\\.[a-z]{1,10}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {}", key);
        }
    }
}
