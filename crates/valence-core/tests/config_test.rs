//! Tests for the Valence configuration system.

use std::sync::Mutex;

use valence_core::config::{ConfigOverrides, ValenceConfig};
use valence_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 6] = [
    "VALENCE_BONDS_SCALE",
    "VALENCE_PARALLEL_EDGE_THRESHOLD",
    "VALENCE_HEALTH_MAX_CONNECTIVITY",
    "VALENCE_HEALTH_MAX_RESPONSIBILITIES",
    "VALENCE_SCORING_UNSTABLE_BOND_THRESHOLD",
    "VALENCE_PATTERNS_ENFORCE_ROLES",
];

/// Clear all VALENCE_ env vars and point HOME at an empty directory so the
/// user layer never leaks in from the machine running the tests.
fn isolate_env(home: &std::path::Path) {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Overrides beat env, env beats project, project beats user, user beats defaults.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".valence")).unwrap();
    std::fs::write(
        home.path().join(".valence").join("config.toml"),
        r#"
[bonds]
strength_scale = 10.0
hydrogen_threshold = 0.05

[scoring]
unstable_bond_threshold = 0.4
"#,
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("valence.toml"),
        r#"
[bonds]
strength_scale = 30.0

[health]
max_connectivity = 12
max_responsibilities = 6
"#,
    )
    .unwrap();

    std::env::set_var("VALENCE_HEALTH_MAX_CONNECTIVITY", "15");

    let overrides = ConfigOverrides {
        max_responsibilities: Some(4),
        ..Default::default()
    };

    let config = ValenceConfig::load(project.path(), Some(&overrides)).unwrap();
    isolate_env(home.path());

    // project over user
    assert_eq!(config.bonds.effective_strength_scale(), 30.0);
    // user survives where nothing higher sets it
    assert_eq!(config.bonds.effective_hydrogen_threshold(), 0.05);
    assert_eq!(config.scoring.effective_unstable_bond_threshold(), 0.4);
    // env over project
    assert_eq!(config.health.effective_max_connectivity(), 15);
    // overrides over everything
    assert_eq!(config.health.effective_max_responsibilities(), 4);
    // untouched default
    assert_eq!(config.bonds.effective_covalent_threshold(), 0.8);
}

/// No files and no env yields compiled defaults.
#[test]
fn test_defaults_when_nothing_configured() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let project = tempdir();

    let config = ValenceConfig::load(project.path(), None).unwrap();
    assert_eq!(config, ValenceConfig::default());
    assert_eq!(config.bonds.effective_method_call_weight(), 1.0);
    assert_eq!(config.bonds.effective_field_access_weight(), 1.5);
    assert_eq!(config.bonds.effective_inheritance_weight(), 2.0);
    assert_eq!(config.bonds.effective_composition_weight(), 1.8);
    assert_eq!(config.bonds.effective_aggregation_weight(), 1.2);
    assert_eq!(config.bonds.effective_event_subscription_weight(), 0.4);
    assert_eq!(config.bonds.effective_config_coupling_weight(), 0.3);
    assert_eq!(config.bonds.effective_strength_scale(), 20.0);
    assert_eq!(config.health.effective_max_connectivity(), 20);
    assert_eq!(config.health.effective_max_responsibilities(), 10);
    assert!(config.patterns.effective_enforce_component_roles());
}

/// A malformed env value is reported, not silently ignored.
#[test]
fn test_unparseable_env_value_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let project = tempdir();

    std::env::set_var("VALENCE_BONDS_SCALE", "lots");
    let result = ValenceConfig::load(project.path(), None);
    isolate_env(home.path());

    match result {
        Err(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "VALENCE_BONDS_SCALE");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

/// Invalid TOML in the project file is a parse error naming the file.
#[test]
fn test_invalid_project_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    let project = tempdir();
    std::fs::write(project.path().join("valence.toml"), "[bonds\nscale = ").unwrap();

    match ValenceConfig::load(project.path(), None) {
        Err(ConfigError::ParseError { path, .. }) => assert!(path.ends_with("valence.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_from_toml_and_back() {
    let config = ValenceConfig::from_toml(
        r#"
[bonds]
covalent_threshold = 0.9
ionic_threshold = 0.5

[patterns]
enforce_component_roles = false
"#,
    )
    .unwrap();
    assert_eq!(config.bonds.effective_covalent_threshold(), 0.9);
    assert!(!config.patterns.effective_enforce_component_roles());

    let serialized = config.to_toml().unwrap();
    let reparsed = ValenceConfig::from_toml(&serialized).unwrap();
    assert_eq!(config, reparsed);
}

/// Thresholds out of order fail fast.
#[test]
fn test_validation_rejects_non_ascending_thresholds() {
    let config = ValenceConfig::from_toml(
        r#"
[bonds]
ionic_threshold = 0.9
"#,
    )
    .unwrap();
    match config.validate() {
        Err(ConfigError::ValidationFailed { field, .. }) => assert_eq!(field, "bonds.thresholds"),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases = [
        ("[bonds]\nstrength_scale = 0.0", "bonds.strength_scale"),
        ("[bonds]\nmethod_call_weight = -1.0", "bonds.method_call_weight"),
        ("[bonds]\ncovalent_threshold = 1.5", "bonds.covalent_threshold"),
        ("[health]\nmax_connectivity = 0", "health.max_connectivity"),
        ("[health]\nmax_responsibilities = 0", "health.max_responsibilities"),
        ("[health]\nconnectivity_percentile = 0", "health.connectivity_percentile"),
        ("[health]\nseverity_high = 0.2", "health.severity"),
        ("[scoring]\nunstable_bond_threshold = 2.0", "scoring.unstable_bond_threshold"),
    ];
    for (toml_str, expected_field) in cases {
        let config = ValenceConfig::from_toml(toml_str).unwrap();
        match config.validate() {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, expected_field, "for {toml_str:?}")
            }
            other => panic!("expected ValidationFailed for {toml_str:?}, got {other:?}"),
        }
    }
}

/// Merge copies only values the other side sets.
#[test]
fn test_merge_only_copies_set_values() {
    let mut base = ValenceConfig::from_toml("[bonds]\nstrength_scale = 12.0").unwrap();
    let other = ValenceConfig::from_toml("[health]\nmax_connectivity = 8").unwrap();
    base.merge(&other);
    assert_eq!(base.bonds.strength_scale, Some(12.0));
    assert_eq!(base.health.max_connectivity, Some(8));
    assert_eq!(base.health.max_responsibilities, None);
}
