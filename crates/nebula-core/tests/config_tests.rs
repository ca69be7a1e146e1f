// JSON config parsing and validation.

use nebula_core::{FramePacing, NebulaConfig, NebulaError, ResizePolicy};

#[test]
fn empty_object_yields_defaults() {
    let config = NebulaConfig::from_json("{}").unwrap();
    assert_eq!(config, NebulaConfig::default());
    assert_eq!(config.star_count, 300);
    assert_eq!(config.mist_layers, 20);
    assert_eq!(config.beam_count, 3);
    assert_eq!(config.pacing, FramePacing::Fixed);
    assert_eq!(config.resize_policy, ResizePolicy::Retain);
    assert_eq!(config.seed, None);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let config = NebulaConfig::from_json(
        r#"{
            "star_count": 120,
            "seed": 7,
            "resize_policy": "reseed",
            "pacing": { "mode": "elapsed", "max_units": 3.0 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.star_count, 120);
    assert_eq!(config.mist_layers, 20);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.resize_policy, ResizePolicy::Reseed);
    assert_eq!(config.pacing, FramePacing::Elapsed { max_units: 3.0 });
}

#[test]
fn serialized_config_parses_back() {
    let original = NebulaConfig {
        beam_count: 5,
        drift_step: 0.25,
        seed: Some(99),
        ..NebulaConfig::default()
    };
    let text = serde_json::to_string(&original).unwrap();
    assert_eq!(NebulaConfig::from_json(&text).unwrap(), original);
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        NebulaConfig::from_json("{ star_count: }"),
        Err(NebulaError::Config(_))
    ));
}

#[test]
fn validation_rejects_degenerate_values() {
    let cases = [
        NebulaConfig {
            star_count: 0,
            ..NebulaConfig::default()
        },
        NebulaConfig {
            mist_layers: 0,
            ..NebulaConfig::default()
        },
        NebulaConfig {
            time_step: f32::NAN,
            ..NebulaConfig::default()
        },
        NebulaConfig {
            drift_step: -1.0,
            ..NebulaConfig::default()
        },
        NebulaConfig {
            pacing: FramePacing::Elapsed { max_units: 0.0 },
            ..NebulaConfig::default()
        },
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(NebulaError::InvalidConfig(_))),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn zero_beams_is_allowed() {
    let config = NebulaConfig {
        beam_count: 0,
        ..NebulaConfig::default()
    };
    assert!(config.validate().is_ok());
}
