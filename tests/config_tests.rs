use contact_sweep::*;

#[test]
fn partial_toml_keeps_defaults_for_missing_keys() {
    let config = SweepConfig::from_toml_str(
        r#"
        seed = 7
        minimum_spawn_count = 100
        maximum_spawn_count = 400
        spawn_count_increment = 150
        metric = "average_fps"
        "#,
    )
    .expect("valid toml");

    assert_eq!(config.seed, 7);
    assert_eq!(config.metric, Metric::AverageFps);
    assert_eq!(config.warmup_duration, 5.0);
    assert_eq!(config.csv_file_name, "collision_test_results.csv");
    assert_eq!(
        config.population_counts(),
        vec![100, 250, 400, 6000, 7000, 8000, 9000, 10000]
    );
    config.validate().expect("config should validate");
}

#[test]
fn spawn_bounds_parse_from_arrays() {
    let config = SweepConfig::from_toml_str(
        r#"
        extra_spawn_counts = []

        [spawn_bounds]
        min = [-1.0, 0.0, -1.0]
        max = [1.0, 2.0, 1.0]
        "#,
    )
    .unwrap();

    assert_eq!(config.spawn_bounds.min, Vec3::new(-1.0, 0.0, -1.0));
    assert_eq!(config.spawn_bounds.max, Vec3::new(1.0, 2.0, 1.0));
    assert!(config.extra_spawn_counts.is_empty());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = SweepConfig::from_toml_str("seed = \"not a number\"");
    assert!(matches!(result, Err(SweepError::ConfigParse(_))));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.toml");
    std::fs::write(&path, "measurement_duration = 2.5\n").unwrap();

    let config = SweepConfig::load(&path).unwrap();
    assert_eq!(config.measurement_duration, 2.5);

    let missing = SweepConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(missing, Err(SweepError::ConfigRead { .. })));
}

#[test]
fn inverted_bounds_fail_validation() {
    let config = SweepConfig {
        spawn_bounds: SpawnBounds::new(Vec3::splat(1.0), Vec3::splat(-1.0)),
        ..SweepConfig::default()
    };
    assert!(matches!(config.validate(), Err(SweepError::InvalidConfig(_))));
}

#[test]
fn config_round_trips_through_toml() {
    let config = SweepConfig {
        output_dir: Some("/var/tmp/sweeps".into()),
        ..SweepConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    assert_eq!(SweepConfig::from_toml_str(&text).unwrap(), config);
}
