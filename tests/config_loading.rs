// tests/config_loading.rs

mod common;
use crate::common::builders::{animation, set, ConfigFileBuilder, DatapointConfigBuilder};
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::NamedTempFile;

use vssmock::config::{load_and_validate, load_from_path, parse_and_validate, ConfigFile};
use vssmock::datapoint::Value;
use vssmock::engine::{ActuationEvent, EngineBuilder, RepeatMode};
use vssmock::errors::MockError;

type TestResult = Result<(), Box<dyn Error>>;

fn demo_config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/vehicle_mock.toml")
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn demo_config_loads_and_builds() -> TestResult {
    init_tracing();
    let cfg = load_and_validate(demo_config_path())?;
    assert_eq!(cfg.paths().count(), 27);

    let builder = EngineBuilder::from_config(&cfg)?;
    assert!(builder.rejected().is_empty());
    let engine = builder.build();

    assert_eq!(engine.store().len(), 27);
    assert_eq!(engine.registry().len(), 23);
    assert_eq!(
        engine.get("Vehicle.Cabin.Door.Row1.DriverSide.IsLocked")?,
        Value::Bool(false)
    );
    assert_eq!(
        engine.get("Vehicle.Cabin.HVAC.Station.Row2.Driver.Temperature")?,
        Value::Int(12)
    );
    assert_eq!(
        engine.get("Vehicle.Chassis.Axle.Row2.Wheel.Left.Tire.Pressure")?,
        Value::Int(199)
    );
    assert!(engine.clock_periods().is_empty());
    Ok(())
}

#[test]
fn load_from_path_skips_semantic_checks() -> TestResult {
    let file = write_config(
        r#"
[[datapoint]]
path = "Vehicle.Speed"
paths = ["Vehicle.Speed"]
initial_value = 0
"#,
    );

    let raw = load_from_path(file.path())?;
    assert_eq!(raw.datapoint.len(), 1);

    let result = ConfigFile::try_from(raw);
    assert!(matches!(result, Err(MockError::ConfigError(_))));
    Ok(())
}

#[test]
fn engine_section_defaults() -> TestResult {
    let cfg = parse_and_validate(
        r#"
[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0.0
"#,
    )?;

    let options = cfg.engine.options()?;
    assert_eq!(options.min_tick, Duration::from_millis(50));
    assert_eq!(options.notification_capacity, 256);
    Ok(())
}

#[test]
fn clock_and_animation_behaviors_parse() -> TestResult {
    let cfg = parse_and_validate(
        r#"
[engine]
min_tick = "100ms"

[[datapoint]]
path = "Vehicle.Cabin.HVAC.Station.Row1.Driver.Temperature"
initial_value = 14

[[datapoint.behavior]]
trigger = { type = "clock", interval = "1.5s" }
action = { type = "animation", duration = "30s", repeat_mode = "ping_pong", values = ["$self", 25] }

[[datapoint.behavior]]
trigger = { type = "event" }
action = { type = "set", value = "$event.value" }
"#,
    )?;

    let engine = EngineBuilder::from_config(&cfg)?.build();
    assert_eq!(engine.clock_periods(), vec![Duration::from_millis(1500)]);
    assert_eq!(engine.registry().len(), 2);
    assert_eq!(
        engine.animations().tick_for(Duration::from_secs(1)),
        Duration::from_millis(100)
    );
    Ok(())
}

#[test]
fn reverse_repeat_is_an_alias_for_ping_pong() -> TestResult {
    let cfg = parse_and_validate(
        r#"
[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0

[[datapoint.behavior]]
trigger = { type = "event", event = "current_value" }
action = { type = "animation", duration = "2s", repeat_mode = "reverse_repeat", values = [0, 10] }
"#,
    )?;

    let specs = cfg.datapoint[0].behavior_specs()?;
    assert_eq!(specs.len(), 1);
    assert!(specs[0].action.to_string().contains("PingPong"));
    Ok(())
}

#[test]
fn duplicate_path_is_rejected() {
    let file = write_config(
        r#"
[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0

[[datapoint]]
paths = ["Vehicle.Cabin.Door.Row1.DriverSide.IsOpen", "Vehicle.Speed"]
initial_value = false
"#,
    );

    match load_and_validate(file.path()) {
        Err(MockError::DuplicatePath(path)) => assert_eq!(path, "Vehicle.Speed"),
        Err(e) => panic!("Expected DuplicatePath, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_path_is_rejected() {
    let file = write_config(
        r#"
[[datapoint]]
path = "Vehicle..Speed"
initial_value = 0
"#,
    );

    match load_and_validate(file.path()) {
        Err(MockError::ConfigError(msg)) => assert!(msg.contains("Vehicle..Speed")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn bad_durations_are_config_errors() {
    for duration in ["30", "-5s", "5 parsecs", ""] {
        let text = format!(
            r#"
[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0

[[datapoint.behavior]]
trigger = {{ type = "event" }}
action = {{ type = "animation", duration = "{duration}", values = [0, 10] }}
"#
        );

        match parse_and_validate(&text) {
            Err(MockError::ConfigError(msg)) => assert!(msg.contains("duration"), "{msg}"),
            other => panic!("duration {duration:?}: expected ConfigError, got {other:?}"),
        }
    }
}

#[test]
fn unknown_symbol_is_a_config_error() {
    let result = parse_and_validate(
        r#"
[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0

[[datapoint.behavior]]
trigger = { type = "event" }
action = { type = "set", value = "$event.target" }
"#,
    );

    match result {
        Err(MockError::ConfigError(msg)) => assert!(msg.contains("$event.target")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_path_and_empty_config_are_rejected() {
    let no_path = parse_and_validate(
        r#"
[[datapoint]]
initial_value = 0
"#,
    );
    assert!(matches!(no_path, Err(MockError::ConfigError(_))));

    let empty = parse_and_validate("");
    assert!(matches!(empty, Err(MockError::ConfigError(_))));
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let result = parse_and_validate("[[datapoint]\npath = ");
    assert!(matches!(result, Err(MockError::TomlError(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/vssmock.toml");
    assert!(matches!(result, Err(MockError::IoError(_))));
}

#[test]
fn zero_capacity_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .notification_capacity(0)
        .with_datapoint(DatapointConfigBuilder::new("Vehicle.Speed", 0).build())
        .build_raw();

    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(MockError::ConfigError(_))
    ));
}

#[test]
fn zero_duration_animation_survives_validation_but_not_registration() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_datapoint(
            DatapointConfigBuilder::new("Vehicle.Speed", 0)
                .behavior(
                    vssmock::config::TriggerConfig::Event {
                        event: Default::default(),
                    },
                    animation("0s", RepeatMode::Once, &["$self", "10"]),
                )
                .every("1s", set(5))
                .build(),
        )
        .build();

    let builder = EngineBuilder::from_config(&cfg)?;
    assert_eq!(builder.rejected().len(), 1);
    assert!(matches!(
        builder.rejected()[0],
        MockError::InvalidAnimationSpec { .. }
    ));

    let engine = builder.build();
    assert_eq!(engine.registry().len(), 1);
    assert_eq!(engine.get("Vehicle.Speed")?, Value::Int(0));
    Ok(())
}

#[test]
fn shared_record_registers_every_path() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_datapoint(
            DatapointConfigBuilder::many(
                &[
                    "Vehicle.Body.Lights.Beam.Low.IsOn",
                    "Vehicle.Body.Lights.Beam.High.IsOn",
                ],
                "false",
            )
            .on_target_set("$event.value")
            .build(),
        )
        .build();

    let engine = EngineBuilder::from_config(&cfg)?.build();
    assert_eq!(engine.store().len(), 2);
    assert_eq!(engine.registry().len(), 2);
    assert_eq!(
        engine.get("Vehicle.Body.Lights.Beam.High.IsOn")?,
        Value::Bool(false)
    );
    Ok(())
}

#[test]
fn zero_min_tick_is_rejected() {
    let result = parse_and_validate(
        r#"
[engine]
min_tick = "0ms"

[[datapoint]]
path = "Vehicle.Speed"
initial_value = 0
"#,
    );

    match result {
        Err(MockError::ConfigError(msg)) => assert!(msg.contains("min_tick"), "{msg}"),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn integral_set_value_fits_a_float_datapoint() -> TestResult {
    let cfg = parse_and_validate(
        r#"
[[datapoint]]
path = "Vehicle.Cabin.HVAC.Station.Row1.Driver.Temperature"
initial_value = 20.5

[[datapoint.behavior]]
trigger = { type = "event" }
action = { type = "set", value = 21 }
"#,
    )?;

    let builder = EngineBuilder::from_config(&cfg)?;
    assert!(builder.rejected().is_empty());
    let engine = builder.build();

    let path = "Vehicle.Cabin.HVAC.Station.Row1.Driver.Temperature";
    let report = engine.ingest(ActuationEvent::actuator_target(path, 19.0).into())?;
    assert_eq!(report.failed, 0);
    assert_eq!(engine.get(path)?, Value::Float(21.0));
    Ok(())
}
