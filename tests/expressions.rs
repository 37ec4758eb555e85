// tests/expressions.rs

use vssmock::behavior::{resolve, Action, EvalContext, Expr};
use vssmock::datapoint::Value;
use vssmock::engine::{ActuationEvent, RepeatMode};
use vssmock::errors::MockError;
use vssmock::types::parse_duration;

use std::time::Duration;

const PATH: &str = "Vehicle.Cabin.HVAC.Station.Row1.Driver.Temperature";

#[test]
fn parses_symbols_and_literals() {
    assert_eq!(Expr::parse("$self"), Ok(Expr::SelfValue));
    assert_eq!(Expr::parse(" $event.value "), Ok(Expr::EventValue));
    assert_eq!(Expr::parse("25"), Ok(Expr::Literal(Value::Int(25))));
    assert_eq!(Expr::parse("false"), Ok(Expr::Literal(Value::Bool(false))));
    assert!(Expr::parse("$event").is_err());
    assert!(Expr::parse("$selfish").is_err());
}

#[test]
fn toml_operands() {
    let parse = |v: toml::Value| Expr::from_toml(&v);
    assert_eq!(parse(toml::Value::from(25)), Ok(Expr::Literal(Value::Int(25))));
    assert_eq!(
        parse(toml::Value::from(21.5)),
        Ok(Expr::Literal(Value::Float(21.5)))
    );
    assert_eq!(parse(toml::Value::from("$self")), Ok(Expr::SelfValue));
    assert!(parse(toml::Value::Array(vec![])).is_err());
}

#[test]
fn display_round_trips_symbols() {
    assert_eq!(Expr::SelfValue.to_string(), "$self");
    assert_eq!(Expr::EventValue.to_string(), "$event.value");
}

#[test]
fn resolves_against_context() {
    let current = Value::Int(14);
    let event = ActuationEvent::actuator_target(PATH, 25i64);

    let with_event = EvalContext {
        path: PATH,
        current: &current,
        event: Some(&event),
    };
    assert_eq!(resolve(&Expr::SelfValue, &with_event).unwrap(), Value::Int(14));
    assert_eq!(resolve(&Expr::EventValue, &with_event).unwrap(), Value::Int(25));
    assert_eq!(
        resolve(&Expr::Literal(Value::Int(3)), &with_event).unwrap(),
        Value::Int(3)
    );

    let from_clock = EvalContext {
        event: None,
        ..with_event
    };
    match resolve(&Expr::EventValue, &from_clock) {
        Err(MockError::MissingEventContext(path)) => assert_eq!(path, PATH),
        other => panic!("expected MissingEventContext, got {other:?}"),
    }
}

#[test]
fn actions_know_when_they_need_an_event() {
    assert!(Action::set(Expr::EventValue).needs_event());
    assert!(!Action::set(Value::Int(1)).needs_event());
    assert!(
        Action::animate(
            Duration::from_secs(1),
            RepeatMode::Once,
            vec![Expr::SelfValue, Expr::EventValue]
        )
        .needs_event()
    );
}

#[test]
fn duration_strings() {
    assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    assert_eq!(parse_duration("30s"), Ok(Duration::from_secs(30)));
    assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
    assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
    assert_eq!(parse_duration("0.5s"), Ok(Duration::from_millis(500)));
    assert!(parse_duration("").is_err());
    assert!(parse_duration("10").is_err());
    assert!(parse_duration("10d").is_err());
    assert!(parse_duration("-1s").is_err());
}

#[test]
fn repeat_mode_names() {
    assert_eq!("once".parse::<RepeatMode>(), Ok(RepeatMode::Once));
    assert_eq!("Repeat".parse::<RepeatMode>(), Ok(RepeatMode::Repeat));
    assert_eq!("ping_pong".parse::<RepeatMode>(), Ok(RepeatMode::PingPong));
    assert_eq!(
        "reverse_repeat".parse::<RepeatMode>(),
        Ok(RepeatMode::PingPong)
    );
    assert!("bounce".parse::<RepeatMode>().is_err());
}
