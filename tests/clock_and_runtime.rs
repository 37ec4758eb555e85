// tests/clock_and_runtime.rs

mod common;
use crate::common::notifications::{changes_for, drain, faults_of_kind};
use crate::common::{engine_with, init_tracing, with_timeout};

use std::error::Error;

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

use vssmock::behavior::{Action, BehaviorSpec, Expr, Trigger};
use vssmock::datapoint::{FaultKind, Value};
use vssmock::engine::{
    spawn_clocks, ActuationEvent, EventKind, RepeatMode, Runtime, RuntimeEvent, Stimulus,
};

type TestResult = Result<(), Box<dyn Error>>;

const SPEED: &str = "Vehicle.Speed";
const DOOR: &str = "Vehicle.Cabin.Door.Row1.DriverSide.IsOpen";

fn every(period: Duration, action: Action) -> BehaviorSpec {
    BehaviorSpec::new(Trigger::clock(period), action)
}

#[tokio::test(start_paused = true)]
async fn clock_fires_once_per_period() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![(
        SPEED,
        Value::Int(0),
        vec![every(Duration::from_secs(1), Action::set(Value::Int(42)))],
    )]);
    let mut rx = engine.subscribe();

    let clocks = spawn_clocks(&engine);
    assert_eq!(clocks.len(), 1);

    // First tick is one full period after start.
    sleep(Duration::from_millis(500)).await;
    assert!(drain(&mut rx).is_empty());

    sleep(Duration::from_secs(5)).await;
    let values = changes_for(&drain(&mut rx), SPEED);
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|v| *v == Value::Int(42)));

    for clock in clocks {
        clock.abort();
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn each_period_gets_its_own_ticker() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![
        (
            SPEED,
            Value::Int(0),
            vec![every(Duration::from_secs(2), Action::set(Value::Int(1)))],
        ),
        (
            "Vehicle.Powertrain.TractionBattery.StateOfCharge.Current",
            Value::Float(80.0),
            vec![
                every(Duration::from_secs(2), Action::set(Value::Float(79.0))),
                every(Duration::from_secs(3), Action::set(Value::Float(78.0))),
            ],
        ),
    ]);

    assert_eq!(
        engine.clock_periods(),
        vec![Duration::from_secs(2), Duration::from_secs(3)]
    );
    let clocks = spawn_clocks(&engine);
    assert_eq!(clocks.len(), 2);
    for clock in clocks {
        clock.abort();
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn event_value_on_clock_is_a_fault_per_firing() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![(
        SPEED,
        Value::Int(7),
        vec![every(Duration::from_secs(1), Action::set(Expr::EventValue))],
    )]);
    let mut rx = engine.subscribe();

    let clocks = spawn_clocks(&engine);
    sleep(Duration::from_millis(3_500)).await;

    let notifications = drain(&mut rx);
    let missing = faults_of_kind(&notifications, FaultKind::MissingEventContext);
    assert_eq!(missing.len(), 3);
    assert!(missing.iter().all(|f| f.path.as_deref() == Some(SPEED)));
    assert!(changes_for(&notifications, SPEED).is_empty());
    assert_eq!(engine.get(SPEED)?, Value::Int(7));

    for clock in clocks {
        clock.abort();
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn clock_can_start_animations() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![(
        SPEED,
        Value::Int(0),
        vec![every(
            Duration::from_secs(10),
            Action::animate(
                Duration::from_secs(2),
                RepeatMode::Once,
                vec![Expr::SelfValue, Expr::from(Value::Int(100))],
            ),
        )],
    )]);

    let clocks = spawn_clocks(&engine);
    sleep(Duration::from_millis(10_500)).await;
    assert!(engine.animations().is_active(SPEED));

    sleep(Duration::from_secs(2)).await;
    assert_eq!(engine.get(SPEED)?, Value::Int(100));

    for clock in clocks {
        clock.abort();
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn runtime_dispatches_until_shutdown() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![
        (
            DOOR,
            Value::Bool(false),
            vec![BehaviorSpec::new(
                Trigger::event(EventKind::ActuatorTarget),
                Action::set(Expr::EventValue),
            )],
        ),
        (
            SPEED,
            Value::Int(0),
            vec![every(Duration::from_secs(1), Action::set(Value::Int(5)))],
        ),
    ]);
    let mut rx = engine.subscribe();

    let (tx, event_rx) = mpsc::channel::<RuntimeEvent>(16);
    let runtime = Runtime::new(engine.clone(), event_rx);
    let handle = tokio::spawn(runtime.run());

    tx.send(RuntimeEvent::Stimulus(Stimulus::Event(
        ActuationEvent::actuator_target(DOOR, true),
    )))
    .await?;
    // Unknown paths are dropped without stopping the loop.
    tx.send(RuntimeEvent::Stimulus(
        ActuationEvent::actuator_target("Vehicle.Nope", true).into(),
    ))
    .await?;

    sleep(Duration::from_millis(2_500)).await;

    let notifications = drain(&mut rx);
    assert_eq!(changes_for(&notifications, DOOR), vec![Value::Bool(true)]);
    assert_eq!(changes_for(&notifications, SPEED).len(), 2);
    assert_eq!(
        faults_of_kind(&notifications, FaultKind::UnknownPath).len(),
        1
    );

    tx.send(RuntimeEvent::ShutdownRequested).await?;
    with_timeout(handle).await??;

    // Clocks are gone with the runtime.
    sleep(Duration::from_secs(5)).await;
    assert!(drain(&mut rx).is_empty());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn runtime_exits_when_senders_are_dropped() -> TestResult {
    init_tracing();
    let engine = engine_with(vec![(SPEED, Value::Int(0), vec![])]);

    let (tx, event_rx) = mpsc::channel::<RuntimeEvent>(4);
    let handle = tokio::spawn(Runtime::new(engine, event_rx).run());
    drop(tx);

    with_timeout(handle).await??;
    Ok(())
}
