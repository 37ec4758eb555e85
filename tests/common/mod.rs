#![allow(dead_code)]

pub use vssmock_test_utils::builders;
pub use vssmock_test_utils::notifications;
pub use vssmock_test_utils::{init_tracing, with_timeout};

use vssmock::behavior::BehaviorSpec;
use vssmock::datapoint::Value;
use vssmock::engine::{Engine, EngineOptions};

/// Options used by most tests: a buffer large enough that a drained
/// receiver never lags.
pub fn test_options() -> EngineOptions {
    EngineOptions {
        notification_capacity: 1024,
        ..EngineOptions::default()
    }
}

/// Build an engine from `(path, initial, behaviors)` triples.
pub fn engine_with(datapoints: Vec<(&str, Value, Vec<BehaviorSpec>)>) -> Engine {
    let mut builder = Engine::builder(test_options());
    for (path, initial, behaviors) in datapoints {
        builder
            .mock_datapoint(path, initial, behaviors)
            .expect("datapoint should register");
    }
    builder.build()
}
