// src/transport/mod.rs

//! Stand-in broker transport.
//!
//! A real deployment connects the engine to a vehicle-signal broker. For
//! local use, [`console`] reads actuation requests from stdin and prints
//! value changes to stdout.

pub mod console;

pub use console::{parse_command, spawn_console, spawn_printer, ConsoleCommand};
