//! # Chime Core Library
//!
//! This library provides the core business logic for the Chime alarm clock.
//! It implements a CLI-first philosophy where all operations are available
//! via a standalone CLI binary, with any graphical front-end being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Alarm Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick(now)` to detect due alarms
//! - **Storage**: write-through JSON alarm list and TOML-based configuration
//! - **Events**: every lifecycle transition produces an [`Event`] that the
//!   front-end renders (full-screen alert, sound, OS notification)
//!
//! ## Key Components
//!
//! - [`AlarmEngine`]: fire/acknowledge/snooze/rearm state machine
//! - [`AlarmStore`]: durable alarm definitions
//! - [`Config`]: application configuration management

pub mod alarm;
pub mod error;
pub mod events;
pub mod storage;

pub use alarm::{ActiveRing, Alarm, AlarmEngine, EngineState, RepeatPolicy, SoundKind};
pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use events::Event;
pub use storage::{AlarmStore, Config};
