mod definition;
mod engine;
pub mod trigger;

pub use definition::{Alarm, RepeatPolicy, SoundKind, DEFAULT_NAME};
pub use engine::{ActiveRing, AlarmEngine, EngineState, DEFAULT_RING_TIMEOUT_SECS};
