//! Shared helpers for CLI commands.
//!
//! The engine's ephemeral state (ringing slot + consumed due-window) is
//! carried across invocations as a JSON snapshot in the data directory,
//! next to the alarm list itself.

use chime_core::storage::data_dir;
use chime_core::{AlarmEngine, AlarmStore, Config, EngineState, Event};

const STATE_FILE: &str = "engine.json";

pub fn load_engine(config: &Config) -> Result<AlarmEngine, Box<dyn std::error::Error>> {
    let store = AlarmStore::open()?;
    let state = match std::fs::read_to_string(data_dir()?.join(STATE_FILE)) {
        Ok(json) => serde_json::from_str::<EngineState>(&json).unwrap_or_default(),
        Err(_) => EngineState::default(),
    };
    let mut engine = AlarmEngine::with_state(store, state);
    engine.set_ring_timeout(config.ring_timeout());
    Ok(engine)
}

pub fn save_engine(engine: &AlarmEngine) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(&engine.state())?;
    std::fs::write(data_dir()?.join(STATE_FILE), json)?;
    Ok(())
}

pub fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
