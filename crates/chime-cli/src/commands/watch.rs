use std::io::{self, Write};

use chime_core::{Config, Event};
use chrono::Local;
use clap::Args;
use log::info;

use crate::common;

#[derive(Args)]
pub struct WatchArgs {
    /// Stop after this many ticks (runs until interrupted by default)
    #[arg(long)]
    pub ticks: Option<u64>,
}

/// The polling loop: tick the engine at the configured interval and render
/// every event as a JSON line.
pub fn run(args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = common::load_engine(&config)?;
    let interval = std::time::Duration::from_millis(config.alarm.tick_interval_ms);
    info!("watch loop started, interval {interval:?}");

    let mut ticks = 0u64;
    loop {
        let now = Local::now().naive_local();
        let events = engine.tick(now)?;
        for event in &events {
            println!("{}", serde_json::to_string(event)?);
            if config.notifications.enabled
                && config.notifications.bell
                && matches!(event, Event::Rang { .. })
            {
                print!("\x07");
                io::stdout().flush()?;
            }
        }
        if !events.is_empty() {
            common::save_engine(&engine)?;
        }

        ticks += 1;
        if let Some(limit) = args.ticks {
            if ticks >= limit {
                break;
            }
        }
        std::thread::sleep(interval);
    }

    common::save_engine(&engine)?;
    Ok(())
}
