use chime_core::{Config, Event, RepeatPolicy, SoundKind};
use chrono::Local;
use clap::Subcommand;
use uuid::Uuid;

use crate::common;

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Schedule a new alarm
    Set {
        /// Hour (0-23)
        hour: u32,
        /// Minute (0-59)
        minute: u32,
        /// Second (0-59)
        #[arg(long, default_value_t = 0)]
        second: u32,
        /// Display label
        #[arg(long, default_value = "")]
        name: String,
        /// Repeat policy: once, daily, weekdays or weekends
        #[arg(long, default_value = "once")]
        repeat: RepeatPolicy,
        /// Alert sound: default, bell, beep or melody
        #[arg(long, default_value = "default")]
        sound: SoundKind,
    },
    /// Schedule a one-shot alarm a few minutes from now
    Quick {
        /// Minutes from now
        minutes: i64,
    },
    /// List scheduled alarms
    List {
        #[arg(long)]
        json: bool,
    },
    /// Acknowledge an alarm
    Stop { id: Uuid },
    /// Defer a ringing alarm
    Snooze {
        id: Uuid,
        /// Minutes to defer by (configured default when omitted)
        #[arg(long)]
        minutes: Option<i64>,
    },
    /// Delete an alarm
    Delete { id: Uuid },
    /// Delete every alarm
    Clear,
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut engine = common::load_engine(&config)?;
    let now = Local::now().naive_local();

    match action {
        AlarmAction::Set {
            hour,
            minute,
            second,
            name,
            repeat,
            sound,
        } => match engine.set_alarm(hour, minute, second, &name, repeat, sound) {
            Ok(alarm) => println!("{}", serde_json::to_string_pretty(&alarm)?),
            Err(e) => {
                common::print_event(&Event::rejected(e.to_string()))?;
                return Err(e.into());
            }
        },
        AlarmAction::Quick { minutes } => match engine.set_quick_alarm(minutes, now) {
            Ok(alarm) => println!("{}", serde_json::to_string_pretty(&alarm)?),
            Err(e) => {
                common::print_event(&Event::rejected(e.to_string()))?;
                return Err(e.into());
            }
        },
        AlarmAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(engine.alarms())?);
            } else if engine.alarms().is_empty() {
                println!("no alarms scheduled");
            } else {
                for alarm in engine.alarms() {
                    println!(
                        "{}  {}  {:<8}  {:<7}  {}{}",
                        alarm.id,
                        alarm.time,
                        alarm.repeat.to_string(),
                        alarm.sound.to_string(),
                        alarm.name,
                        if alarm.armed { "" } else { "  (fired)" },
                    );
                }
            }
        }
        AlarmAction::Stop { id } => match engine.stop(id)? {
            Some(event) => common::print_event(&event)?,
            None => println!("no such alarm: {id}"),
        },
        AlarmAction::Snooze { id, minutes } => {
            let minutes = minutes.unwrap_or(config.alarm.snooze_minutes);
            match engine.snooze(id, minutes, now)? {
                Some(event) => common::print_event(&event)?,
                None => println!("no such alarm: {id}"),
            }
        }
        AlarmAction::Delete { id } => match engine.delete(id)? {
            Some(event) => common::print_event(&event)?,
            None => println!("no such alarm: {id}"),
        },
        AlarmAction::Clear => {
            let event = engine.clear_all()?;
            common::print_event(&event)?;
        }
    }

    common::save_engine(&engine)?;
    Ok(())
}
