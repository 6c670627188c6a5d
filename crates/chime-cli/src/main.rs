use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "chime-cli", version, about = "Chime alarm clock CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alarm management
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Run the polling loop and render engine events
    Watch(commands::watch::WatchArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let _ = simple_file_logger::init_logger!("chime");

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Alarm { action } => commands::alarm::run(action),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
