use clap::{Parser, Subcommand};
use relm4::prelude::*;
use ringshell::config;
use ringshell::events::ControlCommand;
use ringshell::gui::app::AppModel;
use ringshell::sys::{runtime, server};

#[derive(Parser, Debug)]
#[command(name = "ringshell", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Open the ring menu of the running daemon
    Show,
    /// Close the ring menu
    Hide,
    /// Open the menu if closed, close it otherwise
    Toggle,
    /// Write the default config file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => server::send_command(ControlCommand::Show),
        Some(Commands::Hide) => server::send_command(ControlCommand::Hide),
        Some(Commands::Toggle) => server::send_command(ControlCommand::Toggle),
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            run_daemon();
            Ok(())
        }
    }
}

fn run_daemon() {
    let settings = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.ringshell.daemon");

    app.run::<AppModel>((settings, rx));
}
