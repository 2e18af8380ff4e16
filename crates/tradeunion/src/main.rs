//! `tradeunion` - CLI for the member roster
//!
//! Without a subcommand this binary runs the interactive menu; the
//! subcommands perform a single roster operation and exit.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;
use std::process::ExitCode;

use clap::Parser;

use tradeunion::cli::handlers::{handle_add, handle_list, handle_remove, handle_show};
use tradeunion::cli::{Cli, Command, ConfigCommand};
use tradeunion::{init_logging, Config, Menu, Roster};

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;
    let data_file = config.data_file(cli.file.clone());

    let mut stdout = io::stdout();
    let outcome = match cli.command {
        None | Some(Command::Menu) => {
            let mut roster = Roster::open(&data_file);
            let mut menu = Menu::new(io::stdin().lock(), stdout);
            menu.run(&mut roster)?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Add(add_cmd)) => {
            handle_add(&mut Roster::open(&data_file), &add_cmd, &mut stdout)?
        }
        Some(Command::Remove(remove_cmd)) => handle_remove(
            &mut Roster::open(&data_file),
            &remove_cmd,
            &mut io::stdin().lock(),
            &mut stdout,
        )?,
        Some(Command::List(list_cmd)) => {
            handle_list(&Roster::open(&data_file), &list_cmd, &mut stdout)?
        }
        Some(Command::Show(show_cmd)) => {
            handle_show(&Roster::open(&data_file), &show_cmd, &mut stdout)?
        }
        Some(Command::Config(config_cmd)) => {
            handle_config(&config, &config_cmd)?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    Ok(outcome.into())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Roster]");
                println!("  Data file:          {}", config.roster.data_file.display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
    }
    Ok(())
}
