// src/main.rs

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use lcprob_lib::config::{self, Config};
use lcprob_lib::database;
use lcprob_lib::models::ResponseAction;
use lcprob_lib::session::{self, BrowserOpener, SystemClock};
use log::{debug, info};
use std::io;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        self == Toggle::On
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "lcprob",
    version,
    about = "Randomly select a coding-interview problem to work on."
)]
struct Cli {
    /// Turn spaced-repetition selection on or off, save it, and exit.
    #[arg(short = 'r', long = "repetition", value_enum)]
    repetition: Option<Toggle>,

    /// Turn opening the problem link in a browser on or off, save it, and exit.
    #[arg(long = "open-browser", value_enum)]
    open_browser: Option<Toggle>,

    /// Problems CSV file.
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    debug!("{:?}", cli);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    let toggled = config
        .apply_toggles(
            &config_path,
            cli.repetition.map(Toggle::enabled),
            cli.open_browser.map(Toggle::enabled),
        )
        .with_context(|| format!("Failed to save config to {:?}", config_path))?;
    if toggled {
        println!(
            "Spaced repetition: {}, open browser: {}",
            on_off(config.spaced_rep),
            on_off(config.open_browser)
        );
        return Ok(());
    }

    let data_path = match cli.data {
        Some(path) => path,
        None => config::default_problems_path()?,
    };
    info!("Starting session (spaced repetition {})", on_off(config.spaced_rep));
    let mut store = database::load_store(&data_path)
        .with_context(|| format!("Failed to load problems from {:?}", data_path))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let outcome = session::run_session(
        &mut store,
        &config,
        &mut rand::thread_rng(),
        &SystemClock,
        &BrowserOpener,
        &mut input,
        &mut output,
    )?;

    database::save_store(&data_path, &store)
        .with_context(|| format!("Failed to save problems to {:?}", data_path))?;

    match outcome.action {
        ResponseAction::Completed { number, tier } if config.spaced_rep => {
            println!("Problem {} completed (review tier {}).", number, tier)
        }
        ResponseAction::Completed { number, .. } => println!("Problem {} completed.", number),
        ResponseAction::Uncompleted { number } => {
            println!("Problem {} marked as not completed.", number)
        }
        ResponseAction::ResetAll => println!("All progress reset."),
        ResponseAction::Skipped => {}
    }
    Ok(())
}
