use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use glance_core::{
    Config, ConditionIcon, LookupState, ViewState, WeatherProvider, WeatherQuery, WeatherReport,
    location, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "glance", version, about = "Weather lookup CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the platform config file.
    Configure,

    /// Show current weather for your location, or for a named city.
    Show {
        /// City name; when absent, the host's location is looked up.
        city: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(city: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut state = LookupState::new();

    let query = match city {
        Some(name) => {
            state.set_input(name);
            WeatherQuery::City(state.input().to_string())
        }
        None => match location::current_position().await {
            Ok(pos) => WeatherQuery::Coordinates {
                latitude: pos.latitude,
                longitude: pos.longitude,
            },
            Err(err) => {
                state.location_failed(&err);
                render(&state);

                let name = inquire::Text::new("City name:")
                    .prompt()
                    .context("Failed to read city name")?;
                state.set_input(name);
                WeatherQuery::City(state.input().to_string())
            }
        },
    };

    let ticket = state.begin_fetch();
    render(&state);

    let outcome = provider.fetch_weather(&query).await;
    state.finish_fetch(ticket, outcome);
    render(&state);

    exit_status(&state)
}

/// Fail the process when the lookup ended in an error view. The
/// user-facing message was already rendered by that point.
fn exit_status(state: &LookupState) -> Result<()> {
    match state.view() {
        ViewState::Error(_) => anyhow::bail!("weather lookup failed"),
        _ => Ok(()),
    }
}

fn render(state: &LookupState) {
    match state.view() {
        ViewState::Idle => {}
        ViewState::Loading => println!("Loading..."),
        ViewState::Error(message) => println!("{message}"),
        ViewState::Success(report) => print_report(report),
    }
}

fn print_report(report: &WeatherReport) {
    println!("{}", report.location_name);
    println!("{}°C", report.temperature_c);
    println!("Humidity: {}%", report.humidity_pct);
    match ConditionIcon::for_description(&report.condition) {
        Some(icon) => println!("{} {}", icon.glyph(), report.condition),
        None => println!("{}", report.condition),
    }
    println!("Icon: {}", report.icon_url);
}
