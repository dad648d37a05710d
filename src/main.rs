mod analytics;
mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod logging;
mod network;
mod runtime;
mod session;
mod storage;
mod theme;
mod ui;
mod workers;

use crate::analytics::{AnalyticsClient, AnalyticsFilter};
use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::analytics_fetching;
use crate::environment::Environment;
use crate::network::NetworkClient;
use crate::session::messages::print_missing_session_hint;
use crate::session::{
    open_preference_storage, run_analytics_once, run_headless_mode, run_tui_mode, setup_session,
};
use crate::theme::{SubscriberError, ThemePreference, ThemePreferenceStore};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal client for the clinic placement analytics dashboard
struct Args {
    /// Dashboard base URL, e.g. https://clinic.example.org
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Placement filters shared by `dashboard` and `analytics`
#[derive(clap::Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Only placements starting on or after this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    /// Only placements starting on or before this date
    #[arg(long, value_name = "YYYY-MM-DD")]
    end_date: Option<NaiveDate>,

    #[arg(long)]
    department: Option<String>,

    #[arg(long)]
    specialty: Option<String>,

    #[arg(long, value_parser = ["AM", "MD", "PM", "CLOSED"])]
    shift: Option<String>,

    /// Employment status
    #[arg(long, value_parser = ["Full Time", "Part Time"])]
    status: Option<String>,
}

impl From<FilterArgs> for AnalyticsFilter {
    fn from(args: FilterArgs) -> Self {
        AnalyticsFilter {
            start_date: args.start_date,
            end_date: args.end_date,
            department: args.department,
            specialty: args.specialty,
            shift: args.shift,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,

        /// Keep the terminal's own background colour
        #[arg(long)]
        no_background: bool,
    },
    /// Print placement analytics to the console
    Analytics {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,

        /// Keep refreshing and log every update until Ctrl+C
        #[arg(long, conflicts_with = "json")]
        watch: bool,
    },
    /// Show or toggle the dashboard theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },
    /// Store the dashboard session cookie
    Login {
        /// Value of the `sessionid` cookie of a logged-in dashboard user
        #[arg(long, value_name = "SESSION_ID")]
        session_id: String,
    },
    /// Clear the stored session and configuration
    Logout,
}

#[derive(Subcommand)]
enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_log_level();

    let args = Args::parse();
    match args.command {
        Command::Dashboard {
            filter,
            no_background,
        } => {
            let config = Config::load_or_default(&get_config_path()?)?;
            let environment = Environment::resolve(args.api_url.as_deref(), config.api_url.as_deref());
            if config.session_id.is_none() {
                print_missing_session_hint();
            }
            let session = setup_session(
                &config,
                environment,
                filter.into(),
                open_preference_storage(),
            )?;
            run_tui_mode(session, !no_background).await
        }
        Command::Analytics {
            filter,
            json,
            watch,
        } => {
            let config = Config::load_or_default(&get_config_path()?)?;
            let environment = Environment::resolve(args.api_url.as_deref(), config.api_url.as_deref());
            let filter: AnalyticsFilter = filter.into();

            if watch {
                let session =
                    setup_session(&config, environment, filter, open_preference_storage())?;
                return run_headless_mode(session).await;
            }

            let client = AnalyticsClient::new(environment, config.session_id.clone())?;
            let network_client = NetworkClient::new(
                analytics_fetching::MAX_RETRIES,
                analytics_fetching::initial_backoff(),
            );
            if let Err(e) = run_analytics_once(&client, &network_client, &filter, json).await {
                print_cmd_error!("Failed to fetch analytics", &e.to_string());
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Theme { action } => {
            let store = ThemePreferenceStore::new(open_preference_storage());
            match action {
                ThemeCommand::Show => println!("{}", store.get_current()),
                ThemeCommand::Toggle => {
                    let _ = store.subscribe(
                        |theme: ThemePreference| -> Result<(), SubscriberError> {
                            print_cmd_success!("Theme switched", "{}", theme);
                            Ok(())
                        },
                    );
                    store.toggle();
                }
            }
            Ok(())
        }
        Command::Login { session_id } => {
            let config_path = get_config_path()?;
            let mut config = Config::load_or_default(&config_path)?;
            config.session_id = Some(session_id);
            if let Some(url) = args.api_url {
                if url.parse::<Environment>().is_err() {
                    return Err(Box::from(format!(
                        "Invalid API URL: {}. It should start with http:// or https://",
                        url
                    )));
                }
                config.api_url = Some(url);
            }
            config
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Logged in", "session saved to {}", config_path.display());
            Ok(())
        }
        Command::Logout => {
            let config_path = get_config_path()?;
            print_cmd_info!("Logging out", "clearing {}", config_path.display());
            Config::clear_config(&config_path).map_err(Into::into)
        }
    }
}
