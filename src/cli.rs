use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::config::Config;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Football prediction API server
///
/// Serves team, fantasy and match prediction documents from a document store,
/// plus two derived views that classify each prediction into a betting outcome.
/// Store responses are cached in memory per category.
///
/// Endpoints:
/// - GET /api/teams, /api/fantasy, /api/predictions
/// - GET /api/scorepredictions, /api/riskpredictions
/// - GET /api/health
#[derive(Parser, Debug, Default)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Address to listen on, e.g. 0.0.0.0:5000. Overrides the configured address.
    #[arg(long = "bind", short = 'b', help_heading = "Server")]
    pub bind: Option<String>,

    /// Season whose team data is served. Overrides the configured season.
    #[arg(long = "season", short = 's', help_heading = "Server")]
    pub season: Option<i32>,

    /// Seconds a cached response stays fresh. Overrides the configured TTL.
    #[arg(long = "cache-ttl", help_heading = "Server")]
    pub cache_ttl: Option<u64>,

    /// Store the document store API domain in the config file and exit.
    #[arg(long = "config", help_heading = "Configuration", value_name = "API_DOMAIN")]
    pub new_api_domain: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Log at debug level for this crate.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// True when the run only touches the config file and exits.
    pub fn is_config_command(&self) -> bool {
        self.list_config || self.new_api_domain.is_some()
    }

    /// Applies command line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.bind_address = bind.clone();
        }
        if let Some(season) = self.season {
            config.season = season;
        }
        if let Some(ttl) = self.cache_ttl {
            config.cache_ttl_seconds = ttl;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file_path = Some(log_file.clone());
        }
    }
}
