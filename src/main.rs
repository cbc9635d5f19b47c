use clap::Parser;
use scoreline_api::cli::Args;
use scoreline_api::config::{Config, normalize_api_domain};
use scoreline_api::error::AppError;
use scoreline_api::{app, logging};
use std::path::Path;

/// Writes a new API domain to the config file, keeping any other stored values.
async fn store_api_domain(api_domain: &str) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = if Path::new(&config_path).exists() {
        Config::load_from_path(&config_path).await?
    } else {
        Config::default()
    };

    config.api_domain = normalize_api_domain(api_domain);
    config.validate()?;
    config.save().await?;

    println!("Config updated successfully!");
    println!("API domain: {}", config.api_domain);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.is_config_command() {
        if let Some(api_domain) = &args.new_api_domain {
            store_api_domain(api_domain).await?;
        }
        if args.list_config {
            Config::display().await?;
        }
        return Ok(());
    }

    let mut config = Config::load().await?;
    args.apply_to(&mut config);
    config.validate()?;

    let (log_file_path, _guard) =
        logging::setup_logging(config.log_file_path.as_deref(), args.debug).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    app::run_server(&config).await
}
