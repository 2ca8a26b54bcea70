//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "rate_limit.requests_per_sec")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.validate()?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[upstream]");
    println!("url = \"{}\"", config.upstream.url);
    if config.upstream.api_key.is_empty() {
        println!("api_key = \"\" # not configured");
    } else {
        println!("api_key = \"***\" # configured");
    }
    println!();

    println!("[legacy]");
    println!("url = \"{}\"", config.legacy.url);
    println!();

    println!("[rate_limit]");
    println!("requests_per_sec = {}", config.rate_limit.requests_per_sec);
    println!("coordinate_precision = {}", config.rate_limit.coordinate_precision);
    println!();

    println!("[cache]");
    println!("state_dir = \"{}\" # {}", config.cache.state_dir, config.cache.state_dir().display());
    println!("slot_name = \"{}\"", config.cache.slot_name);
    println!();

    println!("[language]");
    println!("default = \"{}\"", config.language.default);
    println!();

    println!("[language.countries]");
    let mut countries: Vec<_> = config.language.countries.iter().collect();
    countries.sort();
    for (country, language) in countries {
        println!("{} = \"{}\"", country, language);
    }
    println!();

    println!("[overrides]");
    println!("ignore_region = {:?}", config.overrides.ignore_region);
    println!("prefer_municipality = {:?}", config.overrides.prefer_municipality);
    println!("prefer_city_district = {:?}", config.overrides.prefer_city_district);
    println!("prefer_suburb_as_city = {:?}", config.overrides.prefer_suburb_as_city);
    println!("prefer_neighbourhood = {:?}", config.overrides.prefer_neighbourhood);
}
