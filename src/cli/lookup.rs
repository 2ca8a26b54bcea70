//! Lookup command handler
//!
//! Resolves one coordinate pair through the upstream provider and prints
//! the legacy response, without starting the server.

use crate::assembler::GeoDataAssembler;
use crate::cache::store::MemoryStateStore;
use crate::cache::ResultCache;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::{debug_json, place_name_xml, postal_code_xml};
use crate::geo::opencage::OpenCageBackend;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

/// Response shape to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupFormat {
    /// findNearbyPlaceName XML
    Place,
    /// findNearbyPostalCodes XML
    Postal,
    /// Raw and normalized records as JSON
    Debug,
}

/// Lookup command arguments
#[derive(Args)]
pub struct LookupArgs {
    /// Latitude
    #[arg(allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(allow_hyphen_values = true)]
    pub lng: f64,

    /// Upstream language (defaults to the configured default language)
    #[arg(long, short = 'l')]
    pub lang: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "place")]
    pub format: LookupFormat,

    /// Use this config file instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

/// Run the lookup command
pub async fn run(args: LookupArgs) -> Result<()> {
    super::init_logging("warn");

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate()?;

    let started = Instant::now();
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;
    let coords = coords.rounded(config.rate_limit.coordinate_precision);
    let lang = args.lang.unwrap_or_else(|| config.language.default.clone());

    let backend = OpenCageBackend::with_base_url(
        config.upstream.url.clone(),
        config.upstream.api_key.clone(),
    )?;
    let cache = ResultCache::new(Box::new(MemoryStateStore::new()), config.cache.slot_name.clone());
    let assembler = GeoDataAssembler::new(backend, cache, config.overrides.clone());

    let resolution = assembler.resolve(coords, &lang).await?;

    let output = match args.format {
        LookupFormat::Place => place_name_xml(&resolution.place),
        LookupFormat::Postal => postal_code_xml(&resolution.place),
        LookupFormat::Debug => debug_json(&resolution, started.elapsed().as_secs_f64())?,
    };
    print!("{}", output);

    Ok(())
}
