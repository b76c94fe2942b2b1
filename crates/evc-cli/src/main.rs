//! evc-atlas: explore Melbourne's pre-colonial vegetation districts
//!
//! Resolves a vegetation district (by EVC code, map click or WMS query) to
//! the plants that historically grew there.

mod commands;
mod config;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AtlasConfig;

#[derive(Parser)]
#[command(
    name = "evc-atlas",
    about = "Pre-colonial vegetation districts of Melbourne and their plants",
    version
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Plant catalog records endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Human-readable log output instead of JSON lines
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the vegetation type of an EVC code, or the whole table
    Lookup {
        /// EVC code, e.g. 132
        code: Option<String>,
    },

    /// Pick the catalog field that holds a vegetation type's ratings
    ResolveField {
        /// Vegetation type label
        #[arg(long)]
        vegetation_type: String,

        /// Available field names, in schema order
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// List the plants of an EVC, most certain first
    Plants {
        code: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Maximum number of plants
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Select the district under a point of a GeoJSON layer
    Click {
        /// EVC polygon layer
        #[arg(long)]
        geojson: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Also fetch the district's plants
        #[arg(long)]
        plants: bool,
    },

    /// Select the district under a point via WMS GetFeatureInfo
    Wms {
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Viewport as west,south,east,north
        #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
        bbox: Vec<f64>,

        /// Viewport width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Viewport height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// WMS endpoint (overrides the config file)
        #[arg(long)]
        wms_endpoint: Option<String>,

        /// WMS layer (overrides the config file)
        #[arg(long)]
        layer: Option<String>,

        /// Also fetch the district's plants
        #[arg(long)]
        plants: bool,
    },

    /// Lay out the diorama for an EVC
    Diorama {
        code: String,

        /// Seed for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AtlasConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.catalog.endpoint = endpoint;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let _guard = config.logging(cli.pretty).init()?;

    match cli.command {
        Command::Lookup { code } => commands::lookup(code.as_deref()),
        Command::ResolveField {
            vegetation_type,
            fields,
        } => commands::resolve_field(&vegetation_type, &fields),
        Command::Plants { code, json, limit } => {
            if let Some(limit) = limit {
                config.catalog = config.catalog.with_max_plants(limit);
            }
            commands::plants(&config, &code, json).await
        }
        Command::Click {
            geojson,
            lon,
            lat,
            plants,
        } => commands::click(&config, &geojson, lon, lat, plants).await,
        Command::Wms {
            lon,
            lat,
            bbox,
            width,
            height,
            wms_endpoint,
            layer,
            plants,
        } => {
            let wms = commands::wms_config(config.wms.clone(), wms_endpoint, layer)?;
            let viewport = commands::viewport(&bbox, width, height)?;
            commands::wms(&config, wms, lon, lat, viewport, plants).await
        }
        Command::Diorama { code, seed, json } => {
            commands::diorama(&config, &code, seed, json).await
        }
    }
}
