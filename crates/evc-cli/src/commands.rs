//! Subcommand implementations

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use evc_catalog::{HttpCatalog, PlantFetcher};
use evc_core::{resolve_field as pick_field, Selection, VegetationCode, EVC_TABLE};
use evc_map::{VegetationLayer, Viewport, WmsClient, WmsConfig};
use evc_store::{Diorama, MapStore, ViewMode};

use crate::config::AtlasConfig;
use crate::render;

fn fetcher(config: &AtlasConfig) -> Result<PlantFetcher<HttpCatalog>> {
    let catalog = HttpCatalog::new(&config.catalog).context("Failed to set up catalog client")?;
    Ok(PlantFetcher::new(catalog, config.catalog.clone()))
}

pub fn lookup(code: Option<&str>) -> Result<()> {
    match code {
        Some(code) => {
            let code = VegetationCode::new(code);
            print!("{}", render::lookup(&code, evc_core::lookup(&code)));
        }
        None => print!("{}", render::table(EVC_TABLE)),
    }
    Ok(())
}

pub fn resolve_field(vegetation_type: &str, fields: &[String]) -> Result<()> {
    match pick_field(fields.iter().map(String::as_str), vegetation_type) {
        Some(field) => println!("{field}"),
        None => println!("No field matches \"{vegetation_type}\""),
    }
    Ok(())
}

pub async fn plants(config: &AtlasConfig, code: &str, json: bool) -> Result<()> {
    let fetcher = fetcher(config)?;
    let code = VegetationCode::new(code);

    let plants = match fetcher.try_fetch_plants(&code).await {
        Ok(query) => {
            info!(
                field = %query.field,
                pages = query.pages_fetched,
                scanned = query.records_scanned,
                stop = ?query.stop,
                "Plant query finished"
            );
            query.plants
        }
        Err(e) => {
            warn!(code = %code, error = %e, "Plant lookup failed");
            Vec::new()
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plants)?);
    } else if plants.is_empty() {
        println!("No plants shown for EVC {code}");
    } else {
        print!("{}", render::plant_list(&plants));
    }
    Ok(())
}

/// Select `selection` in a fresh store, optionally fetch plants, print the panel
async fn show_selection(config: &AtlasConfig, selection: Selection, with_plants: bool) -> Result<()> {
    let store = MapStore::new(fetcher(config)?);
    store.select_code(selection);
    if with_plants {
        store.request_plants().await;
    }
    print!("{}", render::info_panel(&store.snapshot()));
    Ok(())
}

pub async fn click(
    config: &AtlasConfig,
    geojson: &Path,
    lon: f64,
    lat: f64,
    with_plants: bool,
) -> Result<()> {
    let layer = VegetationLayer::load(geojson)
        .with_context(|| format!("Failed to load {}", geojson.display()))?;

    match layer.selection_at(lon, lat) {
        Some(selection) => show_selection(config, selection, with_plants).await,
        None => {
            println!("No vegetation district at ({lon}, {lat})");
            Ok(())
        }
    }
}

/// WMS settings from the config file with command-line overrides
pub fn wms_config(
    from_file: Option<WmsConfig>,
    endpoint: Option<String>,
    layer: Option<String>,
) -> Result<WmsConfig> {
    let endpoint = endpoint
        .or_else(|| from_file.as_ref().map(|c| c.endpoint.clone()))
        .ok_or_else(|| anyhow!("No WMS endpoint: pass --wms-endpoint or set [wms] in the config"))?;
    let layer = layer
        .or_else(|| from_file.as_ref().map(|c| c.layer.clone()))
        .ok_or_else(|| anyhow!("No WMS layer: pass --layer or set [wms] in the config"))?;
    Ok(WmsConfig { endpoint, layer })
}

pub fn viewport(bbox: &[f64], width: u32, height: u32) -> Result<Viewport> {
    let &[west, south, east, north] = bbox else {
        bail!("--bbox needs four values: west,south,east,north");
    };
    Ok(Viewport::new(west, south, east, north, width, height)?)
}

pub async fn wms(
    config: &AtlasConfig,
    wms: WmsConfig,
    lon: f64,
    lat: f64,
    viewport: Viewport,
    with_plants: bool,
) -> Result<()> {
    let client = WmsClient::new(wms);
    match client.feature_info(lon, lat, viewport).await? {
        Some(selection) => show_selection(config, selection, with_plants).await,
        None => {
            println!("No vegetation district at ({lon}, {lat})");
            Ok(())
        }
    }
}

pub async fn diorama(config: &AtlasConfig, code: &str, seed: Option<u64>, json: bool) -> Result<()> {
    let store = MapStore::new(fetcher(config)?);
    store.select_code(Selection::new(code));
    store.request_plants().await;
    store.set_view_mode(ViewMode::Diorama);

    let plants = store.snapshot().plants;
    let scene = match seed {
        Some(seed) => Diorama::seeded(&plants, seed),
        None => Diorama::compose(&plants, &mut rand::rng()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        print!("{}", render::diorama(&scene));
    }
    Ok(())
}
