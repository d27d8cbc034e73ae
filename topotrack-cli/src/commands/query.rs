use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use topotrack::ElevationService;

#[derive(Serialize)]
struct ElevationResponse {
    lat: f64,
    lon: f64,
    elevation: Option<i16>,
}

pub fn run(data_dir: Option<PathBuf>, lat: f64, lon: f64, json: bool) -> Result<()> {
    let data_dir = super::require_data_dir(data_dir)?;
    let service = ElevationService::new(data_dir);

    let elevation = service
        .elevation(lat, lon)
        .context("Failed to get elevation")?;

    if json {
        let response = ElevationResponse {
            lat,
            lon,
            elevation,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        match elevation {
            Some(elev) => println!("{elev}"),
            None => println!("void"),
        }
    }

    Ok(())
}
