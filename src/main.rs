//! geomark - plot coordinates onto a calibrated reference image
//!
//! Example entry point: loads the mapper for a directory and marks a few sample points.

use geomark::{AppSettings, CoordinateMapper};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut settings = AppSettings::load();

    // Environment overrides the persisted settings
    if let Ok(dir) = env::var("GEOMARK_DIR") {
        settings.directory = dir;
    }
    if let Some(width) = env::var("GEOMARK_DISPLAY_WIDTH").ok().and_then(|s| s.parse().ok()) {
        settings.display_width = width;
    }
    if let Some(height) = env::var("GEOMARK_DISPLAY_HEIGHT").ok().and_then(|s| s.parse().ok()) {
        settings.display_height = height;
    }
    if let Ok(show) = env::var("GEOMARK_SHOW") {
        settings.show = show == "1" || show.to_lowercase() == "true";
    }

    println!("🗺️  geomark");
    println!("================================================");
    println!("Directory: {}", settings.directory);
    println!("Display: {}x{}", settings.display_width, settings.display_height);
    println!("================================================\n");

    let mapper = CoordinateMapper::with_config(&settings.directory, settings.to_mapper_config())?;

    let range = mapper.coordinate_range();
    println!("Coordinate range:\n{}", serde_json::to_string_pretty(&range)?);

    let sample = [
        (117.625616938, 36.000582576),
        (117.615423202, 36.005922854),
        (117.636689097, 35.995920897),
    ];
    for &(lon, lat) in &sample {
        match mapper.to_pixel((lon, lat)) {
            Some(pixel) => println!("📍 ({lon}, {lat}) -> ({}, {})", pixel.x, pixel.y),
            None => println!("📍 ({lon}, {lat}) -> no pixel position"),
        }
    }

    let annotated = mapper.draw(sample, &settings.to_draw_options());
    println!("\n✅ Annotated image: {}x{}", annotated.width(), annotated.height());

    Ok(())
}
