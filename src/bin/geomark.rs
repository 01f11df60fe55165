//! GeoMark desktop application.
//!
//! Interactive map viewer for drawing point, line, polygon, and circle
//! annotations with geodesic measurements.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use geomark_core::config::AppConfig;

/// GeoMark - interactive map viewer with annotations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GeoMark - Map Annotator",
        options,
        Box::new(move |cc| Ok(Box::new(geomark_gui::GeoMarkApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run GUI: {e}"))
}
