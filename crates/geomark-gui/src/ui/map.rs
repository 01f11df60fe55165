//! Map panel: base tile layer, annotations, and the drawing interaction.

use std::sync::{Arc, Mutex};

use eframe::egui;
use geomark_core::config::TileConfig;
use geomark_core::measure::{measure, Measurement};
use geomark_core::types::{GeoPoint, Geometry};
use walkers::sources::{Attribution, TileSource};
use walkers::{HttpTiles, Map, MapMemory, TileId};

use crate::annotations::AnnotationsPlugin;
use crate::draw::DrawPlugin;
use crate::GeoMarkApp;

/// Tile source built from the configured URL template.
struct ConfiguredTileSource {
    url: String,
    attribution: &'static str,
}

impl ConfiguredTileSource {
    fn new(config: &TileConfig) -> Self {
        // Attribution requires 'static text; the source is built once
        // per app run, so leaking the string is acceptable.
        let attribution: &'static str = Box::leak(config.attribution.clone().into_boxed_str());
        Self {
            url: config.url.clone(),
            attribution,
        }
    }
}

impl TileSource for ConfiguredTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.url
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: self.attribution,
            url: "",
            logo_light: None,
            logo_dark: None,
        }
    }
}

/// Map panel state.
pub struct MapPanelState {
    /// HTTP tile downloader (lazy initialized)
    pub tiles: Option<HttpTiles>,
    /// Map view state (center, zoom)
    pub memory: MapMemory,
    /// Initial view center, shown until the view is moved
    home: walkers::Position,
    /// Recenter request applied on the next frame
    pending_center: Option<(GeoPoint, f64)>,
}

impl MapPanelState {
    /// Creates the panel with the configured initial view.
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        let mut memory = MapMemory::default();
        let _ = memory.set_zoom(zoom);
        Self {
            tiles: None,
            memory,
            home: walkers::lon_lat(center.lon, center.lat),
            pending_center: None,
        }
    }

    /// Queues a recenter and zoom, applied when the panel next renders.
    pub fn center_on(&mut self, position: GeoPoint, zoom: f64) {
        self.pending_center = Some((position, zoom));
    }

    fn ensure_tiles(&mut self, ctx: &egui::Context, config: &TileConfig) {
        if self.tiles.is_none() {
            self.tiles = Some(HttpTiles::new(
                ConfiguredTileSource::new(config),
                ctx.clone(),
            ));
        }
    }
}

/// Shows the map panel.
pub fn show(ui: &mut egui::Ui, app: &mut GeoMarkApp) {
    let ctx = ui.ctx().clone();
    app.map_panel.ensure_tiles(&ctx, &app.config.tiles);

    if let Some((position, zoom)) = app.map_panel.pending_center.take() {
        app.map_panel
            .memory
            .center_at(walkers::lon_lat(position.lon, position.lat));
        let _ = app.map_panel.memory.set_zoom(zoom);
    }

    let map_rect = ui.available_rect_before_wrap();
    let completed: Arc<Mutex<Vec<Geometry>>> = Arc::default();

    let annotations = AnnotationsPlugin {
        features: app.store.lock().unwrap().features().to_vec(),
        location: app.location.clone(),
        marker: app.marker_style,
        map_rect,
    };
    let drawing = DrawPlugin {
        interaction: app.draw.clone(),
        completed: completed.clone(),
        marker: app.marker_style,
        map_rect,
    };

    let home = app.map_panel.home;
    if let Some(tiles) = app.map_panel.tiles.as_mut() {
        ui.add(
            Map::new(Some(tiles), &mut app.map_panel.memory, home)
                .with_plugin(annotations)
                .with_plugin(drawing),
        );
    }

    // Attribution at the bottom right of the map area
    ui.painter().text(
        map_rect.max - egui::vec2(5.0, 5.0),
        egui::Align2::RIGHT_BOTTOM,
        &app.config.tiles.attribution,
        egui::FontId::proportional(10.0),
        egui::Color32::from_black_alpha(150),
    );

    // Draw-end handling: measure the geometry, log the result, keep the
    // feature.
    for geometry in completed.lock().unwrap().drain(..) {
        match measure(&geometry) {
            Some(m @ Measurement::Area(_)) => tracing::info!("Area: {}", m),
            Some(m @ Measurement::Length(_)) => tracing::info!("Length: {}", m),
            None => {}
        }
        app.store.lock().unwrap().add(geometry);
    }
}
