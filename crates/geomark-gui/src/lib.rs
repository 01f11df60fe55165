//! GUI application for the GeoMark map annotator.
//!
//! This crate provides a native desktop GUI built with egui/eframe: a
//! slippy base map, a four-mode drawing toolbar, geodesic measurement of
//! completed annotations, and a one-shot startup location marker.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use eframe::egui;
use geomark_core::config::AppConfig;
use geomark_core::store::VectorStore;
use geomark_core::types::DrawMode;

mod ui;

pub mod annotations;
pub mod draw;
pub mod geolocate;

pub use annotations::LocationMarker;
pub use draw::{DrawInteraction, MarkerStyle};
pub use geolocate::{GeoFix, Geolocator};

/// Main application state for the GeoMark GUI.
pub struct GeoMarkApp {
    /// Application configuration
    pub config: AppConfig,

    /// Completed annotation features
    pub store: Arc<Mutex<VectorStore>>,

    /// The single active drawing interaction
    pub draw: Arc<Mutex<DrawInteraction>>,

    /// Marker style for point features and the location marker
    pub marker_style: MarkerStyle,

    /// Location marker, once the position lookup has succeeded
    pub location: Option<LocationMarker>,

    /// One-shot position lookup
    pub geolocator: Geolocator,

    /// Map panel state
    pub map_panel: ui::map::MapPanelState,
}

impl GeoMarkApp {
    /// Creates the GeoMark application from a validated configuration.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let map_panel = ui::map::MapPanelState::new(config.map.center(), config.map.zoom);

        Self {
            store: Arc::new(Mutex::new(VectorStore::new())),
            draw: Arc::new(Mutex::new(DrawInteraction::new(DrawMode::default()))),
            marker_style: MarkerStyle::default(),
            location: None,
            geolocator: Geolocator::new(),
            map_panel,
            config,
        }
    }

    /// The active draw mode.
    pub fn draw_mode(&self) -> DrawMode {
        self.draw.lock().unwrap().mode()
    }

    /// Selects a draw mode, tearing down the previous interaction.
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.draw.lock().unwrap().set_mode(mode);
    }

    /// Removes all annotation features and any in-progress sketch.
    pub fn clear_annotations(&mut self) {
        self.store.lock().unwrap().clear();
        self.draw.lock().unwrap().cancel();
    }

    /// Kicks off the one-shot position lookup and applies its result
    /// when it lands. Failure leaves the view untouched.
    fn poll_geolocation(&mut self) {
        if self.config.geolocation.enabled {
            self.geolocator.request(&self.config.geolocation);
        }

        if let Some(result) = self.geolocator.poll() {
            match result {
                Ok(fix) => {
                    tracing::info!(
                        lat = fix.position.lat,
                        lon = fix.position.lon,
                        "located current position"
                    );
                    self.map_panel
                        .center_on(fix.position, self.config.geolocation.zoom);
                    self.location = Some(LocationMarker::new(fix.position, fix.label));
                }
                Err(e) => tracing::debug!("position lookup failed: {}", e),
            }
        }
    }
}

impl eframe::App for GeoMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_geolocation();

        // Top panel with the draw-mode toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.heading("🗺 GeoMark");

                ui.separator();

                for mode in DrawMode::ALL {
                    if ui
                        .selectable_label(self.draw_mode() == mode, mode.to_string())
                        .clicked()
                    {
                        self.set_draw_mode(mode);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Clear").clicked() {
                        self.clear_annotations();
                    }
                });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Mode: {}", self.draw_mode()));
                ui.separator();
                ui.label(format!("{} annotation(s)", self.store.lock().unwrap().len()));
                if self.draw.lock().unwrap().is_sketching() {
                    ui.separator();
                    ui.label(
                        egui::RichText::new("double-click finishes, Esc cancels")
                            .small()
                            .color(egui::Color32::GRAY),
                    );
                }
            });
        });

        // Main content
        egui::CentralPanel::default().show(ctx, |ui| ui::map::show(ui, self));

        // Keep polling while the position lookup is in flight
        if self.geolocator.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}
