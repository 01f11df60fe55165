//! The drawing interaction: mode-dependent pointer gestures on the map.
//!
//! Exactly one interaction is active at a time. Selecting a mode resets
//! the in-progress sketch; completing a gesture hands the finished
//! geometry back to the map panel, which stores and measures it.

use std::sync::{Arc, Mutex};

use eframe::egui;
use geomark_core::measure;
use geomark_core::types::{DrawMode, GeoPoint, Geometry};
use walkers::{MapMemory, Plugin, Projector};

/// Visual style of the annotation being drawn, fixed per mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    /// Outline stroke, if the mode draws one
    pub stroke: Option<egui::Stroke>,
    /// Interior fill, if the mode draws one
    pub fill: Option<egui::Color32>,
    /// Radius of sketch vertex dots
    pub vertex_radius: f32,
    /// Marker for point features, if the mode places one
    pub marker: Option<MarkerStyle>,
}

/// Style of the pin marker used for point features.
///
/// The pin is painter-drawn and anchored bottom-center, like a classic
/// map-marker icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Pin body color
    pub color: egui::Color32,
    /// Pin height in pixels
    pub size: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: egui::Color32::from_rgb(0xdc, 0x14, 0x3c),
            size: 28.0,
        }
    }
}

const ANNOTATION_RED: egui::Color32 = egui::Color32::RED;

/// Returns the drawing style for a mode. The marker override replaces
/// the default point marker for Point mode only.
pub fn style_for(mode: DrawMode, marker_override: Option<MarkerStyle>) -> DrawStyle {
    let stroke = egui::Stroke::new(2.0, ANNOTATION_RED);
    match mode {
        DrawMode::LineString => DrawStyle {
            stroke: Some(stroke),
            fill: None,
            vertex_radius: 5.0,
            marker: None,
        },
        DrawMode::Polygon => DrawStyle {
            stroke: Some(stroke),
            fill: Some(egui::Color32::from_rgba_unmultiplied(255, 0, 0, 51)),
            vertex_radius: 5.0,
            marker: None,
        },
        DrawMode::Circle => DrawStyle {
            stroke: Some(stroke),
            fill: None,
            vertex_radius: 5.0,
            marker: None,
        },
        DrawMode::Point => DrawStyle {
            stroke: None,
            fill: None,
            vertex_radius: 10.0,
            marker: marker_override,
        },
    }
}

/// State of the single active drawing interaction.
#[derive(Debug, Clone)]
pub struct DrawInteraction {
    mode: DrawMode,
    sketch: Vec<GeoPoint>,
    preview: Option<GeoPoint>,
}

impl DrawInteraction {
    /// Creates an interaction in the given mode with an empty sketch.
    pub fn new(mode: DrawMode) -> Self {
        Self {
            mode,
            sketch: Vec::new(),
            preview: None,
        }
    }

    /// The active draw mode.
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Switches mode. The previous interaction is torn down: the sketch
    /// and preview are discarded and the gesture starts over.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if self.mode != mode {
            self.mode = mode;
            self.cancel();
        }
    }

    /// Vertices placed so far in the current gesture.
    pub fn sketch(&self) -> &[GeoPoint] {
        &self.sketch
    }

    /// Returns true if a gesture is underway.
    pub fn is_sketching(&self) -> bool {
        !self.sketch.is_empty()
    }

    /// Updates the live pointer position used for gesture previews.
    pub fn set_preview(&mut self, position: Option<GeoPoint>) {
        self.preview = position;
    }

    /// The live pointer position, if the pointer is over the map.
    pub fn preview(&self) -> Option<GeoPoint> {
        self.preview
    }

    /// Feeds a primary click at a map position. Returns the completed
    /// geometry when the click finishes the gesture.
    pub fn click(&mut self, position: GeoPoint) -> Option<Geometry> {
        match self.mode {
            DrawMode::Point => Some(Geometry::Point(position)),
            DrawMode::Circle => {
                if let Some(center) = self.sketch.first().copied() {
                    let radius = measure::distance(center, position);
                    self.cancel();
                    Some(Geometry::Circle { center, radius })
                } else {
                    self.sketch.push(position);
                    None
                }
            }
            DrawMode::LineString | DrawMode::Polygon => {
                self.sketch.push(position);
                None
            }
        }
    }

    /// Finishes a vertex gesture (double-click). Sketches below the
    /// mode's minimum vertex count are discarded without a geometry.
    pub fn finish(&mut self) -> Option<Geometry> {
        if self.sketch.len() < self.mode.min_vertices() {
            self.cancel();
            return None;
        }

        match self.mode {
            DrawMode::LineString => {
                let vertices = std::mem::take(&mut self.sketch);
                self.preview = None;
                Some(Geometry::LineString(vertices))
            }
            DrawMode::Polygon => {
                let vertices = std::mem::take(&mut self.sketch);
                self.preview = None;
                Some(Geometry::Polygon(vertices))
            }
            // Point and Circle complete through click(), never here.
            DrawMode::Point | DrawMode::Circle => None,
        }
    }

    /// Cancels the in-progress sketch.
    pub fn cancel(&mut self) {
        self.sketch.clear();
        self.preview = None;
    }
}

impl Default for DrawInteraction {
    fn default() -> Self {
        Self::new(DrawMode::default())
    }
}

/// Map plugin feeding pointer events into the drawing interaction and
/// rendering the in-progress sketch.
pub struct DrawPlugin {
    /// Shared handle to the single active interaction
    pub interaction: Arc<Mutex<DrawInteraction>>,
    /// Geometries completed this frame, drained by the map panel
    pub completed: Arc<Mutex<Vec<Geometry>>>,
    /// Marker style applied to point features
    pub marker: MarkerStyle,
    /// Map viewport for clipping
    pub map_rect: egui::Rect,
}

impl Plugin for DrawPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let mut interaction = self.interaction.lock().unwrap();

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            interaction.cancel();
        }

        interaction.set_preview(
            response
                .hover_pos()
                .map(|pos| unproject(projector, pos)),
        );

        if response.double_clicked() {
            if let Some(geometry) = interaction.finish() {
                self.completed.lock().unwrap().push(geometry);
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(geometry) = interaction.click(unproject(projector, pos)) {
                    self.completed.lock().unwrap().push(geometry);
                }
            }
        }

        let painter = ui.painter().with_clip_rect(self.map_rect);
        paint_sketch(&painter, projector, &interaction, Some(self.marker));
    }
}

/// Converts a screen position to a map position.
pub fn unproject(projector: &Projector, pos: egui::Pos2) -> GeoPoint {
    let position = projector.unproject(pos.to_vec2());
    GeoPoint::new(position.x(), position.y())
}

/// Converts a map position to a screen position.
pub fn project(projector: &Projector, position: GeoPoint) -> egui::Pos2 {
    let projected = projector.project(walkers::lon_lat(position.lon, position.lat));
    egui::pos2(projected.x, projected.y)
}

/// On-screen radius of a circle of `radius_m` meters around `center`.
pub fn pixel_radius(projector: &Projector, center: GeoPoint, radius_m: f64) -> f32 {
    let edge = measure::destination(center, 90.0, radius_m);
    project(projector, center).distance(project(projector, edge))
}

fn paint_sketch(
    painter: &egui::Painter,
    projector: &Projector,
    interaction: &DrawInteraction,
    marker_override: Option<MarkerStyle>,
) {
    if !interaction.is_sketching() {
        return;
    }

    let style = style_for(interaction.mode(), marker_override);
    let stroke = style
        .stroke
        .unwrap_or(egui::Stroke::new(2.0, ANNOTATION_RED));
    let screen: Vec<egui::Pos2> = interaction
        .sketch()
        .iter()
        .map(|p| project(projector, *p))
        .collect();
    let preview = interaction.preview().map(|p| project(projector, p));

    match interaction.mode() {
        DrawMode::LineString | DrawMode::Polygon => {
            for pair in screen.windows(2) {
                painter.line_segment([pair[0], pair[1]], stroke);
            }
            if let Some(fill) = style.fill {
                if screen.len() >= 3 {
                    painter.add(egui::Shape::convex_polygon(
                        screen.clone(),
                        fill,
                        egui::Stroke::NONE,
                    ));
                }
            }
            if let (Some(last), Some(pointer)) = (screen.last(), preview) {
                painter.extend(egui::Shape::dashed_line(
                    &[*last, pointer],
                    stroke,
                    6.0,
                    4.0,
                ));
            }
        }
        DrawMode::Circle => {
            // Center placed; preview the radius under the pointer.
            if let (Some(center), Some(pointer), Some(pointer_geo)) =
                (interaction.sketch().first(), preview, interaction.preview())
            {
                let radius_m = measure::distance(*center, pointer_geo);
                let center_px = project(projector, *center);
                painter.circle_stroke(
                    center_px,
                    pixel_radius(projector, *center, radius_m),
                    stroke,
                );
                painter.extend(egui::Shape::dashed_line(
                    &[center_px, pointer],
                    stroke,
                    6.0,
                    4.0,
                ));
            }
        }
        DrawMode::Point => {}
    }

    for pos in &screen {
        painter.circle_filled(*pos, style.vertex_radius, ANNOTATION_RED);
        painter.circle_stroke(
            *pos,
            style.vertex_radius,
            egui::Stroke::new(2.0, egui::Color32::WHITE),
        );
    }
}
