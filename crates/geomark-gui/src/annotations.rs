//! Rendering of completed annotations and the location marker popup.

use eframe::egui;
use geomark_core::types::{Feature, GeoPoint, Geometry};
use walkers::{MapMemory, Plugin, Projector};

use crate::draw::{pixel_radius, project, style_for, MarkerStyle};

/// The ephemeral marker placed from the geolocation result, with its
/// popup overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMarker {
    /// Located position
    pub position: GeoPoint,
    /// Optional place label (city, region, country)
    pub label: Option<String>,
}

impl LocationMarker {
    /// Creates a marker at the located position.
    pub fn new(position: GeoPoint, label: Option<String>) -> Self {
        Self { position, label }
    }

    /// Lines of the popup overlay, heading first.
    pub fn popup_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Your Current Location".to_string(),
            format!("Latitude: {}", self.position.lat),
            format!("Longitude: {}", self.position.lon),
        ];
        if let Some(label) = &self.label {
            lines.push(label.clone());
        }
        lines
    }
}

/// Map plugin drawing completed features, the location marker, and its
/// popup overlay.
pub struct AnnotationsPlugin {
    /// Snapshot of the vector store for this frame
    pub features: Vec<Feature>,
    /// Location marker, once geolocation has succeeded
    pub location: Option<LocationMarker>,
    /// Marker style applied to point features
    pub marker: MarkerStyle,
    /// Map viewport for clipping
    pub map_rect: egui::Rect,
}

impl Plugin for AnnotationsPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let painter = ui.painter().with_clip_rect(self.map_rect);

        for feature in &self.features {
            paint_geometry(&painter, projector, &feature.geometry, self.marker);
        }

        if let Some(location) = &self.location {
            let anchor = project(projector, location.position);
            paint_pin(&painter, anchor, &self.marker);
            paint_popup(&painter, anchor, &location.popup_lines());
        }
    }
}

fn paint_geometry(
    painter: &egui::Painter,
    projector: &Projector,
    geometry: &Geometry,
    marker: MarkerStyle,
) {
    let style = style_for(geometry.draw_mode(), Some(marker));

    match geometry {
        Geometry::Point(position) => {
            let anchor = project(projector, *position);
            match style.marker {
                Some(marker) => paint_pin(painter, anchor, &marker),
                None => {
                    painter.circle_filled(anchor, style.vertex_radius, egui::Color32::RED);
                    painter.circle_stroke(
                        anchor,
                        style.vertex_radius,
                        egui::Stroke::new(2.0, egui::Color32::WHITE),
                    );
                }
            }
        }
        Geometry::LineString(vertices) => {
            let stroke = style.stroke.unwrap_or_default();
            let screen: Vec<egui::Pos2> =
                vertices.iter().map(|p| project(projector, *p)).collect();
            for pair in screen.windows(2) {
                painter.line_segment([pair[0], pair[1]], stroke);
            }
        }
        Geometry::Polygon(ring) => {
            let stroke = style.stroke.unwrap_or_default();
            let screen: Vec<egui::Pos2> = ring.iter().map(|p| project(projector, *p)).collect();
            if screen.len() >= 3 {
                painter.add(egui::Shape::Path(egui::epaint::PathShape {
                    points: screen,
                    closed: true,
                    fill: style.fill.unwrap_or(egui::Color32::TRANSPARENT),
                    stroke: egui::epaint::PathStroke::new(stroke.width, stroke.color),
                }));
            }
        }
        Geometry::Circle { center, radius } => {
            let stroke = style.stroke.unwrap_or_default();
            painter.circle_stroke(
                project(projector, *center),
                pixel_radius(projector, *center, *radius),
                stroke,
            );
        }
    }
}

/// Paints the bottom-center anchored pin marker at `anchor`.
pub fn paint_pin(painter: &egui::Painter, anchor: egui::Pos2, style: &MarkerStyle) {
    let head_radius = style.size * 0.42;
    let head = anchor - egui::vec2(0.0, style.size - head_radius);

    painter.add(egui::Shape::convex_polygon(
        vec![
            anchor,
            head + egui::vec2(-head_radius * 0.72, head_radius * 0.55),
            head + egui::vec2(head_radius * 0.72, head_radius * 0.55),
        ],
        style.color,
        egui::Stroke::NONE,
    ));
    painter.circle_filled(head, head_radius, style.color);
    painter.circle_stroke(head, head_radius, egui::Stroke::new(1.5, egui::Color32::WHITE));
    painter.circle_filled(head, head_radius * 0.35, egui::Color32::WHITE);
}

/// Paints the popup overlay above `anchor`, bottom-center positioned
/// with a vertical offset clearing the pin.
fn paint_popup(painter: &egui::Painter, anchor: egui::Pos2, lines: &[String]) {
    const PADDING: f32 = 10.0;
    const OFFSET: f32 = 50.0;
    let background = egui::Color32::from_rgb(0xdc, 0x14, 0x3c);

    let heading_font = egui::FontId::proportional(13.0);
    let body_font = egui::FontId::proportional(12.0);

    let galleys: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let font = if i == 0 { &heading_font } else { &body_font };
            painter.layout_no_wrap(line.clone(), font.clone(), egui::Color32::WHITE)
        })
        .collect();

    let width = galleys
        .iter()
        .map(|g| g.rect.width())
        .fold(0.0_f32, f32::max)
        + PADDING * 2.0;
    let height: f32 = galleys.iter().map(|g| g.rect.height() + 2.0).sum::<f32>() + PADDING * 2.0;

    let rect = egui::Rect::from_min_size(
        egui::pos2(anchor.x - width / 2.0, anchor.y - OFFSET - height),
        egui::vec2(width, height),
    );
    painter.rect_filled(rect, 10.0, background);

    let mut cursor = rect.min + egui::vec2(PADDING, PADDING);
    for galley in galleys {
        let galley_height = galley.rect.height();
        painter.galley(cursor, galley, egui::Color32::WHITE);
        cursor.y += galley_height + 2.0;
    }
}
