//! Box rendering for the viewport
//!
//! Elements are painted face by face with egui's painter, far faces first.

use egui::{Color32, Painter, Pos2, Rect, Stroke, Ui};
use glam::DVec3;
use shared::Rgb;

use super::camera::OrbitCamera;
use super::picking::ElementBox;
use crate::state::elements::element_type_def;
use crate::state::settings::GridSettings;
use crate::state::EditorState;

/// Corner indices of each face (see `ElementBox::corners`)
const FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2], // -X
    [1, 3, 7, 5], // +X
    [0, 1, 5, 4], // -Y
    [2, 6, 7, 3], // +Y
    [0, 2, 3, 1], // -Z
    [4, 5, 7, 6], // +Z
];

/// Outward normals matching `FACES`, before rotation
const FACE_NORMALS: [DVec3; 6] = [
    DVec3::NEG_X,
    DVec3::X,
    DVec3::NEG_Y,
    DVec3::Y,
    DVec3::NEG_Z,
    DVec3::Z,
];

const LIGHT_DIR: DVec3 = DVec3::new(0.4, 0.8, 0.45);

struct Face {
    points: Vec<Pos2>,
    depth: f32,
    fill: Color32,
    stroke: Stroke,
}

/// Paint the whole scene: background, grid, elements and ghost
pub fn paint_viewport(ui: &Ui, rect: Rect, camera: &OrbitCamera, state: &EditorState) {
    let painter = ui.painter_at(rect);

    let bg = state.settings.viewport.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    if state.settings.grid.visible {
        draw_grid(&painter, rect, camera, &state.settings.grid);
    }

    let sel = state.settings.viewport.selection_color;
    let selection_stroke = Stroke::new(2.5, Color32::from_rgb(sel[0], sel[1], sel[2]));
    let edge_stroke = Stroke::new(0.8, Color32::from_black_alpha(90));

    let mut faces = Vec::new();
    for element in state.elements() {
        if state.hidden_element() == Some(element.id) {
            continue;
        }
        let (Some(def), Some(b)) = (
            element_type_def(element, state.catalog()),
            ElementBox::from_element(element, state.catalog()),
        ) else {
            continue;
        };
        let stroke = if state.selection() == Some(element.id) {
            selection_stroke
        } else {
            edge_stroke
        };
        collect_faces(&mut faces, rect, camera, &b, def.color, 255, stroke);
    }

    let ghost = state.ghost();
    if ghost.is_visible() {
        if let Some(dims) = ghost.dimensions() {
            let b = ElementBox {
                id: state.next_id(),
                center: ghost.position(),
                dimensions: *dims,
                rotation_y: ghost.rotation_y(),
            };
            let alpha = state.settings.viewport.ghost_alpha;
            let stroke = Stroke::new(1.5, Color32::from_white_alpha(200));
            collect_faces(&mut faces, rect, camera, &b, ghost.color(), alpha, stroke);
        }
    }

    // Painter's algorithm: far faces first
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for face in faces {
        painter.add(egui::Shape::convex_polygon(face.points, face.fill, face.stroke));
    }
}

fn collect_faces(
    out: &mut Vec<Face>,
    rect: Rect,
    camera: &OrbitCamera,
    b: &ElementBox,
    color: Rgb,
    alpha: u8,
    stroke: Stroke,
) {
    let corners = b.corners();
    let Some(projected) = project_all(camera, rect, &corners) else {
        return;
    };
    let eye = camera.eye_position().as_dvec3();
    let rot = glam::DQuat::from_rotation_y(b.rotation_y);

    for (face, normal) in FACES.iter().zip(FACE_NORMALS) {
        let normal = rot * normal;
        let center = face.iter().map(|&i| corners[i]).sum::<DVec3>() / 4.0;
        // Back-face culling
        if normal.dot(eye - center) <= 0.0 {
            continue;
        }
        let depth = face.iter().map(|&i| projected[i].1).sum::<f32>() / 4.0;
        let shade = 0.55 + 0.45 * normal.dot(LIGHT_DIR.normalize()).max(0.0);
        out.push(Face {
            points: face.iter().map(|&i| projected[i].0).collect(),
            depth,
            fill: shaded(color, shade as f32, alpha),
            stroke,
        });
    }
}

/// Project all corners, or nothing if one falls behind the camera
fn project_all(camera: &OrbitCamera, rect: Rect, corners: &[DVec3; 8]) -> Option<[(Pos2, f32); 8]> {
    let mut out = [(Pos2::ZERO, 0.0); 8];
    for (slot, corner) in out.iter_mut().zip(corners) {
        *slot = camera.project(*corner, rect)?;
    }
    Some(out)
}

fn shaded(color: Rgb, shade: f32, alpha: u8) -> Color32 {
    let scale = |c: u8| (c as f32 * shade).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(scale(color.0), scale(color.1), scale(color.2), alpha)
}

fn draw_grid(painter: &Painter, rect: Rect, camera: &OrbitCamera, settings: &GridSettings) {
    let stroke = Stroke::new(0.5, Color32::from_black_alpha(50));
    let axis_stroke = Stroke::new(1.0, Color32::from_black_alpha(110));
    let extent = settings.half_extent();
    let step = settings.step_cm.max(1.0);
    let lines = (extent / step).floor() as i64;

    for i in -lines..=lines {
        let f = i as f64 * step;
        let s = if i == 0 { axis_stroke } else { stroke };
        draw_line(painter, rect, camera, DVec3::new(f, 0.0, -extent), DVec3::new(f, 0.0, extent), s);
        draw_line(painter, rect, camera, DVec3::new(-extent, 0.0, f), DVec3::new(extent, 0.0, f), s);
    }
}

fn draw_line(painter: &Painter, rect: Rect, camera: &OrbitCamera, a: DVec3, b: DVec3, stroke: Stroke) {
    if let (Some((a, _)), Some((b, _))) = (camera.project(a, rect), camera.project(b, rect)) {
        if rect.contains(a) || rect.contains(b) {
            painter.line_segment([a, b], stroke);
        }
    }
}
