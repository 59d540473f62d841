use eframe::egui::{self, pos2, vec2, Align2, Color32, Rect, Sense, TextStyle};

use super::drag::DragSession;
use crate::range_map;
use crate::settings::{HIGHLIGHT_MAX, HIGHLIGHT_MIN, HIGHLIGHT_STEP};

const HANDLE_RADIUS: f32 = 8.0;
const TRACK_HEIGHT: f32 = 6.0;

const TRACK_FILL: Color32 = Color32::from_rgb(0x4a, 0x4f, 0x57);
const ACTIVE_FILL: Color32 = Color32::from_rgb(0x6b, 0x8c, 0xc9);

/// One handle over the highlight-threshold band, snapped to half months.
pub struct SingleHandleSlider {
    value: f32,
    session: DragSession<()>,
}

impl SingleHandleSlider {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            session: DragSession::default(),
        }
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// The current value; the readout renders exactly this, with no second
    /// quantization pass.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Move the handle toward a track fraction, snapping to the step.
    pub fn drag_to_percent(&mut self, percent: f32) -> bool {
        let new_value = range_map::percent_to_value(
            percent,
            HIGHLIGHT_MIN,
            HIGHLIGHT_MAX,
            Some(HIGHLIGHT_STEP),
        );
        let changed = (new_value - self.value).abs() > f32::EPSILON;
        self.value = new_value;
        changed
    }

    fn handle_center(&self, track: Rect) -> egui::Pos2 {
        let percent = range_map::value_to_percent(self.value, HIGHLIGHT_MIN, HIGHLIGHT_MAX);
        pos2(track.left() + percent * track.width(), track.center().y)
    }

    /// Returns true when a drag changed the value this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let width = ui.available_width().clamp(200.0, 420.0);
        let (outer, _) = ui.allocate_exact_size(vec2(width, 36.0), Sense::hover());
        let track = Rect::from_min_max(
            pos2(outer.left() + HANDLE_RADIUS, outer.bottom() - 10.0 - TRACK_HEIGHT),
            pos2(outer.right() - HANDLE_RADIUS, outer.bottom() - 10.0),
        );

        // the grab target is where the handle was painted last frame
        let rect = Rect::from_center_size(
            self.handle_center(track),
            vec2(HANDLE_RADIUS, HANDLE_RADIUS) * 2.0,
        );
        let resp = ui.interact(rect, ui.id().with("highlight_handle"), Sense::drag());

        if resp.drag_started() {
            self.session.begin((), track);
        }

        let mut changed = false;
        if self.session.is_dragging(()) {
            if let Some(pos) = resp.interact_pointer_pos() {
                if let Some(percent) = self.session.percent(pos.x) {
                    changed = self.drag_to_percent(percent);
                }
            }
            if resp.drag_stopped() {
                self.session.end();
            }
        }

        let center = self.handle_center(track);
        let painter = ui.painter();
        painter.rect_filled(track, 3.0, TRACK_FILL);
        painter.rect_filled(
            Rect::from_min_max(track.left_top(), pos2(center.x, track.bottom())),
            3.0,
            ACTIVE_FILL,
        );

        let visuals = ui.style().interact(&resp);
        ui.painter()
            .circle(center, HANDLE_RADIUS, visuals.bg_fill, visuals.fg_stroke);
        ui.painter().text(
            pos2(center.x, track.top() - 6.0),
            Align2::CENTER_BOTTOM,
            format!("{:.1}", self.value),
            TextStyle::Small.resolve(ui.style()),
            ui.visuals().text_color(),
        );
        changed
    }
}
