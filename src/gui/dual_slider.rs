use eframe::egui::{self, pos2, vec2, Align2, Color32, Rect, Sense, TextStyle};

use super::drag::DragSession;
use crate::range_map;
use crate::settings::{RUNWAY_MAX, RUNWAY_MIN};

const HANDLE_RADIUS: f32 = 8.0;
const TRACK_HEIGHT: f32 = 8.0;

const SHORTAGE_FILL: Color32 = Color32::from_rgb(0xc4, 0x5c, 0x5c);
const ADEQUATE_FILL: Color32 = Color32::from_rgb(0x5f, 0x9e, 0x6e);
const EXCESS_FILL: Color32 = Color32::from_rgb(0xc9, 0x9a, 0x4b);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Two handles on one track splitting the runway band into shortage,
/// adequate and excess segments. Every drag update clamps asymmetrically
/// (low against `high - 1`, high against `low + 1`) so `low < high` holds
/// after each single move with no transient invalid state.
pub struct DualHandleSlider {
    low: u32,
    high: u32,
    session: DragSession<Handle>,
}

impl DualHandleSlider {
    /// Callers pass a pair already satisfying `low < high`; snapshots coming
    /// from outside are validated before they reach the widget.
    pub fn new(low: u32, high: u32) -> Self {
        Self {
            low,
            high,
            session: DragSession::default(),
        }
    }

    pub fn set_range(&mut self, low: u32, high: u32) {
        self.low = low;
        self.high = high;
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Track fractions of the shortage / adequate / excess segments.
    pub fn segment_fractions(&self) -> [f32; 3] {
        let span = RUNWAY_MAX as f32;
        [
            self.low as f32 / span,
            (self.high - self.low) as f32 / span,
            (RUNWAY_MAX - self.high) as f32 / span,
        ]
    }

    /// Move the low handle toward a raw (unrounded) runway value.
    pub fn drag_low_to(&mut self, raw: f32) -> bool {
        let new_low = (raw.round() as i64).clamp(RUNWAY_MIN as i64, (self.high - 1) as i64) as u32;
        let changed = new_low != self.low;
        self.low = new_low;
        changed
    }

    /// Move the high handle toward a raw (unrounded) runway value.
    pub fn drag_high_to(&mut self, raw: f32) -> bool {
        let new_high = (raw.round() as i64).clamp((self.low + 1) as i64, RUNWAY_MAX as i64) as u32;
        let changed = new_high != self.high;
        self.high = new_high;
        changed
    }

    fn value_of(&self, handle: Handle) -> u32 {
        match handle {
            Handle::Low => self.low,
            Handle::High => self.high,
        }
    }

    fn handle_center(&self, track: Rect, handle: Handle) -> egui::Pos2 {
        let percent = range_map::value_to_percent(
            self.value_of(handle) as f32,
            RUNWAY_MIN as f32,
            RUNWAY_MAX as f32,
        );
        pos2(track.left() + percent * track.width(), track.center().y)
    }

    /// Returns true when a drag changed either value this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let width = ui.available_width().clamp(200.0, 420.0);
        let (outer, _) = ui.allocate_exact_size(vec2(width, 44.0), Sense::hover());
        let track = Rect::from_min_max(
            pos2(outer.left() + HANDLE_RADIUS, outer.bottom() - 10.0 - TRACK_HEIGHT),
            pos2(outer.right() - HANDLE_RADIUS, outer.bottom() - 10.0),
        );

        // interaction first so this frame paints the post-drag state
        let mut changed = false;
        let mut responses = Vec::with_capacity(2);
        for handle in [Handle::Low, Handle::High] {
            // the grab target is where the handle was painted last frame
            let rect = Rect::from_center_size(
                self.handle_center(track, handle),
                vec2(HANDLE_RADIUS, HANDLE_RADIUS) * 2.0,
            );
            let id = ui.id().with(match handle {
                Handle::Low => "runway_low",
                Handle::High => "runway_high",
            });
            let resp = ui.interact(rect, id, Sense::drag());

            if resp.drag_started() {
                self.session.begin(handle, track);
            }
            if self.session.is_dragging(handle) {
                if let Some(pos) = resp.interact_pointer_pos() {
                    if let Some(percent) = self.session.percent(pos.x) {
                        let raw = range_map::percent_to_value(
                            percent,
                            RUNWAY_MIN as f32,
                            RUNWAY_MAX as f32,
                            None,
                        );
                        changed |= match handle {
                            Handle::Low => self.drag_low_to(raw),
                            Handle::High => self.drag_high_to(raw),
                        };
                    }
                }
                if resp.drag_stopped() {
                    self.session.end();
                }
            }
            responses.push(resp);
        }

        let painter = ui.painter();
        let fractions = self.segment_fractions();
        let x1 = track.left() + fractions[0] * track.width();
        let x2 = x1 + fractions[1] * track.width();
        painter.rect_filled(
            Rect::from_min_max(track.left_top(), pos2(x1, track.bottom())),
            3.0,
            SHORTAGE_FILL,
        );
        painter.rect_filled(
            Rect::from_min_max(pos2(x1, track.top()), pos2(x2, track.bottom())),
            0.0,
            ADEQUATE_FILL,
        );
        painter.rect_filled(
            Rect::from_min_max(pos2(x2, track.top()), track.right_bottom()),
            3.0,
            EXCESS_FILL,
        );

        for (handle, resp) in [Handle::Low, Handle::High].into_iter().zip(&responses) {
            let center = self.handle_center(track, handle);
            let visuals = ui.style().interact(resp);
            ui.painter()
                .circle(center, HANDLE_RADIUS, visuals.bg_fill, visuals.fg_stroke);
            ui.painter().text(
                pos2(center.x, track.top() - 6.0),
                Align2::CENTER_BOTTOM,
                self.value_of(handle).to_string(),
                TextStyle::Small.resolve(ui.style()),
                ui.visuals().text_color(),
            );
        }
        changed
    }
}
