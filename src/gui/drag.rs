use eframe::egui::Rect;

use crate::range_map;

/// State of one drag gesture on a slider track.
///
/// The track rectangle is captured once when the gesture starts and reused
/// for every subsequent move, so the whole drag maps against a stable
/// coordinate frame even if layout shifts mid-gesture. Only one handle can
/// own the gesture at a time; a second `begin` while a gesture is active is
/// ignored.
pub struct DragSession<H> {
    active: Option<(H, Rect)>,
}

impl<H> Default for DragSession<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: Copy + PartialEq> DragSession<H> {
    pub fn begin(&mut self, handle: H, track: Rect) {
        if self.active.is_none() {
            self.active = Some((handle, track));
        }
    }

    pub fn end(&mut self) {
        self.active = None;
    }

    pub fn is_dragging(&self, handle: H) -> bool {
        matches!(self.active, Some((h, _)) if h == handle)
    }

    pub fn active_handle(&self) -> Option<H> {
        self.active.map(|(h, _)| h)
    }

    /// Map a pointer x coordinate to a track fraction using the geometry
    /// captured at gesture start. `None` outside a gesture.
    pub fn percent(&self, pointer_x: f32) -> Option<f32> {
        self.active.map(|(_, track)| {
            range_map::position_to_percent(pointer_x, track.left(), track.width())
        })
    }
}
