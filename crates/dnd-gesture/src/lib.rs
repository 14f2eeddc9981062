//! DnD Gesture Tracking
//!
//! Simple drag-and-drop state for ordered lists, independent of any UI
//! framework. The host feeds mouse events in and gets the finished drop
//! back. Uses a movement threshold to distinguish click from drag.

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget<Id> {
    /// Drop on an item (take its place)
    Item(Id),
    /// Drop on the zone before row `n` (`n == len` is the slot after the last row)
    Zone(usize),
}

/// A resolved move inside one list: remove at `from`, insert at `to`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListMove {
    pub from: usize,
    pub to: usize,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Primary mouse button
const PRIMARY_BUTTON: i16 = 0;

/// Drag state for one list
#[derive(Clone, Debug)]
pub struct DragState<Id> {
    dragging: Option<Id>,
    drop_target: Option<DropTarget<Id>>,
    /// Pending item id (mousedown but not yet dragging)
    pending: Option<Id>,
    /// Start position for movement detection
    start_x: i32,
    start_y: i32,
    drag_just_ended: bool,
    /// Set while the list cannot be reordered (writes in flight)
    locked: bool,
}

impl<Id> Default for DragState<Id> {
    fn default() -> Self {
        Self {
            dragging: None,
            drop_target: None,
            pending: None,
            start_x: 0,
            start_y: 0,
            drag_just_ended: false,
            locked: false,
        }
    }
}

impl<Id: Copy + PartialEq + std::fmt::Debug> DragState<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<Id> {
        self.dragging
    }

    pub fn drop_target(&self) -> Option<DropTarget<Id>> {
        self.drop_target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True right after a drop, so the host can swallow the trailing click
    pub fn drag_just_ended(&self) -> bool {
        self.drag_just_ended
    }

    pub fn clear_just_ended(&mut self) {
        self.drag_just_ended = false;
    }

    /// Disable or enable drag handles. Locking cancels any gesture.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.pending = None;
            self.dragging = None;
            self.drop_target = None;
        }
    }

    /// Mousedown on a draggable row: record pending drag with start position
    pub fn mouse_down(&mut self, item_id: Id, button: i16, x: i32, y: i32) {
        if button != PRIMARY_BUTTON || self.locked {
            return;
        }
        self.pending = Some(item_id);
        self.start_x = x;
        self.start_y = y;
    }

    /// Mousemove anywhere: starts the drag once moved past the threshold.
    /// Returns true on the move that started it.
    pub fn mouse_move(&mut self, x: i32, y: i32) -> bool {
        if self.pending.is_none() || self.dragging.is_some() {
            return false;
        }

        let dx = (x - self.start_x).abs();
        let dy = (y - self.start_y).abs();
        if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
            self.dragging = self.pending;
            log::trace!("Drag started for {:?}", self.dragging);
            return true;
        }
        false
    }

    /// Pointer entered a row
    pub fn enter_item(&mut self, item_id: Id) {
        if let Some(dragging) = self.dragging {
            // Don't allow dropping on self
            if dragging != item_id {
                self.drop_target = Some(DropTarget::Item(item_id));
            }
        }
    }

    /// Pointer entered the zone before row `slot`
    pub fn enter_zone(&mut self, slot: usize) {
        if self.dragging.is_some() {
            self.drop_target = Some(DropTarget::Zone(slot));
        }
    }

    /// Pointer left a row or zone
    pub fn leave(&mut self) {
        if self.dragging.is_some() {
            self.drop_target = None;
        }
    }

    /// Mouseup anywhere. Returns the drop when a real drag ended on a target;
    /// a plain click yields None.
    pub fn mouse_up(&mut self) -> Option<(Id, DropTarget<Id>)> {
        self.pending = None;
        let dropped = match (self.dragging, self.drop_target) {
            (Some(dragged), Some(target)) => Some((dragged, target)),
            _ => None,
        };
        self.end_drag();
        dropped
    }

    fn end_drag(&mut self) {
        self.dragging = None;
        self.drop_target = None;
        self.pending = None;
        self.drag_just_ended = true;
    }
}

/// Translate a drop into a move within `ids` (the list in display order).
///
/// Returns None when either id is missing or the move changes nothing.
pub fn resolve_drop<Id: Copy + PartialEq>(ids: &[Id], dragged: Id, target: DropTarget<Id>) -> Option<ListMove> {
    let from = ids.iter().position(|id| *id == dragged)?;

    let to = match target {
        DropTarget::Item(target_id) => ids.iter().position(|id| *id == target_id)?,
        DropTarget::Zone(slot) => {
            // Removing the dragged row first shifts later slots up by one
            let slot = slot.min(ids.len());
            if slot > from {
                slot - 1
            } else {
                slot
            }
        }
    };

    if from == to {
        None
    } else {
        Some(ListMove { from, to })
    }
}
