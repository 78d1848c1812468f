//! Drag-to-scroll for horizontally overflowing strips.
//!
//! A gesture captures the pointer position and the strip's scroll offset
//! when it starts. Every move while the gesture is active maps the horizontal
//! pointer travel, scaled by a speed multiplier, onto a new scroll offset.
//! The caller owns the strip and writes the offset back; nothing here clamps
//! or stores it.

use crate::config::{Config, SCROLL_SPEED_MULTIPLIER};
use crate::gesture::{GestureEvent, GestureListener};

/// Where a pointer or touch gesture comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    /// Mouse drags must not fall through to the host's own drag handling
    /// (text selection and the like). Touch moves keep the native behaviour.
    pub fn suppresses_default(self) -> bool {
        matches!(self, PointerKind::Mouse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
}

/// Snapshot of one drag gesture.
///
/// The origin fields are only meaningful while `active` is set; every
/// `started` call captures them afresh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    pub origin_pointer_x: f64,
    pub origin_scroll_offset: f64,
}

impl DragState {
    pub const IDLE: DragState = DragState {
        active: false,
        origin_pointer_x: 0.0,
        origin_scroll_offset: 0.0,
    };

    /// State right after a press at `pointer_x` over a container whose left
    /// edge sits at `container_left` and which is scrolled to `scroll_offset`
    pub fn started(pointer_x: f64, container_left: f64, scroll_offset: f64) -> DragState {
        DragState {
            active: true,
            origin_pointer_x: pointer_x - container_left,
            origin_scroll_offset: scroll_offset,
        }
    }

    /// Scroll offset for a pointer at `pointer_x`, or `None` outside a gesture
    pub fn scroll_for(&self, pointer_x: f64, container_left: f64, multiplier: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        let relative_x = pointer_x - container_left;
        let delta = (relative_x - self.origin_pointer_x) * multiplier;
        Some(self.origin_scroll_offset - delta)
    }

    pub fn ended(self) -> DragState {
        DragState::IDLE
    }

    pub fn phase(&self) -> DragPhase {
        if self.active {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }
}

/// A horizontally scrollable container the controller can drive.
pub trait ScrollViewport {
    /// Left edge of the container in pointer coordinates
    fn left_offset(&self) -> f64;
    fn scroll_offset(&self) -> f64;
    /// Store a new offset; implementations clamp to their scroll range
    fn set_scroll_offset(&mut self, offset: f64);
}

/// Threads a [`DragState`] through the gesture callbacks of a host view.
#[derive(Debug, Clone, PartialEq)]
pub struct DragScrollController {
    state: DragState,
    multiplier: f64,
}

impl Default for DragScrollController {
    fn default() -> Self {
        DragScrollController::new(SCROLL_SPEED_MULTIPLIER)
    }
}

impl DragScrollController {
    pub fn new(multiplier: f64) -> Self {
        DragScrollController {
            state: DragState::IDLE,
            multiplier,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        DragScrollController::new(config.scroll_speed_multiplier)
    }

    /// Begin a gesture. Restarts from the new origin if one is already active.
    pub fn on_gesture_start(&mut self, pointer_x: f64, container_left: f64, scroll_offset: f64) {
        self.state = DragState::started(pointer_x, container_left, scroll_offset);
        tracing::trace!(
            origin_pointer_x = self.state.origin_pointer_x,
            origin_scroll_offset = self.state.origin_scroll_offset,
            "drag started"
        );
    }

    /// New scroll offset for the container, `None` when no gesture is active
    pub fn on_gesture_move(&self, pointer_x: f64, container_left: f64) -> Option<f64> {
        self.state
            .scroll_for(pointer_x, container_left, self.multiplier)
    }

    pub fn on_gesture_end(&mut self) {
        if self.state.active {
            tracing::trace!("drag ended");
        }
        self.state = self.state.ended();
    }

    /// Start a gesture over `viewport` with the pointer at `pointer_x`
    pub fn begin_on(&mut self, viewport: &impl ScrollViewport, pointer_x: f64) {
        self.on_gesture_start(pointer_x, viewport.left_offset(), viewport.scroll_offset());
    }

    /// Apply a move to `viewport`. Returns false when no gesture is active.
    pub fn drag(&self, viewport: &mut impl ScrollViewport, pointer_x: f64) -> bool {
        match self.on_gesture_move(pointer_x, viewport.left_offset()) {
            Some(offset) => {
                viewport.set_scroll_offset(offset);
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn phase(&self) -> DragPhase {
        self.state.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.active
    }

    /// Route a gesture notification to the matching callback
    pub fn handle(&mut self, event: &GestureEvent) -> Option<f64> {
        match *event {
            GestureEvent::Start {
                pointer_x,
                container_left,
                scroll_offset,
                ..
            } => {
                self.on_gesture_start(pointer_x, container_left, scroll_offset);
                None
            }
            GestureEvent::Move {
                pointer_x,
                container_left,
                ..
            } => self.on_gesture_move(pointer_x, container_left),
            GestureEvent::End(_) => {
                self.on_gesture_end();
                None
            }
        }
    }
}

impl GestureListener for DragScrollController {
    fn on_gesture(&mut self, event: &GestureEvent) -> Option<f64> {
        self.handle(event)
    }
}
