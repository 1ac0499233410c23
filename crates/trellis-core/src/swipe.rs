//! Horizontal swipe gesture detection.
//!
//! A gesture runs from press to release and is classified post-hoc by net
//! horizontal displacement: past the threshold the sign picks the left or
//! right callback, and the end callback always fires after classification.
//! The input mode (pointer-style or touch-style events) is fixed once at
//! construction from the platform capabilities.

use crate::dom::NodeId;

/// Minimum |delta x| before a direction callback fires.
pub const SWIPE_THRESHOLD: f64 = 40.0;

/// Host platform capabilities, probed once by the embedder.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// Pointer-style events are available (preferred over raw touch).
    pub pointer_events: bool,
    /// The document root exposes a touch-start capability.
    pub touch_start: bool,
    /// Number of simultaneous touch points the device reports.
    pub max_touch_points: u32,
}

impl Platform {
    /// A touch device delivering pointer events.
    pub fn pointer() -> Self {
        Self {
            pointer_events: true,
            touch_start: true,
            max_touch_points: 1,
        }
    }

    /// A touch device with raw touch events only.
    pub fn touch() -> Self {
        Self {
            pointer_events: false,
            touch_start: true,
            max_touch_points: 1,
        }
    }

    /// Mouse-only desktop: swipe detection stays inert.
    pub fn desktop() -> Self {
        Self {
            pointer_events: true,
            touch_start: false,
            max_touch_points: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    fn counts_for_swipe(self) -> bool {
        matches!(self, PointerKind::Touch | PointerKind::Pen)
    }
}

/// Raw input fed to the detector by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    PointerDown { x: f64, kind: PointerKind },
    PointerUp { x: f64, kind: PointerKind },
    /// Client x of every active touch point.
    TouchStart { touches: Vec<f64> },
    TouchMove { touches: Vec<f64> },
    TouchEnd,
}

pub type SwipeCallback = Box<dyn FnMut()>;

/// Direction and end-of-gesture callbacks, each optional.
#[derive(Default)]
pub struct SwipeConfig {
    pub left: Option<SwipeCallback>,
    pub right: Option<SwipeCallback>,
    pub end: Option<SwipeCallback>,
}

impl SwipeConfig {
    pub fn on_left(mut self, callback: impl FnMut() + 'static) -> Self {
        self.left = Some(Box::new(callback));
        self
    }

    pub fn on_right(mut self, callback: impl FnMut() + 'static) -> Self {
        self.right = Some(Box::new(callback));
        self
    }

    pub fn on_end(mut self, callback: impl FnMut() + 'static) -> Self {
        self.end = Some(Box::new(callback));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Pointer,
    Touch,
}

/// Swipe gesture detector bound to one element.
pub struct Swipe {
    element: NodeId,
    config: SwipeConfig,
    origin_x: f64,
    delta_x: f64,
    /// `None` on platforms without touch support: all events are ignored.
    mode: Option<InputMode>,
}

impl Swipe {
    pub fn new(element: NodeId, platform: &Platform, config: SwipeConfig) -> Self {
        let mode = if !Self::is_supported(platform) {
            None
        } else if platform.pointer_events {
            Some(InputMode::Pointer)
        } else {
            Some(InputMode::Touch)
        };
        Self {
            element,
            config,
            origin_x: 0.0,
            delta_x: 0.0,
            mode,
        }
    }

    /// Whether the platform can deliver swipe gestures at all.
    pub fn is_supported(platform: &Platform) -> bool {
        platform.touch_start || platform.max_touch_points > 0
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn handle(&mut self, event: GestureEvent) {
        let Some(mode) = self.mode else {
            return;
        };
        match (mode, event) {
            (InputMode::Pointer, GestureEvent::PointerDown { x, kind }) => {
                if kind.counts_for_swipe() {
                    self.origin_x = x;
                }
            }
            (InputMode::Pointer, GestureEvent::PointerUp { x, kind }) => {
                // A mouse pointer-up leaves the tracked delta untouched; only
                // touch and pen releases contribute displacement.
                if kind.counts_for_swipe() {
                    self.delta_x = x - self.origin_x;
                }
                self.finish();
            }
            (InputMode::Touch, GestureEvent::TouchStart { touches }) => {
                if let Some(&x) = touches.first() {
                    self.origin_x = x;
                    self.delta_x = 0.0;
                }
            }
            (InputMode::Touch, GestureEvent::TouchMove { touches }) => {
                // More than one active touch point cancels the gesture.
                self.delta_x = match touches.as_slice() {
                    [x] => x - self.origin_x,
                    _ => 0.0,
                };
            }
            (InputMode::Touch, GestureEvent::TouchEnd) => {
                self.finish();
            }
            _ => {}
        }
    }

    fn finish(&mut self) {
        self.classify();
        self.origin_x = 0.0;
        self.delta_x = 0.0;
        if let Some(end) = &mut self.config.end {
            end();
        }
    }

    fn classify(&mut self) {
        let abs_delta = self.delta_x.abs();
        if abs_delta <= SWIPE_THRESHOLD {
            return;
        }
        let direction = abs_delta / self.delta_x;
        self.delta_x = 0.0;

        let callback = if direction > 0.0 {
            &mut self.config.right
        } else {
            &mut self.config.left
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Drop all callbacks; further events are ignored.
    pub fn dispose(&mut self) {
        self.mode = None;
        self.config = SwipeConfig::default();
    }
}
