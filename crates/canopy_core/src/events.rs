//! Event types delivered by the host UI
//!
//! Charts are driven entirely by these events: the host reports mounts,
//! container resizes and pointer motion, and the chart reacts.

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Host clock in milliseconds.
    pub timestamp_ms: f64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn pointer_move(x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::POINTER_MOVE,
            data: EventData::Pointer { x, y },
            timestamp_ms,
        }
    }

    pub fn pointer_leave(timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::POINTER_LEAVE,
            data: EventData::None,
            timestamp_ms,
        }
    }

    pub fn resize(width: f32, height: f32, timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::RESIZE,
            data: EventData::Resize { width, height },
            timestamp_ms,
        }
    }

    pub fn mount(width: f32, height: f32, timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::MOUNT,
            data: EventData::Resize { width, height },
            timestamp_ms,
        }
    }

    pub fn unmount(timestamp_ms: f64) -> Self {
        Self {
            event_type: event_types::UNMOUNT,
            data: EventData::None,
            timestamp_ms,
        }
    }

    /// Pointer position, if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}
