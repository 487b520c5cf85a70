//! Pointer and touch events fed into the picker.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Where an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Unified mouse/touch event. Positions are local to the picker surface,
/// with the origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PickerEvent {
    Down {
        position: Point,
        source: PointerSource,
    },
    Up {
        position: Point,
        source: PointerSource,
    },
    Move {
        position: Point,
        source: PointerSource,
    },
}

impl PickerEvent {
    pub fn mouse_down(position: Point) -> Self {
        Self::Down {
            position,
            source: PointerSource::Mouse,
        }
    }

    pub fn mouse_up(position: Point) -> Self {
        Self::Up {
            position,
            source: PointerSource::Mouse,
        }
    }

    pub fn mouse_move(position: Point) -> Self {
        Self::Move {
            position,
            source: PointerSource::Mouse,
        }
    }

    pub fn touch_start(position: Point) -> Self {
        Self::Down {
            position,
            source: PointerSource::Touch,
        }
    }

    pub fn touch_end(position: Point) -> Self {
        Self::Up {
            position,
            source: PointerSource::Touch,
        }
    }

    pub fn touch_move(position: Point) -> Self {
        Self::Move {
            position,
            source: PointerSource::Touch,
        }
    }

    /// Local position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            Self::Down { position, .. }
            | Self::Up { position, .. }
            | Self::Move { position, .. } => position,
        }
    }

    pub fn source(&self) -> PointerSource {
        match *self {
            Self::Down { source, .. }
            | Self::Up { source, .. }
            | Self::Move { source, .. } => source,
        }
    }

    /// Re-express the event relative to a surface whose top-left corner sits
    /// at `origin` in the parent coordinate space.
    pub fn relative_to(self, origin: Point) -> Self {
        let shift = |p: Point| Point::new(p.x - origin.x, p.y - origin.y);
        match self {
            Self::Down { position, source } => Self::Down {
                position: shift(position),
                source,
            },
            Self::Up { position, source } => Self::Up {
                position: shift(position),
                source,
            },
            Self::Move { position, source } => Self::Move {
                position: shift(position),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_tag_source() {
        let p = Point::new(1.0, 2.0);
        assert_eq!(PickerEvent::mouse_down(p).source(), PointerSource::Mouse);
        assert_eq!(PickerEvent::touch_move(p).source(), PointerSource::Touch);
        assert_eq!(PickerEvent::touch_end(p).position(), p);
    }

    #[test]
    fn test_relative_to() {
        let event =
            PickerEvent::mouse_move(Point::new(150.0, 120.0)).relative_to(Point::new(50.0, 20.0));
        assert_eq!(event, PickerEvent::mouse_move(Point::new(100.0, 100.0)));
    }
}
