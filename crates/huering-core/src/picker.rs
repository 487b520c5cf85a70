//! The interactive picker surface.
//!
//! [`CircularColor`] owns the configuration, the derived ring layout and the
//! transient interaction state. Renderers read from it; platform shells feed
//! it [`PickerEvent`]s.

use std::f64::consts::PI;
use std::rc::Rc;

use kurbo::Point;

use crate::config::{ConfigError, PickerConfig};
use crate::engine::{Rgb, color_for_angle, pointer_angle};
use crate::geometry::{RingLayout, Sector};
use crate::input::PickerEvent;
use crate::scroll::{DragGate, ScrollBlocker, ScrollGuard};

/// Callback invoked with every color produced while dragging.
pub type ChangeCallback = Box<dyn FnMut(Rgb)>;

/// Angle the handle starts at (left side of the ring).
pub const INITIAL_ANGLE: f64 = PI;

/// Mutable state of one picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    /// Whether the handle is being dragged.
    pub dragging: bool,
    /// Current handle angle in radians, `[-PI, PI]`.
    pub angle: f64,
    /// Handle center in surface-local pixels.
    pub handle: Point,
    /// Currently selected color.
    pub color: Rgb,
}

impl InteractionState {
    fn at_angle(layout: &RingLayout, angle: f64) -> Self {
        Self {
            dragging: false,
            angle,
            handle: layout.handle_position(angle),
            color: color_for_angle(angle),
        }
    }
}

/// A circular hue picker.
pub struct CircularColor {
    config: PickerConfig,
    layout: RingLayout,
    state: InteractionState,
    gate: DragGate,
    on_change: Option<ChangeCallback>,
    scroll_guard: Option<ScrollGuard>,
}

impl CircularColor {
    /// Create a picker, rejecting configurations that cannot be laid out.
    pub fn new(config: PickerConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected picker config {:?}: {}", config, e);
            return Err(e);
        }
        let layout = RingLayout::new(config.size);
        Ok(Self {
            state: InteractionState::at_angle(&layout, INITIAL_ANGLE),
            config,
            layout,
            gate: DragGate::new(),
            on_change: None,
            scroll_guard: None,
        })
    }

    /// Set the change callback.
    pub fn with_on_change(mut self, on_change: impl FnMut(Rgb) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    pub fn color(&self) -> Rgb {
        self.state.color
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn handle_position(&self) -> Point {
        self.state.handle
    }

    /// The static wheel wedges for this configuration.
    pub fn sectors(&self) -> Vec<Sector> {
        self.layout.sectors(self.config.number_of_sectors)
    }

    /// Shared flag read by the scroll listener.
    pub fn drag_gate(&self) -> &DragGate {
        &self.gate
    }

    /// Feed one pointer or touch event. Returns the new color if the event
    /// moved the handle.
    pub fn handle_event(&mut self, event: PickerEvent) -> Option<Rgb> {
        match event {
            PickerEvent::Down { position, source } => {
                if !self.state.dragging && self.layout.hits_handle(self.state.handle, position) {
                    log::debug!("Drag started ({:?}) at {:?}", source, position);
                    self.set_dragging(true);
                }
                None
            }
            PickerEvent::Up { source, .. } => {
                if self.state.dragging {
                    log::debug!("Drag ended ({:?}) at {}", source, self.state.color.to_hex());
                    self.set_dragging(false);
                }
                None
            }
            PickerEvent::Move { position, .. } => {
                if !self.state.dragging {
                    return None;
                }
                let angle = pointer_angle(self.layout.offset_from_center(position));
                let color = self.move_handle(angle);
                if let Some(on_change) = self.on_change.as_mut() {
                    on_change(color);
                }
                Some(color)
            }
        }
    }

    /// Place the handle at `angle` without notifying the callback.
    pub fn set_angle(&mut self, angle: f64) -> Rgb {
        self.move_handle(angle)
    }

    fn move_handle(&mut self, angle: f64) -> Rgb {
        self.state.angle = angle;
        self.state.handle = self.layout.handle_position(angle);
        self.state.color = color_for_angle(angle);
        log::trace!("Handle at {:.3} rad -> {}", angle, self.state.color);
        self.state.color
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.state.dragging = dragging;
        self.gate.set(dragging);
    }

    /// Register the window scroll listener. Mounting an already mounted
    /// picker keeps the existing listener.
    pub fn mount(&mut self, blocker: Rc<dyn ScrollBlocker>) {
        if self.scroll_guard.is_some() {
            return;
        }
        self.scroll_guard = Some(ScrollGuard::acquire(blocker, self.gate.clone()));
    }

    /// Remove the window scroll listener and end any drag in progress.
    pub fn unmount(&mut self) {
        if self.scroll_guard.take().is_some() {
            self.set_dragging(false);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.scroll_guard.is_some()
    }
}

impl std::fmt::Debug for CircularColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircularColor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("has_on_change", &self.on_change.is_some())
            .field("scroll_guard", &self.scroll_guard)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::MemoryScrollBlocker;
    use std::cell::RefCell;

    fn recording_picker() -> (CircularColor, Rc<RefCell<Vec<Rgb>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let picker = CircularColor::new(PickerConfig::default())
            .unwrap()
            .with_on_change(move |color| sink.borrow_mut().push(color));
        (picker, seen)
    }

    #[test]
    fn test_initial_state() {
        let picker = CircularColor::new(PickerConfig::default()).unwrap();
        assert!(!picker.is_dragging());
        assert_eq!(picker.handle_position(), Point::new(25.0, 100.0));
        assert_eq!(picker.color(), Rgb::new(0, 255, 255));
        assert_eq!(picker.sectors().len(), 360);
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(matches!(
            CircularColor::new(PickerConfig::new().with_size(0)),
            Err(ConfigError::ZeroSize)
        ));
        assert!(matches!(
            CircularColor::new(PickerConfig::new().with_sectors(0)),
            Err(ConfigError::ZeroSectors)
        ));
    }

    #[test]
    fn test_drag_to_zero_degrees() {
        let (mut picker, seen) = recording_picker();

        picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
        assert!(picker.is_dragging());

        let color = picker.handle_event(PickerEvent::mouse_move(Point::new(190.0, 100.0)));
        assert_eq!(color, Some(Rgb::new(255, 0, 0)));
        assert_eq!(seen.borrow().as_slice(), &[Rgb::new(255, 0, 0)]);
        assert_eq!(picker.handle_position(), Point::new(175.0, 100.0));

        picker.handle_event(PickerEvent::mouse_up(Point::new(190.0, 100.0)));
        assert!(!picker.is_dragging());

        assert_eq!(picker.handle_event(PickerEvent::mouse_move(Point::new(100.0, 10.0))), None);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(picker.handle_position(), Point::new(175.0, 100.0));
    }

    #[test]
    fn test_press_off_handle_does_not_drag() {
        let (mut picker, seen) = recording_picker();

        picker.handle_event(PickerEvent::mouse_down(Point::new(100.0, 100.0)));
        assert!(!picker.is_dragging());
        picker.handle_event(PickerEvent::mouse_move(Point::new(190.0, 100.0)));
        assert!(seen.borrow().is_empty());
        assert_eq!(picker.color(), Rgb::new(0, 255, 255));
    }

    #[test]
    fn test_up_anywhere_ends_drag() {
        let (mut picker, _) = recording_picker();
        picker.handle_event(PickerEvent::mouse_down(Point::new(30.0, 95.0)));
        assert!(picker.is_dragging());
        picker.handle_event(PickerEvent::mouse_up(Point::new(-500.0, 900.0)));
        assert!(!picker.is_dragging());
    }

    #[test]
    fn test_touch_drag() {
        let (mut picker, seen) = recording_picker();

        picker.handle_event(PickerEvent::touch_start(Point::new(25.0, 100.0)));
        assert!(picker.is_dragging());

        // Straight up from the center: 90 degrees, hue 90
        picker.handle_event(PickerEvent::touch_move(Point::new(100.0, 0.0)));
        assert_eq!(picker.handle_position(), Point::new(100.0, 25.0));
        assert_eq!(picker.color(), Rgb::new(128, 255, 0));

        picker.handle_event(PickerEvent::touch_end(Point::new(100.0, 0.0)));
        assert!(!picker.is_dragging());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_every_move_notifies() {
        let (mut picker, seen) = recording_picker();
        picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
        for x in [10.0, 20.0, 30.0] {
            picker.handle_event(PickerEvent::mouse_move(Point::new(x, 40.0)));
        }
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_move_without_callback() {
        let mut picker = CircularColor::new(PickerConfig::default()).unwrap();
        picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
        let color = picker.handle_event(PickerEvent::mouse_move(Point::new(190.0, 100.0)));
        assert_eq!(color, Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_move_to_center_is_red() {
        let (mut picker, _) = recording_picker();
        picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
        let color = picker.handle_event(PickerEvent::mouse_move(Point::new(100.0, 100.0)));
        assert_eq!(color, Some(Rgb::new(255, 0, 0)));
        assert_eq!(picker.handle_position(), Point::new(175.0, 100.0));
    }

    #[test]
    fn test_set_angle_is_silent() {
        let (mut picker, seen) = recording_picker();
        let color = picker.set_angle(0.0);
        assert_eq!(color, Rgb::new(255, 0, 0));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_handle_distance_invariant_while_dragging() {
        let (mut picker, _) = recording_picker();
        picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
        let center = picker.layout().center();
        for step in 0..36 {
            let angle = step as f64 * 10.0_f64.to_radians();
            let target = Sector::point_at(center, 40.0, angle);
            picker.handle_event(PickerEvent::mouse_move(target));
            let distance = picker.handle_position().distance(center);
            assert!((distance - 75.0).abs() < 1.5);
        }
    }

    #[test]
    fn test_mount_gates_scrolling() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let (mut picker, _) = recording_picker();
        picker.mount(window.clone());
        assert_eq!(window.listener_count(), 1);

        assert!(!window.dispatch_touch_move());
        picker.handle_event(PickerEvent::touch_start(Point::new(25.0, 100.0)));
        assert!(window.dispatch_touch_move());
        picker.handle_event(PickerEvent::touch_end(Point::new(25.0, 100.0)));
        assert!(!window.dispatch_touch_move());
    }

    #[test]
    fn test_double_mount_registers_once() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let mut picker = CircularColor::new(PickerConfig::default()).unwrap();
        picker.mount(window.clone());
        picker.mount(window.clone());
        assert_eq!(window.listener_count(), 1);
    }

    #[test]
    fn test_unmount_while_dragging_releases_listener() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let mut picker = CircularColor::new(PickerConfig::default()).unwrap();
        picker.mount(window.clone());
        picker.handle_event(PickerEvent::touch_start(Point::new(25.0, 100.0)));
        assert!(picker.is_dragging());

        picker.unmount();
        assert_eq!(window.listener_count(), 0);
        assert!(!picker.is_mounted());
        assert!(!picker.is_dragging());

        picker.mount(window.clone());
        assert_eq!(window.listener_count(), 1);
        assert!(!window.dispatch_touch_move());
    }

    #[test]
    fn test_drop_releases_listener() {
        let window = Rc::new(MemoryScrollBlocker::new());
        {
            let mut picker = CircularColor::new(PickerConfig::default()).unwrap();
            picker.mount(window.clone());
            picker.handle_event(PickerEvent::mouse_down(Point::new(25.0, 100.0)));
            assert!(window.dispatch_touch_move());
        }
        assert_eq!(window.listener_count(), 0);

        let mut remounted = CircularColor::new(PickerConfig::default()).unwrap();
        remounted.mount(window.clone());
        assert_eq!(window.listener_count(), 1);
    }
}
