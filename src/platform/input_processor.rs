//=========================================================================
// Input Translator
//=========================================================================
//
// Converts Winit window events into `StateEvent`s.
//
// Architecture:
//   Winit Events → InputTranslator → StateEvent → EventBuffer
//
// Stateful tracking: the last cursor position (in logical pixels) is
// attached to every event, and the primary button state decides whether
// a cursor move is a drag. Only the primary (left) button is forwarded.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{EventType, Point, StateEvent, KEY_ENTER, KEY_ESCAPE, KEY_RETURN};

//=== InputTranslator =====================================================

/// Converts Winit events to state events with cursor tracking.
pub(crate) struct InputTranslator {
    cursor: Point,
    primary_down: bool,
    scale_factor: f64,
}

impl InputTranslator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: Point::ORIGIN,
            primary_down: false,
            scale_factor: 1.0,
        }
    }

    /// Updates the physical → logical pixel ratio.
    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    pub(crate) fn cursor(&self) -> Point {
        self.cursor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit key event.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> StateEvent {
        self.translate_key(
            key_event.physical_key,
            key_event.text.as_deref(),
            key_event.state,
            key_event.repeat,
        )
    }

    /// Builds a key event from its parts.
    ///
    /// Escape, Return and keypad Enter always carry their reserved
    /// characters, whatever text the platform reports for them.
    pub(crate) fn translate_key(
        &self,
        physical_key: PhysicalKey,
        text: Option<&str>,
        state: ElementState,
        repeat: bool,
    ) -> StateEvent {
        let characters = match reserved_character(physical_key) {
            Some(c) => c.to_string(),
            None => text.unwrap_or_default().to_string(),
        };

        let event = match state {
            ElementState::Pressed if repeat => StateEvent::key_repeat(characters),
            ElementState::Pressed => StateEvent::key_down(characters),
            ElementState::Released => StateEvent::key_up(characters),
        };

        event.at(self.cursor)
    }

    /// Converts a mouse button event (primary button only).
    pub(crate) fn process_mouse_button(
        &mut self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<StateEvent> {
        if button != WinitMouseButton::Left {
            return None;
        }

        let kind = match state {
            ElementState::Pressed => {
                self.primary_down = true;
                EventType::MouseDown
            }
            ElementState::Released => {
                self.primary_down = false;
                EventType::MouseUp
            }
        };

        Some(StateEvent::mouse(kind, self.cursor))
    }

    /// Records a cursor move (physical pixels). Yields a drag while the
    /// primary button is held.
    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64) -> Option<StateEvent> {
        self.cursor = Point::new(
            (x / self.scale_factor) as f32,
            (y / self.scale_factor) as f32,
        );

        self.primary_down
            .then(|| StateEvent::mouse(EventType::MouseDrag, self.cursor))
    }
}

//=== Reserved Keys =======================================================

fn reserved_character(physical_key: PhysicalKey) -> Option<char> {
    match physical_key {
        PhysicalKey::Code(WinitKeyCode::Escape) => Some(KEY_ESCAPE),
        PhysicalKey::Code(WinitKeyCode::Enter) => Some(KEY_RETURN),
        PhysicalKey::Code(WinitKeyCode::NumpadEnter) => Some(KEY_ENTER),
        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
