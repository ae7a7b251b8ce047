//=========================================================================
// State Event Types
//
// Defines the per-call input record delivered to a game state's `events`
// hook.
//
// This module abstracts away platform-specific input (e.g. Winit) into
// a small, immutable record: what kind of event occurred, the text a key
// produced, whether it was an auto-repeat, and where the mouse was.
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputTranslator (platform)
//         ↓
//    StateEvent (this module)
//         ↓
//    GameState::events()
// ```
//
//=========================================================================

//=== Reserved Keys =======================================================

/// Character produced by the Escape key.
///
/// Screens treat it as "go back" rather than as text input.
pub const KEY_ESCAPE: char = '\u{1b}';

/// Character produced by the main Return key (carriage return).
pub const KEY_RETURN: char = '\r';

/// Character produced by the keypad Enter key.
pub const KEY_ENTER: char = '\u{3}';

//=== EventType ===========================================================

/// Classifies a delivered input event.
///
/// The set is closed: screens branch on it and treat anything they do not
/// care about as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    /// Key pressed (or auto-repeated while held).
    KeyDown,

    /// Key released.
    KeyUp,

    /// Primary mouse button pressed.
    MouseDown,

    /// Cursor moved while the primary mouse button is held.
    MouseDrag,

    /// Primary mouse button released.
    MouseUp,

    /// No input this frame.
    #[default]
    None,
}

impl EventType {
    /// Returns `true` for `KeyDown` and `KeyUp`.
    pub fn is_key(self) -> bool {
        matches!(self, Self::KeyDown | Self::KeyUp)
    }
}

//=== Point / Rect ========================================================

/// A coordinate in window space (logical pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle used for widget hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    /// Returns `true` if `point` lies inside the rectangle.
    ///
    /// The left/top edges are inclusive, the right/bottom edges exclusive,
    /// so two adjacent widgets never both claim the same click.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < self.origin.x + self.width
            && point.y < self.origin.y + self.height
    }
}

//=== StateEvent ==========================================================

/// One delivered input event, passed by reference to `GameState::events`.
///
/// The record is immutable and owned by the host for the duration of the
/// call. States that need a value later must copy it out.
///
/// # Payload
///
/// - `characters`: text produced by a key event, empty for mouse events
/// - `is_repeat`: `true` only for OS auto-repeat of a held key
/// - `mouse_point`: cursor position in window space; for key events this
///   is the last known cursor position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StateEvent {
    pub kind: EventType,
    pub characters: String,
    pub is_repeat: bool,
    pub mouse_point: Point,
}

impl StateEvent {
    //--- Construction -----------------------------------------------------

    /// The record delivered on frames without input.
    pub fn none() -> Self {
        Self::default()
    }

    /// A fresh (non-repeat) key press producing `characters`.
    pub fn key_down(characters: impl Into<String>) -> Self {
        Self {
            kind: EventType::KeyDown,
            characters: characters.into(),
            ..Self::default()
        }
    }

    /// An auto-repeated key press producing `characters`.
    pub fn key_repeat(characters: impl Into<String>) -> Self {
        Self {
            is_repeat: true,
            ..Self::key_down(characters)
        }
    }

    /// A key release.
    pub fn key_up(characters: impl Into<String>) -> Self {
        Self {
            kind: EventType::KeyUp,
            characters: characters.into(),
            ..Self::default()
        }
    }

    /// A mouse event of `kind` at `point`.
    pub fn mouse(kind: EventType, point: Point) -> Self {
        Self {
            kind,
            mouse_point: point,
            ..Self::default()
        }
    }

    /// Returns a copy with the cursor position replaced.
    pub fn at(mut self, point: Point) -> Self {
        self.mouse_point = point;
        self
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if this is a key-down whose first character is `key`.
    pub fn is_key_down_char(&self, key: char) -> bool {
        self.kind == EventType::KeyDown && self.characters.starts_with(key)
    }

    /// Escape pressed.
    pub fn is_escape(&self) -> bool {
        self.is_key_down_char(KEY_ESCAPE)
    }

    /// Return or keypad Enter pressed.
    pub fn is_confirm(&self) -> bool {
        self.is_key_down_char(KEY_RETURN) || self.is_key_down_char(KEY_ENTER)
    }

    /// Mouse pressed inside `rect`.
    pub fn is_click_in(&self, rect: &Rect) -> bool {
        self.kind == EventType::MouseDown && rect.contains(self.mouse_point)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
