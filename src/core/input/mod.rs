//=========================================================================
// Input
//=========================================================================
//
// Platform-independent input records delivered to game states.
//
// Architecture:
//   Platform (winit) → InputTranslator → StateEvent → GameState::events()
//
// States never see platform types; everything a screen needs to react to
// input (kind, text, repeat flag, cursor position) lives in `StateEvent`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{EventType, Point, Rect, StateEvent, KEY_ENTER, KEY_ESCAPE, KEY_RETURN};
