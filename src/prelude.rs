//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use yaspeg::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Input records
pub use crate::core::input::{
    EventType, Point, Rect, StateEvent, KEY_ENTER, KEY_ESCAPE, KEY_RETURN,
};

// State system
pub use crate::core::state::{
    GameState, HostError, Lifecycle, StateContext, StateHost, StateKey, StateTransition,
};
pub use crate::core::TickControl;
