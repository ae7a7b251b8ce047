//=========================================================================
// Event Buffer
//
// Collects state events between two redraws.
//
// Responsibilities:
// - Keep key and button events in delivery order
// - Coalesce consecutive drags (the latest position wins)
// - Hand the whole batch over at the frame boundary via `drain()`
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::{EventType, StateEvent};

//=== EventBuffer Struct ==================================================
pub(crate) struct EventBuffer {
    events: Vec<StateEvent>,
}

impl EventBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const BASE_CAPACITY: usize = 64;

        Self {
            events: Vec::with_capacity(BASE_CAPACITY),
        }
    }

    //--- push() -----------------------------------------------------------
    //
    // A drag directly following another drag replaces it; anything in
    // between (a key press, a button release) keeps both.
    //
    pub(crate) fn push(&mut self, event: StateEvent) {
        if event.kind == EventType::MouseDrag {
            if let Some(last) = self.events.last_mut() {
                if last.kind == EventType::MouseDrag {
                    *last = event;
                    return;
                }
            }
        }
        self.events.push(event);
    }

    //--- drain() ----------------------------------------------------------
    //
    // Returns the frame's events and empties the buffer. `None` when
    // nothing was buffered, so empty batches are never sent.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<StateEvent>> {
        if self.events.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.events))
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
