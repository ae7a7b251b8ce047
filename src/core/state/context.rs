//=========================================================================
// State Context
//=========================================================================
//
// Capability handle passed to every game state hook.
//
// The context is owned by the host and lent out `&mut` for the duration
// of a single hook call. It lets a state ask for a transition and read
// frame timing, but gives no access to the host itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use super::{StateKey, StateTransition, TransitionQueue};

//=== StateContext ========================================================

/// What a state may see and request while one of its hooks runs.
///
/// # Available Data
///
/// - `current()`: key of the state being driven
/// - `frame()` / `delta()`: frame counter and time step of this frame
/// - `elapsed_in_state()`: time accumulated since `state_init`
/// - `is_exiting()`: whether the outro is playing
pub struct StateContext<K: StateKey> {
    transitions: TransitionQueue<K>,
    current: Option<K>,
    frame: u64,
    delta: Duration,
    elapsed: Duration,
    exiting: bool,
}

impl<K: StateKey> StateContext<K> {
    /// Creates a new context with empty state.
    pub(crate) fn new() -> Self {
        Self {
            transitions: TransitionQueue::new(),
            current: None,
            frame: 0,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            exiting: false,
        }
    }

    //--- Requests ---------------------------------------------------------

    /// Asks the host to leave this screen for a fresh instance of `key`.
    ///
    /// Applied at the end of the frame. The current state's outro plays
    /// before `key` is initialised.
    pub fn switch_to(&mut self, key: K) {
        self.transitions.push(StateTransition::Switch(key));
    }

    /// Asks the host to shut down once this state's outro has played.
    pub fn quit(&mut self) {
        self.transitions.push(StateTransition::Quit);
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the state currently being driven.
    ///
    /// `None` only before the host has started.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Index of the current frame, starting at 1 for the first frame.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Time step of the current frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Frame time accumulated since the current state was initialised.
    pub fn elapsed_in_state(&self) -> Duration {
        self.elapsed
    }

    /// `true` while the current state's outro is playing.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// Number of transition requests not yet applied.
    pub fn pending_transitions(&self) -> usize {
        self.transitions.len()
    }

    //--- Host Bookkeeping -------------------------------------------------

    pub(crate) fn begin_frame(&mut self, frame: u64, delta: Duration) {
        self.frame = frame;
        self.delta = delta;
    }

    pub(crate) fn enter(&mut self, key: K) {
        self.current = Some(key);
        self.elapsed = Duration::ZERO;
        self.exiting = false;
    }

    pub(crate) fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }

    pub(crate) fn set_exiting(&mut self, exiting: bool) {
        self.exiting = exiting;
    }

    pub(crate) fn push_transition(&mut self, transition: StateTransition<K>) {
        self.transitions.push(transition);
    }

    pub(crate) fn take_transitions(&mut self) -> Vec<StateTransition<K>> {
        self.transitions.take()
    }

    pub(crate) fn clear_transitions(&mut self) {
        self.transitions.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
