//=========================================================================
// State Host
//=========================================================================
//
// Owns the registered screens, keeps one of them active, drives it once
// per frame and sequences transitions through the outgoing state's outro.
//
// Every activation constructs a fresh instance from the registered
// factory. A disposed instance is dropped, never re-initialised.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::{GameState, Lifecycle, StateContext, StateKey, StateTransition};
use crate::core::input::StateEvent;
use crate::core::TickControl;

//=== HostError ===========================================================

/// Host misuse or internal sequencing failures.
///
/// Game state hooks never fail; these errors describe how the host was
/// configured or driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// `start()` was called without an initial state.
    NoInitialState,

    /// `start()` was called on a host that is already running.
    AlreadyRunning,

    /// A key was used that has no registered factory.
    UnregisteredState(String),

    /// A lifecycle step that the state machine does not allow.
    InvalidLifecycle { from: Lifecycle, to: Lifecycle },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoInitialState => write!(f, "No initial state was set"),
            Self::AlreadyRunning => write!(f, "Host is already running"),
            Self::UnregisteredState(key) => write!(f, "State {} is not registered", key),
            Self::InvalidLifecycle { from, to } => {
                write!(f, "Invalid lifecycle step {:?} -> {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for HostError {}

//=== StateFactory ========================================================

/// Builds a fresh state instance for each activation.
pub type StateFactory<K> = Box<dyn FnMut() -> Box<dyn GameState<K>> + Send>;

//=== HostedState =========================================================

/// A live state instance paired with its lifecycle tag.
struct HostedState<K: StateKey> {
    key: K,
    state: Box<dyn GameState<K>>,
    lifecycle: Lifecycle,
    elapsed: Duration,
}

impl<K: StateKey> HostedState<K> {
    fn new(key: K, state: Box<dyn GameState<K>>) -> Self {
        Self {
            key,
            state,
            lifecycle: Lifecycle::Uninitialized,
            elapsed: Duration::ZERO,
        }
    }

    fn init(&mut self, ctx: &mut StateContext<K>) -> Result<(), HostError> {
        let next = self.lifecycle.advance(Lifecycle::Active)?;
        self.state.state_init(ctx);
        self.lifecycle = next;
        Ok(())
    }

    /// Marks the exit and returns the outro length queried at this moment.
    fn begin_exit(&mut self) -> Result<Duration, HostError> {
        self.lifecycle = self.lifecycle.advance(Lifecycle::ExitPending)?;
        Ok(self.state.outro())
    }

    fn dispose(&mut self, ctx: &mut StateContext<K>) -> Result<(), HostError> {
        let next = self.lifecycle.advance(Lifecycle::Disposed)?;
        self.state.clean_up(ctx);
        self.lifecycle = next;
        Ok(())
    }

    /// Input only reaches an `Active` state; an outro gets logic and render.
    fn run_frame(&mut self, events: &[StateEvent], ctx: &mut StateContext<K>) {
        if !self.lifecycle.is_live() {
            return;
        }

        if self.lifecycle == Lifecycle::Active {
            if events.is_empty() {
                self.state.events(&StateEvent::none(), ctx);
            } else {
                for event in events {
                    trace!(target: "host", "{:?} <- {:?}", self.key, event.kind);
                    self.state.events(event, ctx);
                }
            }
        }

        self.state.logic(ctx);
        self.state.render(ctx);
    }
}

//=== PendingExit =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitTarget<K: StateKey> {
    Switch(K),
    Quit,
}

/// Outro clock of the state being left.
struct PendingExit<K: StateKey> {
    outro: Duration,
    elapsed: Duration,
    target: ExitTarget<K>,
}

impl<K: StateKey> PendingExit<K> {
    fn is_finished(&self) -> bool {
        self.elapsed >= self.outro
    }
}

//=== StateHost ===========================================================

/// Drives the active game state and sequences screen transitions.
///
/// # Frame
///
/// [`StateHost::frame`] runs, in order:
///
/// 1. `events` for each delivered input (or one [`StateEvent::none`]),
///    then `logic` and `render`. While an outro is playing the outgoing
///    state gets `logic` and `render` only, and the outro clock advances.
/// 2. Transition requests queued during the frame. The active state's
///    `outro()` is queried when its exit is requested.
/// 3. Once the outro has elapsed (immediately for a zero outro):
///    `clean_up`, then `state_init` of a fresh target instance, or stop.
///
/// # Example
///
/// ```rust
/// # use std::time::Duration;
/// # use yaspeg::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Menu }
/// # impl StateKey for Screen {}
/// # struct Menu;
/// # impl GameState<Screen> for Menu {}
/// let mut host = StateHost::new();
/// host.register_initial(Screen::Menu, || Menu);
/// host.start().unwrap();
///
/// host.frame(&[], Duration::from_millis(16));
/// assert_eq!(host.current(), Some(Screen::Menu));
/// ```
pub struct StateHost<K: StateKey> {
    factories: HashMap<K, StateFactory<K>>,
    initial: Option<K>,
    active: Option<HostedState<K>>,
    exit: Option<PendingExit<K>>,
    context: StateContext<K>,
    frame: u64,
    running: bool,
    closing: bool,
}

impl<K: StateKey> StateHost<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a host with no registered states.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            initial: None,
            active: None,
            exit: None,
            context: StateContext::new(),
            frame: 0,
            running: false,
            closing: false,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the factory used to build `key` on every activation.
    pub fn register<F, S>(&mut self, key: K, mut factory: F)
    where
        F: FnMut() -> S + Send + 'static,
        S: GameState<K> + 'static,
    {
        let boxed: StateFactory<K> =
            Box::new(move || -> Box<dyn GameState<K>> { Box::new(factory()) });
        if self.factories.insert(key, boxed).is_some() {
            warn!(target: "host", "State {:?} was already registered and has been replaced", key);
        }
    }

    /// Registers a factory and makes `key` the state entered by `start()`.
    pub fn register_initial<F, S>(&mut self, key: K, factory: F)
    where
        F: FnMut() -> S + Send + 'static,
        S: GameState<K> + 'static,
    {
        self.register(key, factory);
        self.set_initial(key);
    }

    /// Chooses the state entered by `start()`.
    pub fn set_initial(&mut self, key: K) {
        debug!(target: "host", "Initial state set to {:?}", key);
        self.initial = Some(key);
    }

    /// Returns `true` if a factory is registered for `key`.
    pub fn is_registered(&self, key: K) -> bool {
        self.factories.contains_key(&key)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Builds and initialises the initial state.
    ///
    /// # Errors
    ///
    /// [`HostError::AlreadyRunning`] if the host has not stopped yet, since
    /// the live state would otherwise be dropped without its `clean_up`.
    pub fn start(&mut self) -> Result<(), HostError> {
        if self.running {
            return Err(HostError::AlreadyRunning);
        }
        let initial = self.initial.ok_or(HostError::NoInitialState)?;
        info!(target: "host", "Starting with initial state {:?}", initial);

        self.frame = 0;
        self.exit = None;
        self.closing = false;
        self.context.clear_transitions();
        self.activate(initial)?;
        self.running = true;
        Ok(())
    }

    /// Queues a transition from outside a state hook.
    pub fn request(&mut self, transition: StateTransition<K>) {
        self.context.push_transition(transition);
    }

    /// Runs one frame. Returns [`TickControl::Exit`] once the host stopped.
    pub fn frame(&mut self, events: &[StateEvent], delta: Duration) -> TickControl {
        if !self.running {
            return TickControl::Exit;
        }

        self.frame += 1;
        self.context.begin_frame(self.frame, delta);

        //--- 1. Drive the live state ---------------------------------------
        if let Some(hosted) = self.active.as_mut() {
            hosted.elapsed += delta;
            if let Some(exit) = self.exit.as_mut() {
                exit.elapsed += delta;
            }

            self.context.set_elapsed(hosted.elapsed);
            self.context.set_exiting(self.exit.is_some());
            hosted.run_frame(events, &mut self.context);
        }

        //--- 2. Apply queued transitions ----------------------------------
        self.process_transitions();

        //--- 3. Finish an elapsed outro -----------------------------------
        if self.exit.as_ref().is_some_and(PendingExit::is_finished) {
            if let Err(e) = self.finish_exit() {
                error!(target: "host", "Transition failed: {}", e);
                self.running = false;
            }
        }

        if self.running {
            TickControl::Continue
        } else {
            TickControl::Exit
        }
    }

    /// Stops the host once the live state's outro has played.
    ///
    /// Queues a quit that retargets any pending exit. From here on every
    /// `switch_to` is treated as a quit, so the caller only needs to keep
    /// calling [`StateHost::frame`] until it returns [`TickControl::Exit`].
    /// Used when the window goes away underneath the host.
    pub fn shutdown(&mut self) {
        if !self.running || self.closing {
            return;
        }

        info!(target: "host", "Shutting down after the outro of {:?}", self.current());
        self.closing = true;
        self.context.push_transition(StateTransition::Quit);
    }

    //--- Queries ----------------------------------------------------------

    /// Key of the live state, if any.
    pub fn current(&self) -> Option<K> {
        self.active.as_ref().map(|hosted| hosted.key)
    }

    /// Lifecycle of the live state, if any.
    pub fn lifecycle(&self) -> Option<Lifecycle> {
        self.active.as_ref().map(|hosted| hosted.lifecycle)
    }

    /// `true` between a successful `start()` and the host stopping.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `true` once `shutdown()` was called on a running host.
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Number of frames run since `start()`.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    //--- Internal Helpers -------------------------------------------------

    fn process_transitions(&mut self) {
        for transition in self.context.take_transitions() {
            let target = match transition {
                StateTransition::Switch(key) if self.closing => {
                    debug!(target: "host", "Shutting down, switch to {:?} becomes a quit", key);
                    ExitTarget::Quit
                }
                StateTransition::Switch(key) => {
                    if !self.is_registered(key) {
                        warn!(target: "host", "Attempted to switch to unregistered state {:?}", key);
                        continue;
                    }
                    ExitTarget::Switch(key)
                }
                StateTransition::Quit => ExitTarget::Quit,
            };

            if let Some(exit) = self.exit.as_mut() {
                debug!(target: "host", "Exit already pending, retargeting {:?} -> {:?}", exit.target, target);
                exit.target = target;
                continue;
            }

            if let Err(e) = self.begin_exit(target) {
                error!(target: "host", "Transition failed: {}", e);
                self.running = false;
                return;
            }
        }
    }

    fn begin_exit(&mut self, target: ExitTarget<K>) -> Result<(), HostError> {
        let Some(hosted) = self.active.as_mut() else {
            return Ok(());
        };

        let outro = hosted.begin_exit()?;
        debug!(
            target: "host",
            "Leaving {:?} for {:?} (outro {:?})",
            hosted.key,
            target,
            outro
        );

        self.exit = Some(PendingExit {
            outro,
            elapsed: Duration::ZERO,
            target,
        });
        Ok(())
    }

    fn finish_exit(&mut self) -> Result<(), HostError> {
        let Some(exit) = self.exit.take() else {
            return Ok(());
        };

        if let Some(mut hosted) = self.active.take() {
            self.context.set_exiting(true);
            hosted.dispose(&mut self.context)?;
            info!(target: "host", "Disposed {:?} ({})", hosted.key, hosted.state.name());

            // The disposed state no longer owns the screen.
            let dropped = self.context.take_transitions();
            if !dropped.is_empty() {
                warn!(target: "host", "Dropping {} request(s) made in clean_up of {:?}", dropped.len(), hosted.key);
            }
        }

        match exit.target {
            ExitTarget::Switch(key) => self.activate(key),
            ExitTarget::Quit => {
                info!(target: "host", "Quit requested, host stopping");
                self.running = false;
                Ok(())
            }
        }
    }

    fn activate(&mut self, key: K) -> Result<(), HostError> {
        let factory = self
            .factories
            .get_mut(&key)
            .ok_or_else(|| HostError::UnregisteredState(format!("{:?}", key)))?;

        let mut hosted = HostedState::new(key, factory());

        self.context.enter(key);
        hosted.init(&mut self.context)?;
        info!(target: "host", "Entered {:?} ({})", key, hosted.state.name());

        self.active = Some(hosted);
        Ok(())
    }
}

impl<K: StateKey> Default for StateHost<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================
