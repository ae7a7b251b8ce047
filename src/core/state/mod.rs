//=========================================================================
// Game State System
//=========================================================================
//
// Screen lifecycle and host-driven frame dispatch.
//
// Architecture:
//   StateHost
//     ├─ factories: HashMap<K, StateFactory<K>>
//     ├─ active: HostedState (one Box<dyn GameState<K>> + Lifecycle)
//     ├─ exit: PendingExit (outro clock + target)
//     └─ context: StateContext<K> (lent to every hook)
//
// Frame:
//   events()* → logic() → render() → apply transitions → finish outro
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

//=== Module Declarations =================================================

mod context;
mod host;
mod lifecycle;
mod transition_queue;

//=== Public API ==========================================================

pub use context::StateContext;
pub use host::{HostError, StateFactory, StateHost};
pub use lifecycle::Lifecycle;
pub use transition_queue::{StateTransition, TransitionQueue};

use crate::core::input::StateEvent;

//=== State Key Trait =====================================================

/// Marker trait for state identifiers.
///
/// Keys name the screens a host can switch between. Typically implemented
/// by a game-specific enum.
pub trait StateKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== GameState Trait =====================================================

/// The contract every screen implements.
///
/// The host calls the hooks on a single thread, never concurrently, in
/// this order:
///
/// ```text
/// state_init                         once, before anything else
/// ( events* → logic → render )       every frame while active
/// outro                              once, when an exit is requested
/// ( logic → render )                 every frame until the outro elapses
/// clean_up                           once, then the instance is dropped
/// ```
///
/// Every hook has an empty default, so a screen overrides only what it
/// needs:
///
/// ```rust
/// # use yaspeg::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Screen { Menu, Authors }
/// # impl StateKey for Screen {}
/// struct Authors;
///
/// impl GameState<Screen> for Authors {
///     fn events(&mut self, event: &StateEvent, ctx: &mut StateContext<Screen>) {
///         if event.is_escape() {
///             ctx.switch_to(Screen::Menu);
///         }
///     }
/// }
/// ```
pub trait GameState<K: StateKey>: Send {
    /// Builds the screen's resources. Runs once per instance.
    fn state_init(&mut self, _ctx: &mut StateContext<K>) {}

    /// Handles one input event.
    ///
    /// Called for every event delivered this frame, or once with
    /// [`StateEvent::none`] when the frame carried no input. Events the
    /// screen does not care about are ignored.
    fn events(&mut self, _event: &StateEvent, _ctx: &mut StateContext<K>) {}

    /// Advances time-based state. Called every frame after `events`.
    fn logic(&mut self, _ctx: &mut StateContext<K>) {}

    /// Pushes model changes into retained visual state. Called every
    /// frame after `logic`.
    fn render(&mut self, _ctx: &mut StateContext<K>) {}

    /// Length of the exit animation. Zero means no delay.
    fn outro(&self) -> Duration {
        Duration::ZERO
    }

    /// Releases the screen's resources once the outro has elapsed.
    fn clean_up(&mut self, _ctx: &mut StateContext<K>) {}

    /// Label used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
