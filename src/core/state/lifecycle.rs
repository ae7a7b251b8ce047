//=========================================================================
// State Lifecycle
//=========================================================================
//
// Explicit lifecycle tag for a hosted state instance.
//
// ```text
//   Uninitialized ──state_init──▶ Active ──exit requested──▶ ExitPending
//                                                                 │
//                                            outro elapsed, clean_up
//                                                                 ▼
//                                                             Disposed
// ```
//
// Disposed is terminal. A screen is re-entered by constructing a fresh
// instance, never by rewinding a disposed one.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::HostError;

//=== Lifecycle ===========================================================

/// Where a hosted state instance is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Constructed, `state_init` not yet run.
    #[default]
    Uninitialized,

    /// Initialised and receiving `events`, `logic` and `render`.
    Active,

    /// Exit requested; the outro is playing (`logic` and `render` only).
    ExitPending,

    /// `clean_up` has run. No further hook is ever called.
    Disposed,
}

impl Lifecycle {
    /// Returns `true` if moving from `self` to `next` is a legal step.
    pub fn can_advance_to(self, next: Lifecycle) -> bool {
        matches!(
            (self, next),
            (Self::Uninitialized, Self::Active)
                | (Self::Active, Self::ExitPending)
                | (Self::ExitPending, Self::Disposed)
        )
    }

    /// Validates a step and returns the new tag.
    ///
    /// The caller commits the returned value once the matching hook has
    /// run, so the tag reads `Uninitialized` during `state_init`.
    pub fn advance(self, next: Lifecycle) -> Result<Lifecycle, HostError> {
        if self.can_advance_to(next) {
            Ok(next)
        } else {
            Err(HostError::InvalidLifecycle { from: self, to: next })
        }
    }

    /// Returns `true` while per-frame hooks are still being called.
    pub fn is_live(self) -> bool {
        matches!(self, Self::Active | Self::ExitPending)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
