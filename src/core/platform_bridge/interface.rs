//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (signals and errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::StateEvent;

//=== HostSignal ==========================================================

/// Messages sent from the platform thread to the core thread.
#[derive(Debug, Clone)]
pub(crate) enum HostSignal {
    /// Input events gathered during one redraw, in delivery order.
    Inputs(Vec<StateEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}
