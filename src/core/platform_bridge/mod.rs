//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the state host.
//
// Components:
// - `interface`: Signal types and error definitions (the contract)
// - `event_collector`: Core-side signal collection and batching
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
pub(crate) use interface::{HostSignal, PlatformError};
