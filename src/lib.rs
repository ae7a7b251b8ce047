//=========================================================================
// Yaspeg — Library Root
//
// Game screen lifecycle engine: a host that keeps one screen state
// active, drives it every frame through `events → logic → render`, and
// sequences screen changes through an outro before `clean_up`.
//
// Typical usage:
// ```no_run
// use yaspeg::prelude::*;
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Screen { Menu }
// impl StateKey for Screen {}
//
// struct Menu;
// impl GameState<Screen> for Menu {}
//
// EngineBuilder::<Screen>::new()
//     .build()
//     .init(|host| host.register_initial(Screen::Menu, || Menu))
//     .run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the state contract, the host and the input records. It can
// be used on its own (without a window) by driving `StateHost::frame`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the winit window and event loop and is not part of the
// public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
