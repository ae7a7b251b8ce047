//=========================================================================
// Yaspeg Engine
//
// Main entry point and coordinator.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  ──run()──>  [Runtime]
//         │                          │                     │
//         ├─ with_tps()              └─ register states    ├─ spawns logic thread
//         ├─ with_channel_capacity()                       ├─ runs platform
//         ├─ with_title()                                  └─ blocks until exit
//         └─ with_window_size()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::HostSignal;
use crate::core::{CoreSystemsOrchestrator, StateHost, StateKey};
use crate::platform::{Platform, WindowConfig};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (frames per second on the logic thread)
/// - **Channel capacity**: 128 input batches
/// - **Window**: "Yaspeg", 800×600 logical pixels
///
/// # Examples
///
/// ```no_run
/// use yaspeg::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Screen { Menu }
/// impl StateKey for Screen {}
///
/// struct Menu;
/// impl GameState<Screen> for Menu {}
///
/// EngineBuilder::<Screen>::new()
///     .with_tps(120.0)
///     .with_title("Menu demo")
///     .build()
///     .init(|host| host.register_initial(Screen::Menu, || Menu))
///     .run();
/// ```
pub struct EngineBuilder<K: StateKey> {
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
    _phantom: std::marker::PhantomData<K>,
}

impl<K: StateKey> EngineBuilder<K> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window: WindowConfig {
                title: "Yaspeg".to_string(),
                width: 800,
                height: 600,
            },
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the target frames per second of the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the window's inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine<K> {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {}x{})",
            self.tps, self.channel_capacity, self.window.width, self.window.height
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl<K: StateKey> Default for EngineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Yaspeg runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► StateHost → active GameState
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Translation
///
/// Communication: bounded channel (HostSignal)
/// ```
pub struct Engine<K: StateKey> {
    orchestrator: CoreSystemsOrchestrator<K>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl<K: StateKey> Engine<K> {
    //--- Initialization ---------------------------------------------------

    /// Registers game states before the engine runs.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut StateHost<K>),
    {
        info!("Initializing state host");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Starts the engine and blocks until the window closes or a state
    /// quits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel and the core liveness channel
    /// 2. Spawns the logic thread, which starts the host
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the logic thread
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create communication channels -----------------------------
        let (tx, rx): (Sender<HostSignal>, Receiver<HostSignal>) =
            bounded(self.channel_capacity);
        let (alive_tx, alive_rx) = bounded::<()>(0);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, alive_tx, self.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, alive_rx, self.window);

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Wait for logic thread to terminate ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestState {
        Menu,
    }

    impl StateKey for TestState {}

    struct Menu;

    impl crate::core::GameState<TestState> for Menu {}

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestState>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.window.title, "Yaspeg");
        assert_eq!((builder.window.width, builder.window.height), (800, 600));
    }

    #[test]
    fn builder_with_tps() {
        let builder = EngineBuilder::<TestState>::new().with_tps(120.0);
        assert_eq!(builder.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<TestState>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::<TestState>::new().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        EngineBuilder::<TestState>::new().with_window_size(0, 600);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::<TestState>::new()
            .with_tps(30.0)
            .with_channel_capacity(256)
            .with_title("Settings")
            .with_window_size(1024, 768)
            .build();

        assert_eq!(engine.tps, 30.0);
        assert_eq!(engine.channel_capacity, 256);
        assert_eq!(engine.window.title, "Settings");
        assert_eq!((engine.window.width, engine.window.height), (1024, 768));
    }

    #[test]
    fn init_registers_states_on_the_host() {
        let mut engine = EngineBuilder::<TestState>::new()
            .build()
            .init(|host| host.register_initial(TestState::Menu, || Menu));

        let mut registered = false;
        engine
            .orchestrator
            .init_systems(|host| registered = host.is_registered(TestState::Menu));
        assert!(registered);
    }
}
