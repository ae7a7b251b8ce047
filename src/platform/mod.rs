//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the state host's thread.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  EventCollector  │
//  │   ↓                      │    │   ↓              │
//  │  InputTranslator         │    │  StateHost       │
//  │   ├─ key text / repeat   │    │   ↓              │
//  │   └─ cursor + drag       │    │  GameState hooks │
//  │   ↓                      │    │                  │
//  │  EventBuffer             │    └──────────────────┘
//  │   ↓                      │             ↑
//  │  RedrawRequested (flush) │             │
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    HostSignal
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: all input gathered since the
//   previous redraw is sent as one ordered batch
// - **Core liveness**: the core thread holds the sending half of an
//   `alive` channel; once it disconnects the window is closed
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{HostSignal, PlatformError};
use input_buffer::EventBuffer;
use input_processor::InputTranslator;

//=== WindowConfig ========================================================

/// Title and logical size of the game window.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input forwarder.
///
/// Runs on the main thread and sends batched [`HostSignal`]s to the core
/// thread. It never calls into a game state.
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()`
/// - `buffer`: Accumulates events until `RedrawRequested`
/// - `signal_sender`: Channel to the core thread
/// - `core_alive`: Disconnects when the core thread has finished
/// - `translator`: Converts Winit events → state events
pub(crate) struct Platform {
    window: Option<Window>,
    config: WindowConfig,
    buffer: EventBuffer,
    signal_sender: Sender<HostSignal>,
    core_alive: Receiver<()>,
    translator: InputTranslator,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(
        signal_sender: Sender<HostSignal>,
        core_alive: Receiver<()>,
        config: WindowConfig,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            config,
            buffer: EventBuffer::new(),
            signal_sender,
            core_alive,
            translator: InputTranslator::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the core
    /// thread finishes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// exits with an error.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new()
            .map_err(PlatformError::EventLoopCreation)?;

        event_loop.run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the core thread.
    ///
    /// If the channel is disconnected the events are dropped with a
    /// warning; the liveness check closes the window right after.
    fn flush_input_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let count = self.buffer.len();
        trace!(target: "platform::input", "Flushing {} events", count);

        if let Some(events) = self.buffer.drain() {
            if self.signal_sender.send(HostSignal::Inputs(events)).is_err() {
                warn!(
                    target: "platform::input",
                    "Channel disconnected, dropping {} events",
                    count
                );
            }
        }
    }

    /// `false` once the core thread has ended.
    fn core_is_alive(&self) -> bool {
        !matches!(self.core_alive.try_recv(), Err(TryRecvError::Disconnected))
    }

    fn buffer_event(&mut self, event: Option<crate::core::input::StateEvent>) {
        if let Some(event) = event {
            if event.kind.is_key() {
                trace!(
                    target: "platform::input",
                    "{:?} {:?} (repeat: {})",
                    event.kind,
                    event.characters,
                    event.is_repeat
                );
            } else {
                trace!(
                    target: "platform::input",
                    "{:?} at {:?}",
                    event.kind,
                    self.translator.cursor()
                );
            }
            self.buffer.push(event);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first activation.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.translator.set_scale_factor(window.scale_factor());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.signal_sender.send(HostSignal::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.signal_sender.send(HostSignal::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.translator.set_scale_factor(*scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.translator.process_cursor_moved(position.x, position.y);
                self.buffer_event(event);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let event = self.translator.process_key_event(key_event);
                self.buffer_event(Some(event));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.translator.process_mouse_button(*button, *state);
                self.buffer_event(event);
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if !self.core_is_alive() {
                    info!(target: "platform", "Core thread finished, closing window");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use crate::core::input::StateEvent;

    fn config() -> WindowConfig {
        WindowConfig {
            title: "test".to_string(),
            width: 640,
            height: 480,
        }
    }

    fn platform() -> (Platform, Receiver<HostSignal>, Sender<()>) {
        let (tx, rx) = unbounded();
        let (alive_tx, alive_rx) = bounded(0);
        (Platform::new(tx, alive_rx, config()), rx, alive_tx)
    }

    #[test]
    fn window_is_created_lazily() {
        let (platform, _rx, _alive) = platform();
        assert!(platform.window.is_none());
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut platform, rx, _alive) = platform();

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No signal should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events_once() {
        let (mut platform, rx, _alive) = platform();
        platform.buffer_event(Some(StateEvent::key_down("a")));

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(HostSignal::Inputs(events)) => assert_eq!(events.len(), 1),
            other => panic!("Expected Inputs, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut platform, rx, _alive) = platform();
        platform.buffer_event(Some(StateEvent::key_down("a")));
        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn core_liveness_follows_alive_sender() {
        let (platform, _rx, alive) = platform();
        assert!(platform.core_is_alive());

        drop(alive);
        assert!(!platform.core_is_alive());
    }

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }
}
