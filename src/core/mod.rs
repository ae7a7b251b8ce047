//=========================================================================
// Core Systems Orchestrator
//
// Runs the state host on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the StateHost and every GameState it creates
// - Receive batched input from the platform thread via channel
// - Drive one host frame per tick at a fixed rate (TPS)
// - Signal the platform when the host stops
// - After the window closes, keep ticking without input until the live
//   state's outro has played
//
// Notes:
// Game state hooks only ever run on this thread. The platform layer
// never touches a state; it only sends `HostSignal`s.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender};
use log::{error, info};

//=== Module Declarations =================================================

pub mod input;
pub mod state;
pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use input::{EventType, Point, Rect, StateEvent};
pub use state::{GameState, Lifecycle, StateContext, StateHost, StateKey, StateTransition};

use platform_bridge::{EventCollector, HostSignal};

//=== TickControl =========================================================

/// Control flow signal returned by every frame of the core loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== CoreSystemsOrchestrator =============================================

/// Owns the state host until the logic thread is spawned.
pub(crate) struct CoreSystemsOrchestrator<K: StateKey> {
    host: StateHost<K>,
}

impl<K: StateKey> CoreSystemsOrchestrator<K> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            host: StateHost::new(),
        }
    }

    /// Gives the caller mutable access to the host before it starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut StateHost<K>),
    {
        init_fn(&mut self.host);
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects input batches from the platform (until it closes)
    //  2. Runs one host frame with the measured time step
    //  3. Sleeps to maintain fixed pacing
    //
    // `alive` is dropped when the thread ends, which tells the platform
    // to close the window.
    //
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<HostSignal>,
        alive: Sender<()>,
        tps: f64,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let _alive = alive;
            let mut host = self.host;
            let mut collector = EventCollector::new(receiver);

            if let Err(e) = host.start() {
                error!(target: "host", "Host failed to start: {}", e);
                return;
            }

            let mut last_frame = Instant::now();

            loop {
                let frame_start = Instant::now();
                let delta = frame_start - last_frame;
                last_frame = frame_start;

                //--- Step 1: Gather platform input -------------------------
                let events = if host.is_closing() {
                    &[][..]
                } else if let TickControl::Exit = collector.collect_frame() {
                    info!("Platform closed, finishing the current outro.");
                    host.shutdown();
                    &[][..]
                } else {
                    collector.events()
                };

                //--- Step 2: Run one host frame ----------------------------
                if let TickControl::Exit = host.frame(events, delta) {
                    info!("Host stopped, core thread exiting.");
                    break;
                }

                //--- Step 3: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crossbeam_channel::{bounded, unbounded, TryRecvError};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Screen {
        Title,
    }

    impl StateKey for Screen {}

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Init,
        Events(StateEvent),
        Logic,
        CleanUp(Duration),
    }

    type Journal = Arc<Mutex<Vec<Call>>>;

    /// Quits on the first Return; records hooks and the time spent at `clean_up`.
    struct Title {
        journal: Journal,
        outro: Duration,
    }

    impl GameState<Screen> for Title {
        fn state_init(&mut self, _ctx: &mut StateContext<Screen>) {
            self.journal.lock().unwrap().push(Call::Init);
        }

        fn events(&mut self, event: &StateEvent, ctx: &mut StateContext<Screen>) {
            if event.kind != EventType::None {
                self.journal.lock().unwrap().push(Call::Events(event.clone()));
            }
            if event.is_confirm() {
                ctx.quit();
            }
        }

        fn logic(&mut self, _ctx: &mut StateContext<Screen>) {
            let mut journal = self.journal.lock().unwrap();
            if journal.last() != Some(&Call::Logic) {
                journal.push(Call::Logic);
            }
        }

        fn outro(&self) -> Duration {
            self.outro
        }

        fn clean_up(&mut self, ctx: &mut StateContext<Screen>) {
            self.journal.lock().unwrap().push(Call::CleanUp(ctx.elapsed_in_state()));
        }
    }

    fn orchestrator(journal: &Journal, outro: Duration) -> CoreSystemsOrchestrator<Screen> {
        let journal = Arc::clone(journal);
        let mut orchestrator = CoreSystemsOrchestrator::new();
        orchestrator.init_systems(|host| {
            host.register_initial(Screen::Title, move || Title {
                journal: Arc::clone(&journal),
                outro,
            })
        });
        orchestrator
    }

    #[test]
    fn quitting_state_ends_the_thread_and_drops_alive() {
        let journal: Journal = Arc::default();
        let (tx, rx) = unbounded();
        let (alive_tx, alive_rx) = bounded::<()>(0);

        let confirm = StateEvent::key_down("\r");
        tx.send(HostSignal::Inputs(vec![confirm.clone()])).unwrap();

        let handle = orchestrator(&journal, Duration::ZERO).spawn_core_thread(rx, alive_tx, 1000.0);
        handle.join().unwrap();

        assert_eq!(alive_rx.try_recv(), Err(TryRecvError::Disconnected));
        let calls = journal.lock().unwrap().clone();
        assert_eq!(calls[..3], [Call::Init, Call::Events(confirm), Call::Logic]);
        assert!(matches!(calls.last(), Some(Call::CleanUp(_))));
        drop(tx);
    }

    #[test]
    fn window_close_lets_the_outro_finish_before_clean_up() {
        let outro = Duration::from_millis(50);
        let journal: Journal = Arc::default();
        let (tx, rx) = unbounded();
        let (alive_tx, alive_rx) = bounded::<()>(0);

        tx.send(HostSignal::WindowClosed).unwrap();
        // Never delivered: input stops at the close.
        tx.send(HostSignal::Inputs(vec![StateEvent::key_down("x")])).unwrap();

        let handle = orchestrator(&journal, outro).spawn_core_thread(rx, alive_tx, 1000.0);
        handle.join().unwrap();

        assert_eq!(alive_rx.try_recv(), Err(TryRecvError::Disconnected));
        let calls = journal.lock().unwrap().clone();
        assert_eq!(calls.len(), 3, "{:?}", calls);
        assert_eq!(calls[..2], [Call::Init, Call::Logic]);
        match calls[2] {
            Call::CleanUp(elapsed) => assert!(elapsed >= outro, "cleaned up after {:?}", elapsed),
            ref other => panic!("Expected CleanUp, got {:?}", other),
        }
    }

    #[test]
    fn failed_start_ends_the_thread() {
        let (_tx, rx) = unbounded();
        let (alive_tx, alive_rx) = bounded::<()>(0);

        let handle = CoreSystemsOrchestrator::<Screen>::new().spawn_core_thread(rx, alive_tx, 1000.0);
        handle.join().unwrap();

        assert_eq!(alive_rx.try_recv(), Err(TryRecvError::Disconnected));
    }
}
