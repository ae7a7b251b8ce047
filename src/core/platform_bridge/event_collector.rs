//=========================================================================
// Event Collector
//=========================================================================
//
// Platform signal collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostSignal> → collect_frame() → events → TickControl
//
// Bounded polling prevents starvation. Batches are flattened in arrival
// order, so the host sees one ordered event list per frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::HostSignal;
use crate::core::input::StateEvent;
use crate::core::TickControl;

//=== EventCollector ======================================================

/// Collects platform signals into the current frame's event list.
pub(crate) struct EventCollector {
    receiver: Receiver<HostSignal>,
    events: Vec<StateEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<HostSignal>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Collects pending signals (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_SIGNALS_PER_FRAME: usize = 100;

        self.events.clear();
        let mut drained = 0;

        while drained < MAX_SIGNALS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(signal) => {
                    if self.handle_signal(signal) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_SIGNALS_PER_FRAME {
            warn!("Signal queue backlog: drained {} batches this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns the events collected for this frame.
    pub(crate) fn events(&self) -> &[StateEvent] {
        &self.events
    }

    fn handle_signal(&mut self, signal: HostSignal) -> TickControl {
        match signal {
            HostSignal::Inputs(batch) => {
                self.events.extend(batch);
                TickControl::Continue
            }
            HostSignal::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
