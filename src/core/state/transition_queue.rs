//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for state transitions.
//
// States queue requests here from inside their hooks. The host drains the
// queue at the frame boundary, after `render`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::StateKey;

//=== State Transition ====================================================

/// A request to leave the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateTransition<K: StateKey> {
    /// Play the current state's outro, then activate a fresh `K`.
    Switch(K),

    /// Play the current state's outro, then stop the host.
    Quit,
}

//=== Transition Queue ====================================================

/// FIFO of pending transition requests.
pub struct TransitionQueue<K: StateKey> {
    queue: Vec<StateTransition<K>>,
}

impl<K: StateKey> TransitionQueue<K> {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a transition to be processed at the next frame boundary.
    pub fn push(&mut self, transition: StateTransition<K>) {
        self.queue.push(transition);
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued transitions.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Clears all queued transitions.
    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all transitions from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<StateTransition<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: StateKey> Default for TransitionQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestState {
        Menu,
        Authors,
    }

    impl StateKey for TestState {}

    #[test]
    fn take_preserves_fifo_order_and_empties() {
        let mut queue = TransitionQueue::new();
        queue.push(StateTransition::Switch(TestState::Authors));
        queue.push(StateTransition::Switch(TestState::Menu));
        queue.push(StateTransition::Quit);
        assert_eq!(queue.len(), 3);

        let taken = queue.take();
        assert_eq!(
            taken,
            vec![
                StateTransition::Switch(TestState::Authors),
                StateTransition::Switch(TestState::Menu),
                StateTransition::Quit,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_discards_requests() {
        let mut queue = TransitionQueue::<TestState>::default();
        queue.push(StateTransition::Quit);
        queue.clear();
        assert!(queue.take().is_empty());
    }
}
