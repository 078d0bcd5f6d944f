//! Graph nodes.

use ms_core::{StateId, TransitionId};

/// A named node in an agent type's behavior graph.
///
/// Created by [`GraphBuilder`][crate::GraphBuilder]; immutable once the graph
/// is validated.  Outgoing transitions are held as ids in registration
/// order, every one of which has `from == self.id()`.
#[derive(Debug, Clone)]
pub struct State {
    pub(crate) id:       StateId,
    pub(crate) name:     String,
    pub(crate) terminal: bool,
    pub(crate) outgoing: Vec<TransitionId>,
}

impl State {
    pub(crate) fn new(id: StateId, name: String, terminal: bool) -> Self {
        Self { id, name, terminal, outgoing: Vec::new() }
    }

    #[inline]
    pub fn id(&self) -> StateId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if the state was registered with
    /// [`add_terminal_state`][crate::GraphBuilder::add_terminal_state].
    #[inline]
    pub fn is_marked_terminal(&self) -> bool {
        self.terminal
    }

    /// Outgoing transition ids in registration order.
    #[inline]
    pub fn outgoing(&self) -> &[TransitionId] {
        &self.outgoing
    }
}
