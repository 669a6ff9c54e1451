//! Document events and listener registration.
//!
//! Change events bubble from the target through its ancestors, exactly as
//! the native control's change notification would; focus events are
//! delivered to the target only. Listeners are stored as shared slots and
//! invoked after the listener table lock is released, so a listener may
//! freely register or remove other listeners.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::node::NodeId;

new_key_type! {
    /// Identifier for a registered event listener.
    pub struct ListenerId;
}

/// The kind of a document event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The effective value of a form control changed. Bubbles.
    Change,
    /// A node gained document focus. Does not bubble.
    FocusIn,
    /// A node lost document focus. Does not bubble.
    FocusOut,
}

impl EventKind {
    /// Whether events of this kind propagate to ancestors.
    pub fn bubbles(self) -> bool {
        matches!(self, Self::Change)
    }
}

/// An event delivered to listeners.
#[derive(Debug, Clone)]
pub struct Event {
    /// The event kind.
    pub kind: EventKind,
    /// The node the event was dispatched on.
    pub target: NodeId,
    /// The control's effective value at dispatch time (selects only).
    pub value: String,
}

pub(crate) type ListenerSlot = Arc<Mutex<dyn FnMut(&Event) + Send>>;

struct ListenerEntry {
    node: NodeId,
    kind: EventKind,
    slot: ListenerSlot,
}

/// Listener table shared by the document.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: Mutex<SlotMap<ListenerId, ListenerEntry>>,
}

impl Listeners {
    pub(crate) fn add(
        &self,
        node: NodeId,
        kind: EventKind,
        callback: impl FnMut(&Event) + Send + 'static,
    ) -> ListenerId {
        self.entries.lock().insert(ListenerEntry {
            node,
            kind,
            slot: Arc::new(Mutex::new(callback)),
        })
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        self.entries.lock().remove(id).is_some()
    }

    /// Drop every listener registered on one of the given nodes.
    pub(crate) fn remove_for_nodes(&self, nodes: &[NodeId]) {
        self.entries
            .lock()
            .retain(|_, entry| !nodes.contains(&entry.node));
    }

    /// Collect the slots to invoke for an event traveling along `path`.
    ///
    /// `path` is the target followed by its ancestors for bubbling events,
    /// or just the target otherwise. Slots are cloned out so they can be
    /// invoked without holding the table lock.
    pub(crate) fn collect(&self, path: &[NodeId], kind: EventKind) -> Vec<ListenerSlot> {
        let entries = self.entries.lock();
        let mut slots = Vec::new();
        for &node in path {
            for entry in entries.values() {
                if entry.node == node && entry.kind == kind {
                    slots.push(Arc::clone(&entry.slot));
                }
            }
        }
        slots
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_bubbles_focus_does_not() {
        assert!(EventKind::Change.bubbles());
        assert!(!EventKind::FocusIn.bubbles());
        assert!(!EventKind::FocusOut.bubbles());
    }
}
