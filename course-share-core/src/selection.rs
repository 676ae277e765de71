//! Session-scoped store of selected courses.


use crate::QualifiedCourseId;

type Listener = Box<dyn FnMut(&[QualifiedCourseId])>;

/// Single source of truth for which courses are selected.
///
/// The selection is an ordered, duplicate-free sequence of qualified
/// course ids, kept in ascending lexicographic order so every consumer
/// (and the derived share link) observes the same deterministic form no
/// matter in which order the user clicked.
///
/// The store is deliberately single-threaded: all toggles originate
/// from one event loop, so no locking is carried. Consumers that need
/// to react to mutations register a listener with [`subscribe`]; every
/// listener runs synchronously before [`toggle`] returns, so a read
/// after a toggle is never stale.
///
/// [`subscribe`]: SelectionStore::subscribe
/// [`toggle`]: SelectionStore::toggle
#[derive(Default)]
pub struct SelectionStore {
    selected: Vec<QualifiedCourseId>,
    listeners: Vec<Listener>,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection in ascending order.
    pub fn selection(&self) -> &[QualifiedCourseId] {
        &self.selected
    }

    /// Whether the given id is currently selected.
    pub fn is_selected(&self, id: &QualifiedCourseId) -> bool {
        self.selected.binary_search(id).is_ok()
    }

    /// Number of selected courses.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Remove the id if present, insert it otherwise.
    ///
    /// Insertion keeps the sequence sorted, so toggling the same id
    /// twice restores the previous selection exactly. All listeners are
    /// notified before this returns.
    pub fn toggle(&mut self, id: QualifiedCourseId) {
        match self.selected.binary_search(&id) {
            Ok(pos) => {
                self.selected.remove(pos);
            }
            Err(pos) => self.selected.insert(pos, id),
        }
        self.notify();
    }

    /// Register a consumer notified on every mutation.
    ///
    /// The listener is called immediately with the current selection so
    /// late subscribers start out consistent.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&[QualifiedCourseId]) + 'static) {
        listener(&self.selected);
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.selected);
        }
    }
}
