//! Composition root for one user session.

use std::{cell::RefCell, rc::Rc};

use crate::{QualifiedCourseId, link::LinkSynthesizer, selection::SelectionStore};

/// One running session: the shared selection store plus the share link
/// kept in step with it.
///
/// The link is recomputed eagerly through a store subscription, so it
/// is already current when [`toggle`] returns. Selections live only as
/// long as the session; nothing is persisted.
///
/// [`toggle`]: Session::toggle
pub struct Session {
    store: SelectionStore,
    share_link: Rc<RefCell<String>>,
}

impl Session {
    /// Create a session with an empty selection.
    ///
    /// `base_endpoint` is the externally configured origin the share
    /// link points at.
    pub fn new(base_endpoint: impl Into<String>) -> Self {
        let synthesizer = LinkSynthesizer::new(base_endpoint);
        let share_link = Rc::new(RefCell::new(String::new()));

        let mut store = SelectionStore::new();
        let cell = Rc::clone(&share_link);
        store.subscribe(move |selection| {
            *cell.borrow_mut() = synthesizer.share_link(selection);
        });

        Self { store, share_link }
    }

    /// Toggle one course checkbox: qualifies `(calendar, course)` and
    /// flips its membership in the shared store.
    pub fn toggle(&mut self, calendar: &str, course: &str) {
        self.store.toggle(QualifiedCourseId::new(calendar, course));
    }

    /// Toggle an already-qualified id.
    pub fn toggle_qualified(&mut self, id: QualifiedCourseId) {
        self.store.toggle(id);
    }

    /// Current selection in ascending order.
    pub fn selection(&self) -> &[QualifiedCourseId] {
        self.store.selection()
    }

    /// Whether `(calendar, course)` is selected. Derived from the
    /// store on every call; never cached by the caller.
    pub fn is_selected(&self, calendar: &str, course: &str) -> bool {
        self.store
            .is_selected(&QualifiedCourseId::new(calendar, course))
    }

    /// The share link as of the last toggle.
    pub fn share_link(&self) -> String {
        self.share_link.borrow().clone()
    }

    /// Register a further consumer of selection changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&[QualifiedCourseId]) + 'static) {
        self.store.subscribe(listener);
    }
}
