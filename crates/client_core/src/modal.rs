//! Shared modal visibility state.
//!
//! One `ModalStore` is created per session and cloned into every controller
//! that opens or closes dialogs. All clones observe the same cell. The store is
//! `!Send`: it belongs to the event loop that owns the controllers.

use std::{cell::RefCell, rc::Rc};

use shared::{domain::CustomerId, protocol::CreateCustomerRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    CreateUser,
    RemoveUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalPayload {
    CreateUser(CreateCustomerRequest),
    RemoveUser {
        customer_id: CustomerId,
        full_name: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalVisibility {
    pub active: Option<ModalKind>,
    pub payload: Option<ModalPayload>,
    pub is_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ModalStore {
    cell: Rc<RefCell<ModalVisibility>>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `kind`, replacing whatever was open before.
    pub fn open(&self, kind: ModalKind, payload: Option<ModalPayload>) {
        let mut state = self.cell.borrow_mut();
        state.active = Some(kind);
        state.payload = payload;
        state.is_open = true;
        tracing::debug!(?kind, "modal opened");
    }

    /// Hides the active modal. The payload survives until the next `open`.
    pub fn close(&self) {
        let mut state = self.cell.borrow_mut();
        if let Some(kind) = state.active.take() {
            tracing::debug!(?kind, "modal closed");
        }
        state.is_open = false;
    }

    pub fn is_showing(&self, kind: ModalKind) -> bool {
        let state = self.cell.borrow();
        state.is_open && state.active == Some(kind)
    }

    pub fn payload(&self) -> Option<ModalPayload> {
        self.cell.borrow().payload.clone()
    }

    pub fn snapshot(&self) -> ModalVisibility {
        self.cell.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removal_payload() -> ModalPayload {
        ModalPayload::RemoveUser {
            customer_id: CustomerId::new("c-1"),
            full_name: "Ada Lovelace".into(),
        }
    }

    #[test]
    fn starts_closed_with_nothing_active() {
        let store = ModalStore::new();
        assert_eq!(store.snapshot(), ModalVisibility::default());
        assert!(!store.is_showing(ModalKind::CreateUser));
    }

    #[test]
    fn open_is_visible_through_every_clone() {
        let store = ModalStore::new();
        let table_view = store.clone();

        store.open(ModalKind::RemoveUser, Some(removal_payload()));

        assert!(table_view.is_showing(ModalKind::RemoveUser));
        assert!(!table_view.is_showing(ModalKind::CreateUser));
        assert_eq!(table_view.payload(), Some(removal_payload()));
    }

    #[test]
    fn reopening_replaces_kind_and_payload() {
        let store = ModalStore::new();
        store.open(ModalKind::RemoveUser, Some(removal_payload()));
        store.open(ModalKind::CreateUser, None);

        assert!(store.is_showing(ModalKind::CreateUser));
        assert!(!store.is_showing(ModalKind::RemoveUser));
        assert_eq!(store.payload(), None);
    }

    #[test]
    fn close_keeps_payload() {
        let store = ModalStore::new();
        store.open(ModalKind::RemoveUser, Some(removal_payload()));
        store.close();

        let snapshot = store.snapshot();
        assert!(!snapshot.is_open);
        assert_eq!(snapshot.active, None);
        assert_eq!(snapshot.payload, Some(removal_payload()));
    }
}
