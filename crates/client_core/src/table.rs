//! Customer table: the full fetched list, a page cursor and at most one row
//! in inline-edit mode.
//!
//! Every remote write is applied locally only after the directory confirms
//! it. A failed write leaves the table exactly as it was before the call.

use std::num::NonZeroUsize;

use shared::domain::{CustomerId, CustomerPatch, CustomerRecord};
use tracing::{info, warn};

use crate::{
    error::TableError,
    modal::{ModalKind, ModalPayload, ModalStore},
    pagination::PageWindow,
    CustomerDirectory,
};

/// The row being edited and the fields touched so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: CustomerId,
    pub patch: CustomerPatch,
}

#[derive(Debug)]
pub struct CustomerTable {
    customers: Vec<CustomerRecord>,
    current_page: NonZeroUsize,
    editing: Option<EditSession>,
    error: Option<String>,
    modal: ModalStore,
}

impl CustomerTable {
    pub fn new(modal: ModalStore) -> Self {
        Self {
            customers: Vec::new(),
            current_page: NonZeroUsize::MIN,
            editing: None,
            error: None,
            modal,
        }
    }

    pub fn customers(&self) -> &[CustomerRecord] {
        &self.customers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn window(&self) -> PageWindow {
        PageWindow::at(self.current_page, self.customers.len())
    }

    /// Rows on the current page. Empty when the page is past the end.
    pub fn visible(&self) -> &[CustomerRecord] {
        self.window().slice(&self.customers)
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        self.window().page_numbers().collect()
    }

    /// Jumps straight to `page`. Pages past the end are kept as requested.
    pub fn set_page(&mut self, page: NonZeroUsize) {
        self.current_page = page;
    }

    /// Replaces the list with a fresh fetch. A failure keeps the old list.
    pub async fn load<D>(&mut self, api: &D) -> Result<usize, TableError>
    where
        D: CustomerDirectory + ?Sized,
    {
        match api.list_customers().await {
            Ok(customers) => {
                info!(count = customers.len(), "loaded customers");
                self.customers = customers;
                let session_survives = self
                    .editing
                    .as_ref()
                    .is_some_and(|s| self.customers.iter().any(|c| c.id == s.id));
                if !session_survives {
                    self.editing = None;
                }
                self.error = None;
                Ok(self.customers.len())
            }
            Err(err) => {
                warn!(error = %err, "failed to load customers");
                self.error = Some("Failed to load customers.".to_string());
                Err(err.into())
            }
        }
    }

    /// Puts `id` into edit mode with an empty buffer.
    ///
    /// Unsaved edits on a previously selected row are dropped.
    pub fn begin_edit(&mut self, id: &CustomerId) -> Result<(), TableError> {
        if !self.customers.iter().any(|c| &c.id == id) {
            return Err(TableError::UnknownCustomer(id.clone()));
        }
        if let Some(previous) = &self.editing {
            if &previous.id != id && !previous.patch.is_empty() {
                info!(customer_id = %previous.id, "discarding unsaved edits");
            }
        }
        self.editing = Some(EditSession {
            id: id.clone(),
            patch: CustomerPatch::default(),
        });
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn edit_full_name(&mut self, value: impl Into<String>) -> Result<(), TableError> {
        self.session_mut()?.patch.full_name = Some(value.into());
        Ok(())
    }

    pub fn edit_email(&mut self, value: impl Into<String>) -> Result<(), TableError> {
        self.session_mut()?.patch.email = Some(value.into());
        Ok(())
    }

    pub fn edit_active(&mut self, value: bool) -> Result<(), TableError> {
        self.session_mut()?.patch.is_active = Some(value);
        Ok(())
    }

    /// The row under edit as it would look after saving.
    pub fn editing_view(&self) -> Option<CustomerRecord> {
        let session = self.editing.as_ref()?;
        self.customers
            .iter()
            .find(|c| c.id == session.id)
            .map(|row| row.merge(&session.patch))
    }

    /// Sends the edit buffer. Returns `false` when nothing was being edited.
    ///
    /// On success the buffer is merged into the local row and edit mode ends.
    /// On failure the session and its buffer stay as they were.
    pub async fn save<D>(&mut self, api: &D) -> Result<bool, TableError>
    where
        D: CustomerDirectory + ?Sized,
    {
        let Some(session) = self.editing.clone() else {
            return Ok(false);
        };
        let result = api.update_customer(&session.id, &session.patch).await;

        match result {
            Ok(()) => {
                if let Some(row) = self.customers.iter_mut().find(|c| c.id == session.id) {
                    *row = row.merge(&session.patch);
                }
                self.editing = None;
                self.error = None;
                info!(customer_id = %session.id, "customer updated");
                Ok(true)
            }
            Err(err) => {
                warn!(customer_id = %session.id, error = %err, "failed to save customer");
                self.error = Some("Failed to save changes.".to_string());
                Err(err.into())
            }
        }
    }

    /// Deletes `id` remotely, then drops the local row. Failure keeps the row.
    pub async fn delete<D>(&mut self, id: &CustomerId, api: &D) -> Result<(), TableError>
    where
        D: CustomerDirectory + ?Sized,
    {
        let result = api.delete_customer(id).await;

        match result {
            Ok(()) => {
                self.customers.retain(|c| &c.id != id);
                if self.editing.as_ref().is_some_and(|s| &s.id == id) {
                    self.editing = None;
                }
                self.error = None;
                info!(customer_id = %id, "customer deleted");
                Ok(())
            }
            Err(err) => {
                warn!(customer_id = %id, error = %err, "failed to delete customer");
                self.error = Some("Failed to delete customer.".to_string());
                Err(err.into())
            }
        }
    }

    /// Opens the removal confirmation for `id`.
    pub fn request_delete(&self, id: &CustomerId) -> Result<(), TableError> {
        let row = self
            .customers
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| TableError::UnknownCustomer(id.clone()))?;
        self.modal.open(
            ModalKind::RemoveUser,
            Some(ModalPayload::RemoveUser {
                customer_id: row.id.clone(),
                full_name: row.full_name.clone(),
            }),
        );
        Ok(())
    }

    /// Deletes the customer named by the open removal confirmation and closes
    /// it. The confirmation stays open if the delete fails.
    pub async fn confirm_delete<D>(&mut self, api: &D) -> Result<CustomerId, TableError>
    where
        D: CustomerDirectory + ?Sized,
    {
        if !self.modal.is_showing(ModalKind::RemoveUser) {
            return Err(TableError::NoPendingRemoval);
        }
        let Some(ModalPayload::RemoveUser { customer_id, .. }) = self.modal.payload() else {
            return Err(TableError::NoPendingRemoval);
        };

        self.delete(&customer_id, api).await?;
        self.modal.close();
        Ok(customer_id)
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, TableError> {
        self.editing.as_mut().ok_or(TableError::NotEditing)
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
