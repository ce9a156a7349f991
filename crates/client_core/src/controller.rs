//! Page controllers: fetch-on-mount, local view derivation, and mutation
//! dispatch through the API collaborator.
//!
//! Invariant: every successful mutation triggers exactly one list refresh,
//! resynchronizing server-assigned fields such as the record id. The cached
//! list is never the source of truth.

use std::sync::Arc;

use shared::{
    domain::{Employee, EmployeeDraft, EmployeeId},
    error::ApiClientError,
    protocol::DashboardStats,
};
use tracing::{debug, warn};

use crate::validate::{validate, FieldErrors};
use crate::view::{self, CollectionPage, SortDirection, SortField, ViewState};
use crate::EmployeeApi;

/// Fetch lifecycle. `Error` keeps previously loaded data visible underneath;
/// only the failing operation itself is affected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Loading,
    Ready,
    Error {
        message: String,
    },
}

/// An open add/edit form. `editing` is `None` for the add flow. The draft
/// keeps entered values intact across a rejected submit.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub editing: Option<EmployeeId>,
    pub draft: EmployeeDraft,
    pub field_errors: FieldErrors,
    pub api_error: Option<String>,
}

impl FormState {
    fn add() -> Self {
        Self {
            editing: None,
            draft: EmployeeDraft::default(),
            field_errors: FieldErrors::new(),
            api_error: None,
        }
    }

    fn edit(record: &Employee) -> Self {
        Self {
            editing: Some(record.id),
            draft: EmployeeDraft::from_record(record),
            field_errors: FieldErrors::new(),
            api_error: None,
        }
    }
}

/// Controller for the employee list screen. Single-writer: all state
/// mutation happens through `&mut self`. Overlapping fetches are neither
/// serialized nor cancelled; the last completed response wins.
pub struct EmployeePage {
    api: Arc<dyn EmployeeApi>,
    records: Vec<Employee>,
    state: FetchState,
    view: ViewState,
    form: Option<FormState>,
    pending_removal: Option<EmployeeId>,
}

impl EmployeePage {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
            state: FetchState::Loading,
            view: ViewState::default(),
            form: None,
            pending_removal: None,
        }
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.state
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn pending_removal(&self) -> Option<EmployeeId> {
        self.pending_removal
    }

    /// The derived page of rows for the current view state.
    pub fn visible(&self) -> CollectionPage {
        view::derive(&self.records, &self.view)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.set_search(search);
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.view.toggle_sort(field);
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.view.set_sort(field, direction);
    }

    pub fn set_page(&mut self, page: usize) {
        self.view.set_page(page);
    }

    /// Reloads the list from the server. On failure the previously loaded
    /// records stay visible under the error message.
    pub async fn fetch(&mut self) {
        self.state = FetchState::Loading;
        match self.api.list_all().await {
            Ok(records) => {
                debug!(count = records.len(), "employee list fetched");
                self.records = records;
                self.state = FetchState::Ready;
            }
            Err(err) => {
                warn!("employee list fetch failed: {err}");
                self.state = FetchState::Error {
                    message: err.to_string(),
                };
            }
        }
    }

    pub async fn retry(&mut self) {
        self.fetch().await;
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FetchState::Error { .. }) {
            self.state = FetchState::Ready;
        }
    }

    pub fn open_add(&mut self) {
        self.form = Some(FormState::add());
    }

    /// Opens the edit form populated from the cached record. Unknown ids
    /// are ignored (the row may have been removed by a concurrent refetch).
    pub fn open_edit(&mut self, id: EmployeeId) {
        if let Some(record) = self.records.iter().find(|r| r.id == id) {
            self.form = Some(FormState::edit(record));
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn draft_mut(&mut self) -> Option<&mut EmployeeDraft> {
        self.form.as_mut().map(|form| &mut form.draft)
    }

    /// Validates and submits the open form. The validator runs first; on
    /// field errors the API is never called. A server-side rejection keeps
    /// the form open with its message and does not refetch. Transport
    /// failures surface on the page error banner, form still open.
    pub async fn submit_form(&mut self) {
        let (editing, draft) = {
            let Some(form) = self.form.as_mut() else {
                return;
            };
            form.field_errors = validate(&form.draft);
            form.api_error = None;
            if !form.field_errors.is_empty() {
                return;
            }
            (form.editing, form.draft.clone())
        };

        let result = match editing {
            Some(id) => self.api.update(id, &draft).await,
            None => self.api.create(&draft).await,
        };

        match result {
            Ok(saved) => {
                debug!(employee_id = saved.id.0, "employee saved");
                self.form = None;
                self.fetch().await;
            }
            Err(ApiClientError::Validation { message }) => {
                if let Some(form) = self.form.as_mut() {
                    form.api_error = Some(message);
                }
            }
            Err(err) => {
                warn!("employee save failed: {err}");
                self.state = FetchState::Error {
                    message: err.to_string(),
                };
            }
        }
    }

    /// Marks a row for removal; the API is not called until the decision is
    /// confirmed.
    pub fn request_remove(&mut self, id: EmployeeId) {
        if self.records.iter().any(|r| r.id == id) {
            self.pending_removal = Some(id);
        }
    }

    pub fn cancel_remove(&mut self) {
        self.pending_removal = None;
    }

    /// Executes a confirmed removal. On failure the row stays in the local
    /// list and the error is surfaced; on success the list is refetched.
    pub async fn confirm_remove(&mut self) {
        let Some(id) = self.pending_removal.take() else {
            return;
        };
        match self.api.remove(id).await {
            Ok(()) => {
                debug!(employee_id = id.0, "employee removed");
                self.fetch().await;
            }
            Err(err) => {
                warn!(employee_id = id.0, "employee removal failed: {err}");
                self.state = FetchState::Error {
                    message: err.to_string(),
                };
            }
        }
    }
}

/// Controller for the dashboard screen: one fetch of the aggregated stats
/// with the same loading/ready/error lifecycle and a retry affordance.
pub struct DashboardPage {
    api: Arc<dyn EmployeeApi>,
    stats: Option<DashboardStats>,
    state: FetchState,
}

impl DashboardPage {
    pub fn new(api: Arc<dyn EmployeeApi>) -> Self {
        Self {
            api,
            stats: None,
            state: FetchState::Loading,
        }
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.state
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub async fn fetch(&mut self) {
        self.state = FetchState::Loading;
        match self.api.dashboard_stats().await {
            Ok(stats) => {
                self.stats = Some(stats);
                self.state = FetchState::Ready;
            }
            Err(err) => {
                warn!("dashboard stats fetch failed: {err}");
                self.state = FetchState::Error {
                    message: err.to_string(),
                };
            }
        }
    }

    pub async fn retry(&mut self) {
        self.fetch().await;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
