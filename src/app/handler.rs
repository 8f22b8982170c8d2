//! Event handling and response reconciliation.
//!
//! [`handle_event`] is the only place a [`ListState`] changes. User intents
//! (mount, query edits, modal toggles, form submissions) either mutate the
//! state directly or emit an [`Action::Dispatch`] carrying a service request.
//! When the response arrives it comes back as [`Event::ServiceResponse`] and
//! is reconciled into the collection:
//!
//! ```text
//! SubmitAdd → Dispatch(Create) → service → ServiceResponse(Created) → append, close add
//!                                        → ServiceResponse(Failed)  → error, add stays open
//! ```
//!
//! Nothing is applied to the collection before the server confirms it, so a
//! failure needs no rollback.
//!
//! The handler does not serialize requests. Owners that dispatch a second
//! mutation before the first response is reconciled get last-writer-wins
//! behavior; [`ManagedList`](super::ManagedList) rules this out by taking
//! `&mut self` across the whole round trip.

use super::actions::Action;
use super::modal::ModalRole;
use super::state::ListState;
use crate::domain::entity::{Identified, Resource};
use crate::domain::error::Result;
use crate::service::messages::{Operation, ServiceRequest, ServiceResponse};

/// Events delivered to a list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<R: Resource> {
    /// The screen was mounted. Fetches the collection.
    Mount,
    /// Re-fetches the collection.
    Refresh,
    /// The search input changed.
    QueryChanged(String),
    /// The search input was cleared.
    ClearQuery,
    /// Opens a modal, optionally targeting an item.
    OpenModal {
        role: ModalRole,
        item: Option<R::View>,
    },
    /// Closes a modal and clears its target.
    CloseModal(ModalRole),
    /// The add form was submitted.
    SubmitAdd(R::Draft),
    /// The edit form for `id` was submitted.
    SubmitEdit {
        id: <R as Identified>::Id,
        patch: R::Patch,
    },
    /// The delete confirmation for `id` was accepted.
    ConfirmDelete { id: <R as Identified>::Id },
    /// The user dismissed the current error message.
    DismissError,
    /// A response to a previously dispatched request.
    ServiceResponse(ServiceResponse<R>),
}

/// Processes one event against a screen's state.
///
/// Returns whether the screen needs re-rendering and the actions to execute.
///
/// # Errors
///
/// Returns an error when an edit or delete targets an entity that refuses
/// mutation (for example a system role). The failure is also recorded on the
/// state and no request is dispatched.
#[allow(clippy::too_many_lines)]
pub fn handle_event<R: Resource>(
    state: &mut ListState<R::View>,
    event: Event<R>,
) -> Result<(bool, Vec<Action<R>>)> {
    let _span = tracing::debug_span!("handle_event", kind = R::KIND).entered();

    match event {
        Event::Mount | Event::Refresh => {
            tracing::debug!("fetching collection");
            Ok(dispatch(state, ServiceRequest::list()))
        }
        Event::QueryChanged(query) => {
            if state.query == query {
                return Ok((false, vec![]));
            }
            tracing::trace!(query = %query, "search query updated");
            state.query = query;
            Ok((true, vec![]))
        }
        Event::ClearQuery => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            state.query.clear();
            Ok((true, vec![]))
        }
        Event::OpenModal { role, item } => {
            state.modals.open(role, item);
            Ok((true, vec![]))
        }
        Event::CloseModal(role) => {
            state.modals.close(role);
            Ok((true, vec![]))
        }
        Event::SubmitAdd(draft) => Ok(dispatch(state, ServiceRequest::create(draft))),
        Event::SubmitEdit { id, patch } => {
            guard::<R>(state, &id, Operation::Update)?;
            Ok(dispatch(state, ServiceRequest::update(id, patch)))
        }
        Event::ConfirmDelete { id } => {
            guard::<R>(state, &id, Operation::Delete)?;
            Ok(dispatch(state, ServiceRequest::delete(id)))
        }
        Event::DismissError => {
            if state.failure.take().is_some() {
                Ok((true, vec![]))
            } else {
                Ok((false, vec![]))
            }
        }
        Event::ServiceResponse(response) => {
            reconcile(state, response);
            Ok((true, vec![]))
        }
    }
}

fn dispatch<R: Resource>(state: &mut ListState<R::View>, request: ServiceRequest<R>) -> (bool, Vec<Action<R>>) {
    tracing::debug!(operation = %request.operation(), "dispatching request");
    state.begin();
    (true, vec![Action::Dispatch(request)])
}

/// Rejects edits and deletes of protected entities before any request is built.
fn guard<R: Resource>(state: &mut ListState<R::View>, id: &<R as Identified>::Id, operation: Operation) -> Result<()> {
    let Some(view) = state.find(id) else {
        return Ok(());
    };

    if let Err(e) = R::ensure_mutable(view) {
        tracing::warn!(id = %id, operation = %operation, error = %e, "mutation rejected");
        state.fail(operation, e.to_string());
        return Err(e);
    }
    Ok(())
}

fn reconcile<R: Resource>(state: &mut ListState<R::View>, response: ServiceResponse<R>) {
    match response {
        ServiceResponse::Listed { records } => {
            let views = records.iter().map(Resource::to_view).collect();
            let dropped = state.replace_all(views);
            if dropped > 0 {
                tracing::warn!(dropped = dropped, "duplicate ids in list response");
            }
            tracing::debug!(count = state.collection.len(), "collection loaded");
            state.settle();
        }
        ServiceResponse::Created { record } => {
            tracing::debug!(id = %record.id(), "record created");
            state.upsert(record.to_view());
            state.modals.close(ModalRole::Add);
            state.settle();
        }
        ServiceResponse::Updated { record } => {
            let id = record.id().clone();
            if state.replace(record.to_view()) {
                tracing::debug!(id = %id, "record updated");
            } else {
                tracing::warn!(id = %id, "updated record not in collection");
            }
            state.modals.close(ModalRole::Edit);
            state.settle();
        }
        ServiceResponse::Deleted { id } => {
            if !state.remove(&id) {
                tracing::debug!(id = %id, "deleted record was not in collection");
            }
            state.modals.close(ModalRole::Delete);
            state.settle();
        }
        ServiceResponse::Failed { operation, message } => {
            tracing::warn!(operation = %operation, error = %message, "request failed");
            state.fail(operation, message);
        }
    }
}
