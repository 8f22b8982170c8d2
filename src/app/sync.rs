//! Optimistic collection synchronizer bound to a concrete service.
//!
//! [`ManagedList`] owns one screen's [`ListState`] and the service it talks
//! to. Each async method runs the full round trip: build the event, let
//! [`handle_event`] emit a dispatch, execute it, and reconcile the response.
//! Methods take `&mut self`, so an owner can never have two requests in
//! flight on the same list.

use super::actions::Action;
use super::handler::{handle_event, Event};
use super::modal::{ModalRole, ModalState};
use super::search::SearchKeys;
use super::state::ListState;
use crate::domain::entity::Resource;
use crate::domain::error::{ConsoleError, Result};
use crate::service::messages::{Operation, ServiceResponse};
use crate::service::{dispatch, DraftOf, PatchOf, RecordId, ResourceService, ViewOf};
use crate::ui::viewmodel::ListViewModel;
use crate::Config;

/// A list screen wired to its remote collection.
///
/// # Examples
///
/// ```no_run
/// use coursedesk::app::{ManagedList, SearchKeys};
/// use coursedesk::domain::{Category, CategoryDraft};
/// use coursedesk::service::JsonFileService;
/// use coursedesk::Config;
///
/// # async fn run() -> coursedesk::Result<()> {
/// let service: JsonFileService<Category> = JsonFileService::open("/tmp/categories.json")?;
/// let mut list = ManagedList::new(service, "Categories", "categories", SearchKeys::new(["name"]), &Config::default());
///
/// list.mount().await?;
/// list.handle_add(CategoryDraft { name: "Design".into(), description: None }).await?;
/// assert!(list.visible_items().iter().any(|c| c.name == "Design"));
/// # Ok(())
/// # }
/// ```
pub struct ManagedList<S: ResourceService> {
    service: S,
    state: ListState<ViewOf<S>>,
    error_fallback: String,
}

impl<S: ResourceService> ManagedList<S> {
    /// Creates a list with an empty collection. Call [`mount`](Self::mount) to load it.
    pub fn new(
        service: S,
        title: impl Into<String>,
        noun: impl Into<String>,
        keys: SearchKeys<ViewOf<S>>,
        config: &Config,
    ) -> Self {
        Self {
            service,
            state: ListState::new(title, noun, keys),
            error_fallback: config.error_fallback.clone(),
        }
    }

    /// Fetches the collection, replacing whatever was loaded before.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Fetch`] if the service call failed. The
    /// collection is left unchanged and the view model shows an error state.
    pub async fn mount(&mut self) -> Result<()> {
        self.send(Event::Mount).await
    }

    /// Re-fetches the collection.
    ///
    /// # Errors
    ///
    /// Same as [`mount`](Self::mount).
    pub async fn refresh(&mut self) -> Result<()> {
        self.send(Event::Refresh).await
    }

    /// Creates a record, appends the server's copy, and closes the add modal.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Mutation`] on failure; the add modal stays open.
    pub async fn handle_add(&mut self, draft: DraftOf<S>) -> Result<()> {
        self.send(Event::SubmitAdd(draft)).await
    }

    /// Updates a record, replaces it in place, and closes the edit modal.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Mutation`] on failure, or the entity's own
    /// refusal (such as [`ConsoleError::SystemRoleImmutable`]) without any
    /// service call. The edit modal stays open either way.
    pub async fn handle_update(&mut self, id: RecordId<S>, patch: PatchOf<S>) -> Result<()> {
        self.send(Event::SubmitEdit { id, patch }).await
    }

    /// Deletes a record, removes it, and closes the delete modal.
    ///
    /// # Errors
    ///
    /// As for [`handle_update`](Self::handle_update).
    pub async fn handle_delete(&mut self, id: RecordId<S>) -> Result<()> {
        self.send(Event::ConfirmDelete { id }).await
    }

    /// Opens a modal, optionally targeting an item.
    pub fn open_modal(&mut self, role: ModalRole, item: Option<ViewOf<S>>) {
        self.apply(Event::OpenModal { role, item });
    }

    /// Closes a modal and clears its target.
    pub fn close_modal(&mut self, role: ModalRole) {
        self.apply(Event::CloseModal(role));
    }

    /// Replaces the search query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.apply(Event::QueryChanged(query.into()));
    }

    /// Clears the current error message.
    pub fn dismiss_error(&mut self) {
        self.apply(Event::DismissError);
    }

    /// Returns the elements matching the current query.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&ViewOf<S>> {
        self.state.visible_items()
    }

    /// Returns the state of one modal.
    #[must_use]
    pub const fn modal(&self, role: ModalRole) -> &ModalState<ViewOf<S>> {
        self.state.modals.get(role)
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    /// Returns the message of the most recent failure.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    /// Returns the underlying screen state.
    #[must_use]
    pub const fn state(&self) -> &ListState<ViewOf<S>> {
        &self.state
    }

    /// Returns the service.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Computes the renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel<ViewOf<S>> {
        self.state.compute_viewmodel()
    }

    /// Handles an event that never dispatches a request.
    fn apply(&mut self, event: Event<S::Record>) {
        if let Err(e) = handle_event(&mut self.state, event) {
            tracing::debug!(error = %e, "local event rejected");
        }
    }

    /// Handles an event, executes every action it emits, and reconciles the responses.
    async fn send(&mut self, event: Event<S::Record>) -> Result<()> {
        let (_, actions) = handle_event(&mut self.state, event)?;
        let mut outcome = Ok(());

        for action in actions {
            match action {
                Action::Dispatch(request) => {
                    let response = dispatch::execute(&self.service, request, &self.error_fallback).await;
                    if let ServiceResponse::Failed { operation, message } = &response {
                        outcome = Err(failure_error(*operation, message));
                    }
                    handle_event(&mut self.state, Event::ServiceResponse(response))?;
                }
            }
        }

        outcome
    }
}

fn failure_error(operation: Operation, message: &str) -> ConsoleError {
    if operation.is_mutation() {
        ConsoleError::Mutation(message.to_string())
    } else {
        ConsoleError::Fetch(message.to_string())
    }
}

impl<S: ResourceService> std::fmt::Debug for ManagedList<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedList")
            .field("kind", &<S::Record as Resource>::KIND)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
