//! Application layer: per-screen state, events, actions, and synchronization.
//!
//! This layer sits between the caller (a UI shell or the CLI) and the
//! domain/service layers. It follows the same unidirectional flow for every
//! list screen:
//!
//! ```text
//! User intent → Event → handle_event → ListState mutation → Action::Dispatch
//!                  ↑                                               ↓
//!                  └──────── Event::ServiceResponse ←──── service call
//! ```
//!
//! # Modules
//!
//! - [`search`]: Query filtering over configured search keys
//! - [`modal`]: Add/edit/view/delete modal lifecycle
//! - [`state`]: Per-screen state container and view model computation
//! - [`actions`]: Side effects emitted by the handler
//! - [`handler`]: Event processing and response reconciliation
//! - [`sync`]: [`ManagedList`], the handler bound to a concrete service
//!
//! # Example
//!
//! ```rust
//! use coursedesk::app::{handle_event, Action, Event, ListState, SearchKeys};
//! use coursedesk::domain::Category;
//!
//! let mut state = ListState::new("Categories", "categories", SearchKeys::new(["name"]));
//! let (_, actions) = handle_event::<Category>(&mut state, Event::Mount)?;
//! assert!(matches!(actions[0], Action::Dispatch(_)));
//! assert!(state.loading);
//! # Ok::<(), coursedesk::ConsoleError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modal;
pub mod search;
pub mod state;
pub mod sync;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modal::{ModalRole, ModalState, Modals};
pub use search::{filter, match_ranges, SearchKeys};
pub use state::{Failure, ListState};
pub use sync::ManagedList;
