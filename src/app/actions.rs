//! Side effects produced by the event handler.
//!
//! The handler never calls the remote service itself. It returns actions, and
//! the owner of the screen (usually [`ManagedList`](super::ManagedList))
//! executes them and feeds each response back as an event.

use crate::domain::entity::Resource;
use crate::service::messages::ServiceRequest;

/// Commands to be executed by the owner of a list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<R: Resource> {
    /// Sends a request to the remote resource service.
    ///
    /// The response must be passed back as
    /// [`Event::ServiceResponse`](super::Event::ServiceResponse).
    Dispatch(ServiceRequest<R>),
}
