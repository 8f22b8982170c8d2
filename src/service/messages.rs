//! Request and response types exchanged with the remote resource service.
//!
//! The event handler never calls the service directly. It emits a
//! [`ServiceRequest`] inside an action; the dispatcher executes it and feeds a
//! [`ServiceResponse`] back as an event. Requests capture the current trace
//! context so the service call is linked to the span that issued it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entity::{Identified, Resource};

/// Distributed tracing context captured when a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry trace and span IDs of the current span.
    ///
    /// Returns `None` when no valid span context is active (for example when
    /// tracing is not initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote OpenTelemetry context from the captured IDs.
    ///
    /// Returns `None` if either ID is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// The four collaborator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Returns `true` for create, update, and delete.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::List)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! request_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl<R: Resource> ServiceRequest<R> {
            $(
                #[doc = concat!("Create a `", stringify!($variant), "` request with the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

request_builders! {
    list(List {}),
    create(Create { draft: R::Draft }),
    update(Update { id: <R as Identified>::Id, patch: R::Patch }),
    delete(Delete { id: <R as Identified>::Id }),
}

/// A call to be made against the remote resource service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest<R: Resource> {
    /// Fetch the whole collection.
    List {
        trace_context: Option<TraceContext>,
    },

    /// Create a record from a draft.
    Create {
        draft: R::Draft,
        trace_context: Option<TraceContext>,
    },

    /// Update the record with `id`.
    Update {
        id: <R as Identified>::Id,
        patch: R::Patch,
        trace_context: Option<TraceContext>,
    },

    /// Delete the record with `id`.
    Delete {
        id: <R as Identified>::Id,
        trace_context: Option<TraceContext>,
    },
}

impl<R: Resource> ServiceRequest<R> {
    /// Returns the operation this request performs.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::List { .. } => Operation::List,
            Self::Create { .. } => Operation::Create,
            Self::Update { .. } => Operation::Update,
            Self::Delete { .. } => Operation::Delete,
        }
    }

    /// Returns the captured trace context, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::List { trace_context }
            | Self::Create { trace_context, .. }
            | Self::Update { trace_context, .. }
            | Self::Delete { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcome of a [`ServiceRequest`], fed back into the event handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse<R: Resource> {
    /// The collection was fetched.
    Listed { records: Vec<R> },

    /// A record was created; `record` is the server's canonical copy.
    Created { record: R },

    /// A record was updated; `record` is the server's canonical copy.
    Updated { record: R },

    /// The record with `id` was deleted.
    Deleted { id: <R as Identified>::Id },

    /// The call failed with a user-facing message.
    Failed { operation: Operation, message: String },
}
