//! Execution of service requests.
//!
//! [`execute`] turns a [`ServiceRequest`] into a [`ServiceResponse`] by
//! calling the matching [`ResourceService`] method. Failures never escape as
//! errors: they become [`ServiceResponse::Failed`] with a user-facing
//! message, so the handler reconciles success and failure the same way.
//!
//! The call runs inside a span parented to the trace context captured when
//! the request was built, so the service call and the event that caused it
//! share one trace.

use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::messages::{Operation, ServiceRequest, ServiceResponse};
use super::ResourceService;
use crate::domain::entity::Resource;
use crate::domain::error::ServiceError;

/// Runs `request` against `service`.
///
/// `fallback` is the message used when the service fails without one.
pub async fn execute<S>(service: &S, request: ServiceRequest<S::Record>, fallback: &str) -> ServiceResponse<S::Record>
where
    S: ResourceService + ?Sized,
{
    let operation = request.operation();
    let span = tracing::debug_span!("service_call", operation = %operation);

    if let Some(parent) = request.trace_context().and_then(|tc| tc.to_otel_context()) {
        span.set_parent(parent);
    }

    let result = run(service, request).instrument(span).await;
    handle_service_result(operation, result, fallback)
}

async fn run<S>(service: &S, request: ServiceRequest<S::Record>) -> Result<ServiceResponse<S::Record>, ServiceError>
where
    S: ResourceService + ?Sized,
{
    match request {
        ServiceRequest::List { .. } => {
            let records = service.list().await?;
            tracing::debug!(count = records.len(), "collection fetched");
            Ok(ServiceResponse::Listed { records })
        }
        ServiceRequest::Create { draft, .. } => {
            let record = service.create(draft).await?;
            Ok(ServiceResponse::Created { record })
        }
        ServiceRequest::Update { id, patch, .. } => {
            let record = service.update(&id, patch).await?;
            Ok(ServiceResponse::Updated { record })
        }
        ServiceRequest::Delete { id, .. } => {
            service.delete(&id).await?;
            Ok(ServiceResponse::Deleted { id })
        }
    }
}

fn handle_service_result<R: Resource>(
    operation: Operation,
    result: Result<ServiceResponse<R>, ServiceError>,
    fallback: &str,
) -> ServiceResponse<R> {
    match result {
        Ok(response) => {
            tracing::debug!(operation = %operation, "service call successful");
            response
        }
        Err(e) => {
            tracing::debug!(operation = %operation, error = %e, "service call failed");
            ServiceResponse::Failed {
                operation,
                message: e.user_message(fallback),
            }
        }
    }
}
