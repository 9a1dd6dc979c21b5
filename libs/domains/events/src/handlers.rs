use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::EventResult;
use crate::filter::EventFilter;
use crate::models::{CancelEventRequest, Event, EventDto, EventStatus, EventType};
use crate::pagination::{Page, PageRequest};
use crate::repository::EventRepository;
use crate::use_cases::EventUseCases;

const TAG: &str = "events";

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_event,
        get_event,
        list_events,
        search_events,
        update_event,
        cancel_event,
    ),
    components(
        schemas(EventDto, EventType, EventStatus, CancelEventRequest, Page<EventDto>),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Event management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the events router with all HTTP endpoints
pub fn router<R: EventRepository + 'static>(use_cases: EventUseCases<R>) -> Router {
    let shared = Arc::new(use_cases);

    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/search", get(search_events))
        .route("/{id}", get(get_event).put(update_event))
        .route("/{id}/cancel", patch(cancel_event))
        .with_state(shared)
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = EventDto,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_event<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> EventResult<impl IntoResponse> {
    let event = use_cases.create.execute(Event::from(dto)).await?;

    AuditEvent::new(
        "event.create",
        event.id.map(|id| format!("event:{}", id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({
        "identifier": event.identifier,
        "type": event.event_type.to_string(),
        "status": event.status.to_string(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(EventDto::from(event))))
}

/// Get an event by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = EventDto),
        (status = 400, description = "Invalid id"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_event<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    IdPath(id): IdPath,
) -> EventResult<Json<EventDto>> {
    let event = use_cases.get_by_id.execute(id).await?;
    Ok(Json(event.into()))
}

/// List events, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PageRequest),
    responses(
        (status = 200, description = "Page of events", body = Page<EventDto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_events<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> EventResult<Json<Page<EventDto>>> {
    let events = use_cases.get_all.execute(page).await?;
    Ok(Json(events.map(EventDto::from)))
}

/// Search events; every filter parameter is optional and combined with AND
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(EventFilter, PageRequest),
    responses(
        (status = 200, description = "Page of matching events", body = Page<EventDto>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_events<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    ValidatedQuery(filter): ValidatedQuery<EventFilter>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> EventResult<Json<Page<EventDto>>> {
    let events = use_cases.get_by_filter.execute(Some(filter), page).await?;
    Ok(Json(events.map(EventDto::from)))
}

/// Replace an event's details; status and cancel reason are unchanged
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = EventDto,
    responses(
        (status = 200, description = "Event updated", body = EventDto),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_event<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<EventDto>,
) -> EventResult<Json<EventDto>> {
    let event = use_cases.update.execute(id, Event::from(dto)).await?;
    Ok(Json(event.into()))
}

/// Cancel an event
#[utoipa::path(
    patch,
    path = "/{id}/cancel",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Event id")
    ),
    request_body = CancelEventRequest,
    responses(
        (status = 204, description = "Event cancelled"),
        (status = 400, description = "Invalid id or missing cancel reason"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn cancel_event<R: EventRepository>(
    State(use_cases): State<Arc<EventUseCases<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<CancelEventRequest>,
) -> EventResult<StatusCode> {
    let reason = request.cancel_reason;
    use_cases.cancel.execute(id, reason.clone()).await?;

    AuditEvent::new(
        "event.cancel",
        Some(format!("event:{}", id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({ "cancel_reason": reason }))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
