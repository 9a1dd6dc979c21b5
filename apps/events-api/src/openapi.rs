use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Create, search, update and cancel scheduled events"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/events", api = domain_events::ApiDoc)
    )
)]
pub struct ApiDoc;
