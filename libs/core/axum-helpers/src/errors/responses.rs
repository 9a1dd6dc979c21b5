//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "timestamp": "2025-03-01T10:00:00Z",
        "code": "internal.error",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "timestamp": "2025-03-01T10:00:00Z",
        "code": "request.validation.failed",
        "message": "Request validation failed",
        "details": [{
            "status": 400,
            "timestamp": "2025-03-01T10:00:00Z",
            "code": "name.length",
            "message": "Name must be between 3 and 255 characters"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "timestamp": "2025-03-01T10:00:00Z",
        "code": "resource.not.found",
        "message": "The requested resource was not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "status": 409,
        "timestamp": "2025-03-01T10:00:00Z",
        "code": "event.already.exists",
        "message": "An event with identifier 'launch-2025' already exists"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "status": 503,
        "timestamp": "2025-03-01T10:00:00Z",
        "code": "service.unavailable",
        "message": "Service is temporarily unavailable"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
