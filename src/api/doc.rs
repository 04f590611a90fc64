use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const BOOKING_TAG: &str = "Booking";
pub const TRIVIA_TAG: &str = "Trivia";
pub const COFFEE_TAG: &str = "Coffee";
pub const HEALTH_TAG: &str = "Health";

/// Where the assembled document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Triad",
        description = "Venue booking, trivia and coffee-shop APIs",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::AuthErrorResponse,
        )
    ),
    tags(
        (name = BOOKING_TAG, description = "Venues, artists and shows"),
        (name = TRIVIA_TAG, description = "Trivia question bank and quizzes"),
        (name = COFFEE_TAG, description = "Coffee-shop drink menu"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Bearer token carrying a `permissions` claim"))
                        .build(),
                ),
            )
        }
    }
}
