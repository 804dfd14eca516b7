//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer (users,
//! health) and the schema wrappers describing domain payloads. The generated
//! document backs Swagger UI in debug builds.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, UserChangesSchema, UserSchema,
};
use crate::inbound::http::users::UserEnvelope;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "userhub API",
        description = "User CRUD with propagation to relational, document, cache and queue stores."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserChangesSchema,
        UserEnvelope,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User CRUD operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
