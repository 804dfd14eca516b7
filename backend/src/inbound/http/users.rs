//! Users API handlers.
//!
//! ```text
//! POST   /users/      {"name":"Alice123","email":"a@b.co"}
//! GET    /users/
//! GET    /users/{id}
//! PUT    /users/{id}  {"email":"new@b.co"}
//! DELETE /users/{id}
//! ```
//!
//! Request bodies are passed through undecoded; the use-case layer decodes
//! them so that update can report a missing user before a malformed body.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApiResult, User, UserPayload};
use crate::inbound::http::schemas::{ErrorSchema, UserChangesSchema, UserSchema};
use crate::inbound::http::state::HttpState;

/// Response body wrapping a single created or updated user.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserEnvelope {
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Register the user routes under `/users`.
///
/// The collection resource answers on both `/users` and `/users/`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use userhub::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource(vec!["", "/"])
                    .route(web::get().to(list_users))
                    .route(web::post().to(create_user)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_user))
                    .route(web::put().to(update_user))
                    .route(web::delete().to(delete_user)),
            ),
    );
}

/// Create a user and propagate it to every backing store.
#[utoipa::path(
    post,
    path = "/users/",
    request_body = UserChangesSchema,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Malformed body or invalid field", body = ErrorSchema),
        (status = 500, description = "A backing store failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .create(UserPayload::from_bytes(body.to_vec()))
        .await?;
    Ok(HttpResponse::Created().json(UserEnvelope { user }))
}

/// List all users in id order.
#[utoipa::path(
    get,
    path = "/users/",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Relational store failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list().await?))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "Relational store failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    Ok(web::Json(state.users.get(&id).await?))
}

/// Overwrite the fields present in the body.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    request_body = UserChangesSchema,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Malformed body or invalid field", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "A backing store failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .update(&id, UserPayload::from_bytes(body.to_vec()))
        .await?;
    Ok(HttpResponse::Ok().json(UserEnvelope { user }))
}

/// Remove a user from the relational store, document store and cache.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Numeric user id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
        (status = 500, description = "A backing store failed", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.users.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
