//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers below mirror their JSON shape and live in the inbound adapter
//! layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed body, failed field validation, or an unparseable id.
    #[schema(rename = "bad_request")]
    BadRequest,
    /// No user exists for the requested id.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store call failed.
    #[schema(rename = "store_failure")]
    StoreFailure,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "bad_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "invalid email format")]
    message: String,
    /// Correlation identifier of the failed request.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field validation details, or for store failures the failing `store`,
    /// the `completed` stores and the adapter `cause`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Identifier assigned by the relational store.
    #[schema(example = 1)]
    id: i64,
    /// Display name, 5 to 10 bytes.
    #[schema(example = "Alice123")]
    name: String,
    /// Contact email.
    #[schema(example = "alice@example.com")]
    email: String,
}

/// OpenAPI schema for [`crate::domain::UserChanges`].
///
/// Both fields are optional; on create a missing field fails validation, on
/// update it keeps the stored value.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserChanges)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserChangesSchema {
    #[schema(example = "Alice123")]
    name: Option<String>,
    #[schema(example = "alice@example.com")]
    email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn schemas_are_named_after_domain_types() {
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert_eq!(UserSchema::name(), "crate.domain.User");
        assert_eq!(UserChangesSchema::name(), "crate.domain.UserChanges");
    }

    #[test]
    fn error_code_schema_variants_match_domain() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in ["bad_request", "not_found", "store_failure"] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"), "missing traceId");
        assert!(schema_json.contains("details"), "missing details");
    }

    #[test]
    fn user_schema_is_flat() {
        let schema_json = schema_to_json::<UserSchema>();
        for field in ["id", "name", "email"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }
}
