//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. `diesel print-schema`
//! regenerates them from a live database.

diesel::table! {
    /// Canonical user rows; the system of record for every other store.
    users (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
    }
}
