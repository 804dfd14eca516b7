//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repository using Diesel ORM
//! - **document**: MongoDB mirror of user records
//! - **cache**: Redis `email -> id` index
//! - **queue**: RabbitMQ publisher for user notifications
//!
//! Adapters are thin translators between domain types and driver calls. They
//! contain no business logic.

pub mod cache;
pub mod document;
pub mod persistence;
pub mod queue;
