//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Following the hexagonal layout, each submodule provides concrete
//! implementations of driven port traits:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **email**: HTTP delivery API mailer
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod email;
pub mod persistence;
