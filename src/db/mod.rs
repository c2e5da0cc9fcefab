//! Database layer for the questions forum.
//!
//! Handles the SQLite connection, the forum schema, and low-level query helpers.

mod connection;
pub mod schema;

pub use connection::{Connection, DbPath};
pub use schema::Schema;
