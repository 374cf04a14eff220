//! Persistence for the two tables. Every function takes the pool handed to
//! the handlers, so tests can run the same code against an in-memory database.

pub mod attendance;
pub mod students;
