//! Integration tests against an in-memory SQLite database.

mod common;

mod associations;
mod crud;
mod query;
mod validation;
