//! Store-facing half of the persistence gateway: connection setup and the
//! `users` entity with its create/list/delete queries.

pub mod errors;
pub mod db;
pub mod user;
