//! Service layer for the user resource.
//! - `UserRepository` is the persistence gateway seam handlers depend on.
//! - Store-backed, in-memory and unavailable implementations live beside it.
//! - `UserService` is what the router holds.

pub mod errors;
pub mod users;

pub use errors::StoreError;
pub use users::{
    domain::{User, UserInput},
    memory::InMemoryUserRepository,
    repository::{SeaOrmUserRepository, UnavailableUserRepository, UserRepository},
    service::UserService,
};
