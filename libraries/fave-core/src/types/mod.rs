//! Core domain types for Fave

mod ids;
mod user;

pub use ids::{ItemId, UserId};
pub use user::{Identity, NewUser, User, UserCredentials};
