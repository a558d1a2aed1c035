//! Fave Core
//!
//! Platform-agnostic domain types, the persistence trait, and error handling
//! for the Fave favourites backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Identity`, `UserId`, `ItemId`
//! - **Core Traits**: `UserStore`, the persistence collaborator
//! - **Error Handling**: Unified `FaveError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use fave_core::types::{Identity, ItemId, User, UserId};
//!
//! let user = User::new("alice");
//! let identity = Identity::from(&user);
//! assert_eq!(identity.username, "alice");
//!
//! let item = ItemId::new("item42");
//! assert_eq!(item.as_str(), "item42");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{FaveError, Result};
pub use storage::UserStore;
pub use types::{Identity, ItemId, NewUser, User, UserCredentials, UserId};
