/// Server services
pub mod credentials;
pub mod favourites;
pub mod tokens;

pub use credentials::{CredentialService, Credentials, RegisterUser};
pub use favourites::FavouritesService;
pub use tokens::TokenService;
