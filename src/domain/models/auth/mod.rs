pub mod authenticated_user;
pub mod credentials;

pub use authenticated_user::AuthenticatedUser;
pub use credentials::Credentials;
