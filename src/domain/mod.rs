//! Persistent records exposed by the API.

pub mod date_format;
mod foo;
mod user;

pub use foo::Foo;
pub use user::User;
