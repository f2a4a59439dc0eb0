mod connection;
mod guild;
mod user;

pub use connection::Connection;
pub use guild::Guild;
pub use user::{AvatarOptions, User};

pub(crate) use guild::GuildPayload;
pub(crate) use user::UserPayload;
