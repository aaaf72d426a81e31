pub mod session;
pub mod users;

pub use session::{SessionGrant, SessionLifetime};
pub use users::UserDto;
