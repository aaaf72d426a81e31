use super::users::UserDto;

/// How long the issued session cookie lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLifetime {
    Guest,
    Registered,
}

/// Result of a successful login or signup: the user plus the encoded cookie
/// value that identifies them.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: UserDto,
    pub token: String,
    pub lifetime: SessionLifetime,
}
