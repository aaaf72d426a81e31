mod guest;
mod ldap;
mod login;
mod password;
mod register;
mod service;
mod validation;
mod verify;

pub use guest::CreateGuestCommand;
pub use ldap::LdapLoginCommand;
pub use login::LoginCommand;
pub use password::{ForgotPasswordCommand, ResetPasswordCommand, UpdatePasswordCommand};
pub use register::RegisterUserCommand;
pub use service::{AuthCommandService, codes};
pub use validation::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use verify::VerifyAccountCommand;
