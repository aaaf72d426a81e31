use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::{Email, UserName},
};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 72;

pub(super) struct ValidAccount {
    pub name: UserName,
    pub email: Email,
    pub password: String,
}

pub(super) fn validate_account(
    name: String,
    email: String,
    password1: String,
    password2: &str,
) -> ApplicationResult<ValidAccount> {
    let name = UserName::new(name)?;
    let email = Email::new(email)?;
    let password = validate_password_pair(password1, password2)?;

    Ok(ValidAccount {
        name,
        email,
        password,
    })
}

pub(super) fn validate_password_pair(password1: String, password2: &str) -> ApplicationResult<String> {
    check_length("password1", &password1)?;
    check_length("password2", password2)?;

    if password1 != password2 {
        return Err(ApplicationError::validation("passwords do not match"));
    }

    Ok(password1)
}

fn check_length(field: &str, password: &str) -> ApplicationResult<()> {
    let length = password.chars().count();
    if length == 0 {
        return Err(ApplicationError::validation(format!("{field} is required")));
    }
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(ApplicationError::validation(format!(
            "{field} must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
