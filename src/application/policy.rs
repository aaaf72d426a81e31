// src/application/policy.rs
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Which credential check backs the login endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    #[default]
    Normal,
    Ldap,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Normal => "normal",
            AuthMethod::Ldap => "ldap",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "" => Ok(AuthMethod::Normal),
            "ldap" => Ok(AuthMethod::Ldap),
            other => Err(format!("unknown auth method '{other}'")),
        }
    }
}

/// Feature switches consulted by the auth commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    pub allow_guests: bool,
    pub allow_registration: bool,
    pub method: AuthMethod,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            allow_guests: true,
            allow_registration: true,
            method: AuthMethod::Normal,
        }
    }
}
