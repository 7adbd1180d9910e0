use std::fmt;

use auth::TokenPair;

use crate::domain::user::models::AvatarUrl;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Command to register a new account with domain types.
///
/// `password` is plaintext; it has already passed the transport gate.
pub struct SignUpCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: String,
    pub avatar_url: Option<AvatarUrl>,
}

impl SignUpCommand {
    pub fn new(
        name: DisplayName,
        email: EmailAddress,
        password: String,
        avatar_url: Option<AvatarUrl>,
    ) -> Self {
        Self {
            name,
            email,
            password,
            avatar_url,
        }
    }
}

impl fmt::Debug for SignUpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpCommand")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}

/// Command to sign in with an email and plaintext password.
pub struct SignInCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl SignInCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for SignInCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCommand")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Outcome of a successful sign-up or sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_never_print_password() {
        let sign_in = SignInCommand::new(
            EmailAddress::new("kd14@yopmail.com".to_string()).unwrap(),
            "secret123".to_string(),
        );
        let sign_up = SignUpCommand::new(
            DisplayName::new("kd14".to_string()).unwrap(),
            EmailAddress::new("kd14@yopmail.com".to_string()).unwrap(),
            "secret123".to_string(),
            None,
        );

        assert!(!format!("{:?}", sign_in).contains("secret123"));
        assert!(!format!("{:?}", sign_up).contains("secret123"));
    }
}
