use std::fmt;
use std::str::FromStr;

use auth::TokenSubject;
use chrono::DateTime;
use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::user::errors::AvatarUrlError;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;
use crate::user::errors::PublicIdError;

/// User aggregate entity.
///
/// `id` is the storage key and never leaves the service; `public_id` is what
/// tokens and responses carry.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub public_id: PublicId,
    pub email: EmailAddress,
    pub name: DisplayName,
    pub password_hash: String,
    pub avatar_url: Option<AvatarUrl>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Identity embedded in the tokens issued for this user.
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject::new(self.public_id.as_str(), self.email.as_str())
    }
}

/// Externally-facing user identifier.
///
/// Opaque to clients; generated once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicId(String);

impl PublicId {
    /// Generate a new random public identifier.
    ///
    /// # Returns
    /// PublicId built from a UUID v4 in simple (unhyphenated) form
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an identifier read from storage or from token claims.
    ///
    /// # Errors
    /// * `Empty` - String is empty or whitespace
    pub fn from_string(s: &str) -> Result<Self, PublicIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PublicIdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PublicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `TooLong` - Longer than 255 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|_| EmailError::InvalidFormat)
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 255;

    /// Create a display name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace
    /// * `TooLong` - Longer than 255 characters
    pub fn new(name: String) -> Result<Self, DisplayNameError> {
        if name.trim().is_empty() {
            return Err(DisplayNameError::Empty);
        }
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Avatar reference, an absolute URI of at most 512 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    const MAX_LENGTH: usize = 512;

    /// Create a validated avatar URL.
    ///
    /// # Errors
    /// * `TooLong` - Longer than 512 characters
    /// * `InvalidFormat` - Not an absolute URI
    pub fn new(url: String) -> Result<Self, AvatarUrlError> {
        let length = url.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(AvatarUrlError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Url::parse(&url)
            .map(|_| AvatarUrl(url))
            .map_err(|_| AvatarUrlError::InvalidFormat)
    }

    /// Validate an optional avatar field where an empty string means absent.
    pub fn parse_optional(url: Option<String>) -> Result<Option<Self>, AvatarUrlError> {
        match url {
            Some(url) if !url.is_empty() => Self::new(url).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Record handed to the store on sign-up.
///
/// The store assigns `id` and the timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub public_id: PublicId,
    pub email: EmailAddress,
    pub name: DisplayName,
    pub password_hash: String,
    pub avatar_url: Option<AvatarUrl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_is_unique_and_opaque() {
        let a = PublicId::new();
        let b = PublicId::new();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(!a.as_str().contains('-'));
    }

    #[test]
    fn test_public_id_rejects_blank() {
        assert_eq!(PublicId::from_string("  "), Err(PublicIdError::Empty));
        assert_eq!(
            PublicId::from_string("g0oyq6r0dcxj85060ojvzxot")
                .unwrap()
                .as_str(),
            "g0oyq6r0dcxj85060ojvzxot"
        );
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("kd14@yopmail.com".to_string()).is_ok());
        assert_eq!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat)
        );

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            EmailAddress::new(long),
            Err(EmailError::TooLong { max: 255, .. })
        ));
    }

    #[test]
    fn test_display_name_rejects_blank() {
        assert_eq!(
            DisplayName::new("   ".to_string()),
            Err(DisplayNameError::Empty)
        );
        assert_eq!(DisplayName::new("kd14".to_string()).unwrap().as_str(), "kd14");
    }

    #[test]
    fn test_display_name_length_limit() {
        assert!(DisplayName::new("é".repeat(255)).is_ok());
        assert_eq!(
            DisplayName::new("a".repeat(256)),
            Err(DisplayNameError::TooLong {
                max: 255,
                actual: 256
            })
        );
    }

    #[test]
    fn test_avatar_url_optional() {
        assert_eq!(AvatarUrl::parse_optional(None), Ok(None));
        assert_eq!(AvatarUrl::parse_optional(Some(String::new())), Ok(None));

        let avatar = AvatarUrl::parse_optional(Some("https://cdn.example.com/a.png".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(avatar.as_str(), "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_avatar_url_rejects_relative_and_long() {
        assert_eq!(
            AvatarUrl::new("/images/a.png".to_string()),
            Err(AvatarUrlError::InvalidFormat)
        );

        let long = format!("https://example.com/{}", "a".repeat(512));
        assert!(matches!(
            AvatarUrl::new(long),
            Err(AvatarUrlError::TooLong { max: 512, .. })
        ));
    }

    #[test]
    fn test_token_subject() {
        let user = User {
            id: 1,
            public_id: PublicId::from_string("g0oyq6r0dcxj85060ojvzxot").unwrap(),
            email: EmailAddress::new("kd14@yopmail.com".to_string()).unwrap(),
            name: DisplayName::new("kd14".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: None,
        };

        let subject = user.token_subject();
        assert_eq!(subject.id, "g0oyq6r0dcxj85060ojvzxot");
        assert_eq!(subject.email, "kd14@yopmail.com");
    }
}
