use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Identity a token is issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    /// Public identifier of the user record
    pub id: String,
    pub email: String,
}

impl TokenSubject {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Claims carried by both access and refresh tokens.
///
/// Registered claims follow RFC 7519; the subject fields are flattened in.
/// Claims are never modified after signing, only reissued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(flatten)]
    pub subject: TokenSubject,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Build claims for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identity to embed
    /// * `issued_at` - Clock reading the lifetime is measured from
    /// * `lifetime` - How long the token stays valid
    /// * `issuer` - Issuer string
    /// * `audience` - Audience string
    pub fn for_subject(
        subject: TokenSubject,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            subject,
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Public identifier of the subject.
    pub fn id(&self) -> &str {
        &self.subject.id
    }

    pub fn email(&self) -> &str {
        &self.subject.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> TokenSubject {
        TokenSubject::new("g0oyq6r0dcxj85060ojvzxot", "kd14@yopmail.com")
    }

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject(subject(), now, Duration::minutes(15), "iss", "aud");

        assert_eq!(claims.id(), "g0oyq6r0dcxj85060ojvzxot");
        assert_eq!(claims.email(), "kd14@yopmail.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.iss, "iss");
        assert_eq!(claims.aud, "aud");
    }

    #[test]
    fn test_token_ids_are_unique() {
        let now = Utc::now();
        let first = Claims::for_subject(subject(), now, Duration::minutes(15), "iss", "aud");
        let second = Claims::for_subject(subject(), now, Duration::minutes(15), "iss", "aud");

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_subject_is_flattened() {
        let claims = Claims::for_subject(subject(), Utc::now(), Duration::days(7), "iss", "aud");
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json["id"], "g0oyq6r0dcxj85060ojvzxot");
        assert_eq!(json["email"], "kd14@yopmail.com");
        assert!(json.get("subject").is_none());
    }
}
