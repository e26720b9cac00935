use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("name is required")]
    NameRequired,
    #[error("email is required")]
    EmailRequired,
    #[error("email address is invalid")]
    EmailInvalid,
    #[error("message is required")]
    MessageRequired,
    #[error("message must be at least 10 characters")]
    MessageTooShort,
}

impl FieldError {
    pub fn field(self) -> Field {
        match self {
            FieldError::NameRequired => Field::Name,
            FieldError::EmailRequired | FieldError::EmailInvalid => Field::Email,
            FieldError::MessageRequired | FieldError::MessageTooShort => Field::Message,
        }
    }

    pub fn translation_key(self) -> &'static str {
        match self {
            FieldError::NameRequired => "contact.nameRequired",
            FieldError::EmailRequired => "contact.emailRequired",
            FieldError::EmailInvalid => "contact.emailInvalid",
            FieldError::MessageRequired => "contact.messageRequired",
            FieldError::MessageTooShort => "contact.messageMinLength",
        }
    }
}

/// At most one error per field, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.iter().copied().find(|err| err.field() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors.iter().copied()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::NameRequired);
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::EmailRequired);
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::EmailInvalid);
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.push(FieldError::MessageRequired);
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::MessageTooShort);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors })
        }
    }

    /// Plain-text body used when the message goes through the mail client.
    pub fn mail_body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        )
    }
}

/// One `@`, a dot somewhere after it, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, message: &str) -> ContactForm {
        ContactForm::new("Ada", email, message)
    }

    #[test]
    fn accepts_valid_form() {
        assert!(form("a@b.co", "0123456789").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = form("not-an-email", "long enough message").validate().expect_err("invalid");
        assert_eq!(errors.get(Field::Email), Some(FieldError::EmailInvalid));
        assert_eq!(errors.len(), 1);

        for bad in ["a@b", "a b@c.de", "a@@b.co", "@b.co"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn enforces_message_length_after_trim() {
        let errors = form("a@b.co", "123456789").validate().expect_err("too short");
        assert_eq!(errors.get(Field::Message), Some(FieldError::MessageTooShort));

        let errors = form("a@b.co", "   123456789   ").validate().expect_err("trimmed");
        assert_eq!(errors.get(Field::Message), Some(FieldError::MessageTooShort));

        assert!(form("a@b.co", "  1234567890  ").validate().is_ok());
        assert!(form("a@b.co", "你好你好你好你好你好").validate().is_ok());
    }

    #[test]
    fn reports_every_empty_field() {
        let errors = ContactForm::new("  ", "", "\n").validate().expect_err("empty");
        let collected: Vec<FieldError> = errors.iter().collect();
        assert_eq!(
            collected,
            vec![
                FieldError::NameRequired,
                FieldError::EmailRequired,
                FieldError::MessageRequired
            ]
        );
        assert_eq!(
            errors.get(Field::Name).map(FieldError::translation_key),
            Some("contact.nameRequired")
        );
    }

    #[test]
    fn mail_body_lists_fields() {
        let body = ContactForm::new("Ada", "a@b.co", "Hello there").mail_body();
        assert_eq!(body, "Name: Ada\nEmail: a@b.co\n\nMessage:\nHello there");
    }
}
