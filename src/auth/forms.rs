//! Login and signup forms with local validation

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

use super::AuthError;

/// Minimum password length accepted by the auth API
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email regex: {e}"))
});

fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::Invalid("Email is required".into()));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(AuthError::Invalid("Invalid email".into()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Invalid(format!(
            "Password should be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Login request body
#[derive(Clone, Default, Serialize)]
pub struct LoginForm {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl LoginForm {
    /// Check the form before anything is sent
    pub fn validate(&self) -> Result<(), AuthError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Signup request body
#[derive(Clone, Default, Serialize)]
pub struct SignupForm {
    /// Display username
    pub username: String,
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
    /// Terms and conditions accepted
    pub terms: bool,
}

impl SignupForm {
    /// Check the form before anything is sent
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::Invalid("Username is required".into()));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        if !self.terms {
            return Err(AuthError::Invalid(
                "You must accept the terms and conditions".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("terms", &self.terms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_login_validation() {
        assert!(login("vyasa@example.com", "hastinapura").validate().is_ok());
        assert_eq!(
            login("", "secret1").validate().unwrap_err(),
            AuthError::Invalid("Email is required".into())
        );
        assert_eq!(
            login("not-an-email", "secret1").validate().unwrap_err(),
            AuthError::Invalid("Invalid email".into())
        );
        assert!(matches!(
            login("a@b.co", "12345").validate(),
            Err(AuthError::Invalid(msg)) if msg.contains("at least 6")
        ));
    }

    #[test]
    fn test_signup_validation() {
        let mut form = SignupForm {
            username: "sanjaya".into(),
            email: "sanjaya@kuru.org".into(),
            password: "divyadrishti".into(),
            terms: false,
        };
        assert_eq!(
            form.validate().unwrap_err(),
            AuthError::Invalid("You must accept the terms and conditions".into())
        );

        form.terms = true;
        assert!(form.validate().is_ok());

        form.username = "  ".into();
        assert_eq!(
            form.validate().unwrap_err(),
            AuthError::Invalid("Username is required".into())
        );
    }
}
