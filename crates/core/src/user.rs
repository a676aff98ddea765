//! User identity as exposed on the wire.
//!
//! Users are created by the identity provider on first sign-in; the task
//! board only reads them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{require_non_blank, validate_input};

/// Public user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    #[ts(type = "number")]
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
}

/// Identity handed over by the identity provider after a successful sign-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SignInRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Validated sign-in identity. The email is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignIn {
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl SignInRequest {
    pub fn into_sign_in(self) -> Result<SignIn, CoreError> {
        validate_input(&self)?;
        Ok(SignIn {
            email: require_non_blank("email", self.email)?.to_lowercase(),
            name: self.name.filter(|n| !n.trim().is_empty()),
            image: self.image.filter(|i| !i.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sign_in_normalizes_email() {
        let sign_in = SignInRequest {
            email: Some("Ada@Example.COM".into()),
            name: Some(" ".into()),
            image: None,
        }
        .into_sign_in()
        .unwrap();
        assert_eq!(sign_in.email, "ada@example.com");
        assert_eq!(sign_in.name, None);
    }

    #[test]
    fn sign_in_requires_valid_email() {
        assert_matches!(
            SignInRequest::default().into_sign_in(),
            Err(CoreError::Validation(msg)) if msg == "email is required"
        );
        let bad = SignInRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        assert_matches!(bad.into_sign_in(), Err(CoreError::Validation(_)));
    }
}
