//! The signed-in user, as loaded from the profile endpoint after login.

use serde::{Deserialize, Serialize};

/// Identity of the signed-in shopper. Cart calls are keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Social login providers accepted by `POST /users/social-login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginProvider {
    Kakao,
    Apple,
    Google,
}

impl LoginProvider {
    /// Value sent as the form `username`.
    #[must_use]
    pub fn as_form_value(self) -> &'static str {
        match self {
            LoginProvider::Kakao => "KAKAO",
            LoginProvider::Apple => "APPLE",
            LoginProvider::Google => "GOOGLE",
        }
    }
}

impl std::str::FromStr for LoginProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kakao" => Ok(LoginProvider::Kakao),
            "apple" => Ok(LoginProvider::Apple),
            "google" => Ok(LoginProvider::Google),
            other => Err(format!("unknown login provider: {other}")),
        }
    }
}
