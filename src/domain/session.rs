use serde::{Deserialize, Serialize};

/// Signed-in user as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Caller-owned session passed into every authenticated operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    /// Session known only by its bearer token, as seen by an HTTP handler.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self::signed_in(SessionUser {
            id: String::new(),
            name: String::new(),
            email: String::new(),
            token: token.into(),
        })
    }

    /// Bearer token, if signed in with a non-empty token.
    pub fn token(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_token() {
        assert_eq!(Session::anonymous().token(), None);
        assert!(!Session::anonymous().is_authenticated());
    }

    #[test]
    fn test_deserialize_auth_payload() {
        let json = r#"{"_id":"64f","name":"Ana","email":"ana@example.com","token":"abc"}"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();
        let mut session = Session::signed_in(user);

        assert_eq!(session.token(), Some("abc"));
        session.sign_out();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session::signed_in(SessionUser {
            id: "1".into(),
            name: "n".into(),
            email: "e".into(),
            token: String::new(),
        });
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_from_token() {
        assert_eq!(Session::from_token("xyz").token(), Some("xyz"));
        assert!(!Session::from_token("").is_authenticated());
    }
}
