// The caller behind a request, as vouched for by the upstream authenticator.

use crate::modules::accounts::core::user::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            name: None,
            email: None,
        }
    }

    pub fn with_profile(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.email = Some(email.into());
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod principal_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_only_match_its_own_role() {
        let principal = Principal::new("u-1", Role::Distributor);
        assert!(principal.has_role(Role::Distributor));
        assert!(!principal.has_role(Role::Admin));
        assert_eq!(principal.name, None);
    }

    #[rstest]
    fn it_should_attach_a_profile() {
        let principal = Principal::new("u-1", Role::Admin).with_profile("Ada", "ada@example.com");
        assert_eq!(principal.name.as_deref(), Some("Ada"));
        assert_eq!(principal.email.as_deref(), Some("ada@example.com"));
    }
}
