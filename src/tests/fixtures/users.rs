// Shared account fixtures.

use crate::modules::accounts::core::user::{Role, UserAccount};
use std::fs;

fn account(id: &str, name: &str, role: Role) -> UserAccount {
    UserAccount {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id),
        role,
    }
}

pub fn admin(id: &str, name: &str) -> UserAccount {
    account(id, name, Role::Admin)
}

pub fn distributor(id: &str, name: &str) -> UserAccount {
    account(id, name, Role::Distributor)
}

/// Two admins and two distributors, read from `json/users.json`.
pub fn seeded_users() -> Vec<UserAccount> {
    let json_str = fs::read_to_string("./src/tests/fixtures/json/users.json").unwrap();
    serde_json::from_str(&json_str).unwrap()
}

#[cfg(test)]
mod user_fixture_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_load_the_seeded_users() {
        let users = seeded_users();
        assert_eq!(users.len(), 4);
        assert_eq!(users.iter().filter(|u| u.role == Role::Admin).count(), 2);
    }
}
