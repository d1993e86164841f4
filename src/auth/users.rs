use once_cell::sync::Lazy;
use serde::Serialize;

/// Account in the fixed user registry
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    password: String,
}

impl User {
    pub fn new(
        id: i64,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// Public view of the account; never carries the password
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

static DEFAULT_USERS: Lazy<Vec<User>> = Lazy::new(|| {
    vec![
        User::new(1, "John", "Crichton", "john", "secret"),
        User::new(2, "Aeryn", "Sun", "aeryn", "secret"),
    ]
});

/// Immutable table of known accounts, built once at startup
#[derive(Debug, Clone)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Exact (username, password) match
    pub fn find_by_credentials(&self, username: &str, password: &str) -> Option<&User> {
        self.users.iter().find(|u| u.matches(username, password))
    }

}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_USERS.clone())
    }
}
