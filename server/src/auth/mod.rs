mod crypto;
mod db;
mod extractor;

pub use crypto::{hash_password, verify_password};
pub use db::{create_session, ensure_csr_user, find_user_by_username};
pub use extractor::CsrUser;

/// Roles stored in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Customer service representative; may modify the catalogue
    Csr,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Csr => "csr",
            Role::User => "user",
        }
    }

    /// Unknown role strings fall back to the least privileged role.
    pub fn parse(s: &str) -> Role {
        match s {
            "csr" => Role::Csr,
            _ => Role::User,
        }
    }
}
