use serde::{Deserialize, Serialize};

/// Capability tag supplied by the caller on every operation.
/// It is trusted at face value; nothing binds a caller to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// May open accounts and move money
    Customer,
    /// May read the bank-wide balance report
    #[serde(alias = "bank manager")]
    BankManager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::BankManager => "bank-manager",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "bank-manager" | "bank manager" | "bank_manager" | "manager" => Some(Role::BankManager),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
