//! Session state of one virtual tree

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::wallet::WalletAddress;

/// Tree health, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct Health(u8);

impl Health {
    /// Upper bound of the health scale.
    pub const MAX: u8 = 100;

    /// A fully healthy tree.
    pub const FULL: Health = Health(Self::MAX);

    /// A withered tree.
    pub const EMPTY: Health = Health(0);

    /// Create a health value, clamping anything above [`Health::MAX`].
    pub fn new(value: u8) -> Self {
        Health(value.min(Self::MAX))
    }

    /// The raw value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Health after losing `amount` points, floored at zero.
    pub fn decay(self, amount: u8) -> Self {
        Health(self.0.saturating_sub(amount))
    }

    /// Whether the tree has withered completely.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Tokens paid out when a tree is returned at this health: one per full ten points.
    pub fn earned_tokens(self) -> u64 {
        u64::from(self.0 / 10)
    }
}

impl Default for Health {
    fn default() -> Self {
        Health::FULL
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// An active loan. Only exists while a tree is adopted, and always carries a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    name: String,
}

impl Loan {
    /// Start a loan for the named tree. Returns `None` for a blank name.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            None
        } else {
            Some(Loan { name })
        }
    }

    /// Name of the tree on loan.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The complete mutable state of one tree session.
///
/// A fresh state has full health, no loan, no tokens and no wallet.
/// Serializes to a flat object with `health`, `loaned`, `name`, `tokens`,
/// `walletConnected` and `walletAddress`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetState {
    /// Current health of the tree
    pub health: Health,

    /// The active loan, if a tree is adopted
    pub loan: Option<Loan>,

    /// Tokens earned so far. Never decreases.
    pub tokens: u64,

    /// Connected wallet, if any
    pub wallet: Option<WalletAddress>,
}

impl PetState {
    /// Create the initial session state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tree is currently on loan.
    pub fn is_loaned(&self) -> bool {
        self.loan.is_some()
    }

    /// Name of the tree on loan, or `""` when idle.
    pub fn name(&self) -> &str {
        self.loan.as_ref().map(Loan::name).unwrap_or("")
    }

    /// Whether a wallet is connected.
    pub fn wallet_connected(&self) -> bool {
        self.wallet.is_some()
    }

    /// Connected wallet address, or `""` when not connected.
    pub fn wallet_address(&self) -> &str {
        self.wallet.as_ref().map(WalletAddress::as_str).unwrap_or("")
    }
}

impl Serialize for PetState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PetState", 6)?;
        s.serialize_field("health", &self.health)?;
        s.serialize_field("loaned", &self.is_loaned())?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("tokens", &self.tokens)?;
        s.serialize_field("walletConnected", &self.wallet_connected())?;
        s.serialize_field("walletAddress", self.wallet_address())?;
        s.end()
    }
}
