//! Wallet connection capability
//!
//! The lifecycle controller never talks to a wallet directly. Sessions hold an
//! `Arc<dyn WalletConnector>` so a real integration can replace [`MockWallet`]
//! without touching the controller.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default prefix used by [`MockWallet`] addresses.
pub const DEFAULT_ADDRESS_PREFIX: &str = "cosmos1...";

const ADDRESS_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ADDRESS_SUFFIX_LEN: usize = 4;

/// Address of a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures a wallet connector may report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user or the wallet declined the connection
    #[error("wallet rejected the connection: {0}")]
    Rejected(String),

    /// No wallet could be reached
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// Something that can hand out a wallet address.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connect to the wallet and return its address.
    async fn connect(&self) -> Result<WalletAddress, WalletError>;
}

/// Stand-in wallet producing `cosmos1...xxxx` addresses. Never fails.
#[derive(Debug)]
pub struct MockWallet {
    prefix: String,
    rng: Mutex<StdRng>,
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWallet {
    /// Create a mock wallet seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a mock wallet with a fixed seed, for reproducible addresses.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            prefix: DEFAULT_ADDRESS_PREFIX.to_string(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Replace the address prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn next_address(&self) -> WalletAddress {
        // A poisoned lock only means another caller panicked mid-draw; the RNG is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let suffix: String = (0..ADDRESS_SUFFIX_LEN)
            .map(|_| ADDRESS_ALPHABET[rng.gen_range(0..ADDRESS_ALPHABET.len())] as char)
            .collect();
        WalletAddress(format!("{}{}", self.prefix, suffix))
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn connect(&self) -> Result<WalletAddress, WalletError> {
        Ok(self.next_address())
    }
}
