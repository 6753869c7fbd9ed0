//! Error types for Pewen operations

use thiserror::Error;

use crate::wallet::{WalletAddress, WalletError};

/// Main error type for Pewen operations
#[derive(Error, Debug)]
pub enum PewenError {
    /// Adoption attempted before a wallet was connected
    #[error("no wallet connected: connect a wallet before adopting a tree")]
    NoWallet,

    /// A wallet is already connected to this session
    #[error("wallet already connected: {address}")]
    AlreadyConnected {
        /// Address of the connected wallet
        address: WalletAddress,
    },

    /// A tree is already on loan
    #[error("{name} is already on loan")]
    AlreadyLoaned {
        /// Name of the tree currently on loan
        name: String,
    },

    /// Return attempted while no tree is on loan
    #[error("no tree is currently on loan")]
    NotLoaned,

    /// The wallet connector reported a failure
    #[error("wallet connection failed: {0}")]
    Wallet(#[from] WalletError),

    /// Configuration is well-formed but invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O failure while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The session loop is no longer running
    #[error("session closed")]
    SessionClosed,
}

/// Result type alias for Pewen operations
pub type Result<T> = std::result::Result<T, PewenError>;
