//! # Pewen
//!
//! Pewen Pal, a virtual tree you adopt, keep alive, and return for tokens.
//!
//! Connect a wallet, adopt a tree, and watch its health drain one point per
//! second. Return it whenever you like: every full ten points of health left
//! become a token. Let it reach zero and it runs away on its own, leaving
//! nothing behind.
//!
//! ## Architecture
//!
//! - **Controller**: the lifecycle state machine over [`PetState`]
//! - **Session**: single-task event loop owning the controller and the decay timer
//! - **Wallet**: the [`WalletConnector`] capability, with a [`MockWallet`] stand-in
//! - **Appearance / View**: mood, growth stage and a text card derived from health
//!
//! Nothing is persisted. A session's state is gone when the session ends.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod appearance;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod session;
pub mod state;
pub mod view;
pub mod wallet;

// Re-export main types
pub use appearance::{mood_for, stage_for, Mood, Stage, IDLE_SYMBOL};
pub use config::PewenConfig;
pub use controller::{Controller, Tick, DECAY_PER_TICK, TREE_NAMES};
pub use error::{PewenError, Result};
pub use event::{Event, LogObserver, Observer, Returned, Severity};
pub use session::{
    spawn_from_config, IntervalScheduler, Scheduler, Session, SessionHandle, TickSender,
    TimerGuard,
};
pub use state::{Health, Loan, PetState};
pub use view::{available_actions, render, Action};
pub use wallet::{MockWallet, WalletAddress, WalletConnector, WalletError};

/// Pewen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
