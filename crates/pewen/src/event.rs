//! User-facing notifications and the observer that receives them

use std::fmt;

use log::{debug, log, Level};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::PewenError;
use crate::state::PetState;
use crate::wallet::WalletAddress;

/// How loudly a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Ordinary feedback
    Info,
    /// Something the user tried did not happen
    Destructive,
}

/// A finished loan: what the tree left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Returned {
    /// Name of the returned tree
    pub name: String,

    /// Health at the moment of return
    pub final_health: u8,

    /// Tokens credited for this loan
    pub earned: u64,
}

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A wallet connected
    WalletConnected {
        /// Address of the new wallet
        address: WalletAddress,
    },

    /// The wallet connector failed
    ConnectionFailed {
        /// Reason reported by the connector
        reason: String,
    },

    /// Adoption attempted without a wallet
    NoWallet,

    /// A tree was adopted
    Adopted {
        /// Name of the new tree
        name: String,
    },

    /// A tree was returned, manually or because it withered
    Returned(Returned),

    /// The tree withered and left on its own
    Tantrum {
        /// Name of the tree that ran away
        name: String,
    },
}

impl Event {
    /// Short headline.
    pub fn title(&self) -> &'static str {
        match self {
            Event::WalletConnected { .. } => "Wallet Connected",
            Event::ConnectionFailed { .. } => "Connection Failed",
            Event::NoWallet => "No Wallet, No Tree",
            Event::Adopted { .. } => "New Tree Friend!",
            Event::Returned(_) => "Tree Returned",
            Event::Tantrum { .. } => "Tree Tantrum!",
        }
    }

    /// One-line body text.
    pub fn description(&self) -> String {
        match self {
            Event::WalletConnected { .. } => {
                "Your wallet is now tree-ted as part of the family!".to_string()
            }
            Event::ConnectionFailed { .. } => "Wallet got stage fright. Try again!".to_string(),
            Event::NoWallet => {
                "Connect your wallet first. Trees don't grow on thin air!".to_string()
            }
            Event::Adopted { name } => format!("You've adopted {}. No refunds!", name),
            Event::Returned(r) => format!(
                "{} left you {} tokens. It's not you, it's tree.",
                r.name, r.earned
            ),
            Event::Tantrum { name } => {
                format!("{} ran away to join a forest boy band.", name)
            }
        }
    }

    /// The notification for a recoverable error, if the user should hear about it.
    pub fn for_error(err: &PewenError) -> Option<Event> {
        match err {
            PewenError::NoWallet => Some(Event::NoWallet),
            PewenError::Wallet(e) => Some(Event::ConnectionFailed {
                reason: e.to_string(),
            }),
            _ => None,
        }
    }

    /// Presentation severity.
    pub fn severity(&self) -> Severity {
        match self {
            Event::ConnectionFailed { .. } | Event::NoWallet => Severity::Destructive,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.description())
    }
}

/// Receives notifications from a running session.
pub trait Observer: Send {
    /// Called for every user-facing event.
    fn on_event(&mut self, event: &Event);

    /// Called after each decay step with the new state.
    fn on_tick(&mut self, _state: &PetState) {}
}

/// Observer that writes every event to the `log` facade.
///
/// Destructive events go out at `warn`. Ordinary ones go out at `debug`,
/// since the controller already logs each transition at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LogObserver {
    /// Log level used for `event`.
    pub fn level(event: &Event) -> Level {
        match event.severity() {
            Severity::Info => Level::Debug,
            Severity::Destructive => Level::Warn,
        }
    }
}

impl Observer for LogObserver {
    fn on_event(&mut self, event: &Event) {
        log!(Self::level(event), "{}", event);
    }

    fn on_tick(&mut self, state: &PetState) {
        debug!("{} is at {}", state.name(), state.health);
    }
}

/// Fan out to every observer in order.
impl Observer for Vec<Box<dyn Observer>> {
    fn on_event(&mut self, event: &Event) {
        for observer in self.iter_mut() {
            observer.on_event(event);
        }
    }

    fn on_tick(&mut self, state: &PetState) {
        for observer in self.iter_mut() {
            observer.on_tick(state);
        }
    }
}

/// Forward events into a channel. A closed receiver is ignored.
impl Observer for UnboundedSender<Event> {
    fn on_event(&mut self, event: &Event) {
        let _ = self.send(event.clone());
    }
}
