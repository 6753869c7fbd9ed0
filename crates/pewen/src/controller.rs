//! Tree lifecycle controller
//!
//! Owns a [`PetState`] and performs the only four mutations it ever sees:
//! connecting a wallet, adopting a tree, decaying it one tick at a time, and
//! returning it for tokens.
//!
//! ```text
//!            adopt (wallet required)
//!   Idle ─────────────────────────────▶ Active ──┐ tick (health - 1)
//!    ▲                                    │  ▲   │
//!    │   return / tick reaching zero      │  └───┘
//!    └────────────────────────────────────┘
//! ```

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::validate_names;
use crate::error::{PewenError, Result};
use crate::event::{Event, Returned};
use crate::state::{Health, Loan, PetState};
use crate::wallet::{WalletAddress, WalletConnector, WalletError};

/// Names a freshly adopted tree can get.
pub const TREE_NAMES: [&str; 5] = ["Piney", "Sprucey", "Cedric", "Oakey", "Woody"];

/// Health lost per tick.
pub const DECAY_PER_TICK: u8 = 1;

/// Outcome of a single decay step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No tree on loan; nothing happened
    Idle,

    /// The tree lost health and is still alive
    Decayed(Health),

    /// Health hit zero and the tree was returned automatically
    Withered(Returned),
}

impl Tick {
    /// Notifications produced by this tick, in delivery order.
    pub fn events(&self) -> Vec<Event> {
        match self {
            Tick::Idle | Tick::Decayed(_) => Vec::new(),
            Tick::Withered(returned) => vec![
                Event::Returned(returned.clone()),
                Event::Tantrum {
                    name: returned.name.clone(),
                },
            ],
        }
    }
}

/// The tree lifecycle state machine.
///
/// Randomness comes from the injected `R`, so a seeded RNG gives
/// reproducible names.
///
/// # Example
///
/// ```
/// use pewen::{Controller, Tick, WalletAddress};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut controller = Controller::new(StdRng::seed_from_u64(1));
/// controller.wallet_connected(WalletAddress::new("cosmos1...abcd"));
/// controller.adopt().unwrap();
///
/// assert!(controller.state().is_loaned());
/// assert!(matches!(controller.tick(), Tick::Decayed(h) if h.value() == 99));
///
/// let returned = controller.return_tree().unwrap();
/// assert_eq!(returned.earned, 9);
/// assert_eq!(controller.state().tokens, 9);
/// ```
#[derive(Debug, Clone)]
pub struct Controller<R> {
    state: PetState,
    names: Vec<String>,
    rng: R,
}

impl<R: Rng> Controller<R> {
    /// Create a controller with a fresh state and the default name set.
    pub fn new(rng: R) -> Self {
        Self::from_state(PetState::new(), rng)
    }

    /// Create a controller with a custom name set.
    ///
    /// Fails if the set is empty or contains a blank name.
    pub fn with_names(rng: R, names: Vec<String>) -> Result<Self> {
        validate_names(&names)?;
        Ok(Self {
            state: PetState::new(),
            names,
            rng,
        })
    }

    /// Resume from an existing state with the default name set.
    pub fn from_state(state: PetState, rng: R) -> Self {
        Self {
            state,
            names: TREE_NAMES.iter().map(|n| n.to_string()).collect(),
            rng,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PetState {
        &self.state
    }

    /// Consume the controller, returning its state.
    pub fn into_state(self) -> PetState {
        self.state
    }

    // ═══════════════════════════════════════════════════════════════════
    // Wallet
    // ═══════════════════════════════════════════════════════════════════

    /// Connect through `wallet`. On failure nothing changes.
    pub async fn connect_wallet(&mut self, wallet: &dyn WalletConnector) -> Result<WalletAddress> {
        if let Some(address) = &self.state.wallet {
            return Err(PewenError::AlreadyConnected {
                address: address.clone(),
            });
        }
        let result = wallet.connect().await;
        self.complete_connect(result)
    }

    /// Apply the result of a wallet connection attempt.
    pub fn complete_connect(
        &mut self,
        result: std::result::Result<WalletAddress, WalletError>,
    ) -> Result<WalletAddress> {
        let address = result?;
        self.wallet_connected(address.clone());
        Ok(address)
    }

    /// Record a connected wallet.
    pub fn wallet_connected(&mut self, address: WalletAddress) {
        info!("wallet connected: {}", address);
        self.state.wallet = Some(address);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Loan lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Adopt a tree with a random name and full health.
    ///
    /// Requires a connected wallet and no tree already on loan. On error the
    /// state is untouched.
    pub fn adopt(&mut self) -> Result<Event> {
        if !self.state.wallet_connected() {
            return Err(PewenError::NoWallet);
        }
        if let Some(loan) = &self.state.loan {
            return Err(PewenError::AlreadyLoaned {
                name: loan.name().to_string(),
            });
        }

        let loan = self
            .names
            .choose(&mut self.rng)
            .cloned()
            .and_then(Loan::new)
            .ok_or_else(|| PewenError::Config("no usable tree name".to_string()))?;

        let name = loan.name().to_string();
        self.state.loan = Some(loan);
        self.state.health = Health::FULL;
        info!("adopted {}", name);
        Ok(Event::Adopted { name })
    }

    /// One decay step.
    ///
    /// Reaching zero health returns the tree within this same call, so the
    /// caller observes exactly one state transition per tick.
    pub fn tick(&mut self) -> Tick {
        if !self.state.is_loaned() {
            return Tick::Idle;
        }

        self.state.health = self.state.health.decay(DECAY_PER_TICK);
        debug!("{} decayed to {}", self.state.name(), self.state.health);

        if !self.state.health.is_empty() {
            return Tick::Decayed(self.state.health);
        }

        match self.finish_loan() {
            Some(returned) => Tick::Withered(returned),
            None => Tick::Idle,
        }
    }

    /// Return the tree on loan, crediting one token per ten health points.
    pub fn return_tree(&mut self) -> Result<Returned> {
        self.finish_loan().ok_or(PewenError::NotLoaned)
    }

    fn finish_loan(&mut self) -> Option<Returned> {
        let loan = self.state.loan.take()?;
        let final_health = self.state.health;
        let earned = final_health.earned_tokens();

        self.state.tokens = self.state.tokens.saturating_add(earned);
        self.state.health = Health::FULL;

        info!(
            "{} returned at {}, earned {} tokens",
            loan.name(),
            final_health,
            earned
        );
        Some(Returned {
            name: loan.name().to_string(),
            final_health: final_health.value(),
            earned,
        })
    }
}
