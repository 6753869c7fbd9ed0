//! Plain-text rendering of the tree card

use std::fmt;
use std::fmt::Write as _;

use crate::appearance::{mood_for, stage_for, IDLE_SYMBOL};
use crate::state::PetState;

/// Card heading.
pub const TITLE: &str = "Pewen Pal";

/// Something the user can do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Connect a wallet
    Connect,
    /// Adopt a tree. Disabled until a wallet is connected.
    Adopt {
        /// Whether the action can be taken right now
        enabled: bool,
    },
    /// Return the tree on loan
    Return,
}

impl Action {
    /// REPL command that performs this action.
    pub fn command(self) -> &'static str {
        match self {
            Action::Connect => "connect",
            Action::Adopt { .. } => "adopt",
            Action::Return => "return",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Action::Connect => "Connect Wallet",
            Action::Adopt { .. } => "Adopt a Tree (No takebacks!)",
            Action::Return => "Return Tree (It's not you, it's tree)",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {}", self.command(), self.label())?;
        if let Action::Adopt { enabled: false } = self {
            write!(f, " [connect a wallet first]")?;
        }
        Ok(())
    }
}

/// Actions offered for `state`, in display order.
pub fn available_actions(state: &PetState) -> Vec<Action> {
    let mut actions = Vec::new();
    if !state.wallet_connected() {
        actions.push(Action::Connect);
    }
    if state.is_loaned() {
        actions.push(Action::Return);
    } else {
        actions.push(Action::Adopt {
            enabled: state.wallet_connected(),
        });
    }
    actions
}

/// Render the card for `state`.
///
/// ```
/// use pewen::{render, PetState};
///
/// let card = render(&PetState::new());
/// assert!(card.contains("Pewen Pal"));
/// assert!(card.contains("0 Tokens"));
/// assert!(card.contains("wallet not connected"));
/// ```
pub fn render(state: &PetState) -> String {
    let mut out = String::new();
    let _ = write_card(&mut out, state);
    out
}

fn write_card(out: &mut String, state: &PetState) -> fmt::Result {
    writeln!(out, "{}", TITLE)?;
    match &state.loan {
        Some(loan) => {
            writeln!(out, "  {}", stage_for(state.health))?;
            writeln!(out, "  {}", loan.name())?;
            writeln!(out, "  health {} ({})", state.health, mood_for(state.health))?;
        }
        None => writeln!(out, "  {}", IDLE_SYMBOL)?,
    }
    writeln!(out, "  {} Tokens", state.tokens)?;
    match &state.wallet {
        Some(address) => writeln!(out, "  wallet {}", address)?,
        None => writeln!(out, "  wallet not connected")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Health, Loan};
    use crate::wallet::WalletAddress;

    fn loaned(health: u8) -> PetState {
        PetState {
            health: Health::new(health),
            loan: Loan::new("Sprucey"),
            tokens: 12,
            wallet: Some(WalletAddress::new("cosmos1...zz9x")),
        }
    }

    #[test]
    fn test_render_idle_shows_pot() {
        let card = render(&PetState::new());
        assert!(card.contains(IDLE_SYMBOL));
        assert!(!card.contains("health"));
    }

    #[test]
    fn test_render_loaned() {
        let card = render(&loaned(73));
        assert!(card.contains("Sprucey"));
        assert!(card.contains("health 73% (happy)"));
        assert!(card.contains("🌳"));
        assert!(card.contains("12 Tokens"));
        assert!(card.contains("wallet cosmos1...zz9x"));
    }

    #[test]
    fn test_actions_without_wallet() {
        assert_eq!(
            available_actions(&PetState::new()),
            vec![Action::Connect, Action::Adopt { enabled: false }]
        );
    }

    #[test]
    fn test_actions_while_loaned() {
        assert_eq!(available_actions(&loaned(50)), vec![Action::Return]);
    }

    #[test]
    fn test_actions_connected_idle() {
        let state = PetState {
            wallet: Some(WalletAddress::new("cosmos1...abcd")),
            ..PetState::new()
        };
        assert_eq!(available_actions(&state), vec![Action::Adopt { enabled: true }]);
    }
}
