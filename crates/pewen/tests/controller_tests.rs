//! Lifecycle controller tests

use pewen::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn controller() -> Controller<StdRng> {
    Controller::new(StdRng::seed_from_u64(2024))
}

fn adopted() -> Controller<StdRng> {
    let mut c = controller();
    c.wallet_connected(WalletAddress::new("cosmos1...t3st"));
    c.adopt().unwrap();
    c
}

fn ticks(c: &mut Controller<StdRng>, n: usize) -> Vec<Tick> {
    (0..n).map(|_| c.tick()).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Wallet
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_complete_connect_success() {
    let mut c = controller();
    let address = c
        .complete_connect(Ok(WalletAddress::new("cosmos1...a1b2")))
        .unwrap();
    assert_eq!(address.as_str(), "cosmos1...a1b2");
    assert!(c.state().wallet_connected());
    assert_eq!(c.state().wallet_address(), "cosmos1...a1b2");
}

#[test]
fn test_complete_connect_failure_changes_nothing() {
    let mut c = controller();
    let err = c
        .complete_connect(Err(WalletError::Rejected("user closed popup".to_string())))
        .unwrap_err();
    assert!(matches!(err, PewenError::Wallet(WalletError::Rejected(_))));
    assert_eq!(c.state(), &PetState::new());
}

#[tokio::test]
async fn test_connect_wallet_through_mock() {
    let mut c = controller();
    let wallet = MockWallet::with_seed(5);
    let address = c.connect_wallet(&wallet).await.unwrap();
    assert!(address.as_str().starts_with("cosmos1..."));
    assert_eq!(c.state().wallet.as_ref(), Some(&address));
}

#[tokio::test]
async fn test_connect_twice_is_rejected() {
    let mut c = controller();
    let wallet = MockWallet::with_seed(5);
    let first = c.connect_wallet(&wallet).await.unwrap();

    let err = c.connect_wallet(&wallet).await.unwrap_err();
    assert!(matches!(err, PewenError::AlreadyConnected { ref address } if *address == first));
    assert_eq!(c.state().wallet.as_ref(), Some(&first));
}

// ═══════════════════════════════════════════════════════════════════════
// Adopt
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_adopt_without_wallet_changes_nothing() {
    let mut c = controller();
    let before = c.state().clone();

    let err = c.adopt().unwrap_err();
    assert!(matches!(err, PewenError::NoWallet));
    assert_eq!(c.state(), &before);
    assert!(!c.state().is_loaned());
    assert_eq!(c.state().name(), "");
    assert_eq!(c.state().health, Health::FULL);
}

#[test]
fn test_adopt_sets_loan_and_full_health() {
    let c = adopted();
    assert!(c.state().is_loaned());
    assert!(TREE_NAMES.contains(&c.state().name()));
    assert_eq!(c.state().health.value(), 100);
}

#[test]
fn test_adopt_names_are_reproducible_with_seed() {
    let a = adopted();
    let b = adopted();
    assert_eq!(a.state().name(), b.state().name());
}

#[test]
fn test_adopt_eventually_uses_every_name() {
    let mut c = controller();
    c.wallet_connected(WalletAddress::new("cosmos1...t3st"));
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        c.adopt().unwrap();
        seen.insert(c.state().name().to_string());
        c.return_tree().unwrap();
    }
    assert_eq!(seen.len(), TREE_NAMES.len());
}

// ═══════════════════════════════════════════════════════════════════════
// Tick and return
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_hundred_ticks_auto_return() {
    let mut c = adopted();
    let name = c.state().name().to_string();

    let outcomes = ticks(&mut c, 100);
    assert!(outcomes[..99]
        .iter()
        .all(|t| matches!(t, Tick::Decayed(_))));
    assert_eq!(
        outcomes[99],
        Tick::Withered(Returned {
            name,
            final_health: 0,
            earned: 0,
        })
    );

    let state = c.state();
    assert!(!state.is_loaned());
    assert_eq!(state.name(), "");
    assert_eq!(state.tokens, 0);
    assert_eq!(state.health, Health::FULL);
}

#[test]
fn test_fifty_ticks_then_manual_return() {
    let mut c = adopted();
    ticks(&mut c, 50);
    assert_eq!(c.state().health.value(), 50);

    let returned = c.return_tree().unwrap();
    assert_eq!(returned.earned, 5);
    assert_eq!(returned.final_health, 50);

    let state = c.state();
    assert_eq!(state.tokens, 5);
    assert_eq!(state.health, Health::FULL);
    assert!(!state.is_loaned());
    assert_eq!(state.name(), "");
}

#[test]
fn test_return_twice_is_guarded() {
    let mut c = adopted();
    c.return_tree().unwrap();
    let after_first = c.state().clone();

    let err = c.return_tree().unwrap_err();
    assert!(matches!(err, PewenError::NotLoaned));
    assert_eq!(c.state(), &after_first);
}

#[test]
fn test_tick_at_zero_returns_once() {
    let state = PetState {
        health: Health::EMPTY,
        loan: Loan::new("Woody"),
        tokens: 3,
        wallet: Some(WalletAddress::new("cosmos1...zero")),
    };
    let mut c = Controller::from_state(state, StdRng::seed_from_u64(0));

    let first = c.tick();
    assert!(matches!(first, Tick::Withered(ref r) if r.final_health == 0 && r.earned == 0));
    assert_eq!(c.state().tokens, 3);

    // Already idle: further ticks do nothing.
    assert_eq!(c.tick(), Tick::Idle);
    assert_eq!(c.tick(), Tick::Idle);
    assert_eq!(c.state().tokens, 3);
    assert!(!c.state().is_loaned());
}

#[test]
fn test_tokens_accumulate_across_loans() {
    let mut c = adopted();
    ticks(&mut c, 15);
    assert_eq!(c.return_tree().unwrap().earned, 8);

    c.adopt().unwrap();
    assert_eq!(c.state().health, Health::FULL);
    assert_eq!(c.return_tree().unwrap().earned, 10);

    assert_eq!(c.state().tokens, 18);
}

#[test]
fn test_health_stays_in_range() {
    let mut c = adopted();
    for _ in 0..350 {
        c.tick();
        assert!(c.state().health.value() <= Health::MAX);
        assert_eq!(c.state().is_loaned(), !c.state().name().is_empty());
        if !c.state().is_loaned() {
            c.adopt().unwrap();
        }
    }
}
