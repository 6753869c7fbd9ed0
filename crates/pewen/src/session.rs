//! Session event loop
//!
//! A [`Session`] owns the [`Controller`] and is the only place state changes
//! happen. Commands from any number of [`SessionHandle`]s and ticks from the
//! decay timer are processed one at a time on a single task, so no lock ever
//! guards the state.
//!
//! The timer is armed by a successful adopt and disarmed by a return (manual
//! or automatic). Disarming drops the [`TimerGuard`], which aborts the timer
//! task; ending the session drops it too.

mod timer;

pub use timer::{IntervalScheduler, Scheduler, TickSender, TimerGuard};

use std::sync::Arc;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::PewenConfig;
use crate::controller::{Controller, Tick};
use crate::error::{PewenError, Result};
use crate::event::{Event, Observer, Returned};
use crate::state::PetState;
use crate::wallet::{MockWallet, WalletAddress, WalletConnector};

enum Command {
    Connect(oneshot::Sender<Result<WalletAddress>>),
    Adopt(oneshot::Sender<Result<String>>),
    Return(oneshot::Sender<Result<Returned>>),
    Snapshot(oneshot::Sender<PetState>),
    Shutdown,
}

/// Cloneable handle for driving a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .map_err(|_| PewenError::SessionClosed)?;
        rx.await.map_err(|_| PewenError::SessionClosed)
    }

    /// Connect the session's wallet.
    pub async fn connect_wallet(&self) -> Result<WalletAddress> {
        self.request(Command::Connect).await?
    }

    /// Adopt a tree. Returns its name.
    pub async fn adopt(&self) -> Result<String> {
        self.request(Command::Adopt).await?
    }

    /// Return the tree on loan.
    pub async fn return_tree(&self) -> Result<Returned> {
        self.request(Command::Return).await?
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Result<PetState> {
        self.request(Command::Snapshot).await
    }

    /// Ask the session to stop. Pending commands sent earlier are still served.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown);
    }

    /// Whether the session loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The single-task owner of a tree session.
pub struct Session<R, S> {
    controller: Controller<R>,
    wallet: Arc<dyn WalletConnector>,
    scheduler: S,
    observer: Box<dyn Observer>,
    commands: mpsc::UnboundedReceiver<Command>,
    ticks: mpsc::UnboundedReceiver<u64>,
    tick_tx: mpsc::UnboundedSender<u64>,
    timer: Option<TimerGuard>,
    epoch: u64,
}

impl<R, S> Session<R, S>
where
    R: Rng + Send + 'static,
    S: Scheduler + 'static,
{
    /// Build a session and the handle that drives it. Nothing runs until
    /// [`Session::run`] is awaited.
    pub fn new(
        controller: Controller<R>,
        wallet: Arc<dyn WalletConnector>,
        scheduler: S,
        observer: Box<dyn Observer>,
    ) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (tick_tx, ticks) = mpsc::unbounded_channel();
        let session = Self {
            controller,
            wallet,
            scheduler,
            observer,
            commands,
            ticks,
            tick_tx,
            timer: None,
            epoch: 0,
        };
        (session, SessionHandle { tx })
    }

    /// Build a session and run it on the current tokio runtime.
    ///
    /// The join handle resolves to the final state once the session stops.
    pub fn spawn(
        controller: Controller<R>,
        wallet: Arc<dyn WalletConnector>,
        scheduler: S,
        observer: Box<dyn Observer>,
    ) -> (SessionHandle, JoinHandle<PetState>) {
        let (session, handle) = Self::new(controller, wallet, scheduler, observer);
        (handle, tokio::spawn(session.run()))
    }

    /// Serve commands and ticks until shutdown or until every handle is dropped.
    pub async fn run(mut self) -> PetState {
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle(command).await,
                },
                Some(epoch) = self.ticks.recv() => self.on_tick(epoch),
            }
        }
        debug!("session stopped");
        self.disarm();
        self.controller.into_state()
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Connect(reply) => {
                let wallet = Arc::clone(&self.wallet);
                let result = match self.controller.connect_wallet(wallet.as_ref()).await {
                    Ok(address) => {
                        self.observer.on_event(&Event::WalletConnected {
                            address: address.clone(),
                        });
                        Ok(address)
                    }
                    Err(err) => Err(self.rejected(err)),
                };
                let _ = reply.send(result);
            }
            Command::Adopt(reply) => {
                let result = match self.controller.adopt() {
                    Ok(event) => {
                        self.arm();
                        self.observer.on_event(&event);
                        Ok(self.controller.state().name().to_string())
                    }
                    Err(err) => Err(self.rejected(err)),
                };
                let _ = reply.send(result);
            }
            Command::Return(reply) => {
                let result = match self.controller.return_tree() {
                    Ok(returned) => {
                        self.disarm();
                        self.observer.on_event(&Event::Returned(returned.clone()));
                        Ok(returned)
                    }
                    Err(err) => Err(self.rejected(err)),
                };
                let _ = reply.send(result);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.controller.state().clone());
            }
            Command::Shutdown => {}
        }
    }

    fn on_tick(&mut self, epoch: u64) {
        if self.timer.is_none() || epoch != self.epoch {
            trace!("dropping stale tick from epoch {}", epoch);
            return;
        }

        let tick = self.controller.tick();
        if matches!(tick, Tick::Idle | Tick::Withered(_)) {
            self.disarm();
        }

        self.observer.on_tick(self.controller.state());
        for event in tick.events() {
            self.observer.on_event(&event);
        }
    }

    fn rejected(&mut self, err: PewenError) -> PewenError {
        if let Some(event) = Event::for_error(&err) {
            self.observer.on_event(&event);
        }
        err
    }

    fn arm(&mut self) {
        self.epoch += 1;
        let ticks = TickSender::new(self.epoch, self.tick_tx.clone());
        self.timer = Some(self.scheduler.start(ticks));
    }

    fn disarm(&mut self) {
        self.timer = None;
    }
}

/// Spawn a session wired the default way from `config`: a seeded or
/// entropy-backed RNG, a [`MockWallet`] and an [`IntervalScheduler`].
pub fn spawn_from_config(
    config: &PewenConfig,
    observer: Box<dyn Observer>,
) -> Result<(SessionHandle, JoinHandle<PetState>)> {
    config.validate()?;

    let (rng, wallet) = match config.seed {
        Some(seed) => (StdRng::seed_from_u64(seed), MockWallet::with_seed(seed)),
        None => (StdRng::from_entropy(), MockWallet::new()),
    };
    let controller = Controller::with_names(rng, config.names.clone())?;
    let wallet: Arc<dyn WalletConnector> = Arc::new(wallet.prefix(config.address_prefix.clone()));
    let scheduler = IntervalScheduler::new(config.tick_interval());

    Ok(Session::spawn(controller, wallet, scheduler, observer))
}
