use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::state::{GameOverSummary, SimulationState};
use super::types::RunStatus;

/// Receives every state the simulation publishes. Implementations decide how
/// the host learns about it (channel, UI state, log).
pub trait StateBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, state: SimulationState) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}

/// Broadcaster backed by `watch` channels: subscribers always see the latest
/// state, intermediate ones may be skipped by slow readers.
#[derive(Clone)]
pub struct WatchBroadcaster {
    state_tx: Arc<watch::Sender<SimulationState>>,
    game_over_tx: Arc<watch::Sender<Option<GameOverSummary>>>,
}

impl WatchBroadcaster {
    pub fn new(initial: SimulationState) -> Self {
        let (state_tx, _) = watch::channel(initial);
        let (game_over_tx, _) = watch::channel(None);
        Self {
            state_tx: Arc::new(state_tx),
            game_over_tx: Arc::new(game_over_tx),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.state_tx.subscribe()
    }

    pub fn subscribe_game_over(&self) -> watch::Receiver<Option<GameOverSummary>> {
        self.game_over_tx.subscribe()
    }

    /// Stream yielding the current state first, then every change.
    pub fn state_stream(&self) -> WatchStream<SimulationState> {
        WatchStream::new(self.subscribe())
    }
}

impl StateBroadcaster for WatchBroadcaster {
    async fn broadcast_state(&self, state: SimulationState) {
        if state.status != RunStatus::Over {
            self.game_over_tx.send_replace(None);
        }
        self.state_tx.send_replace(state);
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        self.game_over_tx.send_replace(Some(summary));
    }
}
