use tokio_stream::StreamExt;

use snake_common::snake::{BotController, RunStatus, SimulationSession, SimulationState};
use snake_common::debug_log;

/// Starts a run and steers it with the autopilot until the game ends or
/// `max_ticks` is reached, in which case the run is paused.
pub async fn play(session: &mut SimulationSession, max_ticks: Option<u64>) -> SimulationState {
    let mut states = session.state_stream();
    session.reset().await;

    while let Some(state) = states.next().await {
        match state.status {
            RunStatus::Over => return state,
            RunStatus::Running => {}
            RunStatus::Idle | RunStatus::Paused => continue,
        }

        if max_ticks.is_some_and(|limit| state.tick >= limit) {
            session.pause().await;
            return session.state().await;
        }

        if let Some(direction) = BotController::calculate_move(&state)
            && direction != state.direction
        {
            let accepted = session.set_direction(direction).await;
            debug_log!("tick {}: turn {:?} (accepted: {})", state.tick, direction, accepted);
        }
    }

    session.state().await
}
