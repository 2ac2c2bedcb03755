//! Async driver loop.
//!
//! A single task owns the [`Session`]. Input arrives over a bounded mpsc
//! channel from the input thread; a tokio interval drives the simulation.
//! Both run inside one `select!`, so a tick and an input event never overlap.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::session::Session;
use crate::types::GameAction;

/// Run until quit is requested or every input sender is gone.
///
/// `on_frame` is called once up front and after every tick; an error from it
/// stops the loop.
pub async fn run_session<F>(
    mut session: Session,
    mut actions: mpsc::Receiver<GameAction>,
    tick: Duration,
    mut on_frame: F,
) -> Result<Session>
where
    F: FnMut(&mut Session) -> Result<()>,
{
    let mut interval = time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    on_frame(&mut session)?;

    while !session.should_quit() {
        tokio::select! {
            received = actions.recv() => match received {
                Some(action) => {
                    session.handle_action(action).await;
                    drain_pending(&mut session, &mut actions).await;
                }
                None => {
                    log::info!("input channel closed, stopping");
                    break;
                }
            },
            now = interval.tick() => {
                drain_pending(&mut session, &mut actions).await;
                let elapsed = now.saturating_duration_since(last_tick);
                last_tick = now;
                if session.should_quit() {
                    break;
                }
                // Paused time is dropped: the session skips ticks while paused.
                session.advance(elapsed_ms(elapsed)).await;
                on_frame(&mut session)?;
            }
        }
    }

    Ok(session)
}

async fn drain_pending(session: &mut Session, actions: &mut mpsc::Receiver<GameAction>) {
    while let Ok(action) = actions.try_recv() {
        session.handle_action(action).await;
    }
}

fn elapsed_ms(elapsed: Duration) -> u32 {
    u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
}
