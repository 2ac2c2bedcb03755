//! Terminal runner (default binary).
//!
//! The main thread runs the tokio driver and draws frames; a dedicated thread
//! reads crossterm events and forwards actions over a bounded channel.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TrySendError};

use blockfall::core::{GameSnapshot, Phase};
use blockfall::input::{should_quit, InputHandler};
use blockfall::session::{init_file_logger, run_session, Session, SessionConfig};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

const INPUT_POLL: Duration = Duration::from_millis(20);

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    if let Err(e) = init_file_logger(&config.log_path) {
        eprintln!("logging disabled: {:#}", e);
    }
    log::info!(
        "starting: seed {}, tick {}ms, scores in {}",
        config.seed,
        config.tick_ms,
        config.scores_path.display()
    );

    let rt = Runtime::new().context("create tokio runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    // Release events make soft drop stop exactly when the key comes up.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();

    let result = run(&rt, &config, &mut term);

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("session failed: {:#}", e);
    }
    result
}

fn run(rt: &Runtime, config: &SessionConfig, term: &mut TerminalRenderer) -> Result<()> {
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
    let input = thread::Builder::new()
        .name("input".to_string())
        .spawn(move || input_loop(tx))
        .context("spawn input thread")?;

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::new();
    let mut drawn: Option<((u16, u16), bool, Phase)> = None;

    let session = rt.block_on(run_session(
        Session::new(config),
        rx,
        config.tick_interval(),
        |session| {
            let size = terminal::size().unwrap_or((80, 24));
            let key = (size, session.is_paused(), session.machine().phase());
            if session.take_cell_changes() == 0 && drawn == Some(key) {
                return Ok(());
            }
            drawn = Some(key);

            session.snapshot_into(&mut snap);
            view.render_into_with_leaderboard(
                &snap,
                session.leaderboard(),
                Viewport::new(size.0, size.1),
                &mut fb,
            );
            term.draw_swap(&mut fb)
        },
    ))?;

    log::info!(
        "session over: {} games finished, last score {}",
        session.games_finished(),
        session.displayed_score()
    );
    // Dropping the session closes the channel; the input thread notices on its next poll.
    drop(session);
    if input.join().is_err() {
        log::error!("input thread panicked");
    }
    Ok(())
}

/// Read terminal events until quit or until the driver goes away.
fn input_loop(tx: mpsc::Sender<GameAction>) {
    let mut handler = InputHandler::new();
    let mut last = Instant::now();

    while !tx.is_closed() {
        let ready = match event::poll(INPUT_POLL) {
            Ok(ready) => ready,
            Err(e) => {
                log::error!("input poll failed: {}", e);
                let _ = tx.try_send(GameAction::Quit);
                return;
            }
        };

        let elapsed_ms = u32::try_from(last.elapsed().as_millis()).unwrap_or(u32::MAX);
        last = Instant::now();
        let released = handler.update(elapsed_ms);

        let pressed = if ready {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release && should_quit(key) => {
                    let _ = forward(&tx, GameAction::Quit);
                    return;
                }
                Ok(Event::Key(key)) => handler.handle_key(key),
                Ok(_) => None,
                Err(e) => {
                    log::error!("input read failed: {}", e);
                    None
                }
            }
        } else {
            None
        };

        for action in [released, pressed].into_iter().flatten() {
            if !forward(&tx, action) {
                return;
            }
        }
    }
}

/// Send without blocking. Returns false once the driver is gone.
fn forward(tx: &mpsc::Sender<GameAction>, action: GameAction) -> bool {
    match tx.try_send(action) {
        Ok(()) => true,
        Err(TrySendError::Full(action)) => {
            log::warn!("input queue full, dropping {}", action.as_str());
            true
        }
        Err(TrySendError::Closed(action)) => {
            log::warn!("driver stopped, dropping {} and exiting input", action.as_str());
            false
        }
    }
}
