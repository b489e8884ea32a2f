//! blockfall terminal runner.
//!
//! Fixed 16 ms tick loop: render, wait for input until the next tick, then
//! feed auto-repeats and elapsed time to the engine.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, InputHandler, KeyAction};
use blockfall::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use blockfall::types::{GameEvent, TICK_MS};
use blockfall::{Config, EventLog, HighScoreStore, LogEvent};

fn main() -> Result<()> {
    let config = Config::from_env();
    let mut app = App::new(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    app.save_high_score();
    eprintln!(
        "blockfall: score {} lines {} level {} high {}",
        app.game.score(),
        app.game.lines(),
        app.game.level(),
        app.best
    );
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct App {
    game: GameState,
    input: InputHandler,
    store: HighScoreStore,
    best: u32,
    log: EventLog,
}

impl App {
    fn new(config: &Config) -> Self {
        let store = HighScoreStore::new(&config.high_score_path);
        let best = store.load().unwrap_or_else(|e| {
            eprintln!("[blockfall] ignoring high score: {e:#}");
            0
        });

        let mut game = GameState::with_rules(config.seed, config.rules());
        game.start();

        Self {
            game,
            input: InputHandler::new(),
            store,
            best,
            log: EventLog::open_or_disabled(config.log_path.as_deref(), config.seed),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let action = handle_key_event(key);
        match key.kind {
            KeyEventKind::Press => {}
            KeyEventKind::Release => {
                if let Some(KeyAction::Game(intent)) = action {
                    self.input.release(intent);
                }
                return Flow::Continue;
            }
            // DAS/ARR handles repeats internally.
            KeyEventKind::Repeat => return Flow::Continue,
        }

        if self.game.is_game_over() {
            return match action {
                Some(KeyAction::Quit) => Flow::Quit,
                _ => {
                    self.restart();
                    Flow::Continue
                }
            };
        }

        match action {
            Some(KeyAction::Quit) => return Flow::Quit,
            Some(KeyAction::Pause) => {
                self.game.toggle_pause();
                self.input.reset();
            }
            Some(KeyAction::Restart) => self.restart(),
            Some(KeyAction::Game(intent)) => {
                if let Some(intent) = self.input.press(intent) {
                    self.game.apply_input(intent);
                }
            }
            None => {}
        }
        self.drain_events();
        Flow::Continue
    }

    fn tick(&mut self, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
        if !self.game.paused() {
            for intent in self.input.update(elapsed_ms) {
                self.game.apply_input(intent);
            }
        }
        self.game.advance(elapsed);
        self.drain_events();
    }

    fn restart(&mut self) {
        self.save_high_score();
        self.game.restart();
        self.input.reset();
        self.log.record(LogEvent::Restart {
            episode: self.game.episode(),
            seed: self.game.seed(),
        });
    }

    fn drain_events(&mut self) {
        for event in self.game.take_events() {
            self.log.record(event);
            if let GameEvent::GameOver { .. } = event {
                self.save_high_score();
            }
        }
    }

    fn save_high_score(&mut self) {
        let score = self.game.score();
        if score <= self.best {
            return;
        }
        match self.store.submit(score, self.best) {
            Ok(best) => {
                self.log.record(LogEvent::HighScore {
                    score: best,
                    previous: self.best,
                });
                self.best = best;
            }
            Err(e) => eprintln!("[blockfall] {e:#}"),
        }
    }
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        app.game.snapshot_into(&mut snap);
        let hud = Hud {
            high_score: app.best,
        };
        view.render_into(&snap, &hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) == Flow::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.tick(elapsed);
        }
    }
}
