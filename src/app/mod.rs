//! TUI Application module

mod async_ops;
mod events;
mod state;
mod ui;

pub use state::{AppState, Mode, Screen};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::auth::SignupForm;
use crate::config::Config;
use crate::feed::FeedPhase;
use crate::images;
use crate::share;

use async_ops::{AsyncCommand, AsyncHandle, AsyncResult, spawn_worker};

/// Run the TUI application
pub fn run() -> Result<()> {
    // Create tokio runtime
    let rt = Runtime::new()?;

    // Load config
    let config = Config::load()?;

    // Must happen before raw mode
    if config.show_images {
        images::init_picker();
    }

    // Spawn async worker
    let auth_url = config.auth_url().map(str::to_string);
    let timeout = config.request_timeout();
    let async_handle = rt.block_on(async { spawn_worker(auth_url, timeout) });

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Create app state
    let share = share::detect(config.share_enabled);
    let mut state = AppState::new(config, share);

    // Without auth the feed is the first screen
    if state.screen == Screen::Feed
        && let Some(cmd) = state.start_feed_load()
    {
        let _ = async_handle.cmd_tx.blocking_send(cmd);
    }

    // Main loop
    let result = run_app(&mut terminal, &mut state, async_handle);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Only the theme is written back; tokens from the environment stay out of the file
    if let Err(e) = Config::persist_theme(state.theme) {
        tracing::warn!("Failed to save theme: {e:#}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    mut async_handle: AsyncHandle,
) -> Result<()> {
    loop {
        // Process any async results
        while let Ok(result) = async_handle.result_rx.try_recv() {
            if let Some(cmd) = handle_async_result(state, result) {
                let _ = async_handle.cmd_tx.blocking_send(cmd);
            }
        }

        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Handle events
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && let Some(cmd) = events::handle_key(state, key)
        {
            let _ = async_handle.cmd_tx.blocking_send(cmd);
        }

        // Queue image loading for the open post
        let images_to_load = state.images_to_load();
        if !images_to_load.is_empty() {
            state.mark_images_loading(&images_to_load);
            for url in images_to_load {
                let _ = async_handle
                    .cmd_tx
                    .blocking_send(AsyncCommand::LoadImage { url });
            }
        }

        // Tick for animations
        state.tick();

        if state.should_quit {
            // Late results must not touch the store
            state.store.cancel();
            let _ = async_handle.cmd_tx.blocking_send(AsyncCommand::Shutdown);
            break;
        }
    }

    Ok(())
}

fn handle_async_result(state: &mut AppState, result: AsyncResult) -> Option<AsyncCommand> {
    match result {
        AsyncResult::Feed(event) => {
            if state.store.apply(event) {
                state.clamp_cursor();
                let status = match state.store.phase() {
                    FeedPhase::Ready => format!("Loaded {} posts", state.store.items().len()),
                    _ => String::new(),
                };
                state.set_status(status);
            }
            None
        }
        AsyncResult::ImageLoaded { url, image } => {
            state.insert_image(&url, image);
            // No status message - images load quietly
            None
        }
        AsyncResult::ImageFailed { url, error } => {
            state.image_failed(&url);
            tracing::warn!("Failed to load image {url}: {error}");
            None
        }
        AsyncResult::LoggedIn { message } => {
            state.login.pending = false;
            state.login.form.password.clear();
            state.show_toast(message, false);
            state.enter_feed()
        }
        AsyncResult::SignedUp { message } => {
            state.signup.pending = false;
            state.login.form.email = state.signup.form.email.clone();
            state.signup.form = SignupForm::default();
            state.signup.focus = 0;
            state.screen = Screen::Login;
            state.show_toast(message, false);
            None
        }
        AsyncResult::LoggedOut { message } => {
            state.enter_login();
            state.show_toast(message, false);
            state.set_status("");
            None
        }
        AsyncResult::AuthFailed { message } => {
            state.login.pending = false;
            state.signup.pending = false;
            state.show_toast(message, true);
            None
        }
    }
}
