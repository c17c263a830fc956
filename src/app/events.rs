//! Event handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::async_ops::AsyncCommand;
use super::state::{AppState, LoginState, Mode, Screen, SignupState};

/// Handle key events, returning an optional async command
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return None;
    }

    // Handle mode-specific input first
    match state.mode {
        Mode::Notice(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ' | 'q')) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                state.mode = Mode::Normal;
            }
            return None;
        }
        Mode::Search => {
            handle_search_key(state, key);
            return None;
        }
        Mode::Normal => {}
    }

    match state.screen {
        Screen::Login => handle_login_key(state, key),
        Screen::Signup => handle_signup_key(state, key),
        Screen::Feed => handle_feed_key(state, key),
    }
}

fn handle_feed_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    let overlay_open = state.store.selected().is_some();

    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            None
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            state.mode = Mode::Help;
            None
        }
        KeyCode::Esc => {
            if overlay_open {
                state.store.dismiss();
            } else if !state.store.search_query().is_empty() {
                state.store.set_query("");
                state.clamp_cursor();
            }
            None
        }
        KeyCode::Enter if !overlay_open => {
            state.select_focused();
            None
        }
        KeyCode::Char('/') => {
            state.store.dismiss();
            state.mode = Mode::Search;
            None
        }
        KeyCode::Char('s') => {
            state.share_target();
            None
        }
        KeyCode::Char('o') => {
            state.open_target();
            None
        }
        KeyCode::Char('r') => state.start_feed_load(),
        KeyCode::Char('t') => {
            state.theme = state.theme.next();
            state.set_status(format!("Theme: {}", state.theme.name()));
            None
        }
        KeyCode::Char('L') => {
            if state.config.auth_url().is_some() {
                state.set_status("Logging out...");
                Some(AsyncCommand::Logout)
            } else {
                state.set_status("Authentication is not configured");
                None
            }
        }

        // Grid navigation (ignored while the overlay is open)
        _ if overlay_open => None,
        KeyCode::Left | KeyCode::Char('h') => {
            state.cursor_left();
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            state.cursor_right();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.cursor_up();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.cursor_down();
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.cursor = 0;
            None
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.cursor = state.visible_len().saturating_sub(1);
            None
        }
        _ => None,
    }
}

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
            state.store.set_query("");
        }
        KeyCode::Enter => {
            state.mode = Mode::Normal;
            let shown = state.visible_len();
            if !state.store.search_query().is_empty() {
                state.set_status(format!(
                    "✓ {shown} posts matching '{}'",
                    state.store.search_query()
                ));
            }
        }
        KeyCode::Char(c) => {
            state.store.push_query_char(c);
        }
        KeyCode::Backspace => {
            state.store.pop_query_char();
        }
        _ => {}
    }
    state.clamp_cursor();
}

/// Switch to the other auth screen
fn is_switch_key(key: KeyEvent) -> bool {
    key.code == KeyCode::F(2)
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n'))
}

fn handle_login_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    if state.login.pending {
        return None;
    }
    if is_switch_key(key) {
        state.screen = Screen::Signup;
        return None;
    }

    let login = &mut state.login;
    match key.code {
        KeyCode::Esc => state.should_quit = true,
        KeyCode::Tab | KeyCode::Down => login.focus = (login.focus + 1) % LoginState::FIELDS,
        KeyCode::BackTab | KeyCode::Up => {
            login.focus = (login.focus + LoginState::FIELDS - 1) % LoginState::FIELDS;
        }
        KeyCode::Enter => {
            if let Err(e) = login.form.validate() {
                state.show_toast(e.to_string(), true);
                return None;
            }
            login.pending = true;
            return Some(AsyncCommand::Login {
                form: login.form.clone(),
            });
        }
        KeyCode::Backspace => {
            login.focused_text().pop();
        }
        KeyCode::Char(c) => login.focused_text().push(c),
        _ => {}
    }
    None
}

fn handle_signup_key(state: &mut AppState, key: KeyEvent) -> Option<AsyncCommand> {
    if state.signup.pending {
        return None;
    }
    if is_switch_key(key) || key.code == KeyCode::Esc {
        state.screen = Screen::Login;
        return None;
    }

    let signup = &mut state.signup;
    match key.code {
        KeyCode::Tab | KeyCode::Down => signup.focus = (signup.focus + 1) % SignupState::FIELDS,
        KeyCode::BackTab | KeyCode::Up => {
            signup.focus = (signup.focus + SignupState::FIELDS - 1) % SignupState::FIELDS;
        }
        KeyCode::Enter => {
            if let Err(e) = signup.form.validate() {
                state.show_toast(e.to_string(), true);
                return None;
            }
            signup.pending = true;
            return Some(AsyncCommand::Signup {
                form: signup.form.clone(),
            });
        }
        KeyCode::Char(' ') if signup.focus == SignupState::FIELDS - 1 => {
            signup.form.terms = !signup.form.terms;
        }
        KeyCode::Backspace => {
            if let Some(text) = signup.focused_text() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = signup.focused_text() {
                text.push(c);
            }
        }
        _ => {}
    }
    None
}
