//! UI rendering for the TUI

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
};
use ratatui_image::StatefulImage;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::state::{AppState, CARD_HEIGHT, Mode, Screen, grid_columns_for, scroll_for};
use crate::feed::{FeedPhase, SKELETON_SLOTS};
use crate::images;
use crate::models::MediaItem;
use crate::theme::ThemeColors;

/// Feedgrid icon
const ICON: &str = "▦";

/// Spinner animation frames
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shortest skeleton block: both borders and one placeholder line
const SKELETON_MIN_HEIGHT: u16 = 3;

/// Terminal width from which the overlay puts image and text side by side
const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;

/// Main render function
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();

    // Set background
    let area = frame.area();
    let bg_block = Block::default().style(Style::default().bg(colors.bg));
    frame.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header / search bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match state.screen {
        Screen::Feed => {
            render_search_bar(frame, state, chunks[0]);
            render_feed(frame, state, chunks[1]);
        }
        Screen::Login => {
            render_header(frame, &colors, chunks[0], "Log in");
            render_login(frame, state, chunks[1]);
        }
        Screen::Signup => {
            render_header(frame, &colors, chunks[0], "Sign up");
            render_signup(frame, state, chunks[1]);
        }
    }
    render_status_bar(frame, state, chunks[2]);

    if state.screen == Screen::Feed && state.store.selected().is_some() {
        render_overlay(frame, state);
    }

    // Render modal dialogs
    match &state.mode {
        Mode::Help => render_help_popup(frame, &colors),
        Mode::Notice(message) => render_notice(frame, &colors, message),
        Mode::Search | Mode::Normal => {}
    }

    render_toast(frame, state);
}

fn render_header(frame: &mut Frame, colors: &ThemeColors, area: Rect, title: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {ICON} feedgrid "), colors.logo()),
        Span::styled(format!("· {title}"), colors.text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block()),
    );
    frame.render_widget(header, area);
}

fn render_search_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let searching = state.mode == Mode::Search;
    let query = state.store.search_query();
    let total = state.store.items().len();
    let shown = state.visible_len();

    let mut spans = vec![Span::styled(" 🔍 ", colors.text_muted())];
    if query.is_empty() && !searching {
        spans.push(Span::styled("Press / to search captions", colors.text_muted()));
    } else {
        spans.push(Span::styled(query.to_string(), colors.text()));
        if searching {
            spans.push(Span::styled("▏", colors.text_primary()));
        }
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if searching {
                colors.block_focus()
            } else {
                colors.block()
            })
            .title(Span::styled(format!(" {ICON} feedgrid "), colors.logo()))
            .title_top(
                Line::from(Span::styled(format!(" {shown}/{total} "), colors.text_muted()))
                    .right_aligned(),
            ),
    );
    frame.render_widget(search, area);
}

fn render_feed(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();

    if let FeedPhase::Unconfigured { reason } = state.store.phase() {
        let lines = vec![
            Line::from(""),
            Line::styled(format!("  {reason}"), colors.text_warning()),
            Line::from(""),
            Line::styled(
                "  Set account_id and access_token in ~/.config/feedgrid/config.toml,",
                colors.text(),
            ),
            Line::styled(
                "  or export FEEDGRID_ACCOUNT_ID and FEEDGRID_ACCESS_TOKEN.",
                colors.text(),
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled("  r", colors.key_hint()),
                Span::styled(" retry  ", colors.text_muted()),
                Span::styled("q", colors.key_hint()),
                Span::styled(" quit", colors.text_muted()),
            ]),
        ];
        render_panel(frame, &colors, area, " ⚙ Feed not configured ", lines);
        return;
    }

    if let FeedPhase::Failed { message } = state.store.phase()
        && state.store.items().is_empty()
    {
        let lines = vec![
            Line::from(""),
            Line::styled(format!("  {message}"), colors.text_error()),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Press ", colors.text_muted()),
                Span::styled("r", colors.key_hint()),
                Span::styled(" to retry", colors.text_muted()),
            ]),
        ];
        render_panel(frame, &colors, area, " ❌ Could not load the feed ", lines);
        return;
    }

    if state.store.show_skeleton() {
        render_skeleton(frame, state, area);
        return;
    }

    render_grid(frame, state, area);
}

fn render_panel(frame: &mut Frame, colors: &ThemeColors, area: Rect, title: &str, lines: Vec<Line>) {
    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block())
            .title(title)
            .title_style(colors.title()),
    );
    frame.render_widget(panel, area);
}

/// Split `area` into `rows` rows of `columns` cells, each `row_height` tall, row-major
fn grid_cells(area: Rect, columns: usize, rows: usize, row_height: u16) -> Vec<Rect> {
    let ratio = u32::try_from(columns).unwrap_or(1);
    let row_areas = Layout::vertical(vec![Constraint::Length(row_height); rows]).split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::horizontal(vec![Constraint::Ratio(1, ratio); columns])
                .split(*row)
                .to_vec()
        })
        .collect()
}

fn visible_rows(area: Rect) -> usize {
    usize::from((area.height / CARD_HEIGHT).max(1))
}

fn render_skeleton(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let columns = grid_columns_for(area.width);
    // Squeeze the placeholders so every slot is on screen
    let wanted = SKELETON_SLOTS.div_ceil(columns);
    let row_height = u16::try_from(wanted)
        .map_or(SKELETON_MIN_HEIGHT, |n| area.height / n.max(1))
        .clamp(SKELETON_MIN_HEIGHT, CARD_HEIGHT);
    let rows = wanted.min(usize::from((area.height / row_height).max(1)));
    let tick = state.current_tick();

    for (slot, cell) in grid_cells(area, columns, rows, row_height)
        .into_iter()
        .take(SKELETON_SLOTS)
        .enumerate()
    {
        // Slow diagonal shimmer
        let style = if (tick / 8 + slot as u64) % 4 == 0 {
            colors.skeleton().add_modifier(Modifier::BOLD)
        } else {
            colors.skeleton()
        };
        let width = usize::from(cell.width.saturating_sub(4));

        let lines = vec![
            Line::styled("▆".repeat(width * 2 / 3), style),
            Line::from(""),
            Line::styled("▃".repeat(width), style),
            Line::styled("▃".repeat(width / 2), style),
        ];
        let placeholder = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(placeholder, cell);
    }
}

fn render_grid(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let colors = state.theme.colors();
    let columns = grid_columns_for(area.width);
    let rows_on_screen = visible_rows(area);

    state.grid_columns = columns;
    state.clamp_cursor();
    state.grid_scroll = scroll_for(state.cursor / columns, state.grid_scroll, rows_on_screen);

    let items = state.store.visible();
    if items.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::styled(
                format!("  No posts match \"{}\"", state.store.search_query()),
                colors.text_muted(),
            ),
            Line::from(vec![
                Span::styled("  Esc", colors.key_hint()),
                Span::styled(" clear search", colors.text_muted()),
            ]),
        ]);
        frame.render_widget(empty, area);
        return;
    }

    let total_rows = items.len().div_ceil(columns);
    let rows = rows_on_screen.min(total_rows.saturating_sub(state.grid_scroll));
    let first = state.grid_scroll * columns;

    for (offset, cell) in grid_cells(area, columns, rows, CARD_HEIGHT).into_iter().enumerate() {
        let index = first + offset;
        let Some(item) = items.get(index) else {
            break;
        };
        render_card(frame, &colors, item, cell, index == state.cursor);
    }
}

fn render_card(frame: &mut Frame, colors: &ThemeColors, item: &MediaItem, area: Rect, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(if focused {
            colors.block_focus()
        } else {
            colors.block()
        })
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, hint_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
    let width = usize::from(inner.width).max(1);

    let title_style = if focused {
        colors.title().fg(colors.primary)
    } else {
        colors.title()
    };
    let mut lines = vec![Line::styled(truncate_to_width(item.title(), width), title_style)];
    let preview_rows = usize::from(text_area.height.saturating_sub(1));
    lines.extend(
        textwrap::wrap(&item.card_preview(), width)
            .into_iter()
            .take(preview_rows)
            .map(|line| Line::styled(line.into_owned(), colors.text_muted())),
    );
    frame.render_widget(Paragraph::new(lines), text_area);

    let hints = Line::from(vec![
        Span::styled("s", colors.key_hint()),
        Span::styled(" Share · ", colors.text_muted()),
        Span::styled("⏎", colors.key_hint()),
        Span::styled(" Learn more", colors.text_muted()),
    ]);
    frame.render_widget(Paragraph::new(hints), hint_area);
}

fn render_overlay(frame: &mut Frame, state: &mut AppState) {
    let colors = state.theme.colors();
    let Some(item) = state.store.selected().cloned() else {
        return;
    };

    let screen = frame.area();
    let popup_area = centered_rect(80, 80, screen);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(colors.block_focus())
        .style(Style::default().bg(colors.bg))
        .title(format!(
            " {} ",
            truncate_to_width(item.title(), usize::from(popup_area.width.saturating_sub(6)))
        ))
        .title_style(colors.title())
        .title_bottom(
            Line::from(vec![
                Span::styled(" s", colors.key_hint()),
                Span::styled(" share  ", colors.text_muted()),
                Span::styled("o", colors.key_hint()),
                Span::styled(" open  ", colors.text_muted()),
                Span::styled("Esc", colors.key_hint()),
                Span::styled(" close ", colors.text_muted()),
            ])
            .right_aligned(),
        );
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let wants_image =
        state.config.show_images && images::picker().is_some() && !item.media_url.is_empty();
    let (image_area, text_area) = if !wants_image {
        (None, inner)
    } else if screen.width >= WIDE_LAYOUT_MIN_WIDTH {
        let [image, text] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(inner);
        (Some(image), text)
    } else {
        let [image, text] =
            Layout::vertical([Constraint::Percentage(55), Constraint::Min(0)]).areas(inner);
        (Some(image), text)
    };

    if let Some(image_area) = image_area {
        render_overlay_image(frame, state, &colors, &item.media_url, image_area);
    }

    let mut lines = vec![Line::styled(item.title().to_string(), colors.title()), Line::from("")];
    lines.extend(
        item.body()
            .lines()
            .map(|line| Line::styled(line.to_string(), colors.text())),
    );
    lines.push(Line::from(""));
    lines.push(Line::styled(
        item.permalink.clone(),
        colors.text_primary().add_modifier(Modifier::UNDERLINED),
    ));

    let text = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
    frame.render_widget(text, text_area);
}

fn render_overlay_image(
    frame: &mut Frame,
    state: &mut AppState,
    colors: &ThemeColors,
    url: &str,
    area: Rect,
) {
    if let Some(protocol) = state.image_cache.get_mut(url) {
        frame.render_stateful_widget(StatefulImage::default(), area, protocol);
        return;
    }

    let placeholder = if state.failed_images.contains(url) {
        Line::styled("Image unavailable", colors.text_muted())
    } else {
        let spinner = SPINNER[(state.current_tick() / 2) as usize % SPINNER.len()];
        Line::styled(format!("{spinner} Loading image..."), colors.text_muted())
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(placeholder).alignment(Alignment::Center),
        middle,
    );
}

/// Render a labelled text input as two lines
fn field_lines(
    colors: &ThemeColors,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) -> [Line<'static>; 2] {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "› " } else { "  " };

    let mut spans = vec![
        Span::styled(format!("  {marker}"), colors.text_primary()),
        Span::styled(shown, colors.text()),
    ];
    if focused {
        spans.push(Span::styled("▏", colors.text_primary()));
    }

    [
        Line::styled(format!("    {label}"), colors.text_muted()),
        Line::from(spans),
    ]
}

fn submit_line(colors: &ThemeColors, tick: u64, pending: bool, idle: &str, busy: &str) -> Line<'static> {
    if pending {
        let spinner = SPINNER[(tick / 2) as usize % SPINNER.len()];
        Line::styled(format!("    {spinner} {busy}"), colors.text_muted())
    } else {
        Line::from(vec![
            Span::styled("    Enter", colors.key_hint()),
            Span::styled(format!(" {idle}"), colors.text()),
        ])
    }
}

fn render_form(frame: &mut Frame, colors: &ThemeColors, area: Rect, title: &str, lines: Vec<Line>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let form_area = centered_box(56, height, area);
    frame.render_widget(Clear, form_area);

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg_secondary))
            .title(title)
            .title_style(colors.text_primary()),
    );
    frame.render_widget(form, form_area);
}

fn render_login(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let login = &state.login;

    let mut lines = vec![Line::from("")];
    lines.extend(field_lines(&colors, "Email", &login.form.email, login.focus == 0, false));
    lines.push(Line::from(""));
    lines.extend(field_lines(&colors, "Password", &login.form.password, login.focus == 1, true));
    lines.push(Line::from(""));
    lines.push(submit_line(&colors, state.current_tick(), login.pending, "log in", "Logging in..."));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("    Tab", colors.key_hint()),
        Span::styled(" next field  ", colors.text_muted()),
        Span::styled("F2", colors.key_hint()),
        Span::styled(" sign up  ", colors.text_muted()),
        Span::styled("Esc", colors.key_hint()),
        Span::styled(" quit", colors.text_muted()),
    ]));

    render_form(frame, &colors, area, " 🔐 Log in ", lines);
}

fn render_signup(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();
    let signup = &state.signup;

    let mut lines = vec![Line::from("")];
    lines.extend(field_lines(&colors, "Username", &signup.form.username, signup.focus == 0, false));
    lines.extend(field_lines(&colors, "Email", &signup.form.email, signup.focus == 1, false));
    lines.extend(field_lines(&colors, "Password", &signup.form.password, signup.focus == 2, true));
    lines.push(Line::from(""));

    let checkbox = if signup.form.terms { "[x]" } else { "[ ]" };
    let terms_style = if signup.focus == 3 {
        colors.text_primary()
    } else {
        colors.text()
    };
    lines.push(Line::styled(
        format!("    {checkbox} I accept the terms and conditions"),
        terms_style,
    ));
    lines.push(Line::from(""));
    lines.push(submit_line(
        &colors,
        state.current_tick(),
        signup.pending,
        "create account",
        "Signing up...",
    ));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("    Space", colors.key_hint()),
        Span::styled(" toggle terms  ", colors.text_muted()),
        Span::styled("Esc", colors.key_hint()),
        Span::styled(" back to login", colors.text_muted()),
    ]));

    render_form(frame, &colors, area, " ✨ Sign up ", lines);
}

fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let colors = state.theme.colors();

    let loading_indicator = if state.is_busy() {
        let frame_idx = (state.current_tick() / 2) as usize % SPINNER.len();
        format!("{} ", SPINNER[frame_idx])
    } else {
        String::new()
    };

    let stale_error = match state.store.phase() {
        FeedPhase::Failed { message } if state.screen == Screen::Feed => Some(message),
        _ => None,
    };

    let content = if let Some(message) = stale_error {
        vec![
            Span::styled(" ❌ ", colors.text_error()),
            Span::styled(message.as_str(), colors.text_error()),
            Span::styled("  r", colors.key_hint()),
            Span::styled(" retry", colors.text_muted()),
        ]
    } else if !state.status.is_empty() {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.text_muted()),
            Span::styled(state.status.as_str(), colors.text_muted()),
        ]
    } else {
        vec![
            Span::styled(" ", Style::default()),
            Span::styled(loading_indicator, colors.text_muted()),
            Span::styled("/", colors.key_hint()),
            Span::styled(": search  ", colors.text_muted()),
            Span::styled("⏎", colors.key_hint()),
            Span::styled(": open  ", colors.text_muted()),
            Span::styled("?", colors.key_hint()),
            Span::styled(": help  ", colors.text_muted()),
            Span::styled("q", colors.key_hint()),
            Span::styled(": quit", colors.text_muted()),
        ]
    };

    let status =
        Paragraph::new(Line::from(content)).style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(status, area);
}

fn help_line<'a>(colors: &ThemeColors, keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {keys:<17}"), colors.key_hint()),
        Span::styled(action, colors.text()),
    ])
}

fn help_heading(colors: &ThemeColors, title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        colors.text_primary().add_modifier(Modifier::BOLD),
    ))
}

fn render_help_popup(frame: &mut Frame, colors: &ThemeColors) {
    let popup_area = centered_rect(50, 70, frame.area());

    // Solid background to cover everything underneath
    let bg_block = Block::default().style(Style::default().bg(colors.bg_secondary));
    frame.render_widget(Clear, popup_area);
    frame.render_widget(bg_block, popup_area);

    let help_content = vec![
        Line::from(""),
        help_heading(colors, "Feed"),
        help_line(colors, "←↑↓→ / hjkl", "Move between posts"),
        help_line(colors, "g/G", "First/last post"),
        help_line(colors, "Enter", "Open post"),
        help_line(colors, "Esc", "Close post / clear search"),
        help_line(colors, "/", "Search captions"),
        help_line(colors, "s", "Share post"),
        help_line(colors, "o", "Open post in browser"),
        help_line(colors, "r", "Reload feed"),
        Line::from(""),
        help_heading(colors, "General"),
        help_line(colors, "t", "Next theme"),
        help_line(colors, "L", "Log out"),
        help_line(colors, "?", "Toggle help"),
        help_line(colors, "q / Ctrl+C", "Quit"),
        Line::from(""),
        help_heading(colors, "Login / Sign up"),
        help_line(colors, "Tab / ↑↓", "Next/previous field"),
        help_line(colors, "F2 / Ctrl+N", "Switch between forms"),
        help_line(colors, "Space", "Toggle terms (sign up)"),
    ];

    let help = Paragraph::new(help_content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(colors.block_focus())
            .style(Style::default().bg(colors.bg_secondary))
            .title(" ❓ Help ")
            .title_style(colors.text_primary()),
    );
    frame.render_widget(help, popup_area);
}

fn render_notice(frame: &mut Frame, colors: &ThemeColors, message: &str) {
    let popup_area = centered_box(50, 7, frame.area());
    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::styled(message.to_string(), colors.text()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", colors.key_hint()),
            Span::styled(" dismiss", colors.text_muted()),
        ]),
    ];

    let notice = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(colors.text_warning())
                .style(Style::default().bg(colors.bg_secondary))
                .title(" ⚠ Notice ")
                .title_style(colors.text_warning()),
        );
    frame.render_widget(notice, popup_area);
}

fn render_toast(frame: &mut Frame, state: &AppState) {
    let Some(toast) = &state.toast else {
        return;
    };
    let colors = state.theme.colors();
    let area = frame.area();

    let width = u16::try_from(toast.message.width() + 6)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1,
        width,
        height: 3.min(area.height),
    };

    let style = if toast.is_error {
        colors.text_error()
    } else {
        colors.text_success()
    };
    let icon = if toast.is_error { "✗" } else { "✓" };

    frame.render_widget(Clear, toast_area);
    let widget = Paragraph::new(Line::styled(format!(" {icon} {}", toast.message), style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(Style::default().bg(colors.bg_secondary)),
    );
    frame.render_widget(widget, toast_area);
}

/// Cut `text` to `max` display columns, ending in an ellipsis when shortened
fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Helper function to create a centered rect
const fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_width = r.width * percent_x / 100;
    let popup_height = r.height * percent_y / 100;
    Rect {
        x: r.x + (r.width.saturating_sub(popup_width)) / 2,
        y: r.y + (r.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

/// Centered rect of a fixed size, shrunk to fit
const fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let width = if width < r.width { width } else { r.width };
    let height = if height < r.height { height } else { r.height };
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::FeedEvent;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &mut AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn configured() -> Config {
        Config {
            account_id: Some("1784".into()),
            access_token: Some("token".into()),
            ..Config::default()
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer caption", 8), "a longe…");
        assert_eq!(truncate_to_width("日本語のキャプション", 7), "日本語…");
    }

    #[test]
    fn test_centered_box_fits() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_box(20, 4, area), Rect::new(10, 3, 20, 4));
        assert_eq!(centered_box(80, 40, area), area);
    }

    #[test]
    fn test_unconfigured_panel() {
        let mut state = AppState::new(Config::default(), None);
        state.start_feed_load();
        let screen = draw(&mut state, 100, 30);
        assert!(screen.contains("Feed not configured"));
        assert!(screen.contains("account_id"));
    }

    /// Rounded top-left corners below the search bar
    fn count_blocks(state: &mut AppState, width: u16, height: u16) -> usize {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        (3..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|&pos| buffer[pos].symbol() == "╭")
            .count()
    }

    #[test]
    fn test_skeleton_renders_every_slot() {
        let mut state = AppState::new(configured(), None);
        state.start_feed_load();
        assert!(state.store.show_skeleton());

        assert_eq!(count_blocks(&mut state, 120, 40), SKELETON_SLOTS);
        assert_eq!(count_blocks(&mut state, 100, 30), SKELETON_SLOTS);
        assert_eq!(count_blocks(&mut state, 200, 24), SKELETON_SLOTS);
    }

    #[test]
    fn test_only_the_focused_card_has_a_thick_border() {
        let mut state = AppState::new(configured(), None);
        let generation = state.store.begin_load();
        state.store.apply(FeedEvent::Loaded {
            generation,
            items: vec![
                MediaItem::new("1", "p1", "u1", "Arjuna"),
                MediaItem::new("2", "p2", "u2", "Karna"),
                MediaItem::new("3", "p3", "u3", "Bhima"),
            ],
        });
        state.cursor = 1;

        let screen = draw(&mut state, 100, 30);
        assert_eq!(screen.matches('┏').count(), 1);
        assert_eq!(count_blocks(&mut state, 100, 30), 2);
    }

    #[test]
    fn test_cards_show_title_and_preview() {
        let mut state = AppState::new(configured(), None);
        let generation = state.store.begin_load();
        state.store.apply(FeedEvent::Loaded {
            generation,
            items: vec![MediaItem::new(
                "1",
                "https://ig/p/1",
                "https://cdn/1.jpg",
                "Monsoon\nfirst rain\nsecond line\nhidden",
            )],
        });

        let screen = draw(&mut state, 100, 30);
        assert!(screen.contains("Monsoon"));
        assert!(screen.contains("first rain"));
        assert!(!screen.contains("hidden"));
        assert!(screen.contains("1/1"));
    }

    #[test]
    fn test_overlay_shows_body_and_permalink() {
        let mut state = AppState::new(configured(), None);
        let generation = state.store.begin_load();
        state.store.apply(FeedEvent::Loaded {
            generation,
            items: vec![MediaItem::new(
                "1",
                "https://ig/p/1",
                "https://cdn/1.jpg",
                "Monsoon\nfirst rain\nsecond line\nfourth line",
            )],
        });
        state.select_focused();

        let screen = draw(&mut state, 120, 40);
        assert!(screen.contains("fourth line"));
        assert!(screen.contains("https://ig/p/1"));
    }
}
