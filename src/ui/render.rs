//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Title bar with the scored requirement and fetch time
//! - The leaderboard table (sticky header, one row per clan)
//! - Tooltip line for the cell under the cursor
//! - Status bar

use crate::app::App;
use crate::ui::table::{Density, GroupRow, LoadStatus, MemberCell, TableModel, MEMBER_COLUMNS};
use crate::ui::{theme::Theme, widgets};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Widest the clan column is allowed to grow
const MAX_NAME_WIDTH: usize = 32;

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let model = app.model();
    let theme = Theme::from_mode(model.theme);
    let area = frame.area();

    // Paint the whole screen in the theme background
    frame.render_widget(Block::default().style(theme.block_style()), area);

    // Main layout: title, table, tooltip, status bar
    let layout = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Min(4),    // Table
        Constraint::Length(1), // Tooltip
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title_bar(frame, app, &model, &theme, layout[0]);
    render_table(frame, app, &model, &theme, layout[1]);
    render_tooltip(frame, app, &model, &theme, layout[2]);
    render_status_bar(frame, app, &model, &theme, layout[3]);
}

/// Render title bar with requirement and fetch time
fn render_title_bar(frame: &mut Frame, app: &App, model: &TableModel, theme: &Theme, area: Rect) {
    let title = if model.header.requirement_title.is_empty() {
        " clanboard ".to_string()
    } else {
        format!(" clanboard · {} ", model.header.requirement_title)
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(title)
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());
    frame.render_widget(block, area);

    if let Some(at) = app.fetcher.fetched_at() {
        let stamp = format!("updated {} ", at.format("%H:%M:%S"));
        let width = stamp.chars().count() as u16;
        let stamp_area = Rect {
            x: area.x + area.width.saturating_sub(width),
            y: area.y,
            width: width.min(area.width),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stamp).style(theme.text_dim()), stamp_area);
    }
}

/// Render the leaderboard table plus loading/error notices
fn render_table(frame: &mut Frame, app: &App, model: &TableModel, theme: &Theme, area: Rect) {
    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::ALL)
        .border_style(theme.border());

    let inner = block.inner(area);
    let gap = model.density.row_gap();

    let header = header_row(model, theme).bottom_margin(gap);

    let rows: Vec<Row> = model
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let cursor = (i == app.cursor_row).then_some(app.cursor_col);
            group_row(row, cursor, theme).bottom_margin(gap)
        })
        .collect();

    let table = Table::new(rows, column_widths(model))
        .header(header)
        .block(block)
        .style(theme.text())
        .column_spacing(model.density.column_spacing())
        .highlight_style(theme.cursor_row());

    let mut state = TableState::default();
    if !model.rows.is_empty() {
        state.select(Some(app.cursor_row.min(model.rows.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);

    // Body below the header row
    let header_height = 1 + gap;
    let body = Rect {
        x: inner.x,
        y: inner.y + header_height.min(inner.height),
        width: inner.width,
        height: inner.height.saturating_sub(header_height),
    };

    match &model.status {
        LoadStatus::Loading => {
            widgets::render_loading(frame, "Loading leaderboard…", theme, body);
        }
        LoadStatus::Failed(message) => {
            let title = format!("Could not load leaderboard from {}", app.config.endpoint);
            widgets::render_notice(frame, &title, message, theme, body);
        }
        LoadStatus::Ready => {}
    }
}

/// Header: title + toggle, requirement title, then empty member columns
fn header_row<'a>(model: &'a TableModel, theme: &Theme) -> Row<'a> {
    let lead = Line::from(vec![
        Span::raw(format!("{} ", model.header.title)),
        Span::styled(format!(" {} ", model.header.toggle_target.toggle_glyph()), theme.toggle()),
    ]);

    let mut cells = vec![
        Cell::from(lead),
        Cell::from(model.header.requirement_title.as_str()),
    ];
    cells.extend((0..model.header.placeholders).map(|_| Cell::from("")));

    Row::new(cells).style(theme.header())
}

/// One clan row. `cursor` is the hovered column when the cursor is on this row.
fn group_row<'a>(row: &'a GroupRow, cursor: Option<usize>, theme: &Theme) -> Row<'a> {
    let cell_style = |column: usize, base: Style| {
        if cursor == Some(column) {
            theme.selected()
        } else {
            base
        }
    };

    let mut cells = vec![
        Cell::from(row.name.as_str()).style(cell_style(0, theme.strong())),
        Cell::from(row.total_score.to_string()).style(cell_style(1, theme.strong())),
    ];

    cells.extend(row.cells.iter().enumerate().map(|(i, cell)| {
        let text = match cell {
            MemberCell::Member(member) => member.score.to_string(),
            MemberCell::Empty => String::new(),
        };
        Cell::from(text).style(cell_style(i + 2, Style::default()))
    }));

    Row::new(cells)
}

/// Clan column fits the longest name, score column the widest number
fn column_widths(model: &TableModel) -> Vec<Constraint> {
    let title_width = model.header.title.chars().count() + 4;
    let name_width = model
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_width)
        .min(MAX_NAME_WIDTH);

    let score_width = model
        .rows
        .iter()
        .map(|r| r.total_score.to_string().len())
        .max()
        .unwrap_or(0)
        .max(model.header.requirement_title.chars().count())
        .max(3);

    let mut widths = vec![
        Constraint::Length(name_width as u16),
        Constraint::Length(score_width as u16),
    ];
    widths.extend((0..MEMBER_COLUMNS).map(|_| Constraint::Min(4)));
    widths
}

/// Render the hover text for the cell under the cursor
fn render_tooltip(frame: &mut Frame, app: &App, model: &TableModel, theme: &Theme, area: Rect) {
    let line = match model.hover_text(app.cursor_row, app.cursor_col) {
        Some(text) => Line::styled(format!(" {}", text), theme.text()),
        None if model.rows.is_empty() => Line::raw(""),
        None => Line::styled(" Move onto a member to see their score", theme.text_dim()),
    };

    frame.render_widget(Paragraph::new(line).style(theme.text()), area);
}

/// Render status bar with keybindings and viewport info
fn render_status_bar(frame: &mut Frame, app: &App, model: &TableModel, theme: &Theme, area: Rect) {
    let hints = " [j/k] Rows  [h/l] Columns  [d] Dark/Light  [q] Quit";

    let size = app.viewport.size();
    let density = match model.density {
        Density::Compact => "compact",
        Density::Standard => "standard",
    };
    let info = format!("{} · {}x{}", density, size.width, size.height);

    widgets::render_status_bar(frame, hints, &info, theme, area);
}
