//! Reusable UI widgets
//!
//! Contains the small building blocks around the table:
//! - Loading indicator and error notice
//! - Status bar

use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

/// Render a loading indicator centered in `area`
pub fn render_loading(frame: &mut Frame, message: &str, theme: &Theme, area: Rect) {
    let spinner_frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let frame_idx = (millis / 100) as usize % spinner_frames.len();

    let line = Line::from(vec![
        Span::styled(spinner_frames[frame_idx], Style::default().fg(theme.accent)),
        Span::raw(" "),
        Span::styled(message, theme.text_dim()),
    ]);

    let loading_area = centered_rect(area.width, 1, area);
    let loading = Paragraph::new(line)
        .style(theme.text())
        .alignment(Alignment::Center);
    frame.render_widget(loading, loading_area);
}

/// Render an error notice (title plus detail) centered in `area`
pub fn render_notice(frame: &mut Frame, title: &str, detail: &str, theme: &Theme, area: Rect) {
    let content = vec![
        Line::styled(title, theme.error().add_modifier(ratatui::style::Modifier::BOLD)),
        Line::styled(detail, theme.text_dim()),
    ];

    let notice_area = centered_rect(area.width.saturating_sub(4), 3, area);
    frame.render_widget(Clear, notice_area);

    let notice = Paragraph::new(content)
        .style(theme.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(notice, notice_area);
}

/// Render status bar at bottom
pub fn render_status_bar(
    frame: &mut Frame,
    left_content: &str,
    right_content: &str,
    theme: &Theme,
    area: Rect,
) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Clear the line first
    frame.render_widget(Clear, status_area);

    // Left side
    let left_widget = Paragraph::new(left_content)
        .style(theme.text_dim());

    // Right side
    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content)
        .style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size, clipped to `area`
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);

        assert_eq!(popup.x, 30);
        assert_eq!(popup.y, 15);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 20);
    }

    #[test]
    fn test_centered_rect_clips() {
        let area = Rect::new(5, 5, 10, 2);
        let rect = centered_rect(40, 3, area);

        assert_eq!(rect, Rect::new(5, 5, 10, 2));
    }
}
