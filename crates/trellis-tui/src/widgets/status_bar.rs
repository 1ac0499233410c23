use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let active = app
            .active_link()
            .map(|id| format!("#{id}"))
            .unwrap_or_else(|| "none".to_string());
        let swipe = app.last_swipe().unwrap_or("-");

        let line = Line::from(vec![
            Span::styled(
                format!(" scroll {}/{} ", app.scroll_top(), app.max_scroll()),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("│ active {active} "),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("│ swipe {swipe} "),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!("│ activations {} ", app.activation_count()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                "│ j/k scroll · n/p section · drag to swipe · q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}
