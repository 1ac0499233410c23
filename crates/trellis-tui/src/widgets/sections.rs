use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Layout pixels represented by one terminal row.
const ROW_SCALE: i64 = 10;

pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .title(" Content ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        // Render the whole content column, then window it by scroll position.
        let mut lines: Vec<Line> = Vec::new();
        for (id, _, height) in app.sections() {
            let rows = (height / ROW_SCALE).max(1);
            // The nav link's fragment doubles as the section id.
            let is_active = app.nav_links().iter().any(|(label, on)| *on && *label == id);
            let style = if is_active {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::styled(format!("── #{id} ──"), style));
            for _ in 1..rows {
                lines.push(Line::styled("·", Style::default().fg(Color::DarkGray)));
            }
        }

        let skip = (app.scroll_top() / ROW_SCALE) as u16;
        let paragraph = Paragraph::new(lines).block(block).scroll((skip, 0));
        frame.render_widget(paragraph, area);
    }
}
