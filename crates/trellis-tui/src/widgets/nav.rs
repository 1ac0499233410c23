use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;

pub struct NavWidget;

impl NavWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .title(" Navigation ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let items: Vec<ListItem> = app
            .nav_links()
            .into_iter()
            .map(|(label, active)| {
                let (marker, style) = if active {
                    (
                        "▸ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(Color::Gray))
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!("#{label}"), style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
