pub mod profile;
pub mod screen;
pub mod typing;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Widget, Wrap},
};

use crate::app::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(&self.state).render(area, buf);
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn warning_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Split `area` into margins plus rows of the given heights.
fn rows(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

fn render_title(title: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        title.to_string(),
        bold_style().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM))
    .render(area, buf);
}

fn render_progress(label: String, percent: u16, area: Rect, buf: &mut Buffer) {
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(percent.min(100))
        .label(label)
        .render(area, buf);
}

fn render_legend(text: &str, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(text.to_string(), italic_style()))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// A rectangle of `width_percent` of `area`, `height` rows tall, centered.
fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Modal box drawn over whatever is already in `buf`.
fn render_popup(title: &str, message: &str, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(60, 7, area);
    Clear.render(popup_area, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), bold_style())),
        Line::from(""),
        Line::from(Span::styled(
            "(enter) ok / (esc) sair".to_string(),
            italic_style(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(Style::default().fg(Color::Red)),
    )
    .render(popup_area, buf);
}

#[cfg(test)]
pub(crate) fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    app.render(area, &mut buffer);
    buffer
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}
