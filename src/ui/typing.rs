use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::screen::Screen;
use super::{
    bold_style, dim_bold_style, render_legend, render_popup, render_progress, render_title, rows,
};
use crate::app::{Submission, TypingView};
use crate::session::PhaseSession;
use crate::typing::{TypingStage, TypingTest, PHASE_COUNT};
use crate::util::{minutes_seconds, one_decimal};

const TITLE: &str = "Teste de Digitação";

impl Screen for TypingView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        match self.test.stage() {
            TypingStage::Welcome => render_welcome(area, buf),
            TypingStage::Phase(_) => {
                if let Some(session) = self.test.session() {
                    render_phase(session, self.test.can_finish(), area, buf);
                }
            }
            TypingStage::Final => render_final(&self.test, &self.submission, area, buf),
        }

        if let Some(message) = &self.popup {
            render_popup("Erro", message, area, buf);
        }
    }
}

fn render_welcome(area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ],
    );
    render_title(TITLE, chunks[0], buf);

    Paragraph::new(vec![
        Line::from(format!(
            "Você vai digitar {PHASE_COUNT} frases, uma por fase."
        )),
        Line::from("O tempo começa a contar na primeira tecla de cada fase."),
        Line::from("Copiar e colar estão desativados."),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    render_legend("(enter) começar / (esc) sair", chunks[2], buf);
}

/// Prompt spans colored by positional match against the input so far.
fn prompt_spans(session: &PhaseSession) -> Vec<Span<'static>> {
    let typed: Vec<char> = session.input.chars().collect();
    let green = bold_style().fg(Color::Green);
    let red = bold_style().fg(Color::Red);
    let cursor = dim_bold_style().add_modifier(Modifier::UNDERLINED);

    session
        .prompt
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let style = match typed.get(idx) {
                Some(&c) if c == expected => green,
                Some(_) => red,
                None if idx == typed.len() => cursor,
                None => dim_bold_style(),
            };
            Span::styled(expected.to_string(), style)
        })
        .collect()
}

fn render_phase(session: &PhaseSession, can_finish: bool, area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );
    render_title(TITLE, chunks[0], buf);

    let phase_number = session.phase_index + 1;
    let percent = ((phase_number as f64 / PHASE_COUNT as f64) * 100.0).round() as u16;
    render_progress(
        format!("Fase {phase_number} de {PHASE_COUNT} - {percent}%"),
        percent,
        chunks[1],
        buf,
    );

    Paragraph::new(Line::from(prompt_spans(session)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(chunks[3], buf);

    Paragraph::new(session.input.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sua digitação"),
        )
        .render(chunks[4], buf);

    let live = session.live;
    Paragraph::new(Span::styled(
        format!(
            "{}s   {} wpm   {}% precisão",
            one_decimal(live.elapsed_secs),
            live.wpm.round(),
            live.accuracy.round()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    let legend = if can_finish {
        "(enter) finalizar fase / (esc) sair"
    } else {
        "digite a frase acima / (esc) sair"
    };
    render_legend(legend, chunks[6], buf);
}

fn render_final(test: &TypingTest, submission: &Submission, area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(PHASE_COUNT as u16 + 2),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );
    render_title("Teste concluído!", chunks[0], buf);

    if let Some(summary) = test.summary() {
        Paragraph::new(Span::styled(
            format!(
                "{} wpm médio   {}% precisão média   {:.2} sd   {} total",
                one_decimal(summary.wpm_average),
                one_decimal(summary.accuracy_average),
                summary.wpm_std_dev,
                minutes_seconds(summary.total_seconds)
            ),
            bold_style(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }

    let phase_lines: Vec<Line> = test
        .results()
        .iter()
        .map(|r| {
            Line::from(format!(
                "Fase {}: {}s   {} wpm   {}%",
                r.phase_index + 1,
                one_decimal(r.elapsed_seconds),
                one_decimal(r.words_per_minute),
                one_decimal(r.accuracy_percent)
            ))
        })
        .collect();
    Paragraph::new(phase_lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Fases"))
        .render(chunks[2], buf);

    let (status, style) = match submission {
        Submission::NotSent | Submission::Pending => {
            ("Enviando resultados...".to_string(), dim_bold_style())
        }
        Submission::Saved { .. } => (
            "Resultados salvos com sucesso!".to_string(),
            bold_style().fg(Color::Green),
        ),
        Submission::Confirmed(response) => (
            response
                .message
                .clone()
                .unwrap_or_else(|| "Resultados salvos com sucesso!".to_string()),
            bold_style().fg(Color::Green),
        ),
        Submission::Failed(message) => (message.clone(), bold_style().fg(Color::Red)),
    };
    let status = match test.completed_at() {
        Some(at) => format!("{status} ({})", at.format("%d/%m/%Y %H:%M")),
        None => status,
    };
    Paragraph::new(Span::styled(status, style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let legend = if submission.is_confirmed() {
        "(d) painel / (q) ou (enter) sair"
    } else {
        "(esc) sair"
    };
    render_legend(legend, chunks[4], buf);
}
