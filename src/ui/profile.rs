use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::screen::Screen;
use super::{
    bold_style, dim_bold_style, italic_style, render_legend, render_progress, render_title, rows,
    warning_style,
};
use crate::app::{ProfileStage, ProfileView, Submission};
use crate::survey::questions::{Question, LIKERT_LABELS};
use crate::survey::{Answers, PAGE_COUNT};

const TITLE: &str = "Perfil Comportamental";

impl Screen for ProfileView {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        match self.stage {
            ProfileStage::Instructions => render_instructions(area, buf),
            ProfileStage::Questions => render_questions(self, area, buf),
            ProfileStage::Final => render_final(self, area, buf),
        }
    }
}

fn render_instructions(area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(1),
        ],
    );
    render_title(TITLE, chunks[0], buf);

    Paragraph::new(vec![
        Line::from("Responda cada afirmação de acordo com o quanto ela descreve você."),
        Line::from("Não existem respostas certas ou erradas."),
        Line::from(""),
        Line::from(Span::styled(
            LIKERT_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| format!("{} = {label}", i + 1))
                .join("   "),
            dim_bold_style(),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(chunks[1], buf);

    render_legend("(enter) começar / (esc) sair", chunks[2], buf);
}

/// Scale line with the chosen answer highlighted.
fn scale_line(answer: Option<u8>) -> Line<'static> {
    let labels = LIKERT_LABELS.iter().enumerate().map(|(i, label)| {
        let value = i as u8 + 1;
        if answer == Some(value) {
            Span::styled(format!("[{value}] {label}"), bold_style().fg(Color::Green))
        } else {
            Span::styled(format!(" {value}  {label}"), dim_bold_style())
        }
    });
    Line::from(Itertools::intersperse(labels, Span::raw("  ")).collect::<Vec<_>>())
}

fn question_lines(question: &Question, answers: &Answers, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "> " } else { "  " };
    let text_style = if selected {
        bold_style().add_modifier(Modifier::UNDERLINED)
    } else {
        bold_style()
    };
    let mut heading = vec![
        Span::styled(marker.to_string(), bold_style().fg(Color::Cyan)),
        Span::styled(format!("{}. {}", question.id, question.text), text_style),
    ];
    if !answers.is_answered(question.id) {
        heading.push(Span::styled(" *".to_string(), warning_style()));
    }

    let indent = " ".repeat(marker.width());
    let mut scale = scale_line(answers.get(question.id));
    scale.spans.insert(0, Span::raw(indent));

    vec![Line::from(heading), scale, Line::from("")]
}

fn render_questions(view: &ProfileView, area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ],
    );
    render_title(TITLE, chunks[0], buf);

    let survey = &view.survey;
    let percent = survey.progress_percent();
    render_progress(
        format!(
            "Passo {} de {PAGE_COUNT} - {percent}%   ({}/{} respondidas)",
            survey.current_step() + 1,
            survey.answers().answered_count(),
            survey.questions().len()
        ),
        u16::from(percent),
        chunks[1],
        buf,
    );

    let lines: Vec<Line> = survey
        .page_questions()
        .iter()
        .enumerate()
        .flat_map(|(idx, q)| question_lines(q, survey.answers(), idx == view.cursor))
        .collect();
    // keep the highlighted question visible on short terminals
    let scroll = (view.cursor as u16 * 3).saturating_sub(chunks[3].height.saturating_sub(3));
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(chunks[3], buf);

    if let Some(warning) = &view.warning {
        Paragraph::new(Span::styled(warning.clone(), warning_style()))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }

    let legend = match (survey.is_first_step(), survey.is_last_step()) {
        (_, true) => "(1-5) responder / (↑↓) pergunta / (p) anterior / (enter) finalizar / (esc) sair",
        (true, false) => "(1-5) responder / (↑↓) pergunta / (n) próxima / (esc) sair",
        (false, false) => {
            "(1-5) responder / (↑↓) pergunta / (p) anterior / (n) próxima / (esc) sair"
        }
    };
    render_legend(legend, chunks[5], buf);
}

fn render_final(view: &ProfileView, area: Rect, buf: &mut Buffer) {
    let chunks = rows(
        area,
        &[
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
        ],
    );
    render_title("Obrigado!", chunks[0], buf);

    let mut lines = vec![
        Line::from(Span::styled(
            "Suas respostas foram registradas.".to_string(),
            bold_style().fg(Color::Green),
        )),
        Line::from("Os resultados serão analisados pela equipe de recrutamento."),
    ];
    if let Some(scores) = view.scores {
        let dominant = scores.dominant;
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Perfil predominante: "),
            Span::styled(dominant.name().to_string(), bold_style().fg(Color::Cyan)),
            Span::styled(format!(" ({})", dominant.description()), dim_bold_style()),
        ]));
    }
    if let Some(at) = view.completed_at {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Concluído em {}", at.format("%d/%m/%Y %H:%M")),
            italic_style(),
        )));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    let legend = if view.submission == Submission::Pending {
        "enviando respostas... / (esc) sair"
    } else {
        "(q) ou (enter) sair"
    };
    render_legend(legend, chunks[2], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{App, AppState};
    use crate::survey::{Quadrant, QuadrantScores};
    use crate::ui::render_to_string;
    use chrono::Local;

    fn profile_app(f: impl FnOnce(&mut ProfileView)) -> App {
        let mut app = App::profile("http://localhost:8000/app/");
        if let AppState::Profile(view) = &mut app.state {
            f(view);
        }
        app
    }

    #[test]
    fn instructions_list_scale() {
        let rendered = render_to_string(&profile_app(|_| {}), 160, 24);
        assert!(rendered.contains("Perfil Comportamental"));
        assert!(rendered.contains("5 = Concordo Totalmente"));
    }

    #[test]
    fn questions_page_shows_step_and_answer() {
        let app = profile_app(|view| {
            view.stage = ProfileStage::Questions;
            view.survey.set_answer(1, 4).unwrap();
        });
        let rendered = render_to_string(&app, 140, 40);
        assert!(rendered.contains("Passo 1 de 5"));
        assert!(rendered.contains("(1/25 respondidas)"));
        assert!(rendered.contains("> 1. Eu prefiro analisar"));
        assert!(rendered.contains("[4] Concordo"));
        assert!(rendered.contains("(n) próxima"));
        assert!(!rendered.contains("(p) anterior"));
    }

    #[test]
    fn warning_line_is_rendered() {
        let app = profile_app(|view| {
            view.stage = ProfileStage::Questions;
            view.warning = Some("Por favor, responda todas as perguntas antes de continuar.".into());
        });
        let rendered = render_to_string(&app, 140, 40);
        assert!(rendered.contains("responda todas as perguntas"));
    }

    #[test]
    fn final_screen_thanks_candidate() {
        let app = profile_app(|view| {
            view.stage = ProfileStage::Final;
            view.scores = Some(QuadrantScores {
                a: 40,
                b: 60,
                c: 90,
                d: 90,
                dominant: Quadrant::C,
            });
            view.completed_at = Some(Local::now());
        });
        let rendered = render_to_string(&app, 120, 24);
        assert!(rendered.contains("Obrigado!"));
        assert!(rendered.contains("Pensador Relacional"));
        assert!(rendered.contains("Concluído em"));
    }

    #[test]
    fn final_screen_hides_quit_while_saving() {
        let app = profile_app(|view| {
            view.stage = ProfileStage::Final;
            view.submission = Submission::Pending;
        });
        let rendered = render_to_string(&app, 120, 24);
        assert!(rendered.contains("enviando respostas..."));
        assert!(!rendered.contains("(q) ou (enter) sair"));
    }

    #[test]
    fn scale_marks_only_selected_answer() {
        let line = scale_line(Some(2));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("[2] Discordo Um Pouco"));
        assert!(!text.contains("[1]"));
        assert_eq!(line.spans.len(), LIKERT_LABELS.len() * 2 - 1);
    }
}
