use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use wordpace::{
    compare::WordState, controller::DisplaySurface, metrics::word_accuracy, samples::Difficulty,
    test_run::RunStatus, tokenize::SampleText,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;

/// Last feedback published by the controller, rendered on every frame
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FeedbackView {
    pub words: Vec<String>,
    pub states: Vec<WordState>,
    pub difficulty: Difficulty,
    pub stats: Option<(f64, u32)>,
}

impl DisplaySurface for FeedbackView {
    fn show_sample(&mut self, sample: &SampleText, states: &[WordState]) {
        self.words = sample.words().to_vec();
        self.states = states.to_vec();
    }

    fn show_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    fn show_stats(&mut self, elapsed_secs: f64, wpm: u32) {
        self.stats = Some((elapsed_secs, wpm));
    }

    fn clear_stats(&mut self) {
        self.stats = None;
    }
}

impl FeedbackView {
    fn prompt_line(&self) -> Line<'_> {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = bold_style.add_modifier(Modifier::DIM);

        let mut spans = Vec::with_capacity(self.words.len() * 2);
        for (idx, word) in self.words.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }
            let style = match self.states.get(idx).copied().unwrap_or(WordState::Pending) {
                WordState::Correct => bold_style.fg(Color::Green),
                WordState::Incorrect => bold_style.fg(Color::Red),
                WordState::Pending => dim_bold_style,
            };
            spans.push(Span::styled(word.as_str(), style));
        }

        Line::from(spans)
    }

    fn stats_text(&self) -> String {
        match self.stats {
            Some((elapsed_secs, wpm)) => format!(
                "time {:.1}s   wpm {}   accuracy {:.0}%",
                elapsed_secs,
                wpm,
                word_accuracy(&self.states)
            ),
            None => String::new(),
        }
    }
}

/// Columns to skip so the end of a `line_width` wide input line stays in view
fn input_scroll(line_width: usize, visible: u16) -> u16 {
    let hidden = line_width.saturating_sub(visible as usize);
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

fn help_text(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Idle => "(s)tart  (r)new text  (1)easy (2)medium (3)hard  (q)uit",
        RunStatus::Running => "type the text above  (enter/esc) stop",
        RunStatus::Stopped => "(s)tart again  (r)new text  (1)easy (2)medium (3)hard  (q)uit",
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(view) = self.controller.display() else {
            return;
        };
        let test = self.controller.test();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_width = test.sample().text().width();
        let prompt_occupied_lines = if prompt_width <= max_chars_per_line as usize {
            1
        } else {
            ((prompt_width as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
        };
        let padding = area.height.saturating_sub(prompt_occupied_lines + 7) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(2), // header
                Constraint::Length(prompt_occupied_lines),
                Constraint::Length(1),
                Constraint::Length(1), // input
                Constraint::Length(2), // stats
                Constraint::Length(1), // help
                Constraint::Min(0),
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled("difficulty: ", dim_style),
            Span::styled(view.difficulty.to_string(), bold_style.fg(Color::Magenta)),
        ]))
        .alignment(Alignment::Center);
        header.render(chunks[1], buf);

        let prompt = Paragraph::new(view.prompt_line())
            .alignment(if prompt_occupied_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        prompt.render(chunks[2], buf);

        let input_style = if test.accepts_input() {
            bold_style
        } else {
            dim_style
        };
        let input_line = Line::from(vec![
            Span::styled("> ", dim_style),
            Span::styled(test.buffer(), input_style),
            Span::styled(
                if test.accepts_input() { "_" } else { "" },
                dim_style.add_modifier(Modifier::SLOW_BLINK),
            ),
        ]);
        let scroll = input_scroll(input_line.width(), chunks[4].width);
        let input = Paragraph::new(input_line)
            .alignment(Alignment::Left)
            .scroll((0, scroll));
        input.render(chunks[4], buf);

        let stats = Paragraph::new(Span::styled(view.stats_text(), bold_style))
            .alignment(Alignment::Center);
        stats.render(chunks[5], buf);

        let help = Paragraph::new(Span::styled(help_text(test.status()), italic_style))
            .alignment(Alignment::Center);
        help.render(chunks[6], buf);
    }
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
