//! Application state and main render loop

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use vintner_core::{Outcome, Pipeline};

use crate::keybindings::{global_action, normal_mode_action, Action};
use crate::mode::Mode;
use crate::widgets::{Metric, ModeIndicator, NoticeBanner};

const TITLE: &str = "Wine Quality Prediction";
const INSTRUCTIONS: &str =
    "Enter the chemical properties of a wine sample below to predict its quality.";
const EDITOR_TITLE: &str =
    "Paste the chemical attributes - one per line in format `feature: value`";
const FEATURES_NOTE: [&str; 2] = ["case-insensitive input,", "but must match expected list"];
const RESULTS_TITLE: &str = "Prediction Results";
const ASSESSMENT_TITLE: &str = "Quality Assessment";
const FOOTER_NOTES: [&str; 3] = [
    "Model predicts wine quality from chemical properties on a continuous scale",
    "Rounded score helps interpret quality level",
    "All 11 required features must be included",
];

/// Main application state
pub struct App {
    /// Current mode (NORMAL, INSERT)
    pub mode: Mode,
    /// Parse → predict → classify
    pipeline: Pipeline,
    /// Multi-line measurement input
    editor: TextArea<'static>,
    /// Result of the latest submission
    pub outcome: Option<Outcome>,
    /// Feedback from the last action; the key hints show when unset
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
}

impl App {
    /// Create a new application with the editor pre-filled with the template
    pub fn new(pipeline: Pipeline) -> Self {
        let mut app = Self {
            mode: Mode::Normal,
            pipeline,
            editor: TextArea::default(),
            outcome: None,
            status_message: None,
            show_help: false,
        };
        app.reset_template();
        app
    }

    /// Current editor contents
    pub fn input(&self) -> String {
        self.editor.lines().join("\n")
    }

    /// Replace the editor contents
    pub fn set_input(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.editor = TextArea::new(lines);
        self.editor
            .set_cursor_line_style(Style::default().add_modifier(Modifier::UNDERLINED));
    }

    fn reset_template(&mut self) {
        let template = self.pipeline.schema().template();
        self.set_input(&template);
    }

    /// Run the prediction on the current input, replacing any previous result
    pub fn predict(&mut self) {
        let outcome = self.pipeline.submit(&self.input());
        self.status_message = Some(match &outcome {
            Outcome::Assessed(_) => "Prediction complete".to_string(),
            Outcome::Rejected(_) => "Check the input and try again".to_string(),
            Outcome::Failed(_) => "Prediction failed".to_string(),
        });
        self.outcome = Some(outcome);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = global_action(&key) {
            return self.apply(action);
        }

        match self.mode {
            Mode::Normal => match normal_mode_action(key.code) {
                Some(action) => self.apply(action),
                None => false,
            },
            Mode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) -> bool {
        if key.code == crossterm::event::KeyCode::Esc {
            return self.apply(Action::Cancel);
        }
        self.editor.input(key);
        self.status_message = None;
        false
    }

    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::EnterInsertMode => {
                self.mode = Mode::Insert;
                self.show_help = false;
                self.status_message = None;
            }
            Action::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else if self.mode == Mode::Insert {
                    self.mode = Mode::Normal;
                    self.status_message = None;
                }
            }
            Action::Predict => self.predict(),
            Action::ResetTemplate => {
                self.reset_template();
                self.outcome = None;
                self.status_message = Some("Template restored".to_string());
            }
            Action::ClearInput => {
                self.set_input("");
                self.outcome = None;
                self.status_message = Some("Input cleared".to_string());
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
        }
        false
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        // Header, form, results, footer note, status line
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_header(frame, chunks[0]);

        let form_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(chunks[1]);

        self.render_required_features(frame, form_chunks[0]);
        self.render_editor(frame, form_chunks[1]);
        self.render_results(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);
        self.render_status_line(frame, chunks[4]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(INSTRUCTIONS),
        ]);
        frame.render_widget(header, area);
    }

    fn render_required_features(&self, frame: &mut Frame, area: Rect) {
        let note_style = Style::default().fg(Color::DarkGray);
        let items: Vec<ListItem> = FEATURES_NOTE
            .iter()
            .map(|line| ListItem::new(*line).style(note_style))
            .chain(
                self.pipeline
                    .schema()
                    .iter()
                    .map(|name| ListItem::new(format!("- {name}"))),
            )
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Required features")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, area);
    }

    fn render_editor(&self, frame: &mut Frame, area: Rect) {
        let border_color = match self.mode {
            Mode::Insert => Color::Green,
            Mode::Normal => Color::DarkGray,
        };

        let mut editor = self.editor.clone();
        editor.set_block(
            Block::default()
                .title(EDITOR_TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
        if self.mode == Mode::Normal {
            editor.set_cursor_style(Style::default());
        }
        frame.render_widget(&editor, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(RESULTS_TITLE).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(outcome) = &self.outcome else {
            let hint = Paragraph::new("Press p (or Ctrl-P) to Predict Quality")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(hint, inner);
            return;
        };

        let notice = outcome.notice();
        match outcome.assessment() {
            Some(assessment) => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(3)])
                    .split(inner);
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(rows[0]);

                frame.render_widget(
                    Metric::new(
                        "Raw Prediction Score",
                        assessment.prediction.display_score(),
                    ),
                    columns[0],
                );
                frame.render_widget(
                    Metric::new(
                        "Rounded Quality",
                        assessment.prediction.rounded.to_string(),
                    ),
                    columns[1],
                );
                frame.render_widget(
                    NoticeBanner::new(&notice).title(ASSESSMENT_TITLE),
                    rows[1],
                );
            }
            None => frame.render_widget(NoticeBanner::new(&notice), inner),
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let text = FOOTER_NOTES.join(" | ");
        let footer = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Note").borders(Borders::TOP));
        frame.render_widget(footer, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let message = self.status_message.clone().unwrap_or_else(|| match self.mode {
            Mode::Normal => "i edit | p predict | r reset | c clear | ? help | q quit".to_string(),
            Mode::Insert => "Esc done | Ctrl-P predict".to_string(),
        });

        let line = Line::from(vec![
            ModeIndicator::new(self.mode).as_span(),
            Span::raw(" "),
            Span::raw(message),
        ]);
        let status = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
Wine Quality Prediction - Help

Enter one measurement per line as `feature: value`.
Names are case-insensitive; unknown names are ignored.
Use `nan` for an unknown value to have it imputed.

Normal mode:
  i / e      - Edit measurements
  p / Enter  - Predict Quality
  r          - Restore the blank template
  c          - Clear the input
  ?          - Toggle this help
  q          - Quit

Insert mode:
  Esc        - Back to normal mode

Anywhere:
  Ctrl-P / F5 - Predict Quality
  Ctrl-C      - Quit
"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, help_area);
        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, help_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
