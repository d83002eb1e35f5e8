//! Severity-styled message banner.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use vintner_core::{Notice, Severity};

/// Renders a [`Notice`] as a bordered, color-coded paragraph.
///
/// - Error: Red
/// - Warning: Yellow
/// - Success: Green
pub struct NoticeBanner<'a> {
    notice: &'a Notice,
    title: Option<&'a str>,
}

impl<'a> NoticeBanner<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self {
            notice,
            title: None,
        }
    }

    /// Set the border title.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
            Severity::Success => Color::Green,
        }
    }

    pub fn severity_marker(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => "[x]",
            Severity::Warning => "[!]",
            Severity::Success => "[ok]",
        }
    }
}

impl Widget for NoticeBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = Self::severity_color(self.notice.severity);
        let line = Line::from(vec![
            Span::styled(
                format!("{} ", Self::severity_marker(self.notice.severity)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.notice.text.clone(), Style::default().fg(color)),
        ]);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        if let Some(title) = self.title {
            block = block.title(title);
        }

        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
