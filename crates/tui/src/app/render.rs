use super::*;
use loadcell_wizard::{WizardField, WizardState};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self.is_loading {
            self.render_loading(frame, area);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        self.render_home(frame, rows[0]);
        self.render_status_bar(frame, rows[1]);

        if self.wizard.is_visible() {
            self.render_wizard(frame, area);
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if self.show_error_details {
            self.render_error_details(frame, area);
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let text = format!("\n\n  {}  \n\n", self.loading_message);
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(" scale-wizard "))
            .centered();
        frame.render_widget(paragraph, area);
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(format!(
                "  Host:   {} ({})",
                self.backend.describe(),
                self.host_status.label()
            )),
            Line::from(format!("  Plugin: {}", self.wizard.plugin_id())),
            Line::default(),
            Line::styled(
                "  Calibrated this session:",
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];

        if self.calibrated.is_empty() {
            lines.push(Line::from("    No scales calibrated yet."));
        } else {
            lines.extend(
                self.calibrated
                    .iter()
                    .map(|scale| Line::from(format!("    {}", scale.summary()))),
            );
        }

        lines.push(Line::default());
        lines.push(Line::from("  [a] Add scale   [?] Help   [Ctrl+Q] Quit"));

        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Load-cell scales "),
            ),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.last_error {
            Some(error) => Line::from(vec![
                Span::styled(" ! ", Style::default().fg(Color::Black).bg(Color::Red)),
                Span::raw(format!(" {error}  [Shift+E] details")),
            ]),
            None if self.wizard.is_pending() => Line::from(" Working..."),
            None => Line::from(" Ready"),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_wizard(&self, frame: &mut Frame, area: Rect) {
        let state = self.wizard.state();
        let step = state.step;
        let popup_area = self.centered_rect(70, 60, area);

        let mut lines = match step {
            Step::Identify => vec![
                Line::from("Connect the HX711 amplifier and enter its GPIO pins."),
                Line::default(),
                self.field_line(state, WizardField::DataPin),
                self.field_line(state, WizardField::ClockPin),
            ],
            Step::Calibrate => vec![
                Line::from(format!(
                    "Scale {} is connected.",
                    state.scale_id.as_ref().map(|id| id.as_str()).unwrap_or("?")
                )),
                Line::from("Place a known weight on it and enter that weight."),
                Line::default(),
                self.field_line(state, WizardField::ReferenceWeight),
            ],
            Step::Confirm => Self::result_lines(state),
        };

        lines.push(Line::default());
        if self.wizard.is_pending() {
            lines.push(Line::styled(
                "Waiting for OctoPrint...",
                Style::default().fg(Color::Yellow),
            ));
        } else {
            lines.push(Line::default());
        }
        lines.push(Line::from(format!(
            "[Esc] {}    [Enter] {}",
            self.wizard.secondary_text(),
            self.wizard.primary_text()
        )));

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        " Add Scale - Step {} of 3: {} ",
                        step.number(),
                        step.title()
                    )),
            ),
            popup_area,
        );
    }

    fn field_line(&self, state: &WizardState, field: WizardField) -> Line<'static> {
        let value = state.field(field);
        let shown = if value.is_empty() { "[not set]" } else { value };
        let focused = self.focus.field(state.step) == Some(field);
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("  {:<22}", format!("{}:", field.label()))),
            Span::styled(shown.to_string(), style),
        ])
    }

    fn result_lines(state: &WizardState) -> Vec<Line<'static>> {
        let scale_id = state
            .scale_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let mut lines = vec![
            Line::from(format!("Scale {scale_id} is calibrated.")),
            Line::default(),
        ];
        match state.profile() {
            Some(profile) => {
                lines.push(Line::from(format!("  Offset: {:.3}", profile.offset)));
                lines.push(Line::from(format!("  Scale:  {:.3}", profile.scale)));
            }
            None => {
                let raw = state
                    .last_result
                    .as_ref()
                    .and_then(|map| serde_json::to_string_pretty(map).ok())
                    .unwrap_or_default();
                lines.extend(raw.lines().map(|l| Line::from(format!("  {l}"))));
            }
        }
        lines
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help_text = self.keybinds.help_text();
        let popup_area = self.centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Press ? to close "),
            ),
            popup_area,
        );
    }

    fn render_error_details(&self, frame: &mut Frame, area: Rect) {
        let popup_area = self.centered_rect(60, 20, area);
        let details = self
            .last_error
            .as_deref()
            .unwrap_or("No error details available.");
        let text = format!("{details}\n\n[Esc] or [Enter] to close");

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error Details "),
            ),
            popup_area,
        );
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
}
