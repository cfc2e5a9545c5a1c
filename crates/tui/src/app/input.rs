use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Resize(_, _) => Ok(false),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        if key.code == KeyCode::Char('?') {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if key.code == KeyCode::Esc {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.show_error_details {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('E') => {
                    self.show_error_details = false;
                }
                _ => {}
            }
            return Ok(false);
        }

        if key.code == KeyCode::Char('E') && self.last_error.is_some() {
            self.show_error_details = true;
            return Ok(false);
        }

        if self.wizard.is_visible() {
            match key.code {
                KeyCode::Enter => self.submit_primary(),
                KeyCode::Esc => self.submit_secondary(),
                KeyCode::Tab | KeyCode::BackTab => {
                    if self.wizard.step() == Step::Identify {
                        self.focus.toggle();
                    }
                }
                KeyCode::Char(c) => self.edit_focused(Some(c)),
                KeyCode::Backspace => self.edit_focused(None),
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('a') => self.open_wizard(),
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Ok(false)
    }
}
