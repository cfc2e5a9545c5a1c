pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Scales:
  a             Add a new scale

Wizard:
  Tab           Switch between pin fields
  Enter         Primary action (Next Step / Finish / Add Scale)
  Esc           Secondary action (Cancel / Finish)
  Backspace     Delete last character

General:
  ?             Toggle this help
  Shift + E     Show latest error details
  Ctrl + Q      Quit
"#
        .to_string()
    }
}
