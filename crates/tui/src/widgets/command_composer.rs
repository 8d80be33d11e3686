//! Command composer widget with slash command autocomplete.
//!
//! Plain text submits a website idea. Slash commands cover everything else
//! the interface can do.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use sc_protocol::config_models::Locale;
use sc_protocol::Op;

/// Available slash commands with their descriptions.
const COMMANDS: &[(&str, &str)] = &[
    ("/build <idea>", "Build a website from an idea"),
    ("/reset", "Discard the current run"),
    ("/key <api_key>", "Store the API key"),
    ("/lang <ar|en>", "Switch the interface language"),
    ("/run <command>", "Run a command in the terminal"),
    ("/clear", "Clear the terminal"),
    ("/push <user> <repo> <token>", "Push generated files to GitHub"),
    ("/quit", "Exit"),
];

/// Command composer state.
#[derive(Debug, Clone)]
pub struct CommandComposer {
    /// Current input text
    input: String,
    /// Cursor position as a byte offset into `input`
    cursor_pos: usize,
    /// Whether autocomplete popup should be shown
    show_popup: bool,
    /// Selected index in the autocomplete list
    selected_index: usize,
}

impl Default for CommandComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandComposer {
    /// Create a new command composer.
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor_pos: 0,
            show_popup: false,
            selected_index: 0,
        }
    }

    /// Get the current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Check if autocomplete popup should be shown.
    pub fn should_show_popup(&self) -> bool {
        self.show_popup
    }

    /// Get filtered command suggestions based on current input.
    pub fn suggestions(&self) -> Vec<(&'static str, &'static str)> {
        if !self.input.starts_with('/') {
            return Vec::new();
        }

        let filter = self.input.trim();
        if filter == "/" {
            return COMMANDS.to_vec();
        }

        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(filter))
            .copied()
            .collect()
    }

    /// Get the currently selected suggestion.
    pub fn selected_suggestion(&self) -> Option<(&'static str, &'static str)> {
        let suggestions = self.suggestions();
        suggestions.get(self.selected_index).copied()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        self.update_popup_state();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.remove(prev);
            self.cursor_pos = prev;
            self.update_popup_state();
        }
    }

    /// Replace the input and move the cursor to its end.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.input.len();
        self.selected_index = 0;
        self.update_popup_state();
    }

    /// Clear all input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
        self.show_popup = false;
        self.selected_index = 0;
    }

    /// Move cursor left.
    pub fn move_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor_pos = prev;
        }
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.input[self.cursor_pos..].chars().next() {
            self.cursor_pos += c.len_utf8();
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Move selection up in autocomplete popup.
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down in autocomplete popup.
    pub fn move_selection_down(&mut self) {
        let suggestions = self.suggestions();
        if self.selected_index + 1 < suggestions.len() {
            self.selected_index += 1;
        }
    }

    /// Complete with the currently selected suggestion (Tab key).
    pub fn complete_with_selection(&mut self) {
        if let Some((cmd, _)) = self.selected_suggestion() {
            // Keep the command name, drop the argument placeholders
            let cmd_name = cmd.split_whitespace().next().unwrap_or(cmd);
            self.input = if cmd.contains('<') {
                format!("{} ", cmd_name)
            } else {
                cmd_name.to_string()
            };
            self.cursor_pos = self.input.len();
            self.show_popup = false;
            self.selected_index = 0;
        }
    }

    /// Update the popup state based on current input.
    fn update_popup_state(&mut self) {
        self.show_popup = self.input.starts_with('/') && !self.input.contains(' ');

        let suggestions = self.suggestions();
        if self.selected_index >= suggestions.len() {
            self.selected_index = suggestions.len().saturating_sub(1);
        }
    }

    /// Render the input field.
    pub fn render(&self, area: Rect, buf: &mut Buffer, title: &str) {
        let block = Block::default().borders(Borders::ALL).title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let text = format!("> {}", self.input);
        let paragraph = Paragraph::new(text).style(Style::default().fg(Color::Yellow));
        paragraph.render(inner, buf);
    }

    /// Render the autocomplete popup.
    pub fn render_popup(&self, area: Rect, buf: &mut Buffer) {
        if !self.show_popup {
            return;
        }

        let suggestions = self.suggestions();
        if suggestions.is_empty() {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Suggestions")
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;
        for (i, (cmd, desc)) in suggestions.iter().enumerate() {
            if y >= inner.y + inner.height {
                break;
            }

            let style = if i == self.selected_index {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let line = Line::from(vec![
                Span::styled(format!("{:<30}", cmd), style),
                Span::styled(desc.to_string(), style.fg(Color::Gray)),
            ]);

            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;
        }
    }

    /// Parse the current input and generate an Op if valid.
    ///
    /// Returns Ok(Some(Op)) if a valid command was parsed,
    /// Ok(None) if input is empty or whitespace,
    /// Err(String) if the command is invalid.
    ///
    /// Input without a leading slash is a website idea. `/quit` parses to
    /// [`Op::Shutdown`].
    pub fn parse_command(&self) -> Result<Option<Op>, String> {
        let input = self.input.trim();

        if input.is_empty() {
            return Ok(None);
        }

        if !input.starts_with('/') {
            return Ok(Some(Op::StartBuild {
                idea: input.to_string(),
            }));
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd {
            "/build" => Ok(Some(Op::StartBuild {
                idea: rest.to_string(),
            })),
            "/reset" => Ok(Some(Op::Reset)),
            "/key" => {
                if rest.is_empty() {
                    return Err("Missing API key".to_string());
                }
                Ok(Some(Op::SetApiKey {
                    api_key: rest.to_string(),
                }))
            }
            "/lang" => {
                let locale = Locale::from_code(rest)
                    .ok_or_else(|| format!("Unknown language: {rest} (expected ar or en)"))?;
                Ok(Some(Op::SetLocale { locale }))
            }
            "/run" => {
                if rest.is_empty() {
                    return Err("Missing command".to_string());
                }
                Ok(Some(Op::ExecuteCommand {
                    command: rest.to_string(),
                }))
            }
            "/clear" => Ok(Some(Op::ClearTerminal)),
            "/push" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                match parts.as_slice() {
                    [username, repo, token] => Ok(Some(Op::PushToGithub {
                        username: username.to_string(),
                        repo: repo.to_string(),
                        token: token.to_string(),
                    })),
                    _ => Err("Usage: /push <user> <repo> <token>".to_string()),
                }
            }
            "/quit" => Ok(Some(Op::Shutdown)),
            _ => Err(format!("Unknown command: {}", cmd)),
        }
    }
}
