//! Keybindings configuration for the TUI.

use anyhow::{Result, anyhow, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

macro_rules! vec_of_strings {
    ($($s:expr),* $(,)?) => {
        vec![$($s.to_string()),*]
    };
}

/// Keybindings configuration for both TUI focus areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindingsConfig {
    /// Keybindings while the task list has focus.
    pub task_list: TaskListKeyBindings,
    /// Keybindings while the input line has focus.
    pub input: InputKeyBindings,
}

/// Keybindings for the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Move the input focus to the input line.
    pub compose: Vec<String>,
    /// Move down in the list.
    pub down: Vec<String>,
    /// Move up in the list.
    pub up: Vec<String>,
    /// Flip completion of the selected task.
    pub toggle: Vec<String>,
    /// Load the selected task into the input line for editing.
    pub edit: Vec<String>,
    /// Delete the selected task.
    pub delete: Vec<String>,
    /// Delete every task (press twice).
    pub delete_all: Vec<String>,
}

/// Keybindings for the input line. Printable keys without modifiers are
/// always typed into the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputKeyBindings {
    /// Quit the application.
    pub quit: Vec<String>,
    /// Primary action: add or update.
    pub submit: Vec<String>,
    /// Cancel the current edit, or leave the input line.
    pub cancel: Vec<String>,
    /// Move the focus to the task list.
    pub switch_focus: Vec<String>,
}

impl Default for TaskListKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["q", "Esc", "Ctrl+c"],
            compose: vec_of_strings!["a", "i", "Tab"],
            down: vec_of_strings!["j", "Down"],
            up: vec_of_strings!["k", "Up"],
            toggle: vec_of_strings!["Space", "x"],
            edit: vec_of_strings!["e", "Enter"],
            delete: vec_of_strings!["d", "Delete"],
            delete_all: vec_of_strings!["D"],
        }
    }
}

impl Default for InputKeyBindings {
    fn default() -> Self {
        Self {
            quit: vec_of_strings!["Ctrl+c"],
            submit: vec_of_strings!["Enter"],
            cancel: vec_of_strings!["Esc"],
            switch_focus: vec_of_strings!["Tab"],
        }
    }
}

/// Parse a key string into a `KeyEvent`.
///
/// # Examples
/// - "j" -> `KeyCode::Char('j')`
/// - "Enter" -> `KeyCode::Enter`
/// - "Ctrl+c" -> `KeyCode::Char('c')` with CONTROL modifier
pub fn parse_key(s: &str) -> Result<KeyEvent> {
    // "+" on its own is a key, not a separator.
    if s == "+" {
        return Ok(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE));
    }

    let parts: Vec<&str> = s.split('+').collect();
    let Some((&key_part, modifier_parts)) = parts.split_last() else {
        bail!("Empty key string");
    };

    let mut modifiers = KeyModifiers::NONE;
    for &modifier in modifier_parts {
        match modifier {
            "Ctrl" | "Control" => modifiers |= KeyModifiers::CONTROL,
            "Alt" => modifiers |= KeyModifiers::ALT,
            "Shift" => modifiers |= KeyModifiers::SHIFT,
            other => bail!("Unknown modifier: {other}"),
        }
    }

    let code = parse_key_code(key_part)?;
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_key_code(s: &str) -> Result<KeyCode> {
    match s {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Tab" => Ok(KeyCode::Tab),
        "Delete" => Ok(KeyCode::Delete),
        "Insert" => Ok(KeyCode::Insert),
        "Space" => Ok(KeyCode::Char(' ')),
        s if s.chars().count() == 1 => {
            let ch = s.chars().next().ok_or_else(|| anyhow!("Empty char"))?;
            Ok(KeyCode::Char(ch))
        }
        "" => bail!("Empty key string"),
        other => bail!("Unknown key: {other}"),
    }
}

/// Validate the keybindings configuration.
///
/// Checks for:
/// - Empty key bindings
/// - Invalid key expressions
/// - Key conflicts within each view
pub fn validate_keybindings_config(config: &KeyBindingsConfig) -> Result<()> {
    for (view, bindings) in [
        ("task_list", collect_task_list_bindings(config)),
        ("input", collect_input_bindings(config)),
    ] {
        validate_view(view, &bindings)?;
    }
    Ok(())
}

fn validate_view(view: &str, bindings: &[(&'static str, &[String])]) -> Result<()> {
    let mut seen: HashMap<(KeyCode, KeyModifiers), &str> = HashMap::new();
    for &(action, keys) in bindings {
        if keys.is_empty() {
            bail!("{view}.{action} must have at least one key binding");
        }
        for key in keys {
            let parsed = parse_key(key).map_err(|err| anyhow!("{view}.{action}: invalid key '{key}': {err}"))?;
            if let Some(previous) = seen.insert(normalize_key(&parsed), action)
                && previous != action
            {
                bail!("{view}: key '{key}' is bound to both '{previous}' and '{action}'");
            }
        }
    }
    Ok(())
}

fn collect_task_list_bindings(config: &KeyBindingsConfig) -> Vec<(&'static str, &[String])> {
    let bindings = &config.task_list;
    vec![
        ("quit", bindings.quit.as_slice()),
        ("compose", bindings.compose.as_slice()),
        ("down", bindings.down.as_slice()),
        ("up", bindings.up.as_slice()),
        ("toggle", bindings.toggle.as_slice()),
        ("edit", bindings.edit.as_slice()),
        ("delete", bindings.delete.as_slice()),
        ("delete_all", bindings.delete_all.as_slice()),
    ]
}

fn collect_input_bindings(config: &KeyBindingsConfig) -> Vec<(&'static str, &[String])> {
    let bindings = &config.input;
    vec![
        ("quit", bindings.quit.as_slice()),
        ("submit", bindings.submit.as_slice()),
        ("cancel", bindings.cancel.as_slice()),
        ("switch_focus", bindings.switch_focus.as_slice()),
    ]
}

/// View type for keybinding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Task list has focus.
    TaskList,
    /// Input line has focus.
    Input,
}

/// Action that can be performed in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,

    // TaskList specific
    /// Focus the input line.
    Compose,
    /// Move down.
    Down,
    /// Move up.
    Up,
    /// Toggle completion.
    Toggle,
    /// Edit the selected task.
    Edit,
    /// Delete the selected task.
    Delete,
    /// Delete all tasks.
    DeleteAll,

    // Input specific
    /// Add or update.
    Submit,
    /// Cancel edit or leave the input line.
    Cancel,
    /// Focus the task list.
    SwitchFocus,
}

impl KeyBindingsConfig {
    /// Generate help text for a specific view.
    pub fn generate_help_text(&self, view: ViewType, list_is_empty: bool) -> String {
        match view {
            ViewType::TaskList => {
                let list = &self.task_list;
                let mut parts = vec![
                    format!("{}:move", format_key_pair(&list.down, &list.up)),
                    format!("{}:toggle", format_first_key(&list.toggle)),
                    format!("{}:edit", format_first_key(&list.edit)),
                    format!("{}:delete", format_first_key(&list.delete)),
                ];
                if !list_is_empty {
                    parts.push(format!("{}:delete all", format_first_key(&list.delete_all)));
                }
                parts.push(format!("{}:new", format_first_key(&list.compose)));
                parts.push(format!("{}:quit", format_first_key(&list.quit)));
                parts.join("  ")
            }
            ViewType::Input => {
                let input = &self.input;
                format!(
                    "{}:submit  {}:cancel  {}:list  {}:quit",
                    format_first_key(&input.submit),
                    format_first_key(&input.cancel),
                    format_first_key(&input.switch_focus),
                    format_first_key(&input.quit),
                )
            }
        }
    }

    /// Check if a key event matches a configured action in a view.
    pub fn matches(&self, view: ViewType, action: Action, key: &KeyEvent) -> bool {
        let actual = normalize_key(key);
        self.get_keys(view, action)
            .iter()
            .filter_map(|key_str| parse_key(key_str).ok())
            .any(|expected| normalize_key(&expected) == actual)
    }

    /// Display label of the first key bound to `action`, e.g. `↵` or `D`.
    pub fn first_key_label(&self, view: ViewType, action: Action) -> String {
        format_first_key(self.get_keys(view, action))
    }

    fn get_keys(&self, view: ViewType, action: Action) -> &[String] {
        match (view, action) {
            (ViewType::TaskList, Action::Quit) => &self.task_list.quit,
            (ViewType::TaskList, Action::Compose) => &self.task_list.compose,
            (ViewType::TaskList, Action::Down) => &self.task_list.down,
            (ViewType::TaskList, Action::Up) => &self.task_list.up,
            (ViewType::TaskList, Action::Toggle) => &self.task_list.toggle,
            (ViewType::TaskList, Action::Edit) => &self.task_list.edit,
            (ViewType::TaskList, Action::Delete) => &self.task_list.delete,
            (ViewType::TaskList, Action::DeleteAll) => &self.task_list.delete_all,

            (ViewType::Input, Action::Quit) => &self.input.quit,
            (ViewType::Input, Action::Submit) => &self.input.submit,
            (ViewType::Input, Action::Cancel) => &self.input.cancel,
            (ViewType::Input, Action::SwitchFocus) => &self.input.switch_focus,

            // Invalid combinations
            _ => &[],
        }
    }
}

/// Shifted characters arrive with SHIFT set on some terminals and without it
/// on others; the character itself already carries the case.
fn normalize_key(key: &KeyEvent) -> (KeyCode, KeyModifiers) {
    let mut modifiers = key.modifiers;
    if matches!(key.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    (key.code, modifiers)
}

fn format_first_key(keys: &[String]) -> String {
    keys.first()
        .map_or_else(|| "?".to_string(), |key| format_key_display(key))
}

fn format_key_pair(down: &[String], up: &[String]) -> String {
    format!("{}/{}", format_first_key(down), format_first_key(up))
}

fn format_key_display(key: &str) -> String {
    match key {
        "Enter" => "↵".to_string(),
        "Space" => "␣".to_string(),
        "Backspace" => "BS".to_string(),
        "Delete" => "Del".to_string(),
        "Up" => "↑".to_string(),
        "Down" => "↓".to_string(),
        "Left" => "←".to_string(),
        "Right" => "→".to_string(),
        "PageUp" => "PgUp".to_string(),
        "PageDown" => "PgDn".to_string(),
        other if other.starts_with("Ctrl+") || other.starts_with("Alt+") => other.replace('+', "-"),
        other => other.to_string(),
    }
}
