use courtside_app::page::KeyPress;
use thiserror::Error;

/// One line of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Focus,
    Blur,
    Submit,
    Click(String),
    Pick(String),
    Key(KeyPress),
    Search(String),
    State,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "commands: type <text> | focus | blur | submit | click <element-id> | \
pick <player-id> | key <combo> | search <query> | state | quit";

/// Parses a line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.trim_start().split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (line.trim(), ""),
    };

    let command = match name {
        // The remainder is kept verbatim so surrounding spaces reach the input.
        "type" => Command::Type(rest.to_string()),
        "focus" => Command::Focus,
        "blur" => Command::Blur,
        "submit" => Command::Submit,
        "click" => Command::Click(required(rest, "click")?),
        "pick" => Command::Pick(required(rest, "pick")?),
        "key" => Command::Key(parse_key(&required(rest, "key")?)),
        "search" => Command::Search(required(rest, "search")?),
        "state" => Command::State,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required(rest: &str, command: &'static str) -> Result<String, CommandError> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    Ok(value.to_string())
}

/// `ctrl+k`, `cmd+k`, `escape`, ...
fn parse_key(combo: &str) -> KeyPress {
    let mut parts: Vec<&str> = combo.split('+').map(str::trim).collect();
    let key = parts.pop().unwrap_or_default();

    let key = match key.to_ascii_lowercase().as_str() {
        "esc" | "escape" => "Escape".to_string(),
        "enter" | "return" => "Enter".to_string(),
        _ if key.chars().count() == 1 => key.to_lowercase(),
        _ => key.to_string(),
    };

    let mut press = KeyPress::new(&key);
    for modifier in parts {
        match modifier.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => press = press.with_ctrl(),
            "cmd" | "meta" | "super" => press = press.with_meta(),
            _ => {}
        }
    }
    press
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keeps_text_verbatim() {
        assert_eq!(
            parse_command("type ann lee "),
            Ok(Some(Command::Type("ann lee ".to_string())))
        );
        assert_eq!(parse_command("type"), Ok(Some(Command::Type(String::new()))));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(parse_command("   \n"), Ok(None));
    }

    #[test]
    fn test_key_combos() {
        assert_eq!(
            parse_command("key ctrl+K"),
            Ok(Some(Command::Key(KeyPress::new("k").with_ctrl())))
        );
        assert_eq!(
            parse_command("key cmd+k"),
            Ok(Some(Command::Key(KeyPress::new("k").with_meta())))
        );
        assert_eq!(
            parse_command("key esc"),
            Ok(Some(Command::Key(KeyPress::new("Escape"))))
        );
    }

    #[test]
    fn test_arguments_are_required() {
        assert_eq!(
            parse_command("pick"),
            Err(CommandError::MissingArgument("pick"))
        );
        assert_eq!(
            parse_command("pick 17"),
            Ok(Some(Command::Pick("17".to_string())))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command("dance now"),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }
}
