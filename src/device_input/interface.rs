use crate::image_source::interface::ImageSelection;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    SelectImage(ImageSelection),
    /// The picker was dismissed without choosing anything.
    SelectCancelled,
    Clear,
    ShowHistory,
    ShowAnalyzer,
    Quit,
}

pub trait DeviceInput: Send + Sync {
    fn events(&self) -> std::sync::mpsc::Receiver<UserAction>;
}

/// Parses one console command. `None` for anything unrecognised.
pub fn parse_command(line: &str) -> Option<UserAction> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command.to_lowercase().as_str() {
        "open" | "o" if argument.is_empty() => Some(UserAction::SelectCancelled),
        "open" | "o" => Some(UserAction::SelectImage(ImageSelection::new(argument))),
        "clear" | "c" => Some(UserAction::Clear),
        "history" | "h" => Some(UserAction::ShowHistory),
        "back" | "b" => Some(UserAction::ShowAnalyzer),
        "quit" | "q" | "exit" => Some(UserAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_with_path_selects_image() {
        assert_eq!(
            parse_command("open ./photos/my cat.jpg"),
            Some(UserAction::SelectImage(ImageSelection::new("./photos/my cat.jpg")))
        );
    }

    #[test]
    fn test_open_without_path_is_a_cancel() {
        assert_eq!(parse_command("open"), Some(UserAction::SelectCancelled));
        assert_eq!(parse_command("  open   "), Some(UserAction::SelectCancelled));
    }

    #[test]
    fn test_short_and_long_commands() {
        assert_eq!(parse_command("HISTORY"), Some(UserAction::ShowHistory));
        assert_eq!(parse_command("h"), Some(UserAction::ShowHistory));
        assert_eq!(parse_command("back"), Some(UserAction::ShowAnalyzer));
        assert_eq!(parse_command("clear"), Some(UserAction::Clear));
        assert_eq!(parse_command("q"), Some(UserAction::Quit));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_command("classify everything"), None);
        assert_eq!(parse_command(""), None);
    }
}
