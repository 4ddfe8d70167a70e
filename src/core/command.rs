//! Command parser for the : command system

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Screen(String),
    Section(String),

    // Data
    Reload(Option<usize>),
    Refresh,

    // Session
    SignOut,
    SignIn,

    // App
    Help,
    Settings,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "screen" | "go" => match args {
            Some(name) => Command::Screen(name),
            None => Command::Unknown(input.to_string()),
        },
        "tab" | "section" => match args {
            Some(name) => Command::Section(name),
            None => Command::Unknown(input.to_string()),
        },

        "reload" => match args {
            None => Command::Reload(None),
            // 1-based in the UI
            Some(n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Reload(Some(n - 1)),
                _ => Command::Unknown(input.to_string()),
            },
        },
        "refresh" | "r" => Command::Refresh,

        "signout" | "logout" => Command::SignOut,
        "signin" | "login" => Command::SignIn,

        "help" | "h" => Command::Help,
        "settings" | "set" => Command::Settings,
        "quit" | "q" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(
            parse_command("screen dashboard"),
            Command::Screen("dashboard".to_string())
        );
        assert_eq!(parse_command("tab lists"), Command::Section("lists".to_string()));
        assert_eq!(
            parse_command("  section   advanced "),
            Command::Section("advanced".to_string())
        );
        assert_eq!(parse_command("tab"), Command::Unknown("tab".to_string()));
    }

    #[test]
    fn test_parse_reload() {
        assert_eq!(parse_command("reload"), Command::Reload(None));
        assert_eq!(parse_command("reload 2"), Command::Reload(Some(1)));
        assert_eq!(
            parse_command("reload 0"),
            Command::Unknown("reload 0".to_string())
        );
        assert_eq!(
            parse_command("reload two"),
            Command::Unknown("reload two".to_string())
        );
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse_command("signout"), Command::SignOut);
        assert_eq!(parse_command("LOGOUT"), Command::SignOut);
        assert_eq!(parse_command("login"), Command::SignIn);
        assert_eq!(parse_command("refresh"), Command::Refresh);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
