use crate::error::{ClientError, ClientResult};

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text typed into the query box, then Enter
    Input(String),
    /// Drill into the N-th visible movie (1-based on screen, 0-based here)
    Open(usize),
    Back,
    Dismiss,
    Help,
    Quit,
}

pub const HELP: &str = "\
  <text>      search (empty line resets to the full catalog)
  :open N     show movies similar to result N
  :back       return to your results
  :dismiss    hide the current error
  :help       show this help
  :quit       exit";

impl Command {
    pub fn parse(line: &str) -> ClientResult<Self> {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Ok(Command::Input(line.trim_end_matches(['\r', '\n']).to_string()));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let command = match name {
            "open" | "o" => {
                let position: usize = parts
                    .next()
                    .ok_or_else(|| ClientError::InvalidInput("usage: :open N".to_string()))?
                    .parse()
                    .map_err(|_| ClientError::InvalidInput("N must be a number".to_string()))?;
                if position == 0 {
                    return Err(ClientError::InvalidInput(
                        "results are numbered from 1".to_string(),
                    ));
                }
                Command::Open(position - 1)
            }
            "back" | "b" => Command::Back,
            "dismiss" | "d" => Command::Dismiss,
            "help" | "h" => Command::Help,
            "quit" | "q" => Command::Quit,
            other => {
                return Err(ClientError::InvalidInput(format!(
                    "unknown command :{}",
                    other
                )))
            }
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_input() {
        assert_eq!(
            Command::parse("space travel\n").unwrap(),
            Command::Input("space travel".to_string())
        );
    }

    #[test]
    fn test_blank_line_is_empty_input() {
        assert_eq!(Command::parse("").unwrap(), Command::Input(String::new()));
        assert_eq!(
            Command::parse("   ").unwrap(),
            Command::Input("   ".to_string())
        );
    }

    #[test]
    fn test_open_is_one_based() {
        assert_eq!(Command::parse(":open 1").unwrap(), Command::Open(0));
        assert_eq!(Command::parse(":o 3").unwrap(), Command::Open(2));
        assert!(Command::parse(":open 0").is_err());
        assert!(Command::parse(":open").is_err());
        assert!(Command::parse(":open two").is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse(":back").unwrap(), Command::Back);
        assert_eq!(Command::parse(":dismiss").unwrap(), Command::Dismiss);
        assert_eq!(Command::parse(":help").unwrap(), Command::Help);
        assert_eq!(Command::parse(" :quit ").unwrap(), Command::Quit);
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::parse(":rewind").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: unknown command :rewind");
    }
}
