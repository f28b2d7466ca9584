use smines_core::{Coord2, Direction, Edge, GameSession};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command `{0}`, try left/right/up/down, home/end/top/bottom, goto, open, flag, restart, show or quit")]
    Unknown(String),
    #[error("Usage: goto <row> <col>")]
    BadGoto,
}

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Jump(Edge),
    Goto(Coord2),
    Open,
    Flag,
    Restart,
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        use Command::*;

        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Show);
        };

        let command = match name {
            "left" | "h" => Move(Direction::Left),
            "down" | "j" => Move(Direction::Down),
            "up" | "k" => Move(Direction::Up),
            "right" | "l" => Move(Direction::Right),
            "home" | "0" | "^" => Jump(Edge::Left),
            "end" | "$" => Jump(Edge::Right),
            "top" | "g" => Jump(Edge::Top),
            "bottom" | "G" => Jump(Edge::Bottom),
            "goto" => {
                let row = words.next().and_then(|word| word.parse().ok());
                let col = words.next().and_then(|word| word.parse().ok());
                match (row, col, words.next()) {
                    (Some(row), Some(col), None) => Goto((row, col)),
                    _ => return Err(CommandError::BadGoto),
                }
            }
            "open" | "o" | "reveal" => Open,
            "flag" | "f" => Flag,
            "restart" | "r" => Restart,
            "show" => Show,
            "quit" | "q" => Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        if !matches!(command, Goto(_)) && words.next().is_some() {
            return Err(CommandError::Unknown(line.trim().to_string()));
        }
        Ok(command)
    }
}

/// Whether the input loop should keep reading after a command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Command {
    pub fn apply(self, session: &mut GameSession) -> smines_core::Result<Flow> {
        use Command::*;

        match self {
            Move(direction) => session.move_cursor(direction),
            Jump(edge) => session.jump_cursor(edge),
            Goto(coords) => session.set_cursor(coords)?,
            Open => {
                let outcome = session.open()?;
                log::debug!("Open at {:?}: {:?}", session.field().cursor(), outcome);
            }
            Flag => {
                session.toggle_flag()?;
            }
            Restart => session.restart()?,
            Show => {}
            Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smines_core::{GameConfig, GameError};

    #[test]
    fn parses_vi_keys_and_words() {
        assert_eq!("h".parse(), Ok(Command::Move(Direction::Left)));
        assert_eq!("down".parse(), Ok(Command::Move(Direction::Down)));
        assert_eq!("$".parse(), Ok(Command::Jump(Edge::Right)));
        assert_eq!("G".parse(), Ok(Command::Jump(Edge::Bottom)));
        assert_eq!("  flag ".parse(), Ok(Command::Flag));
        assert_eq!("".parse(), Ok(Command::Show));
    }

    #[test]
    fn parses_goto() {
        assert_eq!("goto 3 7".parse(), Ok(Command::Goto((3, 7))));
        assert_eq!("goto 3".parse::<Command>(), Err(CommandError::BadGoto));
        assert_eq!("goto 3 x".parse::<Command>(), Err(CommandError::BadGoto));
        assert_eq!("goto 1 2 3".parse::<Command>(), Err(CommandError::BadGoto));
    }

    #[test]
    fn rejects_unknown_input() {
        assert_eq!(
            "dig".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_string()))
        );
        assert!("open now".parse::<Command>().is_err());
    }

    #[test]
    fn commands_drive_the_session() {
        let mut session = GameSession::new(GameConfig::intermediate(), 17).unwrap();

        assert_eq!(Command::Jump(Edge::Top).apply(&mut session), Ok(Flow::Continue));
        assert_eq!(Command::Jump(Edge::Left).apply(&mut session), Ok(Flow::Continue));
        assert_eq!(session.field().cursor(), (0, 0));

        assert_eq!(
            Command::Goto((16, 0)).apply(&mut session),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(Command::Restart.apply(&mut session), Ok(Flow::Continue));
        assert_eq!(session.game_number(), 2);
        assert_eq!(Command::Quit.apply(&mut session), Ok(Flow::Quit));
    }
}
