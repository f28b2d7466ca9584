use smines_core::{GameSession, GameState, Minefield, Tile};

/// Two characters per tile: a cursor marker and the tile symbol. A won board shows its mines.
fn symbol(tile: Tile, state: GameState) -> char {
    match tile {
        Tile { flagged: true, mine: false, .. } if state.is_finished() => '!',
        Tile { flagged: true, .. } => 'F',
        Tile { mine: true, .. } if state == GameState::Won => 'X',
        Tile { visible: false, .. } => '?',
        Tile { mine: true, .. } => 'X',
        Tile { adjacent_mines: 0, .. } => '.',
        Tile { adjacent_mines, .. } => char::from_digit(adjacent_mines.into(), 10).unwrap_or('#'),
    }
}

pub fn render_board(field: &Minefield, state: GameState) -> String {
    let cursor = (usize::from(field.cursor().0), usize::from(field.cursor().1));
    let mut out = String::new();

    for (row, tiles) in field.tiles().outer_iter().enumerate() {
        for (col, &tile) in tiles.iter().enumerate() {
            let marker = if (row, col) == cursor {
                '>'
            } else {
                ' '
            };
            out.push(marker);
            out.push(symbol(tile, state));
        }
        out.push('\n');
    }
    out
}

pub fn render_scoreboard(session: &GameSession) -> String {
    let field = session.field();
    let headline = match session.state() {
        GameState::Alive => format!("Game {}", session.game_number()),
        GameState::Won => "YOU WIN!".to_string(),
        GameState::Lost => "YOU DIED!".to_string(),
    };

    format!(
        "{headline}\nFlags: {}\nMines: {}/{}\n",
        field.placed_flags(),
        field.mines_left(),
        field.mine_count()
    )
}

pub fn render(session: &GameSession) -> String {
    let mut out = render_scoreboard(session);
    out.push_str(&render_board(session.field(), session.state()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Minefield {
        let mut field = Minefield::with_layout(2, 3, &[(0, 0)]).unwrap();
        field.compute_adjacency().unwrap();
        field
    }

    #[test]
    fn hidden_board_shows_cursor() {
        let field = field();
        assert_eq!(field.cursor(), (1, 1));
        assert_eq!(render_board(&field, GameState::Alive), " ? ? ?\n ?>? ?\n");
    }

    #[test]
    fn numbers_zeros_and_flags() {
        let mut field = field();
        field.reveal((1, 2)).unwrap();
        field.toggle_flag((0, 0)).unwrap();

        assert_eq!(render_board(&field, GameState::Alive), " F 1 .\n ?>1 .\n");
    }

    #[test]
    fn finished_board_exposes_mines_and_wrong_flags() {
        let mut field = field();
        field.toggle_flag((1, 0)).unwrap();
        field.reveal_all_mines();

        assert_eq!(render_board(&field, GameState::Lost), " X ? ?\n !>? ?\n");
    }

    #[test]
    fn won_board_shows_mines() {
        let mut field = field();
        field.reveal((1, 2)).unwrap();
        field.reveal((1, 0)).unwrap();
        assert!(field.check_victory());

        assert_eq!(render_board(&field, GameState::Alive), " ? 1 .\n 1>1 .\n");
        assert_eq!(render_board(&field, GameState::Won), " X 1 .\n 1>1 .\n");
    }

    #[test]
    fn scoreboard_counts_flags() {
        let session = GameSession::new(smines_core::GameConfig::intermediate(), 4).unwrap();
        let text = render_scoreboard(&session);
        assert!(text.starts_with("Game 1\n"));
        assert!(text.contains("Flags: 0\n"));
        assert!(text.contains("Mines: 40/40\n"));
    }
}
