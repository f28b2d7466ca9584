use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Alive -> Won
/// - Alive -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Alive,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One player's run of games. Owns the live [`Minefield`]; restarting replaces it.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    rule: ExclusionRule,
    seeds: SmallRng,
    seed: u64,
    field: Minefield,
    state: GameState,
    game_number: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rule(config, seed, ExclusionRule::Point)
    }

    /// Starts the first game. `seed` drives the whole session, each game draws its own seed
    /// from it.
    pub fn with_rule(config: GameConfig, seed: u64, rule: ExclusionRule) -> Result<Self> {
        let mut seeds = SmallRng::seed_from_u64(seed);
        let game_seed: u64 = seeds.random();
        let field = start_game(config, rule, game_seed)?;
        let mut session = Self {
            config,
            rule,
            seeds,
            seed: game_seed,
            field,
            state: GameState::Alive,
            game_number: 1,
        };
        session.settle(RevealOutcome::Revealed);
        Ok(session)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn field(&self) -> &Minefield {
        &self.field
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn game_number(&self) -> u32 {
        self.game_number
    }

    /// Seed of the current game's mine layout.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.field.move_cursor(direction);
    }

    pub fn jump_cursor(&mut self, edge: Edge) {
        self.field.jump_cursor(edge);
    }

    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        self.field.set_cursor(coords)
    }

    /// The "open" action at the cursor: chord on a visible tile, reveal on a hidden one, nothing
    /// on a flag.
    pub fn open(&mut self) -> Result<RevealOutcome> {
        self.check_alive()?;

        let cursor = self.field.cursor();
        let tile = self.field.tile(cursor)?;
        let outcome = if tile.visible {
            self.field.chord_reveal(cursor)?
        } else if tile.flagged {
            RevealOutcome::NoChange
        } else {
            self.field.reveal(cursor)?
        };

        self.settle(outcome);
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self) -> Result<MarkOutcome> {
        self.check_alive()?;
        self.field.toggle_flag(self.field.cursor())
    }

    /// Drops the current field and starts a new game with the next seed.
    pub fn restart(&mut self) -> Result<()> {
        let game_seed: u64 = self.seeds.random();
        self.field = start_game(self.config, self.rule, game_seed)?;
        self.seed = game_seed;
        self.state = GameState::Alive;
        self.game_number += 1;
        log::debug!("Game {} started with seed {}", self.game_number, game_seed);
        self.settle(RevealOutcome::Revealed);
        Ok(())
    }

    fn settle(&mut self, outcome: RevealOutcome) {
        match outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::HitMine => {
                self.field.reveal_all_mines();
                self.state = GameState::Lost;
                log::debug!("Game {} lost", self.game_number);
            }
            RevealOutcome::Revealed => {
                if self.field.check_victory() {
                    self.state = GameState::Won;
                    log::debug!("Game {} won", self.game_number);
                }
            }
        }
    }

    fn check_alive(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Setup sequence of a fresh game: mines around the centered cursor, adjacency, then the
/// center tile is opened.
fn start_game(config: GameConfig, rule: ExclusionRule, seed: u64) -> Result<Minefield> {
    let mut field = Minefield::new(config)?;
    let start = field.cursor();
    field.place_mines_with_rule(start, rule, RandomMineGenerator::new(seed))?;
    field.compute_adjacency()?;
    field.reveal(start)?;
    Ok(field)
}
