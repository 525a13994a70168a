use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Initial state, moves are accepted
    #[default]
    InProgress,
    /// Every safe tile was revealed
    Won,
    /// A mine was revealed or the player quit
    Lost,
}

impl GameState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        match self {
            Self::InProgress => false,
            Self::Won => true,
            Self::Lost => true,
        }
    }
}

/// Represents a game from start to finish: the mines, what the player sees, and the cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: GameConfig,
    minefield: Minefield,
    tiles: Array2<TileState>,
    /// Seed for the mines that are yet to be placed, `None` once they are.
    pending_seed: Option<u64>,
    flags_placed: CellCount,
    moves_made: u32,
    cursor: Coord2,
    state: GameState,
    triggered_mine: Option<Coord2>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Creates an empty board, mines are placed on the first reveal so it can never lose.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        let mut board = Self::from_parts(config, Minefield::empty(config.size));
        board.pending_seed = Some(seed);
        Ok(board)
    }

    /// Creates a board with mines already in place, the first reveal is not protected.
    pub fn with_minefield(minefield: Minefield) -> Result<Self> {
        let size = minefield.size();
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        let config = GameConfig::new_unchecked(size, minefield.mine_count());
        Ok(Self::from_parts(config, minefield))
    }

    fn from_parts(config: GameConfig, minefield: Minefield) -> Self {
        let (size_x, size_y) = config.size;
        Self {
            config,
            minefield,
            tiles: Array2::default(config.size.to_nd_index()),
            pending_seed: None,
            flags_placed: 0,
            moves_made: 0,
            cursor: (size_x.saturating_sub(1) / 2, size_y.saturating_sub(1) / 2),
            state: Default::default(),
            triggered_mine: None,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    /// Target number of mines, also the flag supply.
    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn flags_left(&self) -> CellCount {
        self.config.mines.saturating_sub(self.flags_placed)
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn mines_placed(&self) -> bool {
        self.pending_seed.is_none()
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// The mine that ended the game, if one did.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many seconds have passed since the first reveal, 0 if there was none
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(Tile {
            content: self.content_at(coords),
            state: self.tiles[coords.to_nd_index()],
        })
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.minefield.iter_neighbors(coords))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.minefield.adjacent_mine_count(coords))
    }

    pub fn glyph_at(&self, coords: Coord2) -> Result<Glyph> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.glyph_unchecked(coords))
    }

    /// Once the game is over the whole board is shown and marks are dropped.
    pub(crate) fn glyph_unchecked(&self, coords: Coord2) -> Glyph {
        let content = self.content_at(coords);
        if self.state.is_finished() {
            return Glyph::shown(content);
        }

        match self.tiles[coords.to_nd_index()] {
            TileState::Hidden => Glyph::Hidden,
            TileState::Flagged => Glyph::Flagged,
            TileState::Questioned => Glyph::Questioned,
            TileState::Revealed => Glyph::shown(content),
        }
    }

    fn content_at(&self, coords: Coord2) -> TileContent {
        TileContent::from_parts(
            self.minefield[coords],
            self.minefield.adjacent_mine_count(coords),
        )
    }

    /// Places the cursor directly, e.g. for pointer input.
    pub fn set_cursor(&mut self, coords: Coord2) -> Result<()> {
        self.cursor = self.minefield.validate_coords(coords)?;
        Ok(())
    }

    /// Applies one action at the cursor. Actions that make no sense in the current position are no-ops, and nothing
    /// is accepted once the game has ended.
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        use Action::*;

        if self.state.is_finished() {
            log::trace!("Ignoring {:?}, game already ended", action);
            return ActionOutcome::NoChange;
        }

        match action {
            MoveUp => self.move_cursor(Direction::Up),
            MoveDown => self.move_cursor(Direction::Down),
            MoveLeft => self.move_cursor(Direction::Left),
            MoveRight => self.move_cursor(Direction::Right),
            ToggleFlag => self.toggle_flag(),
            ToggleQuestion => self.toggle_question(),
            Reveal => self.reveal(),
            Quit => self.forfeit(),
        }
    }

    fn move_cursor(&mut self, direction: Direction) -> ActionOutcome {
        let (x, y) = self.cursor;
        let (size_x, size_y) = self.size();
        let next = match direction {
            Direction::Up => (x, y.saturating_sub(1)),
            Direction::Down => (x, (y + 1).min(size_y - 1)),
            Direction::Left => (x.saturating_sub(1), y),
            Direction::Right => ((x + 1).min(size_x - 1), y),
        };

        if next == self.cursor {
            ActionOutcome::NoChange
        } else {
            self.cursor = next;
            ActionOutcome::CursorMoved
        }
    }

    fn toggle_flag(&mut self) -> ActionOutcome {
        use ActionOutcome::*;

        let index = self.cursor.to_nd_index();
        let tile = self.tiles[index];
        match tile {
            TileState::Hidden if self.flags_placed < self.config.mines => {
                self.tiles[index] = TileState::Flagged;
                self.flags_placed += 1;
                MarkChanged
            }
            TileState::Flagged => {
                self.tiles[index] = TileState::Hidden;
                self.flags_placed -= 1;
                MarkChanged
            }
            _ => NoChange,
        }
    }

    fn toggle_question(&mut self) -> ActionOutcome {
        use ActionOutcome::*;

        let index = self.cursor.to_nd_index();
        let tile = self.tiles[index];
        match tile {
            TileState::Hidden => {
                self.tiles[index] = TileState::Questioned;
                MarkChanged
            }
            TileState::Questioned => {
                self.tiles[index] = TileState::Hidden;
                MarkChanged
            }
            _ => NoChange,
        }
    }

    fn reveal(&mut self) -> ActionOutcome {
        use ActionOutcome::*;

        if self.moves_made == 0 {
            if let Some(seed) = self.pending_seed.take() {
                self.place_mines(seed);
            }
        }
        self.moves_made += 1;

        let coords = self.cursor;
        match (self.tiles[coords.to_nd_index()], self.minefield[coords]) {
            (TileState::Flagged | TileState::Questioned, _) => {
                log::debug!("Tile at {:?} is marked, not revealing", coords);
                NoChange
            }
            (TileState::Revealed, _) => NoChange,
            (TileState::Hidden, true) => {
                self.mark_started();
                self.tiles[coords.to_nd_index()] = TileState::Revealed;
                self.triggered_mine = Some(coords);
                self.end_game(false);
                HitMine
            }
            (TileState::Hidden, false) => {
                self.mark_started();
                let count = self.minefield.adjacent_mine_count(coords);
                log::debug!("Reveal tile at {:?}, mine count: {}", coords, count);
                if count == 0 {
                    self.flood_fill_unchecked(coords);
                } else {
                    self.open_tile(coords);
                }

                if self.all_safe_revealed() {
                    self.end_game(true);
                    Won
                } else {
                    Revealed
                }
            }
        }
    }

    fn forfeit(&mut self) -> ActionOutcome {
        log::debug!("Player quit after {} moves", self.moves_made);
        self.end_game(false);
        ActionOutcome::Forfeited
    }

    fn place_mines(&mut self, seed: u64) {
        self.minefield = RandomMinefieldGenerator::new(seed, self.cursor).generate(self.config);
    }

    /// Reveals the blank region around `coords` together with the numbered tiles that border it, returns how many
    /// tiles were newly revealed.
    ///
    /// Starting from a numbered tile or a mine does nothing, as does starting inside a region that is already open.
    /// Nothing is opened before the mines are placed or after the game has ended. Opening the last safe tile wins.
    pub fn flood_fill(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.minefield.validate_coords(coords)?;
        if self.state.is_finished() || !self.mines_placed() {
            return Ok(0);
        }

        let opened = self.flood_fill_unchecked(coords);
        if opened > 0 {
            self.mark_started();
            if self.all_safe_revealed() {
                self.end_game(true);
            }
        }
        Ok(opened)
    }

    fn flood_fill_unchecked(&mut self, start: Coord2) -> CellCount {
        if self.minefield[start] || self.minefield.adjacent_mine_count(start) != 0 {
            return 0;
        }

        let mut opened = 0;
        if self.tiles[start.to_nd_index()].is_unrevealed() {
            self.open_tile(start);
            opened += 1;
        }

        let mut visited: Array2<bool> = Array2::default(self.size().to_nd_index());
        visited[start.to_nd_index()] = true;
        let mut to_visit = vec![start];
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(current) = to_visit.pop() {
            for pos in self.minefield.iter_neighbors(current) {
                if visited[pos.to_nd_index()] {
                    continue;
                }
                visited[pos.to_nd_index()] = true;

                // mines and open tiles are left alone
                if self.minefield[pos] || !self.tiles[pos.to_nd_index()].is_unrevealed() {
                    continue;
                }

                let count = self.minefield.adjacent_mine_count(pos);
                self.open_tile(pos);
                opened += 1;
                log::trace!("Flood opened tile at {:?}, mine count: {}", pos, count);

                // numbered tiles bound the region
                if count == 0 {
                    to_visit.push(pos);
                }
            }
        }

        opened
    }

    /// Reveals a single tile, a flag on it goes back to the supply.
    fn open_tile(&mut self, coords: Coord2) {
        let tile = &mut self.tiles[coords.to_nd_index()];
        if *tile == TileState::Flagged {
            self.flags_placed -= 1;
        }
        *tile = TileState::Revealed;
    }

    fn all_safe_revealed(&self) -> bool {
        iter_coords(self.size())
            .all(|pos| self.minefield[pos] || !self.tiles[pos.to_nd_index()].is_unrevealed())
    }

    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        let now = Utc::now();
        self.ended_at = Some(now);
        log::debug!("{:?} at {} after {} moves", self.state, now, self.moves_made);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::with_minefield(Minefield::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    fn reveal_at(board: &mut Board, coords: Coord2) -> ActionOutcome {
        board.set_cursor(coords).unwrap();
        board.apply(Action::Reveal)
    }

    #[test]
    fn cursor_starts_in_the_middle() {
        assert_eq!(Board::new(Difficulty::Easy.config(), 0).unwrap().cursor(), (4, 4));
        assert_eq!(Board::new(Difficulty::Medium.config(), 0).unwrap().cursor(), (7, 7));
        assert_eq!(Board::new(Difficulty::Hard.config(), 0).unwrap().cursor(), (14, 7));
    }

    #[test]
    fn cursor_is_clamped_to_the_board() {
        let mut board = board((3, 2), &[]);
        assert_eq!(board.cursor(), (1, 0));

        assert_eq!(board.apply(Action::MoveUp), ActionOutcome::NoChange);
        assert_eq!(board.apply(Action::MoveRight), ActionOutcome::CursorMoved);
        assert_eq!(board.apply(Action::MoveRight), ActionOutcome::NoChange);
        assert_eq!(board.apply(Action::MoveDown), ActionOutcome::CursorMoved);
        assert_eq!(board.apply(Action::MoveDown), ActionOutcome::NoChange);
        assert_eq!(board.cursor(), (2, 1));
        assert_eq!(board.state(), GameState::InProgress);
    }

    #[test]
    fn set_cursor_rejects_out_of_bounds() {
        let mut board = board((3, 3), &[]);
        assert_eq!(
            board.set_cursor((3, 0)),
            Err(GameError::OutOfBounds { coords: (3, 0), size: (3, 3) })
        );
        assert_eq!(board.cursor(), (1, 1));
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_tile() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(reveal_at(&mut board, (0, 0)), ActionOutcome::HitMine);
        assert_eq!(board.state(), GameState::Lost);
        assert_eq!(board.triggered_mine(), Some((0, 0)));
        assert!(board.get((0, 0)).unwrap().is_revealed());
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(reveal_at(&mut board, (0, 0)), ActionOutcome::Won);
        assert_eq!(board.get((0, 0)).unwrap().content, TileContent::Empty);
        assert!(board.get((1, 1)).unwrap().is_revealed());
        assert_eq!(board.get((1, 1)).unwrap().content, TileContent::Adjacent(1));
        assert!(!board.get((2, 2)).unwrap().is_revealed());
    }

    #[test]
    fn reveal_numbered_tile_opens_only_itself() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(reveal_at(&mut board, (1, 1)), ActionOutcome::Revealed);
        assert_eq!(board.glyph_at((1, 1)), Ok(Glyph::Number(1)));
        assert_eq!(board.glyph_at((0, 0)), Ok(Glyph::Hidden));
    }

    #[test]
    fn flood_fill_propagates_diagonally() {
        // the two blank corners only touch through (1, 1) and (2, 2)
        let mut board = board((4, 4), &[(3, 0), (0, 3)]);
        assert_eq!(board.adjacent_mine_count((2, 1)), Ok(1));
        assert_eq!(board.adjacent_mine_count((1, 2)), Ok(1));

        assert_eq!(reveal_at(&mut board, (0, 0)), ActionOutcome::Won);
        assert!(board.get((3, 3)).unwrap().is_revealed());
        assert!(!board.get((3, 0)).unwrap().is_revealed());
    }

    #[test]
    fn flood_fill_from_numbered_tile_is_noop() {
        let mut board = board((3, 3), &[(2, 2)]);
        assert_eq!(board.flood_fill((1, 1)), Ok(0));
        assert_eq!(board.flood_fill((2, 2)), Ok(0));
        assert!(board.flood_fill((3, 3)).is_err());
    }

    #[test]
    fn flood_fill_clears_marks_and_returns_flags() {
        let mut board = board((4, 1), &[(3, 0)]);
        board.set_cursor((0, 0)).unwrap();
        board.apply(Action::ToggleFlag);
        board.set_cursor((1, 0)).unwrap();
        board.apply(Action::ToggleQuestion);
        assert_eq!(board.flags_placed(), 1);

        assert_eq!(board.flood_fill((0, 0)), Ok(3));
        assert_eq!(board.flags_placed(), 0);
        assert_eq!(board.get((0, 0)).unwrap().state, TileState::Revealed);
        assert_eq!(board.get((1, 0)).unwrap().state, TileState::Revealed);
        assert_eq!(board.get((2, 0)).unwrap().content, TileContent::Adjacent(1));
        assert_eq!(board.get((3, 0)).unwrap().state, TileState::Hidden);
        // the only safe tiles were opened by the flood
        assert_eq!(board.state(), GameState::Won);
    }

    #[test]
    fn flood_fill_short_of_last_safe_tile_keeps_playing() {
        let mut board = board((5, 1), &[(2, 0)]);

        assert_eq!(board.flood_fill((0, 0)), Ok(2));
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.flood_fill((4, 0)), Ok(2));
        assert_eq!(board.state(), GameState::Won);
        assert_eq!(board.apply(Action::MoveLeft), ActionOutcome::NoChange);
    }

    #[test]
    fn flood_fill_leaves_finished_board_alone() {
        let mut board = board((4, 1), &[(3, 0)]);
        assert_eq!(reveal_at(&mut board, (3, 0)), ActionOutcome::HitMine);
        let before = board.clone();

        assert_eq!(board.flood_fill((0, 0)), Ok(0));
        assert_eq!(board, before);
        assert!(!board.get((0, 0)).unwrap().is_revealed());
    }

    #[test]
    fn flood_fill_waits_for_mines() {
        let mut board = Board::new(Difficulty::Easy.config(), 7).unwrap();
        assert_eq!(board.flood_fill((4, 4)), Ok(0));
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.get((4, 4)).unwrap().state, TileState::Hidden);
    }

    #[test]
    fn minefield_without_tiles_is_rejected() {
        let minefield = Minefield::empty((0, 5));
        assert_eq!(Board::with_minefield(minefield), Err(GameError::EmptyBoard));
        assert_eq!(Board::with_minefield(Minefield::empty((5, 0))), Err(GameError::EmptyBoard));
    }

    #[test]
    fn question_and_flag_exclude_each_other() {
        let mut board = board((3, 3), &[(0, 0)]);
        board.set_cursor((0, 0)).unwrap();

        assert_eq!(board.apply(Action::ToggleQuestion), ActionOutcome::MarkChanged);
        assert_eq!(board.apply(Action::ToggleFlag), ActionOutcome::NoChange);
        assert_eq!(board.apply(Action::ToggleQuestion), ActionOutcome::MarkChanged);
        assert_eq!(board.apply(Action::ToggleFlag), ActionOutcome::MarkChanged);
        assert_eq!(board.apply(Action::ToggleQuestion), ActionOutcome::NoChange);
        assert!(board.get((0, 0)).unwrap().is_flagged());
    }

    #[test]
    fn marks_are_ignored_on_revealed_tiles() {
        let mut board = board((3, 3), &[(0, 0)]);
        assert_eq!(reveal_at(&mut board, (1, 1)), ActionOutcome::Revealed);

        assert_eq!(board.apply(Action::ToggleFlag), ActionOutcome::NoChange);
        assert_eq!(board.apply(Action::ToggleQuestion), ActionOutcome::NoChange);
        assert_eq!(board.flags_placed(), 0);
    }

    #[test]
    fn first_reveal_places_mines_lazily() {
        let mut board = Board::new(Difficulty::Easy.config(), 99).unwrap();
        assert!(!board.mines_placed());

        board.apply(Action::ToggleFlag);
        board.apply(Action::MoveLeft);
        assert!(!board.mines_placed());
        assert_eq!(board.moves_made(), 0);

        assert_ne!(board.apply(Action::Reveal), ActionOutcome::HitMine);
        assert!(board.mines_placed());
        assert_eq!(board.moves_made(), 1);
    }

    #[test]
    fn quit_forfeits_the_game() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.apply(Action::Quit), ActionOutcome::Forfeited);
        assert_eq!(board.state(), GameState::Lost);
        assert_eq!(board.triggered_mine(), None);
        assert_eq!(board.apply(Action::MoveLeft), ActionOutcome::NoChange);
        assert_eq!(board.apply(Action::Reveal), ActionOutcome::NoChange);
    }

    #[test]
    fn finished_board_shows_everything() {
        let mut board = board((3, 1), &[(0, 0)]);
        board.set_cursor((0, 0)).unwrap();
        board.apply(Action::ToggleFlag);
        assert_eq!(board.glyph_at((0, 0)), Ok(Glyph::Flagged));

        assert_eq!(reveal_at(&mut board, (2, 0)), ActionOutcome::Won);
        assert_eq!(board.glyph_at((0, 0)), Ok(Glyph::Mine));
        assert_eq!(board.glyph_at((1, 0)), Ok(Glyph::Number(1)));
        assert_eq!(board.glyph_at((2, 0)), Ok(Glyph::Empty));
    }

    #[test]
    fn timer_runs_from_first_reveal() {
        let mut board = board((3, 3), &[(0, 0)]);
        assert_eq!(board.elapsed_secs(), 0);
        reveal_at(&mut board, (0, 0));
        assert!(board.elapsed_secs() < 5);
    }
}
