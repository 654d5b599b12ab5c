use std::fmt;

use gomoku_core::{Board, BoardError, Mark, Move, Outcome};
use gomoku_engine::Algorithm;
use log::info;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("'{0}' is not playing in this game")]
    UnknownPlayer(Mark),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Who decides the moves for a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Computer(Algorithm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    HumanVsMinimax,
    HumanVsAlphaBeta,
    MinimaxVsAlphaBeta,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [
        GameMode::HumanVsMinimax,
        GameMode::HumanVsAlphaBeta,
        GameMode::MinimaxVsAlphaBeta,
    ];

    /// The two seats, in default move order.
    pub fn players(self) -> [(Mark, Controller); 2] {
        let human = (Mark::PlayerOne, Controller::Human);
        let minimax = (Mark::PlayerTwo, Controller::Computer(Algorithm::Minimax));
        let alpha_beta = (Mark::PlayerThree, Controller::Computer(Algorithm::AlphaBeta));
        match self {
            GameMode::HumanVsMinimax => [human, minimax],
            GameMode::HumanVsAlphaBeta => [human, alpha_beta],
            GameMode::MinimaxVsAlphaBeta => [minimax, alpha_beta],
        }
    }

    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(GameMode::HumanVsMinimax),
            "2" => Some(GameMode::HumanVsAlphaBeta),
            "3" => Some(GameMode::MinimaxVsAlphaBeta),
            _ => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.players();
        write!(f, "{} vs {}", player_name(first.0), player_name(second.0))
    }
}

/// Display name for a participant mark.
pub fn player_name(mark: Mark) -> String {
    match mark {
        Mark::PlayerOne => format!("Human ({mark})"),
        Mark::PlayerTwo => format!("Minimax AI ({mark})"),
        Mark::PlayerThree => format!("Alpha-Beta AI ({mark})"),
        Mark::Empty => "nobody".to_string(),
    }
}

/// The canonical game: board, seats, whose turn it is and how it ended.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mode: GameMode,
    players: [(Mark, Controller); 2],
    first: usize,
    current: usize,
    last_move: Option<Move>,
    outcome: Outcome,
}

impl Game {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            mode,
            players: mode.players(),
            first: 0,
            current: 0,
            last_move: None,
            outcome: Outcome::InProgress,
        }
    }

    /// Starts from a prepared board. `first` picks who moves first; the
    /// mode's default order is used otherwise.
    pub fn with_board(mode: GameMode, board: Board, first: Option<Mark>) -> Result<Self, GameError> {
        let mut game = Self::new(mode);
        if let Some(mark) = first {
            game.first = game.seat_of(mark).ok_or(GameError::UnknownPlayer(mark))?;
            game.current = game.first;
        }
        game.board = board;
        game.refresh_outcome();
        Ok(game)
    }

    fn seat_of(&self, mark: Mark) -> Option<usize> {
        self.players.iter().position(|&(m, _)| m == mark)
    }

    fn refresh_outcome(&mut self) {
        let (a, b) = (self.players[0].0, self.players[1].0);
        self.outcome = Outcome::of(&self.board, a, b);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn current_mark(&self) -> Mark {
        self.players[self.current].0
    }

    pub fn current_controller(&self) -> Controller {
        self.players[self.current].1
    }

    pub fn opponent_mark(&self) -> Mark {
        self.players[1 - self.current].0
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    /// Places the current player's mark and passes the turn. Rejected moves
    /// leave the game untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<&Outcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let mark = self.current_mark();
        self.board.place(mv, mark)?;
        self.last_move = Some(mv);
        info!("{} plays {}", player_name(mark), mv);

        self.refresh_outcome();
        if !self.is_over() {
            self.current = 1 - self.current;
        }
        Ok(&self.outcome)
    }

    /// Clears the board for a fresh game with the same seats.
    pub fn reset(&mut self) {
        self.board.reset();
        self.current = self.first;
        self.last_move = None;
        self.outcome = Outcome::InProgress;
    }
}
