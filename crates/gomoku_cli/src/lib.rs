// Text-mode front end: prompts, turn loop and reporting
pub mod game;
pub mod render;

use std::env;
use std::io::{self, BufRead, Write};
use std::thread;

use gomoku_core::{Board, Mark, Outcome, Position, BOARD_SIZE};
use gomoku_engine::{EngineError, GomokuAI, SearchConfig, DEFAULT_POLL_INTERVAL};
use log::{error, info, warn};

pub use game::{player_name, Controller, Game, GameError, GameMode};
pub use render::render_board;

/// Environment variable that presets the search depth.
pub const DEPTH_ENV_VAR: &str = "GOMOKU_DEPTH";

/// Runs the interactive game on stdin/stdout.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut config = SearchConfig::default();
    if let Ok(text) = env::var(DEPTH_ENV_VAR) {
        if let Err(err) = config.set_depth_from_str(&text) {
            warn!("Ignoring {}: {}", DEPTH_ENV_VAR, err);
        }
    }
    Cli::new(stdin.lock(), stdout.lock(), config).run()
}

/// How an AI turn ended.
enum AiTurn {
    Moved,
    Failed,
}

pub struct Cli<R, W> {
    input: R,
    output: W,
    config: SearchConfig,
}

impl<R: BufRead, W: Write> Cli<R, W> {
    pub fn new(input: R, output: W, config: SearchConfig) -> Self {
        Self { input, output, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Prints `message` and reads one trimmed line; `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Welcome to Gomoku!")?;

        let Some(depth) = self.prompt(&format!(
            "Enter search depth for AI (default {}): ",
            self.config.depth()
        ))?
        else {
            return Ok(());
        };
        if !depth.is_empty() {
            if let Err(err) = self.config.set_depth_from_str(&depth) {
                writeln!(self.output, "{err}. Using depth {}.", self.config.depth())?;
            }
        }
        writeln!(self.output, "Using search depth: {}", self.config.depth())?;

        let Some(mode) = self.choose_mode()? else {
            return Ok(());
        };
        let Some(mut game) = self.setup_game(mode)? else {
            return Ok(());
        };

        loop {
            if !self.play(&mut game)? {
                return Ok(());
            }
            match self.prompt("Play again? (yes/no): ")? {
                Some(answer) if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y") => {
                    game.reset();
                }
                _ => return Ok(()),
            }
        }
    }

    fn choose_mode(&mut self) -> io::Result<Option<GameMode>> {
        let menu: Vec<String> = GameMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| format!("{}) {}", i + 1, mode))
            .collect();
        loop {
            let Some(choice) = self.prompt(&format!("Select mode: {} : ", menu.join("  ")))? else {
                return Ok(None);
            };
            match GameMode::from_choice(&choice) {
                Some(mode) => return Ok(Some(mode)),
                None => writeln!(self.output, "Invalid mode selected. Please enter 1, 2 or 3.")?,
            }
        }
    }

    fn setup_game(&mut self, mode: GameMode) -> io::Result<Option<Game>> {
        loop {
            let Some(choice) = self.prompt("Enter an initial board state? (yes/no, default: no): ")? else {
                return Ok(None);
            };
            match choice.to_ascii_lowercase().as_str() {
                "" | "no" | "n" => return Ok(Some(Game::new(mode))),
                "yes" | "y" => break,
                _ => writeln!(self.output, "Invalid choice. Please enter 'yes' or 'no'.")?,
            }
        }

        let Some(board) = self.read_custom_board()? else {
            return Ok(None);
        };

        let [first, second] = mode.players();
        loop {
            let Some(choice) = self.prompt(&format!(
                "Who moves first? 1) {}  2) {} (default 1): ",
                player_name(first.0),
                player_name(second.0)
            ))?
            else {
                return Ok(None);
            };
            let mark = match choice.as_str() {
                "" | "1" => first.0,
                "2" => second.0,
                _ => {
                    writeln!(self.output, "Please enter 1 or 2.")?;
                    continue;
                }
            };
            match Game::with_board(mode, board.clone(), Some(mark)) {
                Ok(game) => return Ok(Some(game)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn read_custom_board(&mut self) -> io::Result<Option<Board>> {
        writeln!(
            self.output,
            "Enter the board row by row. Use '{}' for empty, '{}' for human, '{}' or '{}' for AI.",
            Mark::Empty,
            Mark::PlayerOne,
            Mark::PlayerTwo,
            Mark::PlayerThree
        )?;
        writeln!(self.output, "Each row should have {BOARD_SIZE} characters.")?;

        let mut board = Board::new();
        loop {
            let mut rows = Vec::with_capacity(board.size());
            while rows.len() < board.size() {
                let Some(row) = self.prompt(&format!("Enter row {}: ", rows.len()))? else {
                    return Ok(None);
                };
                match board.parse_row(rows.len(), &row) {
                    Ok(_) => rows.push(row),
                    Err(err) => writeln!(self.output, "Invalid row input: {err}. Please re-enter it.")?,
                }
            }

            match board.load_rows(&rows) {
                Ok(()) => {
                    writeln!(self.output, "Custom board accepted.")?;
                    return Ok(Some(board));
                }
                Err(err) => writeln!(self.output, "Custom board rejected: {err}. Start again.")?,
            }
        }
    }

    /// Plays until the game ends. Returns `false` if input ran out.
    fn play(&mut self, game: &mut Game) -> io::Result<bool> {
        info!("New game: {}", game.mode());
        loop {
            let winning = match game.outcome() {
                Outcome::Win { cells, .. } => cells.clone(),
                _ => Vec::new(),
            };
            write!(self.output, "{}", render_board(game.board(), game.last_move(), &winning))?;

            match game.outcome() {
                Outcome::Win { mark, .. } => {
                    writeln!(self.output, "{} wins!", player_name(*mark))?;
                    return Ok(true);
                }
                Outcome::Draw => {
                    writeln!(self.output, "Draw!")?;
                    return Ok(true);
                }
                Outcome::InProgress => {}
            }

            match game.current_controller() {
                Controller::Human => {
                    if !self.human_turn(game)? {
                        return Ok(false);
                    }
                }
                Controller::Computer(algorithm) => {
                    let mut config = self.config;
                    config.algorithm = algorithm;
                    if let AiTurn::Failed = self.ai_turn(game, &GomokuAI::with_config(config))? {
                        return Ok(true);
                    }
                }
            }
        }
    }

    fn human_turn(&mut self, game: &mut Game) -> io::Result<bool> {
        let name = player_name(game.current_mark());
        loop {
            let Some(text) = self.prompt(&format!("{name}, enter row and column: "))? else {
                return Ok(false);
            };
            let Some(mv) = parse_move(&text) else {
                writeln!(self.output, "Invalid input. Please enter two numbers, e.g. '7 7'.")?;
                continue;
            };
            match game.apply_move(mv) {
                Ok(_) => return Ok(true),
                Err(err) => writeln!(self.output, "Invalid move: {err}. Try again.")?,
            }
        }
    }

    fn ai_turn(&mut self, game: &mut Game, ai: &GomokuAI) -> io::Result<AiTurn> {
        let name = player_name(game.current_mark());
        let mut session = match ai.start_search(game.board(), game.current_mark(), game.opponent_mark()) {
            Ok(session) => session,
            Err(err) => return self.report_ai_failure(&name, err),
        };

        write!(self.output, "{name} is thinking")?;
        self.output.flush()?;
        let result = loop {
            if let Some(result) = session.poll() {
                break result;
            }
            write!(self.output, ".")?;
            self.output.flush()?;
            thread::sleep(DEFAULT_POLL_INTERVAL);
        };
        writeln!(self.output)?;

        let mv = match result {
            Ok(mv) => mv,
            Err(err) => return self.report_ai_failure(&name, err),
        };
        writeln!(self.output, "{name} plays at {mv}")?;
        if let Err(err) = game.apply_move(mv) {
            // The engine only offers empty cells, so this is a defect.
            error!("Engine produced an illegal move {}: {}", mv, err);
            writeln!(self.output, "{name} produced an illegal move: {err}. Game over.")?;
            return Ok(AiTurn::Failed);
        }
        Ok(AiTurn::Moved)
    }

    fn report_ai_failure(&mut self, name: &str, err: EngineError) -> io::Result<AiTurn> {
        error!("{} could not move: {}", name, err);
        writeln!(self.output, "{name} cannot make a move ({err}). Game over.")?;
        Ok(AiTurn::Failed)
    }
}

/// Accepts "row col" or "row,col".
pub fn parse_move(text: &str) -> Option<Position> {
    let mut parts = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Position::new(row, col))
}
