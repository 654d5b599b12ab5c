//! Runs one search off the caller's thread and hands back the result once.
//!
//! The worker lives on the async compute task pool. Its only channel back to
//! the caller is the task's output, which [`SearchSession::poll`] picks up
//! without blocking. Sessions for consecutive turns must not overlap: apply the
//! delivered move before spawning the next one.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bevy_tasks::{AsyncComputeTaskPool, Task, TaskPool};
use futures_lite::future;
use gomoku_core::{Board, Move};
use log::{error, info};

use crate::config::Algorithm;
use crate::error::EngineError;
use crate::search::{search_with_report, SearchContext};

/// How often interactive callers are expected to check for a result.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub type SearchResult = Result<Move, EngineError>;

pub struct SearchSession {
    task: Option<Task<SearchResult>>,
    stop: Arc<AtomicBool>,
    started: Instant,
    algorithm: Algorithm,
}

impl SearchSession {
    /// Dispatches a search over `board`, which should be a copy of the game board.
    pub fn spawn(board: Board, ctx: SearchContext, algorithm: Algorithm) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);
        let thread_pool = AsyncComputeTaskPool::get_or_init(TaskPool::new);

        info!("Starting {} search for '{}' at depth {}", algorithm, ctx.ai, ctx.depth);
        let task = thread_pool.spawn(async move { run_search(board, ctx, algorithm, &worker_stop) });

        Self {
            task: Some(task),
            stop,
            started: Instant::now(),
            algorithm,
        }
    }

    /// Non-blocking check. Yields the result exactly once; `None` before the
    /// worker is done and every time after the result was taken.
    pub fn poll(&mut self) -> Option<SearchResult> {
        let mut task = self.task.take()?;
        match future::block_on(future::poll_once(&mut task)) {
            Some(result) => {
                match &result {
                    Ok(mv) => info!("{} search delivered {} after {:?}", self.algorithm, mv, self.elapsed()),
                    Err(err) => error!("{} search failed after {:?}: {}", self.algorithm, self.elapsed(), err),
                }
                Some(result)
            }
            None => {
                self.task = Some(task);
                None
            }
        }
    }

    /// Polls every `interval` until the result arrives.
    pub fn wait(mut self, interval: Duration) -> SearchResult {
        loop {
            if let Some(result) = self.poll() {
                return result;
            }
            thread::sleep(interval);
        }
    }

    /// Asks the worker to stop before its next root candidate.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// True once the result has been handed out.
    pub fn is_finished(&self) -> bool {
        self.task.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        // An abandoned worker should not keep burning a pool thread.
        if self.task.is_some() {
            self.cancel();
        }
    }
}

fn run_search(board: Board, ctx: SearchContext, algorithm: Algorithm, stop: &AtomicBool) -> SearchResult {
    guarded(|| search_with_report(&board, &ctx, algorithm, Some(stop)).map(|report| report.best_move))
}

// A panic in the worker must still fill the slot.
fn guarded(search: impl FnOnce() -> SearchResult) -> SearchResult {
    panic::catch_unwind(AssertUnwindSafe(search))
        .unwrap_or_else(|payload| Err(EngineError::SearchFailed(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "search worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomoku_core::{Mark, Position};

    #[test]
    fn panic_payloads_become_messages() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "search worker panicked");
    }

    #[test]
    fn worker_panic_becomes_search_failed() {
        let result = guarded(|| panic!("evaluation overflow"));
        assert_eq!(result, Err(EngineError::SearchFailed("evaluation overflow".into())));

        let mv = Position::new(3, 4);
        assert_eq!(guarded(|| Ok(mv)), Ok(mv));
        assert_eq!(guarded(|| Err(EngineError::Cancelled)), Err(EngineError::Cancelled));
    }

    #[test]
    fn panicking_task_is_delivered_through_poll() {
        let thread_pool = AsyncComputeTaskPool::get_or_init(TaskPool::new);
        let task = thread_pool.spawn(async { guarded(|| panic!("worker fault")) });
        let mut session = SearchSession {
            task: Some(task),
            stop: Arc::new(AtomicBool::new(false)),
            started: Instant::now(),
            algorithm: Algorithm::Minimax,
        };
        assert_eq!(
            session.wait(Duration::from_millis(5)),
            Err(EngineError::SearchFailed("worker fault".into()))
        );
    }

    #[test]
    fn spawn_returns_before_the_search_finishes() {
        let mut board = Board::new();
        for (row, col, mark) in [(7, 7, Mark::PlayerOne), (7, 8, Mark::PlayerTwo), (8, 8, Mark::PlayerOne)] {
            board.place(Position::new(row, col), mark).unwrap();
        }
        let ctx = SearchContext::new(Mark::PlayerTwo, Mark::PlayerOne, 3).unwrap();

        let mut session = SearchSession::spawn(board, ctx, Algorithm::Minimax);
        assert_eq!(session.poll(), None);
        assert!(!session.is_finished());

        session.cancel();
        match session.wait(Duration::from_millis(5)) {
            Ok(_) | Err(EngineError::Cancelled) => {}
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn result_is_delivered_once() {
        let mut board = Board::new();
        board.place(Position::new(7, 7), Mark::PlayerOne).unwrap();
        let ctx = SearchContext::new(Mark::PlayerTwo, Mark::PlayerOne, 1).unwrap();

        let mut session = SearchSession::spawn(board, ctx, Algorithm::AlphaBeta);
        let result = loop {
            if let Some(result) = session.poll() {
                break result;
            }
            thread::sleep(Duration::from_millis(5));
        };
        assert!(result.is_ok());
        assert!(session.is_finished());
        assert_eq!(session.poll(), None);
    }

    #[test]
    fn empty_candidate_set_is_reported_through_the_slot() {
        let mut board = Board::with_size(5).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                board.place(Position::new(row, col), Mark::PlayerThree).unwrap();
            }
        }
        let ctx = SearchContext::new(Mark::PlayerOne, Mark::PlayerTwo, 2).unwrap();
        let session = SearchSession::spawn(board, ctx, Algorithm::Minimax);
        assert_eq!(session.wait(Duration::from_millis(5)), Err(EngineError::NoMoveAvailable));
    }
}
