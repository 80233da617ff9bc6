// src/search.rs
//! Fixed-depth minimax with alpha-beta pruning.
//!
//! White maximizes, Black minimizes, and plies alternate strictly. Depth comes from a small
//! strength table and never changes mid-search; there is no clock. The search is plain synchronous
//! recursion over immutable boards. [`spawn_search`] runs it on a worker thread for callers that
//! must stay responsive.

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::attack::is_check;
use crate::board::Board;
use crate::error::SearchError;
use crate::evaluation::{evaluate, piece_value};
use crate::legal::{apply_move, get_all_valid_moves, has_valid_move};
use crate::types::{Color, Move};

/// Score for the side delivering mate. Remaining depth is added so quicker mates score higher.
pub const CHECKMATE_SCORE: i32 = 1_000_000;
const INFINITY: i32 = 1_000_000_000;
const PROMOTION_ORDER_BONUS: i32 = 800;

// --- Configuration ---

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Strength {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Strength {
    pub fn depth(&self) -> u32 {
        match self {
            Strength::Easy => 1,
            Strength::Medium => 2,
            Strength::Hard => 3,
        }
    }

    /// Maps a numeric level onto the table: 0-1 easy, 2 medium, 3 and above hard.
    pub fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Strength::Easy,
            2 => Strength::Medium,
            _ => Strength::Hard,
        }
    }
}

/// How to choose among root moves with the same best score.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// First move in ordered scan order.
    #[default]
    FirstInScan,
    /// Uniform choice among tied moves, reproducible for a given seed.
    Random { seed: u64 },
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub strength: Strength,
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl SearchConfig {
    pub fn new(strength: Strength) -> Self {
        SearchConfig { strength, tie_break: TieBreak::FirstInScan }
    }
}

/// Result of a completed search.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// White-positive score of `best_move`.
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

// --- Move Ordering ---

/// Captures-first ordering key: `10 * victim - attacker`, plus a flat promotion bonus.
pub fn move_order_score(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(captured) = mv.captured {
        score += 10 * piece_value(captured.kind) - piece_value(mv.piece.kind);
    }
    if mv.promotion.is_some() {
        score += PROMOTION_ORDER_BONUS;
    }
    score
}

/// Sorts by descending ordering key. The sort is stable, so ties keep scan order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(move_order_score(mv)));
}

// --- Search ---

/// Picks a move for `color` at the depth `strength` selects, or `None` when `color` has no legal
/// move.
pub fn get_best_move(board: &Board, color: Color, strength: Strength) -> Option<Move> {
    search(board, color, &SearchConfig::new(strength)).map(|outcome| outcome.best_move)
}

/// Runs the search and reports the chosen move together with its score and node count.
pub fn search(board: &Board, color: Color, config: &SearchConfig) -> Option<SearchOutcome> {
    let started = Instant::now();
    let depth = config.strength.depth();
    let maximizing = color == Color::White;

    let mut moves = get_all_valid_moves(board, color);
    if moves.is_empty() {
        debug!("search: {:?} has no legal moves", color);
        return None;
    }
    order_moves(&mut moves);

    // With random tie-breaking the window is widened by one so equal scores come back exact.
    let widen = matches!(config.tie_break, TieBreak::Random { .. });
    let mut nodes = 1u64;
    let mut alpha = -INFINITY;
    let mut beta = INFINITY;
    let mut best_score: Option<i32> = None;
    let mut tied: Vec<Move> = Vec::new();

    for mv in &moves {
        let child = apply_move(board, mv);
        let score = if maximizing {
            let window_alpha = if widen { alpha - 1 } else { alpha };
            alphabeta(&child, depth - 1, window_alpha, beta, false, &mut nodes)
        } else {
            let window_beta = if widen { beta + 1 } else { beta };
            alphabeta(&child, depth - 1, alpha, window_beta, true, &mut nodes)
        };
        trace!("search: {} scores {}", mv, score);

        let improves = match best_score {
            None => true,
            Some(best) if maximizing => score > best,
            Some(best) => score < best,
        };
        if improves {
            best_score = Some(score);
            tied.clear();
            tied.push(*mv);
        } else if best_score == Some(score) {
            tied.push(*mv);
        }

        if maximizing {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
    }

    let score = best_score?;
    let best_move = match config.tie_break {
        TieBreak::FirstInScan => *tied.first()?,
        TieBreak::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            tied[rng.random_range(0..tied.len())]
        }
    };

    debug!(
        "search: {:?} depth {} chose {} (score {}, {} nodes, {} tied) in {:?}",
        color, depth, best_move, score, nodes, tied.len(), started.elapsed()
    );
    Some(SearchOutcome { best_move, score, depth, nodes })
}

/// Score of a node whose side to move has no legal move.
fn terminal_score(board: &Board, to_move: Color, depth: u32) -> i32 {
    if !is_check(board, to_move) {
        return 0; // Stalemate
    }
    let mate = CHECKMATE_SCORE + depth as i32;
    match to_move {
        Color::White => -mate,
        Color::Black => mate,
    }
}

fn alphabeta(board: &Board, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;
    let to_move = if maximizing { Color::White } else { Color::Black };

    // Terminal positions take precedence over the depth limit.
    if depth == 0 {
        if !has_valid_move(board, to_move) {
            return terminal_score(board, to_move, depth);
        }
        return evaluate(board);
    }
    let mut moves = get_all_valid_moves(board, to_move);
    if moves.is_empty() {
        return terminal_score(board, to_move, depth);
    }
    order_moves(&mut moves);

    if maximizing {
        let mut best = -INFINITY;
        for mv in &moves {
            let score = alphabeta(&apply_move(board, mv), depth - 1, alpha, beta, false, nodes);
            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in &moves {
            let score = alphabeta(&apply_move(board, mv), depth - 1, alpha, beta, true, nodes);
            best = best.min(score);
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

// --- Background Search ---

/// State of a background search as seen by [`SearchHandle::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPoll {
    Running,
    /// The worker's result. Repeated polls keep returning it.
    Finished(Option<SearchOutcome>),
    Cancelled,
    /// The worker exited without reporting.
    Lost,
}

/// Handle to a search running on its own thread.
///
/// Cancelling does not interrupt the recursion; the worker finishes and its result is discarded.
pub struct SearchHandle {
    receiver: mpsc::Receiver<Option<SearchOutcome>>,
    cancelled: Arc<AtomicBool>,
    delivered: Cell<Option<Option<SearchOutcome>>>,
}

/// Starts `search` on a worker thread and returns immediately.
pub fn spawn_search(board: Board, color: Color, config: SearchConfig) -> Result<SearchHandle, SearchError> {
    let (sender, receiver) = mpsc::channel();
    let cancelled = Arc::new(AtomicBool::new(false));
    let worker_cancelled = Arc::clone(&cancelled);

    thread::Builder::new()
        .name("chess-search".to_string())
        .spawn(move || {
            let outcome = search(&board, color, &config);
            if worker_cancelled.load(Ordering::Acquire) {
                debug!("background search for {:?} finished after cancellation; result dropped", color);
                return;
            }
            // The receiver may already be gone; nothing to do then.
            let _ = sender.send(outcome);
        })
        .map_err(SearchError::Spawn)?;

    Ok(SearchHandle { receiver, cancelled, delivered: Cell::new(None) })
}

impl SearchHandle {
    /// Discards the eventual result. Safe to call more than once.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Non-blocking check for a result.
    pub fn poll(&self) -> SearchPoll {
        if let Some(state) = self.settled() {
            return state;
        }
        match self.receiver.try_recv() {
            Ok(outcome) => self.deliver(outcome),
            Err(TryRecvError::Empty) => SearchPoll::Running,
            Err(TryRecvError::Disconnected) => SearchPoll::Lost,
        }
    }

    /// Waits up to `timeout` for a result.
    pub fn wait_timeout(&self, timeout: Duration) -> SearchPoll {
        if let Some(state) = self.settled() {
            return state;
        }
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => self.deliver(outcome),
            Err(RecvTimeoutError::Timeout) => SearchPoll::Running,
            Err(RecvTimeoutError::Disconnected) => SearchPoll::Lost,
        }
    }

    /// Blocks until the worker reports.
    pub fn wait(self) -> Result<Option<SearchOutcome>, SearchError> {
        match self.settled() {
            Some(SearchPoll::Cancelled) => Err(SearchError::Cancelled),
            Some(SearchPoll::Finished(outcome)) => Ok(outcome),
            _ => self.receiver.recv().map_err(|_| SearchError::WorkerLost),
        }
    }

    fn settled(&self) -> Option<SearchPoll> {
        if self.is_cancelled() {
            return Some(SearchPoll::Cancelled);
        }
        self.delivered.get().map(SearchPoll::Finished)
    }

    fn deliver(&self, outcome: Option<SearchOutcome>) -> SearchPoll {
        self.delivered.set(Some(outcome));
        SearchPoll::Finished(outcome)
    }
}

/// Searches in the background and waits at most `limit`. Past the limit the search is cancelled
/// and an easy-strength search answers instead.
pub fn search_within(
    board: &Board,
    color: Color,
    config: SearchConfig,
    limit: Duration,
) -> Result<Option<SearchOutcome>, SearchError> {
    let handle = spawn_search(board.clone(), color, config)?;
    match handle.wait_timeout(limit) {
        SearchPoll::Finished(outcome) => Ok(outcome),
        SearchPoll::Running => {
            handle.cancel();
            warn!("{:?} search exceeded {:?}; falling back to depth {}", config.strength, limit, Strength::Easy.depth());
            Ok(search(board, color, &SearchConfig { strength: Strength::Easy, ..config }))
        }
        SearchPoll::Cancelled => Err(SearchError::Cancelled),
        SearchPoll::Lost => Err(SearchError::WorkerLost),
    }
}
