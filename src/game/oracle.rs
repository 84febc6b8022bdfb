// src/game/oracle.rs

//! The narrow interface the search uses to talk to the rules engine.
//!
//! The search never copies or constructs positions. It mutates the single
//! position owned by an [`Oracle`] through [`Applied`] and [`NullMove`]
//! guards, which undo their change when dropped, so the position is restored
//! on every exit path of the recursion, cutoffs included.

use std::fmt;
use std::ops::{Deref, DerefMut};

use shakmaty::{Chess, Color, Move, Piece, Position, Role, Square};

/// The side to move, independent of the game's colour names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::First,
            Color::Black => Side::Second,
        }
    }
}

/// Rules-engine operations consumed by the evaluator and the search.
pub trait Oracle {
    type Move: Copy + Eq + fmt::Debug;

    /// Legal moves in the current position. Empty means a terminal position.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn is_capture(&self, mv: &Self::Move) -> bool;

    /// Plays a legal move. Panics if the move is not legal here.
    fn apply(&mut self, mv: Self::Move);

    /// Reverses the most recent unmatched `apply` or `apply_null_move`.
    fn undo(&mut self);

    /// Passes the turn without touching the board. Returns `false` when the
    /// rules engine cannot represent the resulting position.
    fn apply_null_move(&mut self) -> bool;

    fn undo_null_move(&mut self);

    fn side_to_move(&self) -> Side;

    fn in_check(&self) -> bool;

    fn piece_map(&self) -> Vec<(Square, Piece)>;
}

/// A move applied to an oracle for the lifetime of the guard.
pub struct Applied<'a, O: Oracle> {
    pos: &'a mut O,
}

impl<'a, O: Oracle> Applied<'a, O> {
    pub fn new(pos: &'a mut O, mv: O::Move) -> Self {
        pos.apply(mv);
        Self { pos }
    }
}

impl<O: Oracle> Deref for Applied<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.pos
    }
}

impl<O: Oracle> DerefMut for Applied<'_, O> {
    fn deref_mut(&mut self) -> &mut O {
        self.pos
    }
}

impl<O: Oracle> Drop for Applied<'_, O> {
    fn drop(&mut self) {
        self.pos.undo();
    }
}

/// A null move applied for the lifetime of the guard.
pub struct NullMove<'a, O: Oracle> {
    pos: &'a mut O,
}

impl<'a, O: Oracle> NullMove<'a, O> {
    pub fn try_new(pos: &'a mut O) -> Option<Self> {
        if pos.apply_null_move() {
            Some(Self { pos })
        } else {
            None
        }
    }
}

impl<O: Oracle> Deref for NullMove<'_, O> {
    type Target = O;

    fn deref(&self) -> &O {
        self.pos
    }
}

impl<O: Oracle> Drop for NullMove<'_, O> {
    fn drop(&mut self) {
        self.pos.undo_null_move();
    }
}

/// [`Oracle`] over a `shakmaty` chess position.
///
/// Undo is a stack of previous positions, so restoring is exact down to the
/// castling rights, en passant square and move counters.
#[derive(Clone, Debug)]
pub struct ChessOracle {
    position: Chess,
    history: Vec<Chess>,
}

impl ChessOracle {
    pub fn new(position: Chess) -> Self {
        Self {
            position,
            history: Vec::new(),
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Number of moves currently applied and not yet undone.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    fn push(&mut self, next: Chess) {
        let previous = std::mem::replace(&mut self.position, next);
        self.history.push(previous);
    }
}

impl Default for ChessOracle {
    fn default() -> Self {
        Self::new(Chess::default())
    }
}

impl Oracle for ChessOracle {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves().to_vec()
    }

    fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    fn apply(&mut self, mv: Move) {
        match self.position.clone().play(mv) {
            Ok(next) => self.push(next),
            Err(err) => panic!("illegal move {mv:?} passed to apply: {err:?}"),
        }
    }

    fn undo(&mut self) {
        match self.history.pop() {
            Some(previous) => self.position = previous,
            None => panic!("undo called without a matching apply"),
        }
    }

    fn apply_null_move(&mut self) -> bool {
        match self.position.clone().swap_turn() {
            Ok(next) => {
                self.push(next);
                true
            }
            Err(_) => false,
        }
    }

    fn undo_null_move(&mut self) {
        self.undo();
    }

    fn side_to_move(&self) -> Side {
        self.position.turn().into()
    }

    fn in_check(&self) -> bool {
        self.position.is_check()
    }

    fn piece_map(&self) -> Vec<(Square, Piece)> {
        let board = self.position.board();
        let mut pieces = Vec::with_capacity(board.occupied().count());
        for &color in &Color::ALL {
            for &role in &Role::ALL {
                let piece = Piece { role, color };
                for square in board.by_piece(piece) {
                    pieces.push((square, piece));
                }
            }
        }
        pieces
    }
}
