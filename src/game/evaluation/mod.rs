//! Evaluation of a chess position.

use shakmaty::{Color, Role};

use crate::constants::{
    Score, BISHOP_VALUE, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE,
};
use crate::game::oracle::{NullMove, Oracle, Side};
use crate::game::search::SearchConfig;

pub fn get_piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Material balance from White's point of view.
pub fn material<O: Oracle>(pos: &O) -> Score {
    pos.piece_map()
        .into_iter()
        .map(|(_, piece)| match piece.color {
            Color::White => get_piece_value(piece.role),
            Color::Black => -get_piece_value(piece.role),
        })
        .sum()
}

/// Legal move count of the side to move minus that of the opponent.
///
/// The opponent's count is taken after a null move. When the rules engine
/// refuses the null move (the side to move is in check) the term is 0.
pub fn mobility<O: Oracle>(pos: &mut O) -> Score {
    let own = pos.legal_moves().len() as Score;
    match NullMove::try_new(pos) {
        Some(passed) => own - passed.legal_moves().len() as Score,
        None => 0,
    }
}

/// Static evaluator: material plus weighted mobility.
#[derive(Clone, Debug)]
pub struct Evaluator {
    mobility_weight: Score,
}

impl Evaluator {
    pub fn new(mobility_weight: Score) -> Self {
        Self { mobility_weight }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.mobility_weight)
    }

    /// Evaluates the position from the perspective of the side to move.
    ///
    /// Takes the oracle mutably for the null move of the mobility term; the
    /// position is unchanged on return.
    pub fn evaluate<O: Oracle>(&self, pos: &mut O) -> Score {
        let white_material = material(pos);
        let score = match pos.side_to_move() {
            Side::First => white_material,
            Side::Second => -white_material,
        };

        if self.mobility_weight == 0 {
            return score;
        }

        score + self.mobility_weight * mobility(pos)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
