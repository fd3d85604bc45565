use crate::geometry;
use crate::types::{self, Rank};

pub trait Color {
    const COLOR: types::Color;
    const PAWN_FORWARD: isize = geometry::pawn_forward_delta(Self::COLOR);
    const DOUBLE_MOVE_RANK: Rank = geometry::double_move_src_rank(Self::COLOR);
    type Inv: Color;
}

pub struct White;
pub struct Black;

impl Color for White {
    const COLOR: types::Color = types::Color::White;
    type Inv = Black;
}

impl Color for Black {
    const COLOR: types::Color = types::Color::Black;
    type Inv = White;
}
