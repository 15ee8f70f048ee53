use quickcheck::{Arbitrary, Gen};

use crate::Dir;

impl Arbitrary for Dir {
    fn arbitrary(g: &mut Gen) -> Self {
        // Mostly unit moves, occasionally something the server would reject
        if u8::arbitrary(g) % 4 == 0 {
            Dir::new(i32::arbitrary(g), i32::arbitrary(g))
        } else {
            *g.choose(&Dir::ALL).unwrap()
        }
    }
}

/// A full turn worth of moves.
#[derive(Clone, Debug)]
pub struct MoveSetInput {
    pub moves: [Dir; 5],
}

impl Arbitrary for MoveSetInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut moves = [Dir::default(); 5];
        for mv in moves.iter_mut() {
            *mv = Dir::arbitrary(g);
        }
        MoveSetInput { moves }
    }
}
