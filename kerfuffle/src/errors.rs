/// The error type for server data that is well-formed JSON but does not
/// describe a valid board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedData {
    /// A tile string with more than the two `owner,tail` components.
    Tile { raw: String },
    /// A player id that is neither a string nor a number.
    PlayerId { raw: String },
    RaggedBoard {
        row: usize,
        len: usize,
        expected: usize,
    },
    ViewOutOfBounds {
        origin_x: i32,
        origin_y: i32,
        view_width: usize,
        view_height: usize,
        board_width: usize,
        board_height: usize,
    },
}

impl std::error::Error for MalformedData {}

impl std::fmt::Display for MalformedData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedData::Tile { raw } => {
                write!(f, "Tile '{}' is not of the form 'owner,tail'", raw)
            }
            MalformedData::PlayerId { raw } => {
                write!(f, "Player id {} is neither a string nor a number", raw)
            }
            MalformedData::RaggedBoard { row, len, expected } => write!(
                f,
                "Board row {} has {} tiles, but the first row has {}",
                row, len, expected
            ),
            MalformedData::ViewOutOfBounds {
                origin_x,
                origin_y,
                view_width,
                view_height,
                board_width,
                board_height,
            } => write!(
                f,
                "A {}x{} view at ({}, {}) does not fit on a {}x{} board",
                view_width, view_height, origin_x, origin_y, board_width, board_height
            ),
        }
    }
}
