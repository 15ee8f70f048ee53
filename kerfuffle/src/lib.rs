pub use board::*;
pub use errors::*;
pub use geometry::*;
pub use player_state::*;
pub use protocol_types::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod geometry;
mod player_state;
mod protocol_types;
mod visualization;
