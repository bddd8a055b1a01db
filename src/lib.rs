//! Puzzle generation and state tracking for Regular Hexpressions: eight words
//! sit on the corners of a cube, four of them answer four regex clues, and the
//! player turns faces until each answer sits on its clue's corner.

pub mod chooser;
pub mod coordinates;
pub mod cube;
pub mod resolver;
pub mod session;
pub mod table;

pub type Result<T> = std::result::Result<T, anyhow::Error>;

pub use chooser::{Chooser, RngChooser};
pub use coordinates::{EdgeworkCounts, TableCoordinates, TablePosition};
pub use cube::{Face, PermutationTracker, Vertex};
pub use resolver::{build_puzzle, Puzzle};
pub use session::{Session, SubmitResult};
pub use table::{PatternPair, PatternTable, WordList};
