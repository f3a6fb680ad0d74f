//! Board commands

mod list;
mod load;
mod open;

pub use list::ListBoards;
pub use load::LoadBoard;
pub use open::OpenBoard;
