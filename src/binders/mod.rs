pub mod figure;
pub mod history;
pub mod selection;
pub mod summary;

pub use figure::{Figure, Series};
pub use history::history_figure;
pub use selection::{player_options, select_players, PlayerOption, PlayerTableRow};
pub use summary::summary_figure;
