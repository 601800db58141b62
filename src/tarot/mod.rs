mod advice;
mod deck;
mod reading;
pub(crate) mod repository;
mod spread;
mod storage;

pub use advice::get_card_advice;
pub use deck::find_card;
pub use reading::{DrawnCard, Interpretation, draw_cards, format_reading_date, interpret};
pub use repository::{NewTarotReading, ReadingRepository, SavedTarotReading};
pub use spread::{Spread, find_spread, spreads};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
