//! menu 固有のドメイン型（型と不変条件）

pub mod catalog;
pub mod command;
pub mod history;
pub mod notice;
pub mod recommendation;
pub mod selection;
pub mod step;

pub use catalog::{AvoidFood, Budget, CatalogOption, Companion, FoodType, Mood, TimeSlot};
pub use command::MenuCommand;
pub use history::{History, HistoryEntry};
pub use notice::{Notice, NoticeLevel};
pub use recommendation::{Recommendation, RecommendationResult};
pub use selection::{AvoidFoods, SelectionRecord};
pub use step::{Action, ActionKind, Input, Step};
