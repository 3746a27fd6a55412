pub mod card;
pub mod column;
pub mod working_set;

pub use card::{Card, CardId};
pub use column::{BoardLayout, Column, ColumnId};
pub use working_set::{DropTarget, WorkingSet};
