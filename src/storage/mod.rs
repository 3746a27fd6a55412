use crate::{
    config::ControllerConfig,
    controller::BoardController,
    domain::{BoardLayout, Card},
    error::Result,
};
use async_trait::async_trait;

pub mod file_storage;

/// Storage trait for persisting the board layout and its cards
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Saves the column layout
    async fn save_layout(&self, layout: &BoardLayout) -> Result<()>;

    /// Loads the column layout
    async fn load_layout(&self) -> Result<BoardLayout>;

    /// Saves the ordered card collection
    async fn save_cards(&self, cards: &[Card]) -> Result<()>;

    /// Loads the ordered card collection
    async fn load_cards(&self) -> Result<Vec<Card>>;

    /// Loads controller settings, defaulting when none are stored
    async fn load_controller_config(&self) -> Result<ControllerConfig>;

    /// Checks if the project is initialized
    async fn is_initialized(&self) -> bool;
}

/// Builds an idle controller from whatever the storage currently holds
pub async fn open_board(storage: &dyn Storage) -> Result<BoardController> {
    let layout = storage.load_layout().await?;
    let cards = storage.load_cards().await?;
    let config = storage.load_controller_config().await?;

    tracing::debug!(board = %layout.name, cards = cards.len(), "Board opened");
    Ok(BoardController::new(layout, cards).with_config(config))
}
