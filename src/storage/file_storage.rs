use crate::{
    commit::CommitAdapter,
    config::ControllerConfig,
    domain::{BoardLayout, Card},
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage implementation
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const HLAVI_DIR: &'static str = ".hlavi";
    const BOARD_FILE: &'static str = "board.json";
    const CARDS_FILE: &'static str = "cards.json";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::HLAVI_DIR),
        }
    }

    fn board_file(&self) -> PathBuf {
        self.root_path.join(Self::BOARD_FILE)
    }

    fn cards_file(&self) -> PathBuf {
        self.root_path.join(Self::CARDS_FILE)
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        if !self.board_file().exists() {
            self.save_layout(&BoardLayout::default()).await?;
        }

        if !self.cards_file().exists() {
            self.save_cards(&[]).await?;
        }

        Ok(())
    }

    async fn save_layout(&self, layout: &BoardLayout) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(layout)?;
        fs::write(self.board_file(), json).await?;

        Ok(())
    }

    async fn load_layout(&self) -> Result<BoardLayout> {
        let board_file = self.board_file();

        if !board_file.exists() {
            return Err(BoardError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&board_file).await?;
        let layout: BoardLayout = serde_json::from_str(&contents)?;

        Ok(layout)
    }

    async fn save_cards(&self, cards: &[Card]) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(cards)?;
        fs::write(self.cards_file(), json).await?;

        Ok(())
    }

    async fn load_cards(&self) -> Result<Vec<Card>> {
        let cards_file = self.cards_file();

        if !cards_file.exists() {
            return Err(BoardError::BoardNotInitialized);
        }

        let contents = fs::read_to_string(&cards_file).await?;
        let cards: Vec<Card> = serde_json::from_str(&contents)?;

        Ok(cards)
    }

    async fn load_controller_config(&self) -> Result<ControllerConfig> {
        let config_file = self.config_file();

        if !config_file.exists() {
            return Ok(ControllerConfig::default());
        }

        let contents = fs::read_to_string(&config_file).await?;
        ControllerConfig::from_toml_str(&contents)
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists() && self.board_file().exists()
    }
}

#[async_trait]
impl CommitAdapter for FileStorage {
    async fn commit(&self, cards: Vec<Card>) -> Result<()> {
        self.save_cards(&cards).await
    }
}
