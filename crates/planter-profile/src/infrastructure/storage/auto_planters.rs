//! JSON-file implementation of [`AutoPlanterStore`].
//!
//! Two files live directly in the data directory:
//!
//! - `auto_planters.json` – the [`AutoPlanterData`] document: the three
//!   planters currently placed by auto mode, the last field per nectar and the
//!   gather flag.
//! - `manual_planters.txt` – the manual-mode planter tracker.  This crate only
//!   ever clears it; the macro owns its content.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use planter_core::Catalogs;
use tokio::sync::Mutex;
use tracing::info;

use super::json_file::{read_json, write_atomic, write_json};
use crate::application::ports::{AutoPlanterData, AutoPlanterStore, StoreError};

pub const AUTO_PLANTERS_FILE: &str = "auto_planters.json";
pub const MANUAL_PLANTERS_FILE: &str = "manual_planters.txt";

pub struct JsonAutoPlanterStore {
    auto_path: PathBuf,
    manual_path: PathBuf,
    catalogs: Arc<Catalogs>,
    write_lock: Mutex<()>,
}

impl JsonAutoPlanterStore {
    pub fn new(data_dir: &Path, catalogs: Arc<Catalogs>) -> Self {
        Self {
            auto_path: data_dir.join(AUTO_PLANTERS_FILE),
            manual_path: data_dir.join(MANUAL_PLANTERS_FILE),
            catalogs,
            write_lock: Mutex::new(()),
        }
    }

    pub fn auto_path(&self) -> &Path {
        &self.auto_path
    }

    pub fn manual_path(&self) -> &Path {
        &self.manual_path
    }

    async fn read_or_cleared(&self) -> Result<AutoPlanterData, StoreError> {
        Ok(read_json(&self.auto_path)
            .await?
            .unwrap_or_else(|| AutoPlanterData::cleared(&self.catalogs, None)))
    }
}

#[async_trait]
impl AutoPlanterStore for JsonAutoPlanterStore {
    async fn load_auto_planters(&self) -> Result<AutoPlanterData, StoreError> {
        read_json(&self.auto_path)
            .await?
            .ok_or_else(|| StoreError::Io {
                path: self.auto_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "auto-planter document does not exist yet",
                ),
            })
    }

    async fn set_gather(&self, gather: bool) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut data = self.read_or_cleared().await?;
        data.gather = Some(gather);
        write_json(&self.auto_path, &data).await
    }

    async fn clear_manual_planters(&self) -> Result<(), StoreError> {
        write_atomic(&self.manual_path, b"").await?;
        info!("manual planter data cleared");
        Ok(())
    }

    async fn clear_auto_planters(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        // A malformed document is replaced; its gather flag is lost with it.
        let gather = self.read_or_cleared().await.ok().and_then(|d| d.gather);
        write_json(&self.auto_path, &AutoPlanterData::cleared(&self.catalogs, gather)).await?;
        info!("auto planter data cleared");
        Ok(())
    }
}
