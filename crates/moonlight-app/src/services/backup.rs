//! # Backup Service
//!
//! Writes the full-database snapshot as a downloadable JSON document with a
//! deterministic, dated file name.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use moonlight_db::{backup_file_name, BackupSnapshot, Database};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Full-database export.
#[derive(Debug, Clone)]
pub struct BackupService {
    db: Database,
    business_name: String,
    export_dir: PathBuf,
}

impl BackupService {
    pub fn new(db: Database, config: &AppConfig) -> Self {
        BackupService {
            db,
            business_name: config.business_name.clone(),
            export_dir: config.export_dir.clone(),
        }
    }

    /// Takes a snapshot of every table and writes it as pretty-printed JSON
    /// under the export directory. Returns the file path and the snapshot.
    pub async fn export(&self) -> AppResult<(PathBuf, BackupSnapshot)> {
        let snapshot = self.db.export_snapshot().await?;

        fs::create_dir_all(&self.export_dir)?;
        let file_name = backup_file_name(&self.business_name, snapshot.timestamp.date_naive());
        let path = self.export_dir.join(file_name);

        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&path, json)?;

        info!(path = %path.display(), "Backup exported");
        Ok((path, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use moonlight_core::Category;
    use moonlight_db::DbConfig;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_export_writes_dated_json_document() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let dir = tempfile::tempdir().unwrap();

        let mut config = AppConfig::default();
        config.export_dir = dir.path().to_path_buf();

        db.categories()
            .insert(&Category {
                id: Uuid::new_v4().to_string(),
                name: "Perfumes".to_string(),
                description: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let svc = BackupService::new(db, &config);
        let (path, snapshot) = svc.export().await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("moonlight-scent-backup-"));
        assert!(name.ends_with(".json"));
        assert_eq!(snapshot.data.categories.len(), 1);

        // The written document parses back into the same shape.
        let text = fs::read_to_string(&path).unwrap();
        let parsed: BackupSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.data.categories.len(), 1);
        assert!(parsed.data.sales.is_empty());
    }
}
