use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::repository::traits::{DashboardStore, Snapshot};

const DEFAULT_FILE_NAME: &str = "dashboard.json";

#[derive(Clone)]
pub struct FileDashboardStore {
    file_path: PathBuf,
}

impl FileDashboardStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".riderlog")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        // Initialize with an empty snapshot on first use
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Snapshot::default())?;
            writer.flush()?;
        }

        Ok(FileDashboardStore { file_path: path })
    }
}

impl DashboardStore for FileDashboardStore {
    fn load(&self) -> Result<Snapshot> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, snapshot)?;
        writer.flush()?;
        Ok(())
    }
}
