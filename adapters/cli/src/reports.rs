//! Report sink that writes each report to its own file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;
use snake_tunnel_rendering::{ReportKind, ReportSink};

/// Writes reports into a single output directory.
#[derive(Debug)]
pub(crate) struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Creates the output directory if needed and targets it.
    pub(crate) fn create(directory: &Path) -> Result<Self> {
        fs::create_dir_all(directory).with_context(|| {
            format!("failed to create report directory {}", directory.display())
        })?;
        Ok(Self {
            directory: directory.to_path_buf(),
        })
    }
}

impl ReportSink for DirectorySink {
    fn write_report(&mut self, kind: ReportKind, contents: &str) -> Result<()> {
        let path = self.directory.join(kind.file_name());
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {kind:?} report to {}", path.display()))?;
        info!("wrote {kind:?} report to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_land_in_named_files() {
        let directory = std::env::temp_dir().join(format!(
            "snake-tunnel-reports-{}",
            std::process::id()
        ));
        let mut sink = DirectorySink::create(&directory).expect("directory created");

        sink.write_report(ReportKind::Ranking, "(0, 0 - 1)\n")
            .expect("report written");

        let written =
            fs::read_to_string(directory.join("ranking.txt")).expect("report readable");
        assert_eq!(written, "(0, 0 - 1)\n");
        fs::remove_dir_all(&directory).expect("cleanup");
    }
}
