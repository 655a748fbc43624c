//! Export 子命令

use std::path::Path;

use anyhow::Result;

use turnscribe_core::Exporter;
use turnscribe_ingest::IngestStore;

pub fn run(db: &Path, file_id: i64, output: Option<&Path>, json: bool) -> Result<()> {
    let store = IngestStore::open(db)?;
    if store.get_file(file_id)?.is_none() {
        anyhow::bail!("no tracked file with id {}", file_id);
    }

    let turns = store.results_for(file_id)?;

    match output {
        Some(path) => {
            if json {
                Exporter::to_json(&turns, path, true)?;
            } else {
                Exporter::to_text(&turns, path)?;
            }
            println!("Saved {} dialogue turns to {}", turns.len(), path.display());
        }
        None => {
            if json {
                println!("{}", Exporter::render_json(&turns, true)?);
            } else {
                print!("{}", Exporter::render_text(&turns));
            }
        }
    }
    Ok(())
}
