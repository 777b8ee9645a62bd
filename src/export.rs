//! JSON-lines export: one file per table.

use crate::db::Store;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub async fn export_tables(store: &Store, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    write_table(dir, "seasons", &store.list_seasons().await?)?;
    write_table(dir, "episodes", &store.list_episodes().await?)?;
    write_table(dir, "hosts", &store.list_hosts().await?)?;
    write_table(dir, "titles", &store.list_titles().await?)?;
    write_table(dir, "sketches", &store.list_sketches().await?)?;
    write_table(dir, "actors", &store.list_actors().await?)?;
    write_table(dir, "casts", &store.list_casts().await?)?;
    write_table(dir, "appearances", &store.list_appearances().await?)?;
    write_table(dir, "characters", &store.list_characters().await?)?;
    write_table(dir, "impressions", &store.list_impressions().await?)?;
    write_table(dir, "episode_ratings", &store.list_ratings().await?)?;
    write_table(dir, "tenures", &store.list_tenures().await?)?;
    Ok(())
}

fn write_table<T: Serialize>(dir: &Path, name: &str, rows: &[T]) -> Result<()> {
    let path = dir.join(format!("{name}.jsonl"));
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    info!(table = name, rows = rows.len(), "exported");
    Ok(())
}
