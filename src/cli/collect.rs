use std::path::PathBuf;

use tabled::Table;

use crate::{
    config::{self, Settings},
    error,
    pipeline::{Pipeline, RunOutcome},
    success,
    types::{TrackOutcome, TrackTableRow},
    utils, warning,
};

/// Command-line overrides for a collection run.
#[derive(Debug, Default, Clone)]
pub struct CollectOverrides {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub output: Option<PathBuf>,
    pub concurrency: Option<usize>,
    pub max_pages: Option<u32>,
}

impl CollectOverrides {
    /// Applies the overrides on top of `settings`.
    ///
    /// Changing the album without naming an output file also moves the
    /// default output file, unless `OUTPUT_FILE` pinned it.
    pub fn apply(self, mut settings: Settings, output_pinned: bool) -> Settings {
        if let Some(artist) = self.artist {
            settings.target.artist_name = artist;
        }
        if let Some(album) = self.album {
            if self.output.is_none() && !output_pinned {
                settings.output_path = config::default_output_path(&album);
            }
            settings.target.album_name = album;
        }
        if let Some(output) = self.output {
            settings.output_path = output;
        }
        if let Some(concurrency) = self.concurrency {
            settings.concurrency = concurrency.max(1);
        }
        if let Some(max_pages) = self.max_pages {
            settings.catalog_max_pages = max_pages.max(1);
        }
        settings
    }
}

pub async fn collect(overrides: CollectOverrides) {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    let output_pinned = std::env::var("OUTPUT_FILE").is_ok_and(|v| !v.trim().is_empty());
    let settings = overrides.apply(settings, output_pinned);

    let pipeline = match Pipeline::from_settings(&settings) {
        Ok(p) => p,
        Err(e) => error!("Cannot set up HTTP clients: {}", e),
    };

    match pipeline.run().await {
        Ok(RunOutcome::Written { path, outcomes, .. }) => {
            println!("{}", summary_table(&outcomes));
            success!("{} tracks written to {}", outcomes.len(), path.display());
        }
        Ok(RunOutcome::Halted(reason)) => {
            warning!("No records collected: {}", reason);
        }
        Err(e) => error!("{}", e),
    }
}

fn summary_table(outcomes: &[TrackOutcome]) -> Table {
    let rows: Vec<TrackTableRow> = outcomes
        .iter()
        .enumerate()
        .map(|(i, o)| TrackTableRow {
            position: i + 1,
            title: utils::truncate_chars(&o.record.track_title, 40),
            language: o.record.language.clone(),
            lyrics: o.status.to_string(),
        })
        .collect();

    Table::new(rows)
}
