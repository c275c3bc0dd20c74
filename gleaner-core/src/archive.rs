// Month-by-month archive harvesting and export

use chrono::{Datelike, NaiveDate};
use gleaner_harvester::{ArchiveHarvester, ArchivePost, HarvesterConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// The archive's listings start here; asking for earlier months just returns
/// empty pages.
pub const ARCHIVE_EPOCH: (i32, u32) = (2014, 2);

/// Options for configuring an archive harvest
pub struct ArchiveOptions {
    /// Month segments to harvest, e.g. "february-2016".
    pub months: Vec<String>,
    pub data_dir: PathBuf,
    /// Overrides the production archive root.
    pub archive_url: Option<String>,
    pub show_progress_bars: bool,
}

/// Format a date as the archive's month-path segment, e.g. "february-2016".
pub fn month_segment(date: NaiveDate) -> String {
    date.format("%B-%Y").to_string().to_lowercase()
}

/// Month segments from `since` through `now`, inclusive.
pub fn months_between(since: NaiveDate, now: NaiveDate) -> Vec<String> {
    let mut months = Vec::new();
    let mut current = first_of_month(since);
    while current <= now {
        months.push(month_segment(current));
        current = next_month(current);
    }
    months
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("day 1 exists in every month")
}

fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("day 1 exists in every month")
}

/// Harvest every requested month and export each as one JSON file under
/// `<data_dir>/archive/`. Returns the total number of posts harvested.
pub async fn execute_archive(options: ArchiveOptions) -> Result<usize, String> {
    let ArchiveOptions {
        months,
        data_dir,
        archive_url,
        show_progress_bars,
    } = options;

    if months.is_empty() {
        return Err("No months to harvest".to_string());
    }

    let mut config = HarvesterConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    };
    if let Some(archive_url) = archive_url {
        config.archive_url = archive_url;
    }

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(months.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {msg} {pos}/{len}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let harvester = ArchiveHarvester::new(config);
    let export_dir = data_dir.join("archive");
    let mut total = 0;

    for month in &months {
        if let Some(ref pb) = progress_bar {
            pb.set_message(month.clone());
        }

        let posts = harvester
            .harvest_month(month)
            .await
            .map_err(|e| format!("Failed to harvest {}: {}", month, e))?;
        export_posts(&export_dir, month, &posts)?;
        total += posts.len();

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!("{} posts harvested", total));
    }

    Ok(total)
}

fn export_posts(dir: &Path, month: &str, posts: &[ArchivePost]) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create export dir {}: {}", dir.display(), e))?;
    let path = dir.join(format!("{}.json", month));
    let raw = serde_json::to_string(posts)
        .map_err(|e| format!("Failed to encode posts for {}: {}", month, e))?;
    fs::write(&path, raw).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(())
}
