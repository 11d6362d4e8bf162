// Manages the on-disk event catalog.
//
// The catalog is a JSON file, either versioned
//   { "version": 1, "events": [ ... ] }
// or a bare array of events. Bump CATALOG_VERSION when the Event
// serialization changes incompatibly.
use crate::config::Config;
use crate::context::AppContext;
use crate::model::Event;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CATALOG_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CatalogData {
    #[serde(default)]
    version: u32,
    events: Vec<Event>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Versioned(CatalogData),
    Bare(Vec<Event>),
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Where the catalog lives: the configured override, else `events.json`
    /// in the data directory.
    pub fn catalog_path(ctx: &dyn AppContext, config: &Config) -> Result<PathBuf> {
        match &config.catalog_path {
            Some(p) => Ok(p.clone()),
            None => ctx.get_catalog_path(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Vec<Event>> {
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog '{}'", path.display()))?;
            Self::parse(&json)
                .with_context(|| format!("Failed to parse catalog '{}'", path.display()))
        })
    }

    pub fn parse(json: &str) -> Result<Vec<Event>> {
        match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::Versioned(data) => {
                if data.version > CATALOG_VERSION {
                    return Err(anyhow::anyhow!(
                        "Catalog version {} is newer than supported version {}",
                        data.version,
                        CATALOG_VERSION
                    ));
                }
                Ok(data.events)
            }
            CatalogFile::Bare(events) => Ok(events),
        }
    }

    /// Loads the catalog, falling back to the built-in events when no
    /// catalog file exists yet.
    pub fn load(ctx: &dyn AppContext, config: &Config) -> Result<Vec<Event>> {
        let path = Self::catalog_path(ctx, config)?;
        if !path.exists() {
            log::info!(
                "No catalog at {}, using built-in events",
                path.display()
            );
            return Ok(default_catalog());
        }
        let events = Self::load_from_path(&path)?;
        log::debug!("Loaded {} events from {}", events.len(), path.display());
        Ok(events)
    }

    pub fn save_to_path(path: &Path, events: &[Event]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Self::with_lock(path, || {
            let data = CatalogData {
                version: CATALOG_VERSION,
                events: events.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(path, json)
        })
    }

    pub fn save(ctx: &dyn AppContext, config: &Config, events: &[Event]) -> Result<()> {
        let path = Self::catalog_path(ctx, config)?;
        Self::save_to_path(&path, events)
    }
}

/// The events listed on the site before any catalog file is written.
pub fn default_catalog() -> Vec<Event> {
    vec![
        Event {
            id: "event-1".to_string(),
            title: "Leadership Summit 2024".to_string(),
            description: "A half-day virtual summit with school leaders sharing \
                          strategies for building strong teams and cultures."
                .to_string(),
            categories: vec!["upcoming".to_string(), "virtual".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 3, 15),
            time: Some("10:00 AM - 2:00 PM EST".to_string()),
            location: Some("Virtual Event - Zoom Link Provided".to_string()),
        },
        Event {
            id: "event-2".to_string(),
            title: "Certification Workshop: School Leadership".to_string(),
            description: "Full-day hands-on workshop counting toward the school \
                          leadership certification."
                .to_string(),
            categories: vec!["upcoming".to_string(), "in-person".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 4, 20),
            time: Some("9:00 AM - 4:00 PM EST".to_string()),
            location: Some("123 Education Center, New York, NY 10001".to_string()),
        },
        Event {
            id: "event-3".to_string(),
            title: "Monthly Networking Session".to_string(),
            description: "Meet fellow educators, exchange ideas and grow your \
                          professional network."
                .to_string(),
            categories: vec!["upcoming".to_string(), "virtual".to_string()],
            date: NaiveDate::from_ymd_opt(2024, 5, 10),
            time: Some("6:00 PM - 7:30 PM EST".to_string()),
            location: Some("Virtual Event - Microsoft Teams".to_string()),
        },
    ]
}
