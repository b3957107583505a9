use std::path::{Path, PathBuf};

use checklist_core::model::{Catalog, CatalogError};
use clap::Parser;
use thiserror::Error;

/// Bilingual renovation checklist.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite database holding saved progress
    #[arg(long = "db", env = "CHECKLIST_DB_URL", default_value = "sqlite://checklist.sqlite3")]
    pub db_url: String,

    /// Load the task catalog from a TOML file instead of the bundled one
    #[arg(long, env = "CHECKLIST_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Validate the catalog, print a summary and exit
    #[arg(long)]
    pub check_catalog: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },

    #[error("cannot read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog {origin}: {source}")]
    Catalog {
        origin: String,
        source: CatalogError,
    },
}

/// Bundled catalog, or the one at `path` when given. Validated either way.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, ConfigError> {
    match path {
        None => Catalog::bundled().map_err(|source| ConfigError::Catalog {
            origin: "(bundled)".to_string(),
            source,
        }),
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
                path: path.to_path_buf(),
                source,
            })?;
            Catalog::from_toml_str(&raw).map_err(|source| ConfigError::Catalog {
                origin: path.display().to_string(),
                source,
            })
        }
    }
}

pub fn normalize_sqlite_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: raw.to_string(),
        });
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_string());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

/// Create the database file (and parent directories) so `SQLite` can open it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ConfigError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// One line per section: key, step count and titles.
#[must_use]
pub fn catalog_summary(catalog: &Catalog) -> String {
    let mut out = String::new();
    for section in catalog.sections() {
        out.push_str(&format!(
            "{:<16} {:>2} steps  {} / {}\n",
            section.key(),
            section.step_count(),
            section.title_en(),
            section.title_es()
        ));
    }
    out.push_str(&format!(
        "{} sections, {} steps\n",
        catalog.sections().len(),
        catalog.total_steps()
    ));
    out
}
