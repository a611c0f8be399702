//! Language pack sources.
//!
//! A source produces packs keyed by language code; the registry registers them
//! through [`TranslationRegistry::seed`](crate::i18n::TranslationRegistry::seed).

use crate::error::SourceError;
use crate::i18n::defaults;
use crate::i18n::pack::LanguagePack;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A pack read from a source, with where it came from for error reporting.
#[derive(Debug, Clone)]
pub struct LoadedPack {
    pub code: String,
    pub pack: LanguagePack,
    pub origin: PathBuf,
}

/// Anything that can supply language packs.
pub trait PackSource {
    fn load(&self) -> Result<Vec<LoadedPack>, SourceError>;
}

/// The packs compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPacks;

impl PackSource for BundledPacks {
    fn load(&self) -> Result<Vec<LoadedPack>, SourceError> {
        Ok(defaults::bundled()
            .into_iter()
            .map(|(code, pack)| LoadedPack {
                code: code.to_string(),
                pack,
                origin: PathBuf::from(format!("bundled:{}", code)),
            })
            .collect())
    }
}

/// A directory holding one `<code>.json` file per language.
///
/// Files with other extensions are ignored. Files are returned sorted by name
/// so seeding order is stable.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_pack(path: &Path) -> Result<LanguagePack, SourceError> {
        let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PackSource for DirectorySource {
    fn load(&self) -> Result<Vec<LoadedPack>, SourceError> {
        let io_err = |source| SourceError::Io {
            path: self.dir.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut packs = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!("Skipping language pack with non UTF-8 name: {}", path.display());
                continue;
            };
            debug!("Loading language pack from {}", path.display());

            packs.push(LoadedPack {
                code: code.to_string(),
                pack: Self::read_pack(&path)?,
                origin: path.clone(),
            });
        }

        Ok(packs)
    }
}
