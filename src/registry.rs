//! In-memory promotion registry backed by one YAML file per record.
//!
//! # Storage layout
//!
//! ```text
//! <directory>/
//!   <promotion_name>.yml   (one file per promotion, block-style YAML)
//! ```
//!
//! # Locking
//!
//! Two locks, always acquired in the order `mutation` → `promotions`:
//! - `mutation` serializes structural changes (create / rename / delete) and
//!   per-name file operations (load / save) against each other, so a rename
//!   can never race a load or create of the same key.
//! - `promotions` is the map itself; lookups take only its read side and are
//!   never blocked behind `mutation`.
//!
//! Load swallows per-file failures (logged, `Ok(false)`); save propagates
//! them. Bulk operations are best-effort and keep going past bad items.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::{error, info, warn};

use crate::error::RegistryError;
use crate::types::{Promotion, PromotionName};

const FILE_EXTENSION: &str = "yml";

/// Registry of named [`Promotion`] records, persisted under one directory.
///
/// Construct once with the storage directory and share by reference; all
/// methods take `&self`.
pub struct PromotionRegistry {
    directory: PathBuf,
    promotions: RwLock<HashMap<String, Promotion>>,
    mutation: Mutex<()>,
}

impl PromotionRegistry {
    /// Creates a registry over `directory`. Validates the path is non-empty;
    /// does not touch the filesystem.
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, RegistryError> {
        let directory = directory.into();
        if directory.as_os_str().is_empty() {
            return Err(RegistryError::EmptyDirectory);
        }
        Ok(Self {
            directory,
            promotions: RwLock::new(HashMap::new()),
            mutation: Mutex::new(()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<directory>/<name>.yml` — pure, no I/O.
    pub fn promotion_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{FILE_EXTENSION}"))
    }

    // -----------------------------------------------------------------------
    // 1. In-memory CRUD
    // -----------------------------------------------------------------------

    /// Registers a fresh promotion under `name` and returns a snapshot of it.
    ///
    /// In-memory only — nothing is written until [`save`](Self::save).
    pub fn create(&self, name: &str) -> Result<Promotion, RegistryError> {
        let name = PromotionName::new(name)?;
        let _guard = self.mutation.lock();
        let mut map = self.promotions.write();
        if map.contains_key(name.as_str()) {
            return Err(RegistryError::NameExists { name: name.0 });
        }
        let promotion = Promotion::new(name.clone());
        map.insert(name.0, promotion.clone());
        Ok(promotion)
    }

    /// Snapshot of the promotion under `name`, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<Promotion> {
        self.promotions.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.promotions.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.promotions.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.promotions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.read().is_empty()
    }

    /// Edits the promotion under `name` in place and touches `updated_at`.
    /// Returns false if the name is not registered.
    pub fn update<F>(&self, name: &str, f: F) -> bool
    where
        F: FnOnce(&mut Promotion),
    {
        let _guard = self.mutation.lock();
        let mut map = self.promotions.write();
        match map.get_mut(name) {
            Some(promotion) => {
                f(promotion);
                promotion.updated_at = chrono::Utc::now();
                true
            }
            None => false,
        }
    }

    /// Removes the entry if present. Never deletes the file on disk.
    pub fn delete(&self, name: &str) -> bool {
        let _guard = self.mutation.lock();
        self.promotions.write().remove(name).is_some()
    }

    /// Moves the record from `name` to `new_name`, updating its internal name
    /// in the same exclusive section. Any existing key — including the
    /// record's own current name — rejects the rename with
    /// [`RegistryError::NameExists`], and the map is left unchanged on every
    /// error path. No file is moved or written.
    pub fn rename(&self, name: &str, new_name: &str) -> Result<(), RegistryError> {
        let new_name = PromotionName::new(new_name)?;
        let _guard = self.mutation.lock();
        let mut map = self.promotions.write();
        if map.contains_key(new_name.as_str()) {
            return Err(RegistryError::NameExists { name: new_name.0 });
        }
        let mut promotion = map
            .remove(name)
            .ok_or_else(|| RegistryError::PromotionNotFound { name: name.to_owned() })?;
        promotion.set_name(new_name.clone());
        map.insert(new_name.0, promotion);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 2. Load
    // -----------------------------------------------------------------------

    /// Loads every `<name>.<ext>` file in the directory, non-recursively.
    ///
    /// An unreadable or absent directory is a silent no-op (fail-open, as the
    /// host plugin expects on first boot). Filenames without a `.` are
    /// skipped; the stem before the *last* dot is the promotion name. Returns
    /// the number of promotions successfully loaded.
    pub fn load_all(&self) -> usize {
        let entries = match std::fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut loaded = 0;
        for entry in entries.filter_map(|e| e.ok()) {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some((stem, _)) = file_name.rsplit_once('.') else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            if matches!(self.load(stem), Ok(true)) {
                loaded += 1;
            }
        }
        loaded
    }

    /// Loads the promotion stored at `<directory>/<name>.yml` into the map,
    /// replacing any in-memory state for that name.
    ///
    /// Returns `Ok(false)` when the file is missing or unreadable/corrupt
    /// (the latter is logged); `Err` only for an empty `name`. A failed load
    /// leaves the map untouched.
    pub fn load(&self, name: &str) -> Result<bool, RegistryError> {
        let name = PromotionName::new(name)?;
        let _guard = self.mutation.lock();

        if let Err(err) = std::fs::create_dir_all(&self.directory) {
            warn!(error = %err, "could not create promotion directory");
        }

        let path = self.promotion_path(name.as_str());
        if !path.exists() {
            return Ok(false);
        }

        info!(%name, "promotion loading started");
        let promotion = match read_promotion(&name, &path) {
            Ok(promotion) => promotion,
            Err(err) => {
                error!(%name, error = %err, "promotion loading failed");
                return Ok(false);
            }
        };

        self.promotions.write().insert(name.0.clone(), promotion);
        info!(%name, "promotion loaded");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // 3. Save
    // -----------------------------------------------------------------------

    /// Saves every registered promotion, best-effort: per-item failures are
    /// logged and do not stop the remaining saves. Returns the number
    /// written.
    pub fn save_all(&self) -> usize {
        let names = self.names();
        let mut saved = 0;
        for name in names {
            match self.save(&name) {
                Ok(true) => saved += 1,
                // Deleted between the snapshot and the save.
                Ok(false) => {}
                Err(err) => error!(name = %name, error = %err, "promotion save failed"),
            }
        }
        saved
    }

    /// Writes the promotion under `name` to `<directory>/<name>.yml`.
    ///
    /// Output is block-style YAML at serde_yaml's 2-space indent; files
    /// hand-written with wider indents parse back identically.
    ///
    /// Returns `Ok(false)` without writing when the name is not registered.
    /// I/O and serialization failures propagate, unlike [`load`](Self::load).
    pub fn save(&self, name: &str) -> Result<bool, RegistryError> {
        let name = PromotionName::new(name)?;
        let _guard = self.mutation.lock();

        std::fs::create_dir_all(&self.directory)?;

        let Some(promotion) = self.promotions.read().get(name.as_str()).cloned() else {
            return Ok(false);
        };

        let yaml = serde_yaml::to_string(&promotion)?;
        std::fs::write(self.promotion_path(name.as_str()), yaml)?;

        info!(%name, "promotion saved");
        Ok(true)
    }
}

/// Parses `path` into a [`Promotion`] registered under `name`. The name never
/// lives in the file body — it is stamped from the registry key here.
fn read_promotion(name: &PromotionName, path: &Path) -> Result<Promotion, RegistryError> {
    let contents = std::fs::read_to_string(path)?;
    let mut promotion: Promotion = serde_yaml::from_str(&contents)
        .map_err(|source| RegistryError::Parse { path: path.to_path_buf(), source })?;
    promotion.set_name(name.clone());
    Ok(promotion)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
