//! Promotion registry — named promotion records, one YAML file each.
//!
//! Public API surface:
//! - [`types`] — [`PromotionName`] newtype and the [`Promotion`] record
//! - [`error`] — [`RegistryError`]
//! - [`registry`] — [`PromotionRegistry`]: create / rename / delete /
//!   load / save
//!
//! A [`PromotionRegistry`] is constructed with its storage directory and
//! passed by reference to whichever host component needs it; there is no
//! process-wide singleton. Lookups are concurrent; structural mutations and
//! per-name file operations are serialized against each other.

pub mod error;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use registry::PromotionRegistry;
pub use types::{Promotion, PromotionName};
