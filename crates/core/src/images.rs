//! Image owners, image ordering, and URL validation.
//!
//! Battles and boxes both own an ordered set of image records. The
//! functions here are shared by the repository layer (write-path
//! validation) and the fallback resolver (read-path URL checks).

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Literal strings that older clients wrote into URL columns instead of NULL.
pub const PLACEHOLDER_STRINGS: &[&str] = &["undefined", "null"];

// ---------------------------------------------------------------------------
// Owner kinds
// ---------------------------------------------------------------------------

/// The kind of entity that owns an image set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOwnerKind {
    Battle,
    Box,
}

impl ImageOwnerKind {
    /// Table holding this owner's image records.
    pub fn image_table(&self) -> &'static str {
        match self {
            Self::Battle => "battle_images",
            Self::Box => "box_images",
        }
    }

    /// Foreign-key column on [`image_table`](Self::image_table) pointing at the owner.
    pub fn owner_column(&self) -> &'static str {
        match self {
            Self::Battle => "battle_id",
            Self::Box => "box_id",
        }
    }

    /// Table holding the owner rows themselves.
    pub fn owner_table(&self) -> &'static str {
        match self {
            Self::Battle => "battles",
            Self::Box => "boxes",
        }
    }

    /// Lowercase entity name, as serialized and logged.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Battle => "battle",
            Self::Box => "box",
        }
    }

    /// Display name of the owner entity in not-found errors.
    pub fn owner_entity(&self) -> &'static str {
        match self {
            Self::Battle => "Battle",
            Self::Box => "Box",
        }
    }

    /// Entity name for a single image record of this owner kind.
    pub fn image_entity(&self) -> &'static str {
        match self {
            Self::Battle => "BattleImage",
            Self::Box => "BoxImage",
        }
    }
}

impl fmt::Display for ImageOwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_type())
    }
}

/// A reference to one concrete image owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
    pub kind: ImageOwnerKind,
    pub id: DbId,
}

impl OwnerRef {
    pub fn battle(id: DbId) -> Self {
        Self {
            kind: ImageOwnerKind::Battle,
            id,
        }
    }

    pub fn boxed(id: DbId) -> Self {
        Self {
            kind: ImageOwnerKind::Box,
            id,
        }
    }
}

// ---------------------------------------------------------------------------
// Image candidates
// ---------------------------------------------------------------------------

/// The minimal view of an image record needed to order and resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub id: DbId,
    pub image_url: String,
    pub display_order: i32,
    pub is_primary: bool,
}

/// Sort images primary-first, then by ascending `display_order`.
///
/// Ties are broken by ascending id so the result is reproducible from the
/// same persisted rows regardless of fetch order.
pub fn sort_primary_first(images: &mut [ImageCandidate]) {
    images.sort_by(|a, b| {
        b.is_primary
            .cmp(&a.is_primary)
            .then(a.display_order.cmp(&b.display_order))
            .then(a.id.cmp(&b.id))
    });
}

/// The `display_order` a newly appended image should receive.
pub fn next_display_order(existing: &[i32]) -> i32 {
    existing.iter().max().map_or(0, |max| max + 1)
}

// ---------------------------------------------------------------------------
// URL checks (read path)
// ---------------------------------------------------------------------------

/// A stored URL value that carries an actual reference.
///
/// Rejects `None`, empty/whitespace strings, and the literal placeholder
/// strings in [`PLACEHOLDER_STRINGS`].
pub fn present_url(value: Option<&str>) -> Option<&str> {
    let value = value?.trim();
    if value.is_empty() || PLACEHOLDER_STRINGS.contains(&value) {
        return None;
    }
    Some(value)
}

/// An owner or child image URL: must be absolute (`http...`) or site-rooted (`/...`).
pub fn usable_owner_url(value: Option<&str>) -> Option<&str> {
    present_url(value).filter(|v| v.starts_with("http") || v.starts_with('/'))
}

/// A remote URL: must start with `http`. Used for game images and icons.
pub fn usable_remote_url(value: Option<&str>) -> Option<&str> {
    present_url(value).filter(|v| v.starts_with("http"))
}

// ---------------------------------------------------------------------------
// Validation (write path)
// ---------------------------------------------------------------------------

/// Validate an image URL submitted for a new or updated image record.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation("image_url must not be empty".into()));
    }
    Ok(())
}

/// Validate a caller-supplied display order.
pub fn validate_display_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::Validation(format!(
            "display_order must be non-negative, got {order}"
        )));
    }
    Ok(())
}

/// Validate an explicit reorder list: non-empty and free of duplicate ids.
pub fn validate_reorder_ids(ids: &[DbId]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("image_ids must not be empty".into()));
    }
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "image_ids contains duplicate id {id}"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
