//! Display image resolution for battles and boxes.
//!
//! Given everything already loaded for one owner, decide which image list
//! to show. The cascade is total: malformed or missing values fall through
//! to the next tier and the placeholder tier always succeeds.
//!
//! 1. the owner's own image records
//! 2. the owner's legacy single `image_url` column
//! 3. the parent game's `image`
//! 4. the parent game's `icon`
//! 5. [`PLACEHOLDER_IMAGE`]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::images::{sort_primary_first, usable_owner_url, usable_remote_url, ImageCandidate};

/// Site-rooted asset shown when nothing else is available.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Everything the resolver needs about one owner, fetched in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerDisplayData {
    /// The owner's image records, in any order.
    pub images: Vec<ImageCandidate>,
    /// Legacy single-image column on the owner row.
    pub legacy_image_url: Option<String>,
    /// Parent game's `image` column.
    pub game_image: Option<String>,
    /// Parent game's `icon` column.
    pub game_icon: Option<String>,
    /// Box-only carousel preference; always false for battles.
    pub show_carousel: bool,
    /// Images of child entities (models inside a box), in fetch order.
    pub child_image_urls: Vec<String>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Which tier of the cascade produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageTier {
    OwnImages,
    LegacyField,
    GameImage,
    GameIcon,
    Placeholder,
}

/// The ordered image list chosen for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedImages {
    /// Never empty.
    pub images: Vec<String>,
    pub tier: ImageTier,
}

impl ResolvedImages {
    fn single(src: &str, tier: ImageTier) -> Self {
        Self {
            images: vec![src.to_string()],
            tier,
        }
    }

    /// The placeholder result.
    pub fn placeholder() -> Self {
        Self::single(PLACEHOLDER_IMAGE, ImageTier::Placeholder)
    }

    /// The first image to show.
    pub fn primary_src(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// More than one image: the display should rotate.
    pub fn is_carousel(&self) -> bool {
        self.images.len() > 1
    }

    /// The image belongs to the parent game rather than the owner.
    ///
    /// Renderers use this to apply a dimmed treatment.
    pub fn is_game_fallback(&self) -> bool {
        matches!(self.tier, ImageTier::GameImage | ImageTier::GameIcon)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Run the fallback cascade over pre-loaded owner data.
pub fn resolve(data: &OwnerDisplayData) -> ResolvedImages {
    if !data.images.is_empty() {
        return ResolvedImages {
            images: own_image_list(data),
            tier: ImageTier::OwnImages,
        };
    }

    if let Some(url) = usable_owner_url(data.legacy_image_url.as_deref()) {
        return ResolvedImages::single(url, ImageTier::LegacyField);
    }

    if let Some(url) = usable_remote_url(data.game_image.as_deref()) {
        return ResolvedImages::single(url, ImageTier::GameImage);
    }

    if let Some(url) = usable_remote_url(data.game_icon.as_deref()) {
        return ResolvedImages::single(url, ImageTier::GameIcon);
    }

    ResolvedImages::placeholder()
}

/// Own images primary-first, with child images appended when the carousel
/// preference is set. Child URLs are de-duplicated against the whole list.
fn own_image_list(data: &OwnerDisplayData) -> Vec<String> {
    let mut sorted = data.images.clone();
    sort_primary_first(&mut sorted);

    let mut urls: Vec<String> = sorted.into_iter().map(|i| i.image_url).collect();
    if !data.show_carousel {
        return urls;
    }

    let mut seen: HashSet<String> = urls.iter().cloned().collect();
    for child in &data.child_image_urls {
        if let Some(url) = usable_owner_url(Some(child)) {
            if seen.insert(url.to_string()) {
                urls.push(url.to_string());
            }
        }
    }
    urls
}

/// Resolve data that may have failed to load or may not exist.
///
/// A missing owner resolves to the placeholder.
pub fn resolve_or_placeholder(data: Option<&OwnerDisplayData>) -> ResolvedImages {
    data.map_or_else(ResolvedImages::placeholder, resolve)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
