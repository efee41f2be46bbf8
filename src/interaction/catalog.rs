// src/interaction/catalog.rs
//! Model-type catalog: interactivity, overlay text, and semantic sizing.
//!
//! Replaces ad-hoc string switches with one explicit table. Unknown tags get
//! the fallback size class and no description; lookups never fail.

use std::collections::{HashMap, HashSet};

/// Semantic size of a model type, independent of the source mesh's units.
///
/// Model files come in wildly different scales, so the loader normalizes each
/// mesh to the target extent of its class instead of trusting the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// Desired maximum extent in world units after normalization.
    pub fn target_extent(self) -> f32 {
        match self {
            SizeClass::Small => 0.6,
            SizeClass::Medium => 1.4,
            SizeClass::Large => 2.4,
        }
    }
}

/// Per-tag catalog consulted at registration and load time.
pub struct Catalog {
    descriptions: HashMap<String, String>,
    sizes: HashMap<String, SizeClass>,
    interactive: HashSet<String>,
    fallback_size: SizeClass,
}

impl Catalog {
    /// The built-in showroom furniture catalog.
    pub fn showroom() -> Self {
        let mut catalog = Self::empty(SizeClass::Medium);

        catalog.insert(
            "couch",
            SizeClass::Large,
            true,
            "A deep three-seater couch. Upholstered in woven fabric; seats three comfortably.",
        );
        catalog.insert(
            "table",
            SizeClass::Large,
            true,
            "A solid dining table. The top is a single slab; seats six.",
        );
        catalog.insert(
            "chair",
            SizeClass::Medium,
            true,
            "A side chair with a slatted back. Light enough to move one-handed.",
        );
        catalog.insert(
            "lamp",
            SizeClass::Small,
            true,
            "A table lamp with a linen shade. Warm light, suited to reading corners.",
        );
        catalog.insert(
            "bookshelf",
            SizeClass::Large,
            true,
            "An open bookshelf, five shelves tall. Anchoring to the wall is recommended.",
        );
        catalog.insert(
            "bed",
            SizeClass::Large,
            true,
            "A queen-size bed frame with a padded headboard.",
        );
        catalog.insert(
            "plant",
            SizeClass::Medium,
            true,
            "A potted indoor plant. Prefers indirect light and forgiving owners.",
        );
        catalog.insert(
            "rug",
            SizeClass::Large,
            false,
            "A flat-woven area rug.",
        );
        // The floor is furniture-adjacent at best; never interactive
        catalog.sizes.insert("floor".into(), SizeClass::Large);

        catalog
    }

    /// An empty catalog with the given fallback size class.
    pub fn empty(fallback_size: SizeClass) -> Self {
        Self {
            descriptions: HashMap::new(),
            sizes: HashMap::new(),
            interactive: HashSet::new(),
            fallback_size,
        }
    }

    /// Adds or replaces a catalog entry.
    pub fn insert(
        &mut self,
        tag: &str,
        size: SizeClass,
        interactive: bool,
        description: &str,
    ) {
        self.sizes.insert(tag.to_string(), size);
        self.descriptions
            .insert(tag.to_string(), description.to_string());
        if interactive {
            self.interactive.insert(tag.to_string());
        } else {
            self.interactive.remove(tag);
        }
    }

    /// Overlay text for a tag, if any.
    pub fn description(&self, tag: &str) -> Option<&str> {
        self.descriptions.get(tag).map(String::as_str)
    }

    /// Size class for a tag, falling back for unknown tags.
    pub fn size_class(&self, tag: &str) -> SizeClass {
        self.sizes.get(tag).copied().unwrap_or(self.fallback_size)
    }

    pub fn is_interactive(&self, tag: &str) -> bool {
        self.interactive.contains(tag)
    }

    /// Tags eligible for proximity focus, for engine construction.
    pub fn interactive_tags(&self) -> Vec<String> {
        self.interactive.iter().cloned().collect()
    }
}
