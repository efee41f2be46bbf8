// src/interaction/engine.rs
//! Proximity-driven focus engine.
//!
//! Tracks every placed object, and on each frame selects the nearest
//! interactive object strictly within the interaction radius of the
//! viewpoint. Focus changes are edge-triggered: a [`FocusChange`] is emitted
//! only when the identity of the selected object differs from the previous
//! frame, never because distances merely fluctuated.

use cgmath::{InnerSpace, Vector3};

/// Default interaction radius in world units.
pub const INTERACTION_DISTANCE: f32 = 2.0;

/// Stable handle for a registered object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(usize);

impl TargetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A scene entity as the engine sees it.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    /// Model-type tag; membership in the allow-list decides eligibility.
    pub tag: String,
    /// World-space anchor used for distance checks.
    pub position: Vector3<f32>,
    /// Overlay text; `None` degrades to a placeholder, never an error.
    pub description: Option<String>,
}

struct Entry {
    object: PlacedObject,
    interactive: bool,
}

/// Edge-triggered focus transition.
///
/// `left` and `entered` are both set when focus jumps directly from one
/// object to another in a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    pub left: Option<TargetId>,
    pub entered: Option<TargetId>,
}

/// Registry plus focus state; one instance per viewer session.
pub struct InteractionEngine {
    radius: f32,
    allow_list: Vec<String>,
    entries: Vec<Entry>,
    focused: Option<TargetId>,
    epoch: u64,
}

impl InteractionEngine {
    /// Creates an engine with the given radius and interactive allow-list.
    pub fn new<S: Into<String>>(radius: f32, allow_list: impl IntoIterator<Item = S>) -> Self {
        Self {
            radius,
            allow_list: allow_list.into_iter().map(Into::into).collect(),
            entries: Vec::new(),
            focused: None,
            epoch: 0,
        }
    }

    /// Adds an object to the registry and returns its id.
    ///
    /// Objects whose tag is not on the allow-list are kept (they may still be
    /// looked up) but never participate in proximity selection.
    pub fn register(&mut self, object: PlacedObject) -> TargetId {
        let interactive = self.allow_list.iter().any(|tag| *tag == object.tag);
        self.entries.push(Entry {
            object,
            interactive,
        });
        TargetId(self.entries.len() - 1)
    }

    /// Registers only if `epoch` is still current.
    ///
    /// Async load completions carry the epoch observed when the load was
    /// requested; a `clear()` in between bumps the epoch and the stale
    /// resolution is dropped here.
    pub fn register_at(&mut self, epoch: u64, object: PlacedObject) -> Option<TargetId> {
        if epoch != self.epoch {
            log::debug!("dropping stale registration for '{}'", object.tag);
            return None;
        }
        Some(self.register(object))
    }

    /// Evaluates focus for the current viewpoint.
    ///
    /// Returns `Some(FocusChange)` exactly when the focused identity changed,
    /// `None` otherwise. Ties at equal distance go to the first-registered
    /// object; distance exactly equal to the radius is out of range.
    pub fn tick(&mut self, viewpoint: Vector3<f32>) -> Option<FocusChange> {
        let radius2 = self.radius * self.radius;

        let mut nearest: Option<(TargetId, f32)> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.interactive {
                continue;
            }
            let dist2 = (entry.object.position - viewpoint).magnitude2();
            if dist2 >= radius2 {
                continue;
            }
            // Strict < keeps the first-registered object on exact ties
            match nearest {
                Some((_, best)) if dist2 >= best => {}
                _ => nearest = Some((TargetId(index), dist2)),
            }
        }

        let selected = nearest.map(|(id, _)| id);
        if selected == self.focused {
            return None;
        }

        let change = FocusChange {
            left: self.focused,
            entered: selected,
        };
        self.focused = selected;
        Some(change)
    }

    /// Empties the registry and resets focus without emitting a leave event.
    ///
    /// Bumps the epoch so load resolutions issued before the clear are
    /// ignored by [`register_at`](Self::register_at).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.focused = None;
        self.epoch += 1;
    }

    pub fn focused(&self) -> Option<TargetId> {
        self.focused
    }

    pub fn get(&self, id: TargetId) -> Option<&PlacedObject> {
        self.entries.get(id.0).map(|entry| &entry.object)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
