//! Render mode catalog
//!
//! The catalog is a fixed, ordered list built at compile time. Nothing is
//! registered or removed at runtime, so every lookup here is safe to call
//! from any number of threads without locking.
//!
//! Mode names are stored in saved configuration. Once a name has shipped it
//! must keep its meaning.

use std::fmt;

use serde::Serialize;

use super::{CaveMode, LightingMode, NightMode, NormalMode, RenderMode, SpawnMode};

/// Every mode a user can pick, in listing order.
/// Modes that only exist as a base for other modes don't belong here.
pub static RENDER_MODES: Catalog = Catalog::new(&[
    RenderModeDescriptor {
        name: "normal",
        description: "nothing special, just render the blocks",
        capabilities: &NormalMode,
    },
    RenderModeDescriptor {
        name: "lighting",
        description: "draw shadows from the lighting data",
        capabilities: &LightingMode::DAY,
    },
    RenderModeDescriptor {
        name: "night",
        description: "like \"lighting\", except at night",
        capabilities: &NightMode::DEFAULT,
    },
    RenderModeDescriptor {
        name: "spawn",
        description: "draws red where monsters can spawn at night",
        capabilities: &SpawnMode::AT_NIGHT,
    },
    RenderModeDescriptor {
        name: "cave",
        description: "render only caves, tinted by depth",
        capabilities: &CaveMode::DEFAULT,
    },
]);

/// Resolution failures on the rendering path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderModeError {
    #[error("unknown render mode: {0}")]
    UnknownMode(String),
}

/// One entry of the catalog
pub struct RenderModeDescriptor {
    /// Stable identifier used in configuration
    pub name: &'static str,
    /// Human-readable summary
    pub description: &'static str,
    /// Entry points the tile walk invokes
    pub capabilities: &'static dyn RenderMode,
}

impl RenderModeDescriptor {
    /// Name and description without the capabilities
    pub fn info(&self) -> RenderModeInfo {
        RenderModeInfo {
            name: self.name,
            description: self.description,
        }
    }
}

impl fmt::Debug for RenderModeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderModeDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Metadata returned by [`describe`], for help and validation surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RenderModeInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// An ordered, immutable list of render modes
#[derive(Clone, Copy)]
pub struct Catalog {
    entries: &'static [RenderModeDescriptor],
}

impl Catalog {
    /// Build a catalog. Duplicate names fail const evaluation.
    pub const fn new(entries: &'static [RenderModeDescriptor]) -> Self {
        let mut i = 0;
        while i < entries.len() {
            let mut j = i + 1;
            while j < entries.len() {
                if str_eq(entries[i].name, entries[j].name) {
                    panic!("duplicate render mode name in catalog");
                }
                j += 1;
            }
            i += 1;
        }
        Self { entries }
    }

    pub fn descriptors(&self) -> &'static [RenderModeDescriptor] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup
    pub fn find(&self, name: &str) -> Option<&'static RenderModeDescriptor> {
        self.entries.iter().find(|mode| mode.name == name)
    }

    /// Lookup for rendering; a miss is a configuration error
    pub fn resolve(&self, name: &str) -> Result<&'static RenderModeDescriptor, RenderModeError> {
        self.find(name)
            .ok_or_else(|| RenderModeError::UnknownMode(name.to_string()))
    }

    /// All names in catalog order
    pub fn list_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|mode| mode.name).collect()
    }

    /// Metadata for a name; `None` is a normal answer, not an error
    pub fn describe(&self, name: &str) -> Option<RenderModeInfo> {
        self.find(name).map(RenderModeDescriptor::info)
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries).finish()
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Catalog entries in listing order
pub fn descriptors() -> &'static [RenderModeDescriptor] {
    RENDER_MODES.descriptors()
}

/// Find a mode by exact name
pub fn find(name: &str) -> Option<&'static RenderModeDescriptor> {
    RENDER_MODES.find(name)
}

/// Resolve a configured mode name for rendering
pub fn resolve(name: &str) -> Result<&'static RenderModeDescriptor, RenderModeError> {
    let mode = RENDER_MODES.resolve(name)?;
    log::debug!("Resolved render mode '{}'", mode.name);
    Ok(mode)
}

/// Names of every registered mode, in catalog order
pub fn list_names() -> Vec<&'static str> {
    RENDER_MODES.list_names()
}

/// Name and description of a mode, if it exists
pub fn describe(name: &str) -> Option<RenderModeInfo> {
    RENDER_MODES.describe(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    static EMPTY: Catalog = Catalog::new(&[]);

    #[test]
    fn test_catalog_order() {
        assert_eq!(list_names(), vec!["normal", "lighting", "night", "spawn", "cave"]);
    }

    #[test]
    fn test_names_unique() {
        let names = list_names();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate mode {}", name);
        }
    }

    #[test]
    fn test_resolve_known() {
        for name in list_names() {
            assert_eq!(resolve(name).unwrap().name, name);
        }
    }

    #[test]
    fn test_resolve_unknown() {
        let err = resolve("Normal").unwrap_err();
        assert_eq!(err, RenderModeError::UnknownMode("Normal".to_string()));
        assert_eq!(err.to_string(), "unknown render mode: Normal");
        assert!(resolve("").is_err());
        assert!(resolve("normal ").is_err());
    }

    #[test]
    fn test_describe() {
        let info = describe("lighting").unwrap();
        assert_eq!(info.name, "lighting");
        assert!(!info.description.is_empty());
        assert_eq!(describe("sunset"), None);
    }

    #[test]
    fn test_every_mode_has_description() {
        for mode in descriptors() {
            assert!(!mode.description.is_empty(), "{} has no description", mode.name);
        }
    }

    #[test]
    fn test_list_names_is_a_copy() {
        let mut names = list_names();
        names.clear();
        assert_eq!(list_names().len(), RENDER_MODES.len());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(EMPTY.is_empty());
        assert!(EMPTY.list_names().is_empty());
        assert!(EMPTY.find("normal").is_none());
        assert!(EMPTY.describe("normal").is_none());
        assert!(EMPTY.resolve("normal").is_err());
    }

    #[test]
    fn test_info_serializes() {
        let json = serde_json::to_value(describe("cave").unwrap()).unwrap();
        assert_eq!(json["name"], "cave");
        assert!(json["description"].is_string());
    }
}
