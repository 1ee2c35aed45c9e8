// read-only lookup tables: interior module templates and material swatches
// both are plain JSON data, the built-in sets are compiled in from assets/catalog

use std::collections::HashSet;
use std::path::Path;

use bevy::color::{Color, Srgba};
use bevy::log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::*;
use super::primitive::Finish;

const BUILTIN_MODULES: &str = include_str!("../../../../assets/catalog/modules.json");
const BUILTIN_SWATCHES: &str = include_str!("../../../../assets/catalog/swatches.json");

/// Category id that matches every swatch.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog contains no entries")]
    Empty,
    #[error("duplicate catalog id '{0}'")]
    DuplicateId(String),
    #[error("module '{module}': level {value} is outside (0, 1)")]
    LevelOutOfRange { module: String, value: f32 },
    #[error("module '{module}': levels must be sorted ascending")]
    UnsortedLevels { module: String },
    #[error("module '{module}': drawer band {index} lies outside [0, 1]")]
    DrawerOutOfRange { module: String, index: usize },
    #[error("module '{module}': drawer bands {first} and {second} overlap")]
    OverlappingDrawers { module: String, first: usize, second: usize },
    #[error("module '{module}': cubby grid needs at least one row and one column")]
    EmptyCubbyGrid { module: String },
    #[error("swatch '{swatch}': invalid color '{color}'")]
    InvalidColor { swatch: String, color: String },
}

/// One drawer band, both fields are fractions of the column's effective height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerSection {
    pub height: f32,
    pub offset: f32,
}

impl DrawerSection {
    pub fn top(&self) -> f32 {
        self.offset + self.height
    }
}

/// Shape-specific part of a module template.
/// Shelf and rail levels are shared by every kind and live on the template itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModuleLayout {
    Plain,
    Drawers { sections: Vec<DrawerSection> },
    ShoeRack { shelves: u32 },
    Cubbies { rows: u32, columns: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTemplate {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub shelf_levels: Vec<f32>,
    #[serde(default)]
    pub rail_levels: Vec<f32>,
    #[serde(default)]
    pub accent: bool,
    pub layout: ModuleLayout,
}

impl ModuleTemplate {
    pub fn drawer_sections(&self) -> &[DrawerSection] {
        match &self.layout {
            ModuleLayout::Drawers { sections } => sections,
            _ => &[],
        }
    }

    /// True when the template places nothing inside its column.
    pub fn is_empty(&self) -> bool {
        self.shelf_levels.is_empty()
            && self.rail_levels.is_empty()
            && matches!(self.layout, ModuleLayout::Plain)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for levels in [&self.shelf_levels, &self.rail_levels] {
            for &value in levels.iter() {
                if !(value > 0.0 && value < 1.0) {
                    return Err(CatalogError::LevelOutOfRange { module: self.id.clone(), value });
                }
            }
            if levels.windows(2).any(|pair| pair[0] > pair[1]) {
                return Err(CatalogError::UnsortedLevels { module: self.id.clone() });
            }
        }

        match &self.layout {
            ModuleLayout::Drawers { sections } => {
                for (index, section) in sections.iter().enumerate() {
                    if !(section.height > 0.0 && section.offset >= 0.0 && section.top() <= 1.0) {
                        return Err(CatalogError::DrawerOutOfRange { module: self.id.clone(), index });
                    }
                }
                // bands may be listed in any order, compare every pair
                for first in 0..sections.len() {
                    for second in (first + 1)..sections.len() {
                        let a = sections[first];
                        let b = sections[second];
                        if a.offset < b.top() && b.offset < a.top() {
                            return Err(CatalogError::OverlappingDrawers {
                                module: self.id.clone(),
                                first,
                                second,
                            });
                        }
                    }
                }
            }
            ModuleLayout::Cubbies { rows, columns } => {
                if *rows == 0 || *columns == 0 {
                    return Err(CatalogError::EmptyCubbyGrid { module: self.id.clone() });
                }
            }
            ModuleLayout::Plain | ModuleLayout::ShoeRack { .. } => {}
        }

        Ok(())
    }
}

/// Ordered, validated set of module templates. The first entry is the default module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCatalog {
    modules: Vec<ModuleTemplate>,
}

impl ModuleCatalog {
    pub fn new(modules: Vec<ModuleTemplate>) -> Result<Self, CatalogError> {
        if modules.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id.as_str()) {
                return Err(CatalogError::DuplicateId(module.id.clone()));
            }
            module.validate()?;
        }

        Ok(Self { modules })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The compiled-in catalog from assets/catalog/modules.json.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_MODULES).expect("built-in module catalog is valid")
    }

    pub fn get(&self, id: &str) -> Option<&ModuleTemplate> {
        self.modules.iter().find(|module| module.id == id)
    }

    pub fn default_module(&self) -> &ModuleTemplate {
        &self.modules[0]
    }

    /// Looks up a template, substituting the default module for unknown ids.
    pub fn resolve(&self, id: &str) -> &ModuleTemplate {
        self.get(id).unwrap_or_else(|| {
            warn!("unknown module '{}', falling back to '{}'", id, self.default_module().id);
            self.default_module()
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleTemplate> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub id: String,
    pub label: String,
    pub color: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Swatch {
    pub fn srgba(&self) -> Result<Srgba, CatalogError> {
        Srgba::hex(&self.color).map_err(|_| CatalogError::InvalidColor {
            swatch: self.id.clone(),
            color: self.color.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwatchCatalog {
    swatches: Vec<Swatch>,
}

impl SwatchCatalog {
    pub fn new(swatches: Vec<Swatch>) -> Result<Self, CatalogError> {
        if swatches.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for swatch in &swatches {
            if !seen.insert(swatch.id.as_str()) {
                return Err(CatalogError::DuplicateId(swatch.id.clone()));
            }
            swatch.srgba()?;
        }

        Ok(Self { swatches })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_SWATCHES).expect("built-in swatch catalog is valid")
    }

    pub fn get(&self, id: &str) -> Option<&Swatch> {
        self.swatches.iter().find(|swatch| swatch.id == id)
    }

    pub fn color(&self, id: &str) -> Option<Color> {
        self.get(id).and_then(|swatch| swatch.srgba().ok()).map(Color::from)
    }

    /// Resolves a material id, or returns `fallback` when the id is not in the catalog.
    pub fn color_or(&self, id: &str, fallback: Color) -> Color {
        self.color(id).unwrap_or_else(|| {
            warn!("unknown material '{}', using fallback color", id);
            fallback
        })
    }

    pub fn filter<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Swatch> + 'a {
        self.swatches.iter().filter(move |swatch| {
            category == ALL_CATEGORIES || swatch.categories.iter().any(|c| c == category)
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Swatch> {
        self.swatches.iter()
    }

    /// Distinct categories in first-seen order, `ALL_CATEGORIES` first.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for category in self.swatches.iter().flat_map(|swatch| swatch.categories.iter()) {
            if !categories.contains(&category.as_str()) {
                categories.push(category);
            }
        }
        categories
    }
}

/// Colors every primitive finish resolves to for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub cabinet: Color,
    pub interior: Color,
    pub door: Color,
    pub accent: Color,
    pub metal: Color,
    pub frame: Color,
    pub glass: Color,
    pub knob: Color,
}

impl Palette {
    pub fn resolve(swatches: &SwatchCatalog, cabinet: &str, interior: &str, door: &str) -> Self {
        let cabinet = swatches.color_or(cabinet, hex_color(FALLBACK_CABINET_COLOR));
        let interior = swatches.color_or(interior, hex_color(FALLBACK_INTERIOR_COLOR));
        // doors fall back to the cabinet finish
        let door = swatches.color_or(door, cabinet);

        Self {
            cabinet,
            interior,
            door,
            accent: hex_color(ACCENT_COLOR),
            metal: hex_color(METAL_COLOR),
            frame: hex_color(FRAME_COLOR),
            glass: hex_color(GLASS_COLOR),
            knob: hex_color(KNOB_COLOR),
        }
    }

    pub fn color(&self, finish: Finish) -> Color {
        match finish {
            Finish::Cabinet => self.cabinet,
            Finish::Interior => self.interior,
            Finish::Door => self.door,
            Finish::Accent => self.accent,
            Finish::Metal => self.metal,
            Finish::Frame => self.frame,
            Finish::Glass => self.glass,
            Finish::Knob => self.knob,
        }
    }
}

// constant colors from config.rs, a typo there shows up as magenta
pub(crate) fn hex_color(hex: &str) -> Color {
    Srgba::hex(hex).map(Color::from).unwrap_or(Color::srgb(1.0, 0.0, 1.0))
}
