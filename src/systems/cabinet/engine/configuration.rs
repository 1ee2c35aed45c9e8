// the flat configuration record and the pure update layer on top of it
//
// Every update returns the next record instead of mutating, so the history store can
// compare the result against the present and drop no-op edits.

use bevy::log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::*;
use super::catalog::ModuleCatalog;
use super::dimensions::CarcassDimensions;
use super::placement::Room;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementIntent {
    #[default]
    Free,
    Left,
    Right,
    Wall,
}

impl PlacementIntent {
    pub const ALL: [PlacementIntent; 4] = [Self::Free, Self::Left, Self::Right, Self::Wall];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Free standing",
            Self::Left => "Against left wall",
            Self::Right => "Against right wall",
            Self::Wall => "Wall to wall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStyle {
    #[default]
    Hinged,
    Sliding,
    None,
}

impl DoorStyle {
    pub const ALL: [DoorStyle; 3] = [Self::Hinged, Self::Sliding, Self::None];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hinged => "Hinged",
            Self::Sliding => "Sliding",
            Self::None => "No doors",
        }
    }

    pub fn has_doors(&self) -> bool {
        !matches!(self, Self::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
    Depth,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Self::Width, Self::Height, Self::Depth];

    /// Inclusive clamp range in centimeters.
    pub fn range(&self) -> (f32, f32) {
        match self {
            Self::Width => (WIDTH_MIN, WIDTH_MAX),
            Self::Height => (HEIGHT_MIN, HEIGHT_MAX),
            Self::Depth => (DEPTH_MIN, DEPTH_MAX),
        }
    }

    pub fn clamp(&self, cm: f32) -> f32 {
        let (min, max) = self.range();
        cm.clamp(min, max)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Depth => "depth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Cabinet,
    Interior,
    Door,
}

/// Optional carcass parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addon {
    BackPanel,
    TopBottom,
    TopShelf,
    Base,
}

impl Addon {
    pub const ALL: [Addon; 4] = [Self::BackPanel, Self::TopBottom, Self::TopShelf, Self::Base];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BackPanel => "Back panel",
            Self::TopBottom => "Top and bottom",
            Self::TopShelf => "Top shelf",
            Self::Base => "Base plinth",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("column count {0} outside 1..={max}", max = MAX_COLUMNS)]
    ColumnCountOutOfRange(usize),
    #[error("{columns} columns but {modules} module assignments")]
    ModuleCountMismatch { columns: usize, modules: usize },
    #[error("{} {value} cm outside its clamp range", .dimension.label())]
    DimensionOutOfRange { dimension: Dimension, value: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub position: PlacementIntent,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub full_height: bool,
    pub include_back_panel: bool,
    pub include_top_bottom: bool,
    pub include_top_shelf: bool,
    pub include_base: bool,
    pub cabinet_material: String,
    pub interior_material: String,
    pub door_material: String,
    pub door_style: DoorStyle,
    pub column_count: usize,
    pub modules: Vec<String>,
    // display only
    pub price: f32,
    pub delivery: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            position: PlacementIntent::Free,
            width: 140.0,
            height: 220.0,
            depth: 65.0,
            full_height: false,
            include_back_panel: true,
            include_top_bottom: true,
            include_top_shelf: true,
            include_base: true,
            cabinet_material: "oak-natural".into(),
            interior_material: "birch-light".into(),
            door_material: "white-satin".into(),
            door_style: DoorStyle::Hinged,
            column_count: 3,
            modules: vec!["module-hanging".into(), "module-drawers".into(), "module-shelves".into()],
            price: 1000.0,
            delivery: "24.11.2025".into(),
        }
    }
}

impl Configuration {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn dimensions(&self) -> CarcassDimensions {
        CarcassDimensions::from_cm(self.width, self.height, self.depth, self.column_count)
    }

    pub fn dimension(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
            Dimension::Depth => self.depth,
        }
    }

    pub fn with_dimension(&self, dimension: Dimension, cm: f32) -> Self {
        let mut next = self.clone();
        if !cm.is_finite() {
            warn!("ignoring non-finite {} {}", dimension.label(), cm);
            return next;
        }

        let value = dimension.clamp(cm);
        match dimension {
            Dimension::Width => next.width = value,
            Dimension::Height => {
                next.height = value;
                next.full_height = false;
            }
            Dimension::Depth => next.depth = value,
        }
        next
    }

    pub fn with_full_height(&self, on: bool) -> Self {
        let mut next = self.clone();
        next.full_height = on;
        next.height = if on { FULL_HEIGHT } else { self.height.min(FULL_HEIGHT_RELEASE_CAP) };
        next
    }

    /// Wall to wall placement also widens the cabinet to the room span.
    pub fn with_position(&self, intent: PlacementIntent, room: &Room) -> Self {
        let mut next = self.clone();
        next.position = intent;
        if intent == PlacementIntent::Wall {
            next.width = Dimension::Width.clamp(room.span() * CM_PER_METER);
        }
        next
    }

    /// Truncates or pads the module list with the catalog's default module.
    pub fn with_column_count(&self, count: usize, catalog: &ModuleCatalog) -> Self {
        let count = count.clamp(1, MAX_COLUMNS);
        if count == self.column_count && self.modules.len() == count {
            return self.clone();
        }

        let mut next = self.clone();
        next.column_count = count;
        next.modules.truncate(count);
        next.modules.resize(count, catalog.default_module().id.clone());
        next
    }

    pub fn with_module(&self, column: usize, id: &str) -> Self {
        let mut next = self.clone();
        match next.modules.get_mut(column) {
            Some(slot) => *slot = id.to_string(),
            None => warn!("no column {} to assign '{}' to", column, id),
        }
        next
    }

    pub fn with_door_style(&self, style: DoorStyle) -> Self {
        let mut next = self.clone();
        next.door_style = style;
        next
    }

    pub fn material(&self, slot: MaterialSlot) -> &str {
        match slot {
            MaterialSlot::Cabinet => &self.cabinet_material,
            MaterialSlot::Interior => &self.interior_material,
            MaterialSlot::Door => &self.door_material,
        }
    }

    pub fn with_material(&self, slot: MaterialSlot, id: &str) -> Self {
        let mut next = self.clone();
        let target = match slot {
            MaterialSlot::Cabinet => &mut next.cabinet_material,
            MaterialSlot::Interior => &mut next.interior_material,
            MaterialSlot::Door => &mut next.door_material,
        };
        *target = id.to_string();
        next
    }

    pub fn addon(&self, addon: Addon) -> bool {
        match addon {
            Addon::BackPanel => self.include_back_panel,
            Addon::TopBottom => self.include_top_bottom,
            Addon::TopShelf => self.include_top_shelf,
            Addon::Base => self.include_base,
        }
    }

    pub fn with_addon(&self, addon: Addon, on: bool) -> Self {
        let mut next = self.clone();
        let flag = match addon {
            Addon::BackPanel => &mut next.include_back_panel,
            Addon::TopBottom => &mut next.include_top_bottom,
            Addon::TopShelf => &mut next.include_top_shelf,
            Addon::Base => &mut next.include_base,
        };
        *flag = on;
        next
    }

    pub fn toggle_addon(&self, addon: Addon) -> Self {
        self.with_addon(addon, !self.addon(addon))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_count == 0 || self.column_count > MAX_COLUMNS {
            return Err(ConfigError::ColumnCountOutOfRange(self.column_count));
        }
        if self.modules.len() != self.column_count {
            return Err(ConfigError::ModuleCountMismatch {
                columns: self.column_count,
                modules: self.modules.len(),
            });
        }
        for dimension in Dimension::ALL {
            let value = self.dimension(dimension);
            let (min, max) = dimension.range();
            if !(min..=max).contains(&value) {
                return Err(ConfigError::DimensionOutOfRange { dimension, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_valid() {
        let config = Configuration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.modules.len(), config.column_count);
    }

    #[test]
    fn dimensions_are_clamped() {
        let config = Configuration::default();
        assert_eq!(config.with_dimension(Dimension::Width, 10.0).width, WIDTH_MIN);
        assert_eq!(config.with_dimension(Dimension::Depth, 500.0).depth, DEPTH_MAX);
        assert_eq!(config.with_dimension(Dimension::Height, f32::NAN), config);
    }

    #[test]
    fn height_edit_releases_full_height() {
        let config = Configuration::default().with_full_height(true);
        assert!(config.full_height);
        assert_eq!(config.height, FULL_HEIGHT);

        let edited = config.with_dimension(Dimension::Height, 230.0);
        assert!(!edited.full_height);
        assert_eq!(edited.height, 230.0);

        let released = config.with_full_height(false);
        assert_eq!(released.height, FULL_HEIGHT_RELEASE_CAP);
    }

    #[test]
    fn column_count_pads_and_truncates() {
        let catalog = ModuleCatalog::builtin();
        let config = Configuration::default();

        let wider = config.with_column_count(5, &catalog);
        assert_eq!(wider.modules.len(), 5);
        assert_eq!(wider.modules[3], catalog.default_module().id);
        assert_eq!(wider.modules[..3], config.modules[..]);

        let narrow = wider.with_column_count(1, &catalog);
        assert_eq!(narrow.modules, vec!["module-hanging".to_string()]);

        assert_eq!(config.with_column_count(0, &catalog).column_count, 1);
        assert_eq!(config.with_column_count(9, &catalog).column_count, MAX_COLUMNS);
        assert_eq!(config.with_column_count(3, &catalog), config);
    }

    #[test]
    fn wall_placement_spans_room() {
        let room = Room::default();
        let config = Configuration::default().with_position(PlacementIntent::Wall, &room);
        assert_eq!(config.position, PlacementIntent::Wall);
        assert!((config.width - room.span() * CM_PER_METER).abs() < 1e-3);

        let left = Configuration::default().with_position(PlacementIntent::Left, &room);
        assert_eq!(left.width, 140.0);
    }

    #[test]
    fn materials_and_addons() {
        let config = Configuration::default()
            .with_material(MaterialSlot::Door, "ebony")
            .toggle_addon(Addon::Base);
        assert_eq!(config.material(MaterialSlot::Door), "ebony");
        assert!(!config.include_base);
        assert!(config.toggle_addon(Addon::Base).include_base);
    }

    #[test]
    fn module_assignment_out_of_range_is_ignored() {
        let config = Configuration::default();
        assert_eq!(config.with_module(7, "module-linen"), config);
        assert_eq!(config.with_module(1, "module-linen").modules[1], "module-linen");
    }

    #[test]
    fn validate_reports_mismatch() {
        let mut config = Configuration::default();
        config.modules.pop();
        assert_eq!(
            config.validate(),
            Err(ConfigError::ModuleCountMismatch { columns: 3, modules: 2 })
        );
    }

    #[test]
    fn serializes_as_flat_camel_case_record() {
        let json = Configuration::default().to_json_pretty().unwrap();
        assert!(json.contains("\"columnCount\": 3"));
        assert!(json.contains("\"doorStyle\": \"hinged\""));
        assert!(json.contains("\"includeTopBottom\": true"));
        assert_eq!(Configuration::from_json(&json).unwrap(), Configuration::default());
    }
}
