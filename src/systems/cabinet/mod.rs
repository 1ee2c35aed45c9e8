use bevy::prelude::*;
use std::path::Path;

use crate::config::*;

pub mod build;
pub mod engine;

use engine::{Configuration, DoorVisibility, History, ModuleCatalog, ResolvedLayout, Room, SwatchCatalog};

// the one mutable record, everything else is derived from it
#[derive(Resource, Deref, DerefMut)]
pub struct ConfigHistory(pub History<Configuration>);

impl Default for ConfigHistory {
    fn default() -> Self {
        Self(History::new(Configuration::default()))
    }
}

#[derive(Resource)]
pub struct Catalogs {
    pub modules: ModuleCatalog,
    pub swatches: SwatchCatalog,
}

impl Catalogs {
    /// Reads both catalogs from `dir`. A file that is missing or invalid is
    /// logged and replaced by its compiled-in copy.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        let modules_path = dir.join(MODULE_CATALOG_FILE);
        let modules = ModuleCatalog::load(&modules_path).unwrap_or_else(|e| {
            error!("module catalog {}: {}, using built-in", modules_path.display(), e);
            ModuleCatalog::builtin()
        });

        let swatches_path = dir.join(SWATCH_CATALOG_FILE);
        let swatches = SwatchCatalog::load(&swatches_path).unwrap_or_else(|e| {
            error!("swatch catalog {}: {}, using built-in", swatches_path.display(), e);
            SwatchCatalog::builtin()
        });

        info!("loaded {} modules and {} swatches", modules.len(), swatches.iter().count());
        Self { modules, swatches }
    }
}

#[derive(Resource, Default, Deref, DerefMut)]
pub struct RoomSettings(pub Room);

// interaction state, never part of the configuration record
#[derive(Resource, Default)]
pub struct ActiveColumn(pub usize);

#[derive(Resource, Default, Deref, DerefMut)]
pub struct DoorState(pub DoorVisibility);

#[derive(Resource, Default)]
pub struct ShowMeasurements(pub bool);

// last layout handed to the renderer, read by picking and measurement
#[derive(Resource, Default)]
pub struct CurrentLayout(pub Option<ResolvedLayout>);

// rebuild the cabinet from the present configuration
#[derive(Event)]
pub struct RebuildEvent;

pub struct CabinetPlugin;

impl Plugin for CabinetPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<ConfigHistory>()
            .insert_resource(Catalogs::load(CATALOG_DIR))
            .init_resource::<RoomSettings>()
            .init_resource::<ActiveColumn>()
            .init_resource::<DoorState>()
            .init_resource::<ShowMeasurements>()
            .init_resource::<CurrentLayout>()
            .add_event::<RebuildEvent>()
            .add_systems(Startup, |mut rebuild: EventWriter<RebuildEvent>| {
                rebuild.write(RebuildEvent);
            })
            .add_systems(
                Update,
                (
                    build::handle_rebuild,
                    build::animate_emphasis,
                    build::apply_door_visibility,
                    build::draw_measurements,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_catalog_dir_falls_back_to_builtin() {
        let dir = std::env::temp_dir().join("no_such_wardrobe_catalog_dir");
        let catalogs = Catalogs::load(&dir);
        assert_eq!(catalogs.modules, ModuleCatalog::builtin());
        assert_eq!(catalogs.swatches, SwatchCatalog::builtin());
    }

    #[test]
    fn catalog_files_override_builtin() {
        let dir = std::env::temp_dir().join(format!("wardrobe_catalogs_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(MODULE_CATALOG_FILE),
            r#"[{"id":"module-only","label":"Only","shelf_levels":[0.5],"layout":{"kind":"plain"}}]"#,
        )
        .unwrap();
        // invalid swatch file, only that catalog falls back
        std::fs::write(dir.join(SWATCH_CATALOG_FILE), "not json").unwrap();

        let catalogs = Catalogs::load(&dir);
        assert_eq!(catalogs.modules.len(), 1);
        assert_eq!(catalogs.modules.default_module().id, "module-only");
        assert_eq!(catalogs.swatches, SwatchCatalog::builtin());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
