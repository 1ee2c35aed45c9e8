// seeded random sweeps over the configuration space
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wardrobe_configurator::config::*;
use wardrobe_configurator::systems::cabinet::engine::*;

const SAMPLES: usize = 200;

fn random_config(rng: &mut StdRng, catalog: &ModuleCatalog, room: &Room) -> Configuration {
    let ids: Vec<&str> = catalog.iter().map(|module| module.id.as_str()).collect();
    let mut config = Configuration::default()
        .with_dimension(Dimension::Width, rng.random_range(WIDTH_MIN..=WIDTH_MAX))
        .with_dimension(Dimension::Height, rng.random_range(HEIGHT_MIN..=HEIGHT_MAX))
        .with_dimension(Dimension::Depth, rng.random_range(DEPTH_MIN..=DEPTH_MAX))
        .with_column_count(rng.random_range(1..=MAX_COLUMNS), catalog)
        .with_door_style(DoorStyle::ALL[rng.random_range(0..DoorStyle::ALL.len())]);

    for column in 0..config.column_count {
        config = config.with_module(column, ids[rng.random_range(0..ids.len())]);
    }
    if rng.random_bool(0.3) {
        config = config.with_position(PlacementIntent::ALL[rng.random_range(0..PlacementIntent::ALL.len())], room);
    }
    config
}

#[test]
fn columns_tile_interior() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let width = rng.random_range(WIDTH_MIN..=WIDTH_MAX);
        let count = rng.random_range(1..=MAX_COLUMNS);
        let dims = CarcassDimensions::from_cm(width, 220.0, 60.0, count);

        let half = dims.interior_width / 2.0;
        assert_relative_eq!(dims.column_center(0) - dims.column_width / 2.0, -half, epsilon = 1e-5);
        assert_relative_eq!(dims.column_boundary(count - 1), half, epsilon = 1e-5);

        let total: f32 = (0..count).map(|_| dims.column_width).sum();
        assert_relative_eq!(total, dims.interior_width, epsilon = 1e-5);

        // each column ends where the next one starts
        for index in 0..count {
            let center = dims.column_center(index);
            assert_relative_eq!(center + dims.column_width / 2.0, dims.column_boundary(index), epsilon = 1e-5);
            if index + 1 < count {
                assert_relative_eq!(dims.column_center(index + 1) - dims.column_width / 2.0, dims.column_boundary(index), epsilon = 1e-5);
            }
        }
    }
}

#[test]
fn resolution_is_deterministic() {
    let catalog = ModuleCatalog::builtin();
    let swatches = SwatchCatalog::builtin();
    let room = Room::default();
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..SAMPLES / 4 {
        let config = random_config(&mut rng, &catalog, &room);
        let active = Some(rng.random_range(0..config.column_count));
        let first = resolve_layout(&config, &catalog, &swatches, &room, active).unwrap();
        let second = resolve_layout(&config, &catalog, &swatches, &room, active).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn column_count_changes_keep_modules_assigned() {
    let catalog = ModuleCatalog::builtin();
    let room = Room::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut config = Configuration::default();

    for _ in 0..SAMPLES {
        let count = rng.random_range(0..=MAX_COLUMNS + 2);
        let before = config.clone();
        config = config.with_column_count(count, &catalog);

        assert_eq!(config.modules.len(), config.column_count);
        assert!(config.validate().is_ok());

        // surviving columns keep their modules
        let kept = before.column_count.min(config.column_count);
        assert_eq!(config.modules[..kept], before.modules[..kept]);
        for id in &config.modules[kept..] {
            assert_eq!(id, &catalog.default_module().id);
        }

        if rng.random_bool(0.2) {
            config = random_config(&mut rng, &catalog, &room);
        }
    }
}

#[test]
fn placement_stays_inside_room() {
    let room = Room::default();
    let mut rng = StdRng::seed_from_u64(19);

    for _ in 0..SAMPLES {
        let width = rng.random_range(WIDTH_MIN..=WIDTH_MAX) / CM_PER_METER;
        let depth = rng.random_range(DEPTH_MIN..=DEPTH_MAX) / CM_PER_METER;
        let intent = PlacementIntent::ALL[rng.random_range(0..PlacementIntent::ALL.len())];
        let placement = resolve_placement(width, depth, intent, &room);

        assert_relative_eq!(placement.z - depth / 2.0, room.back_wall_z + room.gap, epsilon = 1e-5);

        if width >= room.span() {
            assert!(placement.full_span);
        }
        if placement.full_span {
            assert_eq!(placement.x, 0.0);
            continue;
        }

        assert!(placement.x - width / 2.0 >= -room.half_width + room.gap - 1e-5);
        assert!(placement.x + width / 2.0 <= room.half_width - room.gap + 1e-5);

        match intent {
            PlacementIntent::Left => {
                assert_relative_eq!(placement.x - width / 2.0, -room.half_width + room.gap, epsilon = 1e-5)
            }
            PlacementIntent::Right => {
                assert_relative_eq!(placement.x + width / 2.0, room.half_width - room.gap, epsilon = 1e-5)
            }
            PlacementIntent::Free | PlacementIntent::Wall => assert_eq!(placement.x, 0.0),
        }
    }
}

#[test]
fn layout_preserves_level_order() {
    let catalog = ModuleCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(23);

    for _ in 0..SAMPLES / 4 {
        let dims = CarcassDimensions::from_cm(
            rng.random_range(WIDTH_MIN..=WIDTH_MAX),
            rng.random_range(HEIGHT_MIN..=HEIGHT_MAX),
            rng.random_range(DEPTH_MIN..=DEPTH_MAX),
            rng.random_range(1..=MAX_COLUMNS),
        );
        let env = ColumnEnvelope::new(&dims, 0);

        for module in catalog.iter() {
            let column = layout_column(module, &env, false);
            assert!(column.usable_width > 0.0);
            for pair in column.shelf_ys.windows(2) {
                assert!(pair[0] < pair[1]);
            }
            for pair in column.drawers.windows(2) {
                assert!(pair[0].center_y < pair[1].center_y);
                assert!(pair[0].top() <= pair[1].bottom() + 1e-6);
            }
            // everything stays between the bottom and top panels
            for y in column.shelf_ys.iter().chain(&column.rail_ys) {
                assert!(*y >= dims.interior_bottom && *y <= dims.half_height);
            }
        }
    }
}
