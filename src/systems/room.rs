use bevy::prelude::*;
use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};

use crate::config::*;
use crate::systems::cabinet::RoomSettings;

// showroom around the cabinet: floor, back and side walls, and a floor grid
// so the user can judge the cabinet against real-world scale
pub struct RoomPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

impl Plugin for RoomPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(GridConfig::default())
            .init_gizmo_group::<GridGizmoGroup>()
            .add_systems(Startup, (setup_gizmos, spawn_room))
            .add_systems(Update, draw_grid);
    }
}

// setting these parameters as a resource allows for runtime modifications
#[derive(Resource)]
pub struct GridConfig {
    pub major_spacing: f32,
    pub minor_spacing: f32,
    pub major_color: Color,
    pub minor_color: Color,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            major_spacing: 0.5,
            minor_spacing: 0.1,
            major_color: Color::srgba(0.35, 0.35, 0.38, 0.35),
            minor_color: Color::srgba(0.4, 0.4, 0.42, 0.12),
            enabled: true,
        }
    }
}

#[derive(Component)]
pub struct RoomShell;

fn setup_gizmos(
    mut config_store: ResMut<GizmoConfigStore>
) {
    let (config, _) = config_store.config_mut::<GridGizmoGroup>();
    config.depth_bias = 0.1; // render depth
}

fn spawn_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    room: Res<RoomSettings>,
) {
    let width = room.half_width * 2.0;
    let front_z = room.back_wall_z + ROOM_DEPTH;

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.86, 0.84, 0.8),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.95, 0.94, 0.92),
        perceptual_roughness: 0.95,
        ..default()
    });

    // floor
    commands.spawn((
        RoomShell,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(width, ROOM_DEPTH))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, 0.0, (room.back_wall_z + front_z) / 2.0),
    ));

    // back wall, facing +z
    commands.spawn((
        RoomShell,
        Mesh3d(meshes.add(Rectangle::new(width, ROOM_HEIGHT))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(0.0, ROOM_HEIGHT / 2.0, room.back_wall_z),
    ));

    // side walls, facing inward
    for side in [-1.0_f32, 1.0] {
        commands.spawn((
            RoomShell,
            Mesh3d(meshes.add(Rectangle::new(ROOM_DEPTH, ROOM_HEIGHT))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_xyz(side * room.half_width, ROOM_HEIGHT / 2.0, (room.back_wall_z + front_z) / 2.0)
                .with_rotation(Quat::from_rotation_y(-side * std::f32::consts::FRAC_PI_2)),
        ));
    }
}

// grid over the room floor only
fn draw_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    params: Res<GridConfig>,
    room: Res<RoomSettings>,
) {
    if !params.enabled {
        return;
    }

    let min_x = -room.half_width;
    let max_x = room.half_width;
    let min_z = room.back_wall_z;
    let max_z = room.back_wall_z + ROOM_DEPTH;
    let y = 0.002;

    // lines on a major step are drawn once, in the major color
    let steps_per_major = (params.major_spacing / params.minor_spacing).round().max(1.0) as i32;

    let x_steps = ((max_x - min_x) / params.minor_spacing).floor() as i32;
    for i in 0..=x_steps {
        let x = min_x + i as f32 * params.minor_spacing;
        let color = if i % steps_per_major == 0 { params.major_color } else { params.minor_color };
        gizmos.line(Vec3::new(x, y, min_z), Vec3::new(x, y, max_z), color);
    }

    let z_steps = ((max_z - min_z) / params.minor_spacing).floor() as i32;
    for i in 0..=z_steps {
        let z = min_z + i as f32 * params.minor_spacing;
        let color = if i % steps_per_major == 0 { params.major_color } else { params.minor_color };
        gizmos.line(Vec3::new(min_x, y, z), Vec3::new(max_x, y, z), color);
    }
}
