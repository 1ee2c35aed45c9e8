use bevy::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::window::{WindowPlugin, PrimaryWindow};
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::gizmos::config::{GizmoConfigStore, DefaultGizmoConfigGroup};
use bevy_egui::EguiPlugin;
use bevy_rts_camera::*;

use wardrobe_configurator::config::*;
use wardrobe_configurator::systems::cabinet::CabinetPlugin;
use wardrobe_configurator::systems::interaction;
use wardrobe_configurator::systems::room::RoomPlugin;
use wardrobe_configurator::systems::ui::UIPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Wardrobe configurator".into(),
                mode: bevy::window::WindowMode::Windowed,
                resolution: bevy::window::WindowResolution::new(1600.0, 900.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RtsCameraPlugin)

        // my custom plugins
        .add_plugins(CabinetPlugin)
        .add_plugins(RoomPlugin)
        .add_plugins(UIPlugin)

        .insert_resource(ClearColor(Color::srgb(0.93, 0.93, 0.95))) // world color
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
            ..default()
        })
        .add_systems(Startup, (start, setup_gizmos, maximize_window))
        .add_systems(Update, (handle_exit, interaction::handle_column_picking))
        .run()
}

fn setup_gizmos(
    mut config_store: ResMut<GizmoConfigStore>
) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.depth_bias = -1.0; // measurement lines on top of the cabinet
    config.line.width = 2.5;
}

fn maximize_window(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in windows.iter_mut() {
        window.set_maximized(true);
    }
}

// application entry point here
fn start(
    mut commands: Commands
) {
    // camera stays inside the room
    commands.spawn((
        RtsCamera {
            bounds: Aabb2d::new(
                Vec2::new(0.0, ROOM_BACK_WALL + ROOM_DEPTH / 2.0),
                Vec2::new(ROOM_HALF_WIDTH, ROOM_DEPTH / 2.0),
            ),
            min_angle: 0.2,
            height_min: 1.0,
            height_max: 6.0,
            target_focus: Transform::from_xyz(0.0, 0.0, ROOM_BACK_WALL + 0.5),
            target_zoom: 0.35,
            ..default()
        },
        RtsCameraControls {
            key_up: KeyCode::KeyW,
            key_down: KeyCode::KeyS,
            key_left: KeyCode::KeyA,
            key_right: KeyCode::KeyD,
            key_rotate_left: KeyCode::F24,  // should figure out how to unassign a key :)
            key_rotate_right: KeyCode::F23,
            pan_speed: 3.0,
            zoom_sensitivity: 0.15,
            edge_pan_width: 0.0,
            ..default()
        },
    ));

    // spawn light source
    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, ROOM_HEIGHT * 2.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
