// turns a resolved layout into entities
// the whole cabinet is respawned on every rebuild, only emphasis scales carry over

use std::collections::HashMap;

use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::config::*;
use super::engine::{resolve_layout, Finish, Palette, Primitive, ResolvedLayout, Shape};
use super::{ActiveColumn, Catalogs, ConfigHistory, CurrentLayout, DoorState, RebuildEvent, RoomSettings, ShowMeasurements};

#[derive(Component)]
pub struct CabinetRoot;

#[derive(Component)]
pub struct DoorGroup;

#[derive(Component)]
pub struct ColumnEmphasis {
    pub index: usize,
    pub module_id: String,
    pub scale: f32,
}

pub fn handle_rebuild(
    mut commands: Commands,
    mut events: EventReader<RebuildEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    history: Res<ConfigHistory>,
    catalogs: Res<Catalogs>,
    room: Res<RoomSettings>,
    mut active: ResMut<ActiveColumn>,
    mut door_state: ResMut<DoorState>,
    mut current: ResMut<CurrentLayout>,
    roots: Query<Entity, With<CabinetRoot>>,
    columns: Query<&ColumnEmphasis>,
) {
    // several edits in one frame collapse into one rebuild
    if events.read().count() == 0 {
        return;
    }

    let config = history.present();
    let last_column = config.column_count.saturating_sub(1);
    if active.0 > last_column {
        active.0 = last_column;
    }

    let layout = match resolve_layout(config, &catalogs.modules, &catalogs.swatches, &room.0, Some(active.0)) {
        Ok(layout) => layout,
        Err(e) => {
            error!("cannot resolve cabinet layout: {}", e);
            return;
        }
    };

    if door_state.style() != config.door_style {
        door_state.set_style(config.door_style);
    }

    let previous: HashMap<usize, (String, f32)> = columns
        .iter()
        .map(|column| (column.index, (column.module_id.clone(), column.scale)))
        .collect();

    for entity in roots.iter() {
        commands.entity(entity).try_despawn();
    }

    let mut spawner = PartSpawner {
        commands: &mut commands,
        meshes: &mut *meshes,
        materials: &mut *materials,
        palette: layout.palette,
        cache: HashMap::new(),
    };

    let mut children = spawner.spawn_all(&layout.carcass);

    let count_changed = previous.len() != layout.columns.len();
    for column in &layout.columns {
        let carried = previous.get(&column.index).map(|(module_id, scale)| (module_id.as_str(), *scale));
        let scale = carried_scale(carried, &column.module_id, count_changed);
        let transform = Transform::from_translation(layout.column_origin(column)).with_scale(emphasis_scale(scale));
        let emphasis = ColumnEmphasis {
            index: column.index,
            module_id: column.module_id.clone(),
            scale,
        };
        children.push(spawner.group((emphasis, Name::new(format!("column {}", column.index))), transform, &column.primitives));
    }

    let mut door_children = spawner.spawn_all(&layout.doors.hardware);
    for leaf in &layout.doors.leaves {
        door_children.push(spawner.group(Name::new("door leaf"), Transform::from_translation(leaf.position), &leaf.parts));
    }
    let doors = spawner
        .commands
        .spawn((DoorGroup, Transform::default(), door_visibility(door_state.visible())))
        .id();
    spawner.commands.entity(doors).add_children(&door_children);
    children.push(doors);

    let root = commands
        .spawn((CabinetRoot, Name::new("cabinet"), Transform::from_translation(layout.translation), Visibility::default()))
        .id();
    commands.entity(root).add_children(&children);

    info!(
        "rebuilt cabinet: {} columns, {} primitives, placement x {:.3}",
        layout.columns.len(),
        layout.primitive_count(),
        layout.placement.x
    );
    current.0 = Some(layout);
}

struct PartSpawner<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    palette: Palette,
    // one material per finish, opacity and sidedness
    cache: HashMap<(Finish, u32, bool), Handle<StandardMaterial>>,
}

impl PartSpawner<'_, '_, '_> {
    fn spawn(&mut self, primitive: &Primitive) -> Entity {
        let size = primitive.size;
        let mesh = match primitive.shape {
            Shape::Cuboid => self.meshes.add(Cuboid::new(size.x, size.y, size.z)),
            Shape::Cylinder => self.meshes.add(Cylinder::new(size.x / 2.0, size.y)),
            Shape::Plane => self.meshes.add(Rectangle::new(size.x, size.y)),
        };
        let material = self.material(primitive.finish, primitive.opacity, primitive.shape == Shape::Plane);
        let rotation = primitive.rotation;

        self.commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::from_translation(primitive.position)
                    .with_rotation(Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)),
            ))
            .id()
    }

    fn spawn_all(&mut self, primitives: &[Primitive]) -> Vec<Entity> {
        primitives.iter().map(|primitive| self.spawn(primitive)).collect()
    }

    fn group(&mut self, components: impl Bundle, transform: Transform, primitives: &[Primitive]) -> Entity {
        let parts = self.spawn_all(primitives);
        let entity = self.commands.spawn((components, transform, Visibility::default())).id();
        self.commands.entity(entity).add_children(&parts);
        entity
    }

    fn material(&mut self, finish: Finish, opacity: f32, double_sided: bool) -> Handle<StandardMaterial> {
        let key = (finish, opacity.to_bits(), double_sided);
        if let Some(handle) = self.cache.get(&key) {
            return handle.clone();
        }

        let (roughness, metallic) = surface(finish);
        let handle = self.materials.add(StandardMaterial {
            base_color: self.palette.color(finish).with_alpha(opacity),
            alpha_mode: if opacity < 1.0 { AlphaMode::Blend } else { AlphaMode::Opaque },
            perceptual_roughness: roughness,
            metallic,
            double_sided,
            cull_mode: if double_sided { None } else { Some(Face::Back) },
            ..default()
        });
        self.cache.insert(key, handle.clone());
        handle
    }
}

// roughness, metallic
fn surface(finish: Finish) -> (f32, f32) {
    match finish {
        Finish::Cabinet => (0.5, 0.08),
        Finish::Interior => (0.36, 0.1),
        Finish::Door => (0.42, 0.1),
        Finish::Accent => (0.3, 0.6),
        Finish::Metal | Finish::Knob => (0.25, 0.65),
        Finish::Frame => (0.3, 0.4),
        Finish::Glass => (0.1, 0.0),
    }
}

fn door_visibility(visible: bool) -> Visibility {
    if visible { Visibility::Inherited } else { Visibility::Hidden }
}

fn emphasis_scale(scale: f32) -> Vec3 {
    Vec3::new(scale, 1.0, scale)
}

/// Exponential approach toward `target`, `rate` is the share covered per 60 Hz frame.
pub fn approach(current: f32, target: f32, rate: f32, delta_secs: f32) -> f32 {
    let blend = 1.0 - (1.0 - rate).powf(delta_secs * 60.0);
    current + (target - current) * blend
}

pub fn animate_emphasis(
    time: Res<Time>,
    active: Res<ActiveColumn>,
    mut columns: Query<(&mut ColumnEmphasis, &mut Transform)>,
) {
    let delta = time.delta_secs();
    for (mut emphasis, mut transform) in columns.iter_mut() {
        let target = if emphasis.index == active.0 { EMPHASIS_ACTIVE_SCALE } else { 1.0 };
        emphasis.scale = approach(emphasis.scale, target, EMPHASIS_RATE, delta);
        transform.scale = emphasis_scale(emphasis.scale);
    }
}

// doors hide and show without a rebuild
pub fn apply_door_visibility(
    door_state: Res<DoorState>,
    mut groups: Query<&mut Visibility, With<DoorGroup>>,
) {
    if !door_state.is_changed() {
        return;
    }
    for mut visibility in groups.iter_mut() {
        *visibility = door_visibility(door_state.visible());
    }
}

/// One dimension line of the measurement guide, world space.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementGuide {
    pub label: String,
    pub start: Vec3,
    pub end: Vec3,
}

impl MeasurementGuide {
    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) / 2.0
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

const GUIDE_OFFSET: f32 = 0.08;

pub fn measurement_guides(layout: &ResolvedLayout) -> [MeasurementGuide; 3] {
    let dims = &layout.dimensions;
    let center = layout.translation;
    let top = center.y + dims.half_height + GUIDE_OFFSET;
    let front = center.z + dims.half_depth;
    let right = center.x + dims.half_width + GUIDE_OFFSET;
    let cm = |meters: f32| format!("{:.0} cm", meters * CM_PER_METER);

    [
        MeasurementGuide {
            label: cm(dims.width),
            start: Vec3::new(center.x - dims.half_width, top, front),
            end: Vec3::new(center.x + dims.half_width, top, front),
        },
        MeasurementGuide {
            label: cm(dims.height),
            start: Vec3::new(right, center.y - dims.half_height, front),
            end: Vec3::new(right, center.y + dims.half_height, front),
        },
        MeasurementGuide {
            label: cm(dims.depth),
            start: Vec3::new(right, top, center.z - dims.half_depth),
            end: Vec3::new(right, top, front),
        },
    ]
}

pub fn draw_measurements(
    mut gizmos: Gizmos,
    show: Res<ShowMeasurements>,
    current: Res<CurrentLayout>,
) {
    if !show.0 {
        return;
    }
    let Some(layout) = &current.0 else {
        return;
    };

    let color = Color::srgb(0.85, 0.13, 0.16);
    for guide in measurement_guides(layout) {
        gizmos.line(guide.start, guide.end, color);
        // end ticks
        for point in [guide.start, guide.end] {
            gizmos.line(point - Vec3::Y * 0.02, point + Vec3::Y * 0.02, color);
        }
    }
}

/// Emphasis scale a respawned column starts from. A module swap or a new
/// column count restarts the grow-in.
pub fn carried_scale(previous: Option<(&str, f32)>, module_id: &str, count_changed: bool) -> f32 {
    match previous {
        Some((previous_id, scale)) if !count_changed && previous_id == module_id => scale,
        _ => EMPHASIS_RESET_SCALE,
    }
}
