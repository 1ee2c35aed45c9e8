use bevy::prelude::*;
use bevy::window::{Window, PrimaryWindow};
use bevy_egui::EguiContexts;
use bevy_rts_camera::RtsCamera;

use crate::systems::cabinet::engine::ResolvedLayout;
use crate::systems::cabinet::{ActiveColumn, CurrentLayout, RebuildEvent};
use crate::systems::ui::ToastEvent;

// ray against the plane of constant z through the cabinet front
pub fn intersect_front(origin: Vec3, direction: Vec3, front_z: f32) -> Option<Vec3> {
    if direction.z.abs() < f32::EPSILON {
        return None; // case that ray is parallel to plane
    }

    let t = (front_z - origin.z) / direction.z;
    if t < 0.0 {
        return None; // case that intersection behind camera
    }

    Some(origin + direction * t)
}

// column under a world point on the front plane
pub fn column_under(layout: &ResolvedLayout, point: Vec3) -> Option<usize> {
    let local = point - layout.translation;
    if local.y.abs() > layout.dimensions.half_height {
        return None;
    }
    layout.dimensions.column_at(local.x)
}

// click on the cabinet front selects the column under the cursor
pub fn handle_column_picking(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveColumn>,
    mut rebuild: EventWriter<RebuildEvent>,
    mut toasts: EventWriter<ToastEvent>,
    current: Res<CurrentLayout>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // clicks on the panels belong to egui
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.is_pointer_over_area() || ctx.wants_pointer_input() {
            return;
        }
    }

    let Some(layout) = &current.0 else { return };
    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else { return };

    let front_z = layout.translation.z + layout.dimensions.half_depth;
    let Some(hit) = intersect_front(ray.origin, *ray.direction, front_z) else { return };
    let Some(column) = column_under(layout, hit) else { return };

    if column != active.0 {
        active.0 = column;
        debug!("picked column {} at {:?}", column, hit);
        rebuild.write(RebuildEvent);
        toasts.write(ToastEvent(format!("Column {} selected", column + 1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::cabinet::engine::{resolve_layout, Configuration, ModuleCatalog, Room, SwatchCatalog};

    fn layout() -> ResolvedLayout {
        resolve_layout(
            &Configuration::default(),
            &ModuleCatalog::builtin(),
            &SwatchCatalog::builtin(),
            &Room::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn ray_hits_front_plane() {
        let hit = intersect_front(Vec3::new(0.0, 1.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.5).unwrap();
        assert_eq!(hit, Vec3::new(0.0, 1.0, 0.5));
        assert!(intersect_front(Vec3::new(0.0, 1.0, 5.0), Vec3::X, 0.5).is_none());
        assert!(intersect_front(Vec3::new(0.0, 1.0, 5.0), Vec3::Z, 0.5).is_none());
    }

    #[test]
    fn picks_columns_left_to_right() {
        let layout = layout();
        let center = layout.translation;
        let step = layout.dimensions.column_width;

        assert_eq!(column_under(&layout, center + Vec3::new(-step, 0.0, 0.0)), Some(0));
        assert_eq!(column_under(&layout, center), Some(1));
        assert_eq!(column_under(&layout, center + Vec3::new(step, 0.0, 0.0)), Some(2));
        assert_eq!(column_under(&layout, center + Vec3::new(0.0, 5.0, 0.0)), None);
        assert_eq!(column_under(&layout, center + Vec3::new(2.0, 0.0, 0.0)), None);
    }
}
