// world offset of the cabinet inside the showroom
use bevy::math::Vec3;

use crate::config::*;
use super::configuration::PlacementIntent;

/// Room bounds in meters. X = 0 is the room center, the back wall is a plane of constant Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Room {
    pub half_width: f32,
    pub back_wall_z: f32,
    pub gap: f32,
}

impl Default for Room {
    fn default() -> Self {
        Self {
            half_width: ROOM_HALF_WIDTH,
            back_wall_z: ROOM_BACK_WALL,
            gap: WALL_GAP,
        }
    }
}

impl Room {
    /// Widest cabinet that fits between the walls with clearance on both sides.
    pub fn span(&self) -> f32 {
        self.half_width * 2.0 - self.gap * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub z: f32,
    /// True when the cabinet fills the room and was forced to the center.
    pub full_span: bool,
}

impl Placement {
    /// Translation of the cabinet center, standing on the floor.
    pub fn translation(&self, half_height: f32) -> Vec3 {
        Vec3::new(self.x, half_height, self.z)
    }
}

// widths within this of the span count as spanning, cm -> m conversion is not exact
const SPAN_TOLERANCE: f32 = 1e-4;

/// Positions only, never resizes. `width` and `depth` in meters.
pub fn resolve_placement(width: f32, depth: f32, intent: PlacementIntent, room: &Room) -> Placement {
    let half = width / 2.0;
    let z = room.back_wall_z + room.gap + depth / 2.0;

    if width >= room.span() - SPAN_TOLERANCE {
        return Placement { x: 0.0, z, full_span: true };
    }

    let candidate = match intent {
        PlacementIntent::Free | PlacementIntent::Wall => 0.0,
        PlacementIntent::Left => -room.half_width + half + room.gap,
        PlacementIntent::Right => room.half_width - half - room.gap,
    };

    let limit = room.half_width - half - room.gap;
    Placement {
        x: candidate.clamp(-limit, limit),
        z,
        full_span: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn left_and_right_touch_walls() {
        let room = Room::default();
        let left = resolve_placement(1.4, 0.65, PlacementIntent::Left, &room);
        assert_relative_eq!(left.x - 0.7, -room.half_width + room.gap, epsilon = 1e-6);

        let right = resolve_placement(1.4, 0.65, PlacementIntent::Right, &room);
        assert_relative_eq!(right.x + 0.7, room.half_width - room.gap, epsilon = 1e-6);
        assert!(!right.full_span);
    }

    #[test]
    fn back_face_sits_off_the_wall() {
        let room = Room::default();
        let placement = resolve_placement(1.0, 0.6, PlacementIntent::Free, &room);
        assert_relative_eq!(placement.z - 0.3, room.back_wall_z + room.gap, epsilon = 1e-6);
        assert_eq!(placement.x, 0.0);
    }

    #[test]
    fn full_span_forces_center() {
        let room = Room::default();
        for intent in PlacementIntent::ALL {
            let placement = resolve_placement(room.span(), 0.6, intent, &room);
            assert_eq!(placement.x, 0.0);
            assert!(placement.full_span);
            assert_eq!(resolve_placement(3.5, 0.6, intent, &room).x, 0.0);
        }
    }

    #[test]
    fn translation_lifts_to_floor() {
        let placement = Placement { x: 0.2, z: -0.8, full_span: false };
        assert_eq!(placement.translation(1.1), Vec3::new(0.2, 1.1, -0.8));
    }
}
