// door leaves and sliding hardware in front of the carcass
use bevy::math::Vec3;

use crate::config::*;
use super::configuration::DoorStyle;
use super::dimensions::CarcassDimensions;
use super::primitive::{Finish, Part, Primitive};

/// Half of the opening a leaf covers. Hinged leaves hang on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorLeaf {
    pub side: LeafSide,
    pub width: f32,
    pub height: f32,
    /// Leaf center in cabinet space
    pub position: Vec3,
    /// Leaf parts, relative to `position`
    pub parts: Vec<Primitive>,
}

impl DoorLeaf {
    pub fn left_edge(&self) -> f32 {
        self.position.x - self.width / 2.0
    }

    pub fn right_edge(&self) -> f32 {
        self.position.x + self.width / 2.0
    }

    pub fn handle(&self) -> Option<&Primitive> {
        self.parts.iter().find(|p| p.part == Part::DoorHandle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoorAssembly {
    pub style: DoorStyle,
    pub leaves: Vec<DoorLeaf>,
    /// Tracks and frame posts of sliding doors, in cabinet space
    pub hardware: Vec<Primitive>,
}

impl DoorAssembly {
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.hardware.is_empty()
    }

    pub fn primitive_count(&self) -> usize {
        self.leaves.iter().map(|leaf| leaf.parts.len()).sum::<usize>() + self.hardware.len()
    }
}

pub fn resolve_doors(dims: &CarcassDimensions, style: DoorStyle) -> DoorAssembly {
    let door_z = dims.half_depth + DOOR_THICKNESS / 2.0 - DOOR_FACE_OFFSET;
    let hardware = Hardware {
        height: dims.height,
        handle_length: (dims.height * 0.1).max(0.08),
        knob_offset: dims.height * 0.15,
    };

    match style {
        DoorStyle::None => DoorAssembly { style, leaves: Vec::new(), hardware: Vec::new() },
        DoorStyle::Hinged => {
            let single = dims.width / 2.0 - DOOR_GAP / 2.0;
            let offset = single / 2.0 + DOOR_GAP / 2.0;
            let leaves = vec![
                hardware.hinged_leaf(LeafSide::Left, single, Vec3::new(-offset, 0.0, door_z)),
                hardware.hinged_leaf(LeafSide::Right, single, Vec3::new(offset, 0.0, door_z)),
            ];
            DoorAssembly { style, leaves, hardware: Vec::new() }
        }
        DoorStyle::Sliding => {
            let width = dims.width / 2.0 + SLIDING_OVERLAP;
            // each leaf runs from its side panel past the middle by the overlap,
            // the left leaf on the outer track
            let offset = dims.width / 4.0 - SLIDING_OVERLAP / 2.0;
            let stagger = DOOR_THICKNESS * 0.35;
            let leaves = vec![
                hardware.sliding_leaf(LeafSide::Left, width, Vec3::new(-offset, 0.0, door_z + stagger)),
                hardware.sliding_leaf(LeafSide::Right, width, Vec3::new(offset, 0.0, door_z - stagger)),
            ];
            DoorAssembly { style, leaves, hardware: sliding_frame(dims, door_z) }
        }
    }
}

struct Hardware {
    height: f32,
    handle_length: f32,
    knob_offset: f32,
}

impl Hardware {
    // handle sits toward the free edge, i.e. the center gap
    fn hinged_leaf(&self, side: LeafSide, width: f32, position: Vec3) -> DoorLeaf {
        let handle_x = match side {
            LeafSide::Left => width / 2.0 - HINGED_HANDLE_INSET,
            LeafSide::Right => -width / 2.0 + HINGED_HANDLE_INSET,
        };
        let t = DOOR_THICKNESS;

        let parts = vec![
            Primitive::cuboid(Part::DoorLeaf, Vec3::ZERO, Vec3::new(width, self.height, t), Finish::Door),
            Primitive::cuboid(
                Part::DoorHandle,
                Vec3::new(handle_x, 0.0, t / 2.0 + 0.01),
                Vec3::new(0.015, self.handle_length, 0.02),
                Finish::Accent,
            ),
            Primitive::cylinder(
                Part::DoorKnob,
                Vec3::new(handle_x, self.knob_offset, t / 2.0 + 0.015),
                0.0095,
                0.04,
                Finish::Knob,
            ),
        ];

        DoorLeaf { side, width, height: self.height, position, parts }
    }

    // frame around an inset glass pane, handle mirrored toward the outer edge
    fn sliding_leaf(&self, side: LeafSide, width: f32, position: Vec3) -> DoorLeaf {
        let handle_x = match side {
            LeafSide::Left => -width / 2.0 + SLIDING_HANDLE_INSET,
            LeafSide::Right => width / 2.0 - SLIDING_HANDLE_INSET,
        };
        let t = DOOR_THICKNESS;
        let h = self.height;
        let f = SLIDING_FRAME_WIDTH;
        let trim_z = t / 2.0 + 0.004;

        // open frame, the pane fills the middle
        let mut parts = vec![
            Primitive::cuboid(
                Part::DoorGlass,
                Vec3::ZERO,
                Vec3::new(width - 2.0 * f, h - 2.0 * f, t * 0.3),
                Finish::Glass,
            )
            .with_opacity(GLASS_OPACITY),
        ];
        for y in [h / 2.0 - f / 2.0, -h / 2.0 + f / 2.0] {
            parts.push(Primitive::cuboid(Part::DoorLeaf, Vec3::new(0.0, y, 0.0), Vec3::new(width, f, t), Finish::Frame));
            parts.push(Primitive::cuboid(
                Part::DoorTrim,
                Vec3::new(0.0, y, trim_z),
                Vec3::new(width * 0.94, DOOR_TRIM_WIDTH, t * 0.6),
                Finish::Frame,
            ));
        }
        for x in [width / 2.0 - f / 2.0, -width / 2.0 + f / 2.0] {
            parts.push(Primitive::cuboid(Part::DoorLeaf, Vec3::new(x, 0.0, 0.0), Vec3::new(f, h - 2.0 * f, t), Finish::Frame));
            parts.push(Primitive::cuboid(
                Part::DoorTrim,
                Vec3::new(x, 0.0, trim_z),
                Vec3::new(DOOR_TRIM_WIDTH, h * 0.94, t * 0.6),
                Finish::Frame,
            ));
        }

        parts.push(Primitive::cuboid(
            Part::DoorHandle,
            Vec3::new(handle_x, 0.0, t / 2.0 + 0.01),
            Vec3::new(0.045, self.handle_length, 0.015),
            Finish::Accent,
        ));

        DoorLeaf { side, width, height: h, position, parts }
    }
}

// top and bottom tracks plus side posts around the opening
fn sliding_frame(dims: &CarcassDimensions, door_z: f32) -> Vec<Primitive> {
    let t = DOOR_THICKNESS;
    let track = t / 2.0;
    let z = door_z + 0.01;
    let track_size = Vec3::new(dims.width + t * 1.6, track, t * 1.1);
    let post_size = Vec3::new(t / 1.2, dims.height + track * 1.2, t * 0.9);

    vec![
        Primitive::cuboid(Part::DoorTrack, Vec3::new(0.0, dims.half_height + track, z), track_size, Finish::Frame),
        Primitive::cuboid(Part::DoorTrack, Vec3::new(0.0, -dims.half_height - track / 1.5, z), track_size, Finish::Frame),
        Primitive::cuboid(Part::DoorPost, Vec3::new(-dims.half_width - t / 3.0, 0.0, z), post_size, Finish::Frame),
        Primitive::cuboid(Part::DoorPost, Vec3::new(dims.half_width + t / 3.0, 0.0, z), post_size, Finish::Frame),
    ]
}

/// User's wish to see the doors, kept apart from the door style so that
/// passing through `DoorStyle::None` does not lose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorVisibility {
    style: DoorStyle,
    intent: bool,
}

impl DoorVisibility {
    pub fn new(style: DoorStyle) -> Self {
        Self { style, intent: true }
    }

    pub fn set_style(&mut self, style: DoorStyle) {
        self.style = style;
    }

    /// Flips the intent. Returns the new visibility, or None when there are no doors to show.
    pub fn toggle(&mut self) -> Option<bool> {
        if !self.style.has_doors() {
            return None;
        }
        self.intent = !self.intent;
        Some(self.visible())
    }

    pub fn visible(&self) -> bool {
        self.style.has_doors() && self.intent
    }

    pub fn style(&self) -> DoorStyle {
        self.style
    }

    pub fn intent(&self) -> bool {
        self.intent
    }
}

impl Default for DoorVisibility {
    fn default() -> Self {
        Self::new(DoorStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims() -> CarcassDimensions {
        CarcassDimensions::from_cm(140.0, 220.0, 65.0, 3)
    }

    #[test]
    fn hinged_leaves_split_the_front() {
        let doors = resolve_doors(&dims(), DoorStyle::Hinged);
        assert_eq!(doors.leaves.len(), 2);
        assert!(doors.hardware.is_empty());

        let total: f32 = doors.leaves.iter().map(|l| l.width).sum();
        assert_relative_eq!(total, 1.4 - DOOR_GAP, epsilon = 1e-6);

        let [left, right] = &doors.leaves[..] else { panic!("two leaves") };
        assert_eq!(left.side, LeafSide::Left);
        assert_relative_eq!(right.left_edge() - left.right_edge(), DOOR_GAP, epsilon = 1e-6);
        assert_relative_eq!(left.left_edge(), -0.7, epsilon = 1e-6);
    }

    #[test]
    fn hinged_handles_face_the_center() {
        let doors = resolve_doors(&dims(), DoorStyle::Hinged);
        let left = doors.leaves[0].handle().unwrap();
        let right = doors.leaves[1].handle().unwrap();
        assert!(left.position.x > 0.0);
        assert!(right.position.x < 0.0);
        assert_eq!(doors.leaves[0].parts.iter().filter(|p| p.part == Part::DoorKnob).count(), 1);
    }

    #[test]
    fn sliding_leaves_overlap_and_cover_opening() {
        let doors = resolve_doors(&dims(), DoorStyle::Sliding);
        assert_eq!(doors.leaves.len(), 2);
        for leaf in &doors.leaves {
            assert_relative_eq!(leaf.width, 0.7 + SLIDING_OVERLAP);
        }

        let (left, right) = (&doors.leaves[0], &doors.leaves[1]);
        assert!(left.right_edge() > right.left_edge());
        assert_relative_eq!(left.left_edge(), -0.7, epsilon = 1e-5);
        assert_relative_eq!(right.right_edge(), 0.7, epsilon = 1e-5);
        // staggered in depth
        assert!(left.position.z > right.position.z);
    }

    #[test]
    fn sliding_handles_face_outer_edges() {
        let doors = resolve_doors(&dims(), DoorStyle::Sliding);
        assert!(doors.leaves[0].handle().unwrap().position.x < 0.0);
        assert!(doors.leaves[1].handle().unwrap().position.x > 0.0);
    }

    #[test]
    fn sliding_frame_hardware() {
        let dims = dims();
        let doors = resolve_doors(&dims, DoorStyle::Sliding);
        let tracks: Vec<_> = doors.hardware.iter().filter(|p| p.part == Part::DoorTrack).collect();
        let posts: Vec<_> = doors.hardware.iter().filter(|p| p.part == Part::DoorPost).collect();
        assert_eq!(tracks.len(), 2);
        assert_eq!(posts.len(), 2);
        assert!(tracks[0].position.y > dims.half_height);
        assert!(tracks[1].position.y < -dims.half_height);
        for leaf in &doors.leaves {
            let glass: Vec<_> = leaf.parts.iter().filter(|p| p.part == Part::DoorGlass).collect();
            assert_eq!(glass.len(), 1);
            // the inset pane fills most of the leaf and is see-through
            assert!(glass[0].opacity < 1.0);
            assert_eq!(glass[0].finish, Finish::Glass);
            assert!(glass[0].size.x > leaf.width * 0.85);
            assert!(glass[0].size.y > leaf.height * 0.9);
            // nothing opaque covers the pane
            let opaque_over_pane = leaf.parts.iter().any(|p| {
                p.opacity >= 1.0 && p.part != Part::DoorHandle
                    && p.position.x.abs() < 0.05 && p.position.y.abs() < 0.05
            });
            assert!(!opaque_over_pane);
            assert_eq!(leaf.parts.iter().filter(|p| p.part == Part::DoorTrim).count(), 4);
        }
    }

    #[test]
    fn no_doors() {
        let doors = resolve_doors(&dims(), DoorStyle::None);
        assert!(doors.is_empty());
        assert_eq!(doors.primitive_count(), 0);
    }

    #[test]
    fn visibility_survives_no_door_style() {
        let mut visibility = DoorVisibility::new(DoorStyle::Hinged);
        assert_eq!(visibility.toggle(), Some(false));

        visibility.set_style(DoorStyle::None);
        assert!(!visibility.visible());
        assert_eq!(visibility.toggle(), None);

        visibility.set_style(DoorStyle::Hinged);
        assert!(!visibility.visible());
        assert_eq!(visibility.toggle(), Some(true));

        visibility.set_style(DoorStyle::None);
        assert!(!visibility.visible());
        visibility.set_style(DoorStyle::Sliding);
        assert!(visibility.visible());
    }
}
