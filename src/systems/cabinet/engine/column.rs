// resolves one interior column: shelves, rails, drawers, shoe shelves, cubby dividers
//
// Coordinates are local to the column: x = 0 is the column center, y is relative to the
// cabinet center, z = 0 is the interior center with +z toward the doors.
// Depth is split into a back reference plane, the "available" depth used by shelves and
// drawer bodies, and a face-frame band at the front that keeps fittings set back from the face.

use bevy::math::Vec3;

use crate::config::*;
use super::catalog::{ModuleLayout, ModuleTemplate};
use super::dimensions::CarcassDimensions;
use super::primitive::{Finish, Part, Primitive};

/// Envelope handed to the column engine for column `index` of `count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnEnvelope {
    pub index: usize,
    pub count: usize,
    pub column_width: f32,
    pub interior_width: f32,
    pub interior_height: f32,
    pub interior_bottom: f32,
    pub depth: f32,
    pub thickness: f32,
}

impl ColumnEnvelope {
    pub fn new(dims: &CarcassDimensions, index: usize) -> Self {
        Self {
            index,
            count: dims.column_count,
            column_width: dims.column_width,
            interior_width: dims.interior_width,
            interior_height: dims.interior_height,
            interior_bottom: dims.interior_bottom,
            depth: dims.column_depth(),
            thickness: dims.thickness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerBand {
    pub center_y: f32,
    pub height: f32,
}

impl DrawerBand {
    pub fn bottom(&self) -> f32 {
        self.center_y - self.height / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center_y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CubbyDivider {
    Horizontal { y: f32 },
    Vertical { x: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    pub index: usize,
    pub module_id: String,
    pub center_x: f32,
    pub column_width: f32,
    pub usable_width: f32,
    pub usable_depth: f32,
    pub face_frame_depth: f32,
    pub available_depth: f32,
    pub bottom_y: f32,
    pub effective_height: f32,
    pub active: bool,
    pub shelf_ys: Vec<f32>,
    pub rail_ys: Vec<f32>,
    pub drawers: Vec<DrawerBand>,
    pub shoe_shelf_ys: Vec<f32>,
    pub cubby_dividers: Vec<CubbyDivider>,
    /// Every primitive of the column, positions local to the column group
    pub primitives: Vec<Primitive>,
}

impl ColumnLayout {
    pub fn count(&self, part: Part) -> usize {
        self.primitives.iter().filter(|p| p.part == part).count()
    }

    pub fn parts(&self, part: Part) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.part == part)
    }

    /// Z of the back reference plane.
    pub fn back_z(&self) -> f32 {
        -self.usable_depth / 2.0
    }

    /// Z where shelf and drawer-body fronts stop, the start of the face-frame band.
    pub fn front_inset_z(&self) -> f32 {
        self.usable_depth / 2.0 - self.face_frame_depth
    }
}

pub fn layout_column(module: &ModuleTemplate, env: &ColumnEnvelope, active: bool) -> ColumnLayout {
    let t = env.thickness;

    let center_x = -env.interior_width / 2.0 + env.column_width / 2.0 + env.index as f32 * env.column_width;
    let usable_width = (env.column_width - t * SIDE_PANEL_ALLOWANCE).max(t * USABLE_WIDTH_FLOOR);
    let usable_depth = env.depth;

    let face_frame_depth = (usable_depth * FACE_FRAME_RATIO).min(FACE_FRAME_MAX);
    let available_depth = usable_depth - face_frame_depth;
    let back_z = -usable_depth / 2.0;
    let front_inset_z = usable_depth / 2.0 - face_frame_depth;
    let body_z = back_z + available_depth / 2.0;

    let bottom_y = env.interior_bottom + t;
    let effective_height = env.interior_height - t * EFFECTIVE_HEIGHT_FACTOR;
    let level_y = |ratio: f32| bottom_y + ratio * effective_height;

    let mut layout = ColumnLayout {
        index: env.index,
        module_id: module.id.clone(),
        center_x,
        column_width: env.column_width,
        usable_width,
        usable_depth,
        face_frame_depth,
        available_depth,
        bottom_y,
        effective_height,
        active,
        shelf_ys: module.shelf_levels.iter().map(|&r| level_y(r)).collect(),
        rail_ys: module.rail_levels.iter().map(|&r| level_y(r)).collect(),
        drawers: Vec::new(),
        shoe_shelf_ys: Vec::new(),
        cubby_dividers: Vec::new(),
        primitives: Vec::new(),
    };

    // decoration, no layout consequence
    let mid_y = bottom_y + effective_height / 2.0;
    if active {
        layout.primitives.push(
            Primitive::plane(
                Part::Highlight,
                Vec3::new(0.0, mid_y, back_z + 0.005),
                usable_width * 0.98,
                effective_height * 1.02,
                Finish::Accent,
            )
            .with_opacity(0.1),
        );
    }
    if module.accent {
        layout.primitives.push(
            Primitive::plane(
                Part::AccentPanel,
                Vec3::new(0.0, mid_y, usable_depth / 2.0 + 0.01),
                usable_width * 0.92,
                effective_height * 0.95,
                Finish::Accent,
            )
            .with_opacity(0.12),
        );
    }

    // shelves: body over the available depth, thin lip in the face-frame band
    let lip = face_frame_depth >= SHELF_LIP_DEPTH;
    for &y in &layout.shelf_ys {
        layout.primitives.push(Primitive::cuboid(
            Part::Shelf,
            Vec3::new(0.0, y, body_z),
            Vec3::new(usable_width, t, available_depth),
            Finish::Interior,
        ));
        if lip {
            layout.primitives.push(Primitive::cuboid(
                Part::ShelfLip,
                Vec3::new(0.0, y, front_inset_z + SHELF_LIP_DEPTH / 2.0),
                Vec3::new(usable_width, t * 1.4, SHELF_LIP_DEPTH),
                Finish::Interior,
            ));
        }
    }

    // rails: horizontal rods near the front inset, end supports on the side panels
    let rail_length = usable_width * RAIL_LENGTH_RATIO;
    let rail_z = (front_inset_z - RAIL_FRONT_SETBACK).max(back_z + RAIL_SUPPORT_SIZE);
    let support_x = usable_width / 2.0 - RAIL_SUPPORT_SIZE * 0.2;
    for &y in &layout.rail_ys {
        layout.primitives.push(
            Primitive::cylinder(Part::Rail, Vec3::new(0.0, y, rail_z), RAIL_RADIUS, rail_length, Finish::Metal)
                .rotated(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2)),
        );
        for side in [-1.0, 1.0] {
            layout.primitives.push(Primitive::cuboid(
                Part::RailSupport,
                Vec3::new(side * support_x, y, rail_z),
                Vec3::new(RAIL_SUPPORT_SIZE * 0.4, RAIL_SUPPORT_SIZE, RAIL_SUPPORT_SIZE),
                Finish::Metal,
            ));
        }
    }

    match &module.layout {
        ModuleLayout::Plain => {}
        ModuleLayout::Drawers { sections } => {
            let face_depth = t * 0.6;
            let body_depth = available_depth * 0.85;
            for section in sections {
                let height = section.height * effective_height;
                let center_y = bottom_y + section.offset * effective_height + height / 2.0;
                layout.drawers.push(DrawerBand { center_y, height });

                // recessed body, face flush at the inset, handle proud of the face
                layout.primitives.push(Primitive::cuboid(
                    Part::DrawerBody,
                    Vec3::new(0.0, center_y, front_inset_z - body_depth / 2.0),
                    Vec3::new(usable_width * 0.9, height * 0.8, body_depth),
                    Finish::Interior,
                ));
                layout.primitives.push(Primitive::cuboid(
                    Part::DrawerFace,
                    Vec3::new(0.0, center_y, front_inset_z + face_depth / 2.0),
                    Vec3::new(usable_width * 0.96, height * 0.94, face_depth),
                    Finish::Interior,
                ));
                layout.primitives.push(Primitive::cuboid(
                    Part::DrawerHandle,
                    Vec3::new(0.0, center_y, front_inset_z + face_depth + 0.006),
                    Vec3::new((usable_width * 0.4).min(0.12), 0.012, 0.012),
                    Finish::Accent,
                ));
            }
        }
        ModuleLayout::ShoeRack { shelves } => {
            let shoe_depth = available_depth * 0.7;
            for index in 0..*shelves {
                let y = bottom_y + SHOE_SHELF_BASE + index as f32 * effective_height * SHOE_SHELF_STEP;
                layout.shoe_shelf_ys.push(y);
                layout.primitives.push(
                    Primitive::cuboid(
                        Part::ShoeShelf,
                        Vec3::new(0.0, y, front_inset_z - shoe_depth / 2.0),
                        Vec3::new(usable_width * 0.96, t, shoe_depth),
                        Finish::Interior,
                    )
                    .rotated(Vec3::new(SHOE_SHELF_TILT, 0.0, 0.0)),
                );
            }
        }
        ModuleLayout::Cubbies { rows, columns } => {
            let grid_height = effective_height * CUBBY_HEIGHT_RATIO;
            let cell_height = grid_height / *rows as f32;
            let start_y = bottom_y + effective_height * (1.0 - CUBBY_HEIGHT_RATIO) / 2.0;
            let cell_width = usable_width / *columns as f32;

            for row in 0..=*rows {
                let y = start_y + row as f32 * cell_height;
                layout.cubby_dividers.push(CubbyDivider::Horizontal { y });
                layout.primitives.push(Primitive::cuboid(
                    Part::CubbyDivider,
                    Vec3::new(0.0, y, body_z),
                    Vec3::new(usable_width * 0.96, t * 0.6, available_depth * 0.96),
                    Finish::Interior,
                ));
            }
            for column in 0..=*columns {
                let x = -usable_width / 2.0 + column as f32 * cell_width;
                layout.cubby_dividers.push(CubbyDivider::Vertical { x });
                layout.primitives.push(Primitive::cuboid(
                    Part::CubbyDivider,
                    Vec3::new(x, start_y + grid_height / 2.0, body_z),
                    Vec3::new(t * 0.6, grid_height, available_depth * 0.96),
                    Finish::Interior,
                ));
            }
        }
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::cabinet::engine::catalog::{DrawerSection, ModuleCatalog};
    use approx::assert_relative_eq;

    fn envelope(index: usize, count: usize) -> ColumnEnvelope {
        let dims = CarcassDimensions::from_cm(140.0, 220.0, 65.0, count);
        ColumnEnvelope::new(&dims, index)
    }

    fn template(layout: ModuleLayout) -> ModuleTemplate {
        ModuleTemplate {
            id: "test".into(),
            label: "Test".into(),
            summary: String::new(),
            shelf_levels: vec![],
            rail_levels: vec![],
            accent: false,
            layout,
        }
    }

    #[test]
    fn empty_module_places_nothing() {
        let module = template(ModuleLayout::Plain);
        assert!(module.is_empty());
        let layout = layout_column(&module, &envelope(0, 1), false);
        assert!(layout.primitives.is_empty());
        assert!(layout.shelf_ys.is_empty());
    }

    #[test]
    fn shelves_follow_ratios() {
        let mut module = template(ModuleLayout::Plain);
        module.shelf_levels = vec![0.25, 0.5, 0.75];
        let layout = layout_column(&module, &envelope(1, 3), false);

        for (ratio, y) in module.shelf_levels.iter().zip(&layout.shelf_ys) {
            assert_relative_eq!(*y, layout.bottom_y + ratio * layout.effective_height);
        }
        assert_eq!(layout.count(Part::Shelf), 3);
        assert_eq!(layout.count(Part::ShelfLip), 3);
        assert_relative_eq!(layout.center_x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn shelf_bodies_stop_at_face_frame() {
        let mut module = template(ModuleLayout::Plain);
        module.shelf_levels = vec![0.5];
        let layout = layout_column(&module, &envelope(0, 2), false);
        let shelf = layout.parts(Part::Shelf).next().unwrap();

        assert!(layout.face_frame_depth <= FACE_FRAME_MAX + 1e-6);
        assert_relative_eq!(shelf.position.z + shelf.size.z / 2.0, layout.front_inset_z(), epsilon = 1e-5);
        assert_relative_eq!(shelf.position.z - shelf.size.z / 2.0, layout.back_z(), epsilon = 1e-5);
    }

    #[test]
    fn rails_have_two_supports() {
        let mut module = template(ModuleLayout::Plain);
        module.rail_levels = vec![0.4, 0.7];
        let layout = layout_column(&module, &envelope(0, 2), false);

        assert_eq!(layout.count(Part::Rail), 2);
        assert_eq!(layout.count(Part::RailSupport), 4);
        let rail = layout.parts(Part::Rail).next().unwrap();
        assert_relative_eq!(rail.size.y, layout.usable_width * RAIL_LENGTH_RATIO);
        assert!(rail.position.z < layout.front_inset_z());
    }

    #[test]
    fn drawer_bands_are_placed_from_offsets() {
        let module = template(ModuleLayout::Drawers {
            sections: vec![
                DrawerSection { height: 0.15, offset: 0.04 },
                DrawerSection { height: 0.15, offset: 0.22 },
            ],
        });
        let layout = layout_column(&module, &envelope(0, 3), false);

        assert_eq!(layout.drawers.len(), 2);
        let h = 0.15 * layout.effective_height;
        assert_relative_eq!(layout.drawers[0].center_y, layout.bottom_y + 0.04 * layout.effective_height + h / 2.0);
        assert!(layout.drawers[0].top() <= layout.drawers[1].bottom());
        assert_eq!(layout.count(Part::DrawerBody), 2);
        assert_eq!(layout.count(Part::DrawerFace), 2);
        assert_eq!(layout.count(Part::DrawerHandle), 2);

        let face = layout.parts(Part::DrawerFace).next().unwrap();
        let body = layout.parts(Part::DrawerBody).next().unwrap();
        assert!(body.size.x < face.size.x);
        assert!(body.position.z < face.position.z);
    }

    #[test]
    fn shoe_shelves_use_fixed_step_and_tilt() {
        let module = template(ModuleLayout::ShoeRack { shelves: 4 });
        let layout = layout_column(&module, &envelope(0, 2), false);

        assert_eq!(layout.shoe_shelf_ys.len(), 4);
        let step = layout.shoe_shelf_ys[1] - layout.shoe_shelf_ys[0];
        assert_relative_eq!(step, layout.effective_height * SHOE_SHELF_STEP, epsilon = 1e-5);
        assert!(layout.parts(Part::ShoeShelf).all(|p| p.rotation.x == SHOE_SHELF_TILT));
    }

    #[test]
    fn cubbies_emit_dividers_not_cells() {
        let module = template(ModuleLayout::Cubbies { rows: 4, columns: 3 });
        let layout = layout_column(&module, &envelope(0, 2), false);

        let horizontal: Vec<f32> = layout
            .cubby_dividers
            .iter()
            .filter_map(|d| match d {
                CubbyDivider::Horizontal { y } => Some(*y),
                CubbyDivider::Vertical { .. } => None,
            })
            .collect();
        let vertical: Vec<f32> = layout
            .cubby_dividers
            .iter()
            .filter_map(|d| match d {
                CubbyDivider::Vertical { x } => Some(*x),
                CubbyDivider::Horizontal { .. } => None,
            })
            .collect();

        assert_eq!(horizontal.len(), 5);
        assert_eq!(vertical.len(), 4);
        assert_relative_eq!(horizontal[4] - horizontal[0], layout.effective_height * CUBBY_HEIGHT_RATIO, epsilon = 1e-5);
        assert_relative_eq!(vertical[0], -layout.usable_width / 2.0);
        assert_relative_eq!(vertical[3], layout.usable_width / 2.0, epsilon = 1e-5);
        assert_eq!(layout.count(Part::CubbyDivider), 9);
    }

    #[test]
    fn narrow_column_width_is_floored() {
        let dims = CarcassDimensions::from_cm(60.0, 220.0, 50.0, 5);
        let module = ModuleCatalog::builtin().default_module().clone();
        let layout = layout_column(&module, &ColumnEnvelope::new(&dims, 0), false);
        assert!(layout.usable_width >= BOARD_THICKNESS * USABLE_WIDTH_FLOOR - 1e-6);
    }

    #[test]
    fn decoration_planes() {
        let mut module = template(ModuleLayout::Plain);
        module.accent = true;
        let active = layout_column(&module, &envelope(0, 2), true);
        assert_eq!(active.count(Part::Highlight), 1);
        assert_eq!(active.count(Part::AccentPanel), 1);

        let idle = layout_column(&module, &envelope(0, 2), false);
        assert_eq!(idle.count(Part::Highlight), 0);
    }
}
