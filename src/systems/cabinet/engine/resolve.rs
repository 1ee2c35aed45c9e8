// configuration -> complete resolved layout
use bevy::log::debug;
use bevy::math::Vec3;
use thiserror::Error;

use crate::config::*;
use super::catalog::{ModuleCatalog, Palette, SwatchCatalog};
use super::column::{layout_column, ColumnEnvelope, ColumnLayout};
use super::configuration::Configuration;
use super::dimensions::CarcassDimensions;
use super::doors::{resolve_doors, DoorAssembly};
use super::placement::{resolve_placement, Placement, Room};
use super::primitive::{Finish, Part, Primitive};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("{columns} columns but {modules} module assignments")]
    ModuleCountMismatch { columns: usize, modules: usize },
    #[error("column count {0} outside 1..={max}", max = MAX_COLUMNS)]
    ColumnCountOutOfRange(usize),
}

/// Everything the renderer needs for one configuration.
///
/// Carcass and door primitives are in cabinet space (origin at the cabinet center).
/// Column primitives are relative to their column origin, see [`ResolvedLayout::column_origin`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    pub dimensions: CarcassDimensions,
    pub placement: Placement,
    /// World translation of the cabinet center
    pub translation: Vec3,
    pub carcass: Vec<Primitive>,
    /// Z of every column origin in cabinet space
    pub column_z: f32,
    pub columns: Vec<ColumnLayout>,
    pub doors: DoorAssembly,
    pub palette: Palette,
}

impl ResolvedLayout {
    pub fn column_origin(&self, column: &ColumnLayout) -> Vec3 {
        Vec3::new(column.center_x, 0.0, self.column_z)
    }

    pub fn primitive_count(&self) -> usize {
        self.carcass.len()
            + self.columns.iter().map(|c| c.primitives.len()).sum::<usize>()
            + self.doors.primitive_count()
    }

    pub fn carcass_count(&self, part: Part) -> usize {
        self.carcass.iter().filter(|p| p.part == part).count()
    }
}

pub fn resolve_layout(
    config: &Configuration,
    modules: &ModuleCatalog,
    swatches: &SwatchCatalog,
    room: &Room,
    active_column: Option<usize>,
) -> Result<ResolvedLayout, LayoutError> {
    if config.column_count == 0 || config.column_count > MAX_COLUMNS {
        return Err(LayoutError::ColumnCountOutOfRange(config.column_count));
    }
    if config.modules.len() != config.column_count {
        return Err(LayoutError::ModuleCountMismatch {
            columns: config.column_count,
            modules: config.modules.len(),
        });
    }

    let dims = config.dimensions();
    // interior runs from the back clearance to the front edge
    let column_z = dims.half_depth - dims.interior_depth / 2.0;

    let columns: Vec<ColumnLayout> = config
        .modules
        .iter()
        .enumerate()
        .map(|(index, id)| {
            let envelope = ColumnEnvelope::new(&dims, index);
            layout_column(modules.resolve(id), &envelope, active_column == Some(index))
        })
        .collect();

    let placement = resolve_placement(dims.width, dims.depth, config.position, room);

    let layout = ResolvedLayout {
        dimensions: dims,
        placement,
        translation: placement.translation(dims.half_height),
        carcass: carcass_parts(config, &dims, column_z),
        column_z,
        columns,
        doors: resolve_doors(&dims, config.door_style),
        palette: Palette::resolve(
            swatches,
            &config.cabinet_material,
            &config.interior_material,
            &config.door_material,
        ),
    };

    debug!(
        "resolved {} primitives over {} columns",
        layout.primitive_count(),
        layout.columns.len()
    );

    Ok(layout)
}

fn carcass_parts(config: &Configuration, dims: &CarcassDimensions, column_z: f32) -> Vec<Primitive> {
    let t = dims.thickness;
    let (w, h, d) = (dims.width, dims.height, dims.depth);
    let column_depth = dims.column_depth();
    let mut parts = Vec::new();

    for side in [-1.0, 1.0] {
        parts.push(Primitive::cuboid(
            Part::SidePanel,
            Vec3::new(side * (dims.half_width - t / 2.0), 0.0, 0.0),
            Vec3::new(t, h, d),
            Finish::Cabinet,
        ));
    }

    if config.include_back_panel {
        parts.push(Primitive::cuboid(
            Part::BackPanel,
            Vec3::new(0.0, 0.0, -dims.half_depth + t / 2.0),
            Vec3::new(w - t * 1.5, h - t * 1.8, t),
            Finish::Interior,
        ));
    }

    if config.include_top_bottom {
        parts.push(Primitive::cuboid(
            Part::TopPanel,
            Vec3::new(0.0, dims.half_height - t / 2.0, 0.0),
            Vec3::new(w, t, d),
            Finish::Cabinet,
        ));
        parts.push(Primitive::cuboid(
            Part::BottomPanel,
            Vec3::new(0.0, -dims.half_height + t / 2.0, 0.0),
            Vec3::new(w, t, d),
            Finish::Cabinet,
        ));
    }

    if config.include_base {
        parts.push(Primitive::cuboid(
            Part::Base,
            Vec3::new(0.0, -dims.half_height + t * 1.2, 0.0),
            Vec3::new(w * 0.96, t * 1.8, d * 0.96),
            Finish::Cabinet,
        ));
    }

    if config.include_top_shelf {
        parts.push(Primitive::cuboid(
            Part::TopShelf,
            Vec3::new(0.0, dims.half_height - t * 2.2, column_z),
            Vec3::new(dims.interior_width, t, column_depth),
            Finish::Cabinet,
        ));
    }

    for index in 0..dims.column_count.saturating_sub(1) {
        parts.push(Primitive::cuboid(
            Part::ColumnDivider,
            Vec3::new(dims.column_boundary(index), 0.0, column_z),
            Vec3::new(t * 0.85, dims.interior_height, column_depth),
            Finish::Interior,
        ));
    }

    parts
}
