// pure layout engine, nothing in here touches the ECS world
pub mod catalog;
pub mod column;
pub mod configuration;
pub mod dimensions;
pub mod doors;
pub mod history;
pub mod placement;
pub mod primitive;
pub mod resolve;

pub use catalog::{CatalogError, ALL_CATEGORIES, ModuleCatalog, ModuleLayout, ModuleTemplate, Palette, Swatch, SwatchCatalog};
pub use column::{layout_column, ColumnEnvelope, ColumnLayout, CubbyDivider, DrawerBand};
pub use configuration::{Addon, ConfigError, Configuration, Dimension, DoorStyle, MaterialSlot, PlacementIntent};
pub use dimensions::CarcassDimensions;
pub use doors::{resolve_doors, DoorAssembly, DoorLeaf, DoorVisibility, LeafSide};
pub use history::History;
pub use placement::{resolve_placement, Placement, Room};
pub use primitive::{Finish, Part, Primitive, Shape};
pub use resolve::{resolve_layout, LayoutError, ResolvedLayout};
