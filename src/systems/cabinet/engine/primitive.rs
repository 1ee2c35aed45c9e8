// renderer-neutral descriptors for every resolved part
use bevy::math::Vec3;

/// Geometry of a primitive. Cylinders run along their local Y axis,
/// planes lie in their local XY plane facing +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid,
    Cylinder,
    Plane,
}

/// Which palette entry a primitive is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finish {
    Cabinet,
    Interior,
    Door,
    Accent,
    Metal,
    Frame,
    Glass,
    Knob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    SidePanel,
    TopPanel,
    BottomPanel,
    BackPanel,
    Base,
    TopShelf,
    ColumnDivider,
    Shelf,
    ShelfLip,
    Rail,
    RailSupport,
    DrawerBody,
    DrawerFace,
    DrawerHandle,
    ShoeShelf,
    CubbyDivider,
    Highlight,
    AccentPanel,
    DoorLeaf,
    DoorGlass,
    DoorTrim,
    DoorHandle,
    DoorKnob,
    DoorTrack,
    DoorPost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub part: Part,
    pub shape: Shape,
    pub position: Vec3,
    /// XYZ euler angles in radians
    pub rotation: Vec3,
    /// Full extents. Cylinders use (diameter, length, diameter), planes ignore z.
    pub size: Vec3,
    pub finish: Finish,
    pub opacity: f32,
}

impl Primitive {
    pub fn cuboid(part: Part, position: Vec3, size: Vec3, finish: Finish) -> Self {
        Self {
            part,
            shape: Shape::Cuboid,
            position,
            rotation: Vec3::ZERO,
            size,
            finish,
            opacity: 1.0,
        }
    }

    pub fn cylinder(part: Part, position: Vec3, radius: f32, length: f32, finish: Finish) -> Self {
        Self {
            part,
            shape: Shape::Cylinder,
            position,
            rotation: Vec3::ZERO,
            size: Vec3::new(radius * 2.0, length, radius * 2.0),
            finish,
            opacity: 1.0,
        }
    }

    pub fn plane(part: Part, position: Vec3, width: f32, height: f32, finish: Finish) -> Self {
        Self {
            part,
            shape: Shape::Plane,
            position,
            rotation: Vec3::ZERO,
            size: Vec3::new(width, height, 0.0),
            finish,
            opacity: 1.0,
        }
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Vertical span (bottom, top) of an unrotated primitive.
    pub fn y_span(&self) -> (f32, f32) {
        (self.position.y - self.size.y / 2.0, self.position.y + self.size.y / 2.0)
    }
}
