//! Planlite Geometry Core
//!
//! 2D region boundaries with holes, boolean clipping, slab extrusion into
//! 3D solids, and drawing-data assembly, using i_overlay for polygon
//! booleans, csgrs for mesh booleans and earcutr for triangulation.

pub mod bool2d;
pub mod csg;
pub mod curve;
pub mod dwg;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod native_paths;
pub mod path;
pub mod region;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector2, Vector3};

pub use bool2d::{ClipEngine, ClipMode, ClipShape};
pub use curve::{Arc2d, Curve2d, LineSegment2d, TOLERANCE};
pub use dwg::{
    DecorationData, DwgContext, FloorLinkResolver, MixPaveDwgDecorator, NoFloorLinks,
    PaveDecorator, PaveDwgData,
};
pub use error::{Error, Result};
pub use extrusion::{extrude_path, extrude_solid, footprint_area, ShellWrapper, SlabTopoFace, TopoFace};
pub use mesh::Mesh;
pub use native_paths::{
    buffer_to_contours, buffer_to_paths, contours_to_buffer, paths_to_buffer, MarshalError,
    NativePathBuffer,
};
pub use path::{BoundaryError, CoEdge, CoEdgePath};
pub use region::{SlabRegion, SlabRegionType};
pub use triangulation::{triangulate_polygon, triangulate_with_holes};
pub use csg::{from_csg, to_csg, CsgEngine, CsgMesh};
