//! Vertex color diffusion from named vertex groups.
//!
//! This crate paints a triangle mesh by spreading the colors of a few named
//! groups across its surface:
//!
//! - **Group resolution** - Each vertex is owned by at most one declared group
//! - **Distance fields** - Bounded edge relaxation from every group's seeds
//! - **Blending** - Unassigned vertices mix group colors by relative distance
//! - **Compositing** - Masked write-back into a per-loop color layer
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. The mesh is a
//! plain position/triangle/loop container so it can be filled from any host.
//!
//! # Algorithm
//!
//! Distances are shortest paths along mesh edges, approximated by running
//! `K - 1` Bellman-Ford style sweeps over the edge list. Vertices the sweeps
//! do not reach keep a sentinel distance equal to the largest side of the
//! mesh bounding box, so far vertices still receive a finite blend weight.
//!
//! Two blend policies are available, see [`BlendPolicy`].
//!
//! # Example
//!
//! ```
//! use mesh_colorize::{
//!     colorize, ColorGroup, ColorLayer, ColorLayers, ColorMesh, ColorizeConfig, GroupList,
//!     Point3, Rgba, VertexGroups,
//! };
//!
//! // 0 -- 1 -- 2 with a shared apex
//! let mesh = ColorMesh::from_triangles(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(2.0, 0.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 3], [1, 2, 3]],
//! );
//!
//! let mut vertex_groups = VertexGroups::new(mesh.vertex_count());
//! let hot = vertex_groups.add_group("hot");
//! let cold = vertex_groups.add_group("cold");
//! vertex_groups.assign(0, hot, 1.0);
//! vertex_groups.assign(2, cold, 1.0);
//!
//! let mut groups = GroupList::new();
//! groups.add(ColorGroup::new("hot", Rgba::new(1.0, 0.0, 0.0, 1.0))).unwrap();
//! groups.add(ColorGroup::new("cold", Rgba::new(0.0, 0.0, 1.0, 1.0))).unwrap();
//!
//! let mut layers = ColorLayers::new();
//! layers.push(ColorLayer::filled("Col", mesh.loop_count(), Rgba::BLACK));
//!
//! let report = colorize(&mesh, &vertex_groups, &groups, &mut layers, &ColorizeConfig::default())
//!     .unwrap();
//! println!("{report}");
//! assert_eq!(report.seeded_groups, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod blend;
mod color;
mod colorize;
mod composite;
mod config;
mod distance;
mod error;
mod graph;
mod groups;
mod layers;
mod mesh;
mod relax;
mod report;
mod resolve;

pub use blend::{BlendPolicy, DISTANCE_EPSILON, VertexColors, blend};
pub use color::{CHANNELS, ChannelMask, Rgba};
pub use colorize::{colorize, colorize_buffer, compute_vertex_colors};
pub use composite::composite;
pub use config::ColorizeConfig;
pub use distance::DistanceField;
pub use error::{ColorizeError, ColorizeResult};
pub use graph::{Edge, EdgeGraph};
pub use groups::{ColorGroup, GroupList, MAX_WEIGHT, MIN_WEIGHT, Membership, VertexGroups};
pub use layers::{ColorLayer, ColorLayers};
pub use mesh::ColorMesh;
pub use relax::{DEFAULT_ITERATIONS, RelaxationSolver, relax_pass};
pub use report::ColorizeReport;
pub use resolve::{DEFAULT_THRESHOLD, GroupAssignment, resolve_groups};

// Re-export for building meshes without a direct nalgebra dependency
pub use nalgebra::Point3;
