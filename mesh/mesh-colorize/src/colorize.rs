//! End-to-end colorization of a mesh from its vertex groups.

use tracing::{info, warn};

use crate::blend::{VertexColors, blend};
use crate::color::Rgba;
use crate::composite::composite;
use crate::config::ColorizeConfig;
use crate::error::{ColorizeError, ColorizeResult};
use crate::graph::EdgeGraph;
use crate::groups::{GroupList, VertexGroups};
use crate::layers::ColorLayers;
use crate::mesh::ColorMesh;
use crate::relax::RelaxationSolver;
use crate::report::ColorizeReport;
use crate::resolve::resolve_groups;

/// Vertex colors plus the counts the report needs.
struct Solved {
    colors: VertexColors,
    edges: usize,
    seeded_groups: usize,
}

fn check_setup(groups: &GroupList, config: &ColorizeConfig) -> ColorizeResult<()> {
    config.validate()?;
    if groups.is_empty() {
        return Err(ColorizeError::NoGroups);
    }
    Ok(())
}

fn solve(
    mesh: &ColorMesh,
    vertex_groups: &VertexGroups,
    groups: &GroupList,
    config: &ColorizeConfig,
) -> ColorizeResult<Solved> {
    let graph = EdgeGraph::from_mesh(mesh)?;
    let assignment = resolve_groups(groups, vertex_groups, mesh.vertex_count(), config.threshold);

    for (index, group) in groups.iter().enumerate() {
        if assignment.seeds(index).is_empty() {
            warn!(group = group.name(), "Group has no vertices above threshold");
        }
    }

    let solver = RelaxationSolver::new(&graph, mesh.diameter(), config.iterations);
    let fields = solver.compute_all(&assignment, config.parallel);
    let colors = blend(&fields, groups, &assignment, config.policy);

    Ok(Solved {
        colors,
        edges: graph.edge_count(),
        seeded_groups: assignment.seeded_groups().count(),
    })
}

/// Compute the color of every vertex without writing anything.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no group is declared,
/// or a triangle references a missing vertex.
pub fn compute_vertex_colors(
    mesh: &ColorMesh,
    vertex_groups: &VertexGroups,
    groups: &GroupList,
    config: &ColorizeConfig,
) -> ColorizeResult<VertexColors> {
    check_setup(groups, config)?;
    Ok(solve(mesh, vertex_groups, groups, config)?.colors)
}

/// Colorize a mesh into a caller-owned per-loop buffer.
///
/// `buffer` must hold one color per loop of `mesh`. Only the channels in
/// `config.mask` are written.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no group is declared,
/// the buffer size does not match the loop count, or the mesh references a
/// missing vertex. The buffer is untouched on error.
pub fn colorize_buffer(
    mesh: &ColorMesh,
    vertex_groups: &VertexGroups,
    groups: &GroupList,
    buffer: &mut [Rgba],
    config: &ColorizeConfig,
) -> ColorizeResult<ColorizeReport> {
    check_setup(groups, config)?;

    if buffer.len() != mesh.loop_count() {
        return Err(ColorizeError::BufferSizeMismatch {
            expected: mesh.loop_count(),
            actual: buffer.len(),
        });
    }

    mesh.validate()?;

    if mesh.is_empty() {
        return Ok(ColorizeReport::empty(
            groups.len(),
            config.policy,
            config.iterations,
        ));
    }

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        groups = groups.len(),
        policy = %config.policy,
        iterations = config.iterations,
        "Starting colorization"
    );

    let Solved {
        colors,
        edges,
        seeded_groups,
    } = solve(mesh, vertex_groups, groups, config)?;

    let loops_written = composite(&colors, &mesh.loops, buffer, config.mask)?;

    let report = ColorizeReport {
        vertices: mesh.vertex_count(),
        edges,
        groups: groups.len(),
        seeded_groups,
        seeded_vertices: colors.seeded_count(),
        blended_vertices: colors.blended_count(),
        kept_vertices: colors.kept_count(),
        loops_written,
        policy: config.policy,
        iterations: config.iterations,
    };

    info!(
        seeded = report.seeded_vertices,
        blended = report.blended_vertices,
        kept = report.kept_vertices,
        loops = report.loops_written,
        "Colorization complete"
    );

    Ok(report)
}

/// Colorize a mesh into one of its color layers.
///
/// The layer is `config.layer` if it exists, otherwise the active layer.
///
/// # Errors
///
/// In addition to the errors of [`colorize_buffer`], returns
/// [`ColorizeError::NoColorLayer`] or [`ColorizeError::MissingColorLayer`]
/// if there is no layer to write. Nothing is written on error.
///
/// # Example
///
/// ```
/// use mesh_colorize::{
///     colorize, ColorGroup, ColorLayer, ColorLayers, ColorMesh, ColorizeConfig, GroupList,
///     Rgba, VertexGroups,
/// };
/// use nalgebra::Point3;
///
/// let mesh = ColorMesh::from_triangles(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(2.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 3], [1, 2, 3]],
/// );
///
/// let mut vertex_groups = VertexGroups::new(4);
/// let left = vertex_groups.add_group("left");
/// let right = vertex_groups.add_group("right");
/// vertex_groups.assign(0, left, 1.0);
/// vertex_groups.assign(2, right, 1.0);
///
/// let mut groups = GroupList::new();
/// groups.add(ColorGroup::new("left", Rgba::new(1.0, 0.0, 0.0, 1.0))).unwrap();
/// groups.add(ColorGroup::new("right", Rgba::new(0.0, 1.0, 0.0, 1.0))).unwrap();
///
/// let mut layers = ColorLayers::new();
/// layers.push(ColorLayer::filled("Col", mesh.loop_count(), Rgba::BLACK));
///
/// let report = colorize(&mesh, &vertex_groups, &groups, &mut layers, &ColorizeConfig::default())
///     .unwrap();
/// assert_eq!(report.seeded_vertices, 2);
///
/// // Loop 0 sits on vertex 0, the "left" seed
/// assert_eq!(layers.get("Col").unwrap().data[0], Rgba::new(1.0, 0.0, 0.0, 1.0));
/// ```
pub fn colorize(
    mesh: &ColorMesh,
    vertex_groups: &VertexGroups,
    groups: &GroupList,
    layers: &mut ColorLayers,
    config: &ColorizeConfig,
) -> ColorizeResult<ColorizeReport> {
    check_setup(groups, config)?;
    let layer = layers.select_mut(config.layer.as_deref())?;
    colorize_buffer(mesh, vertex_groups, groups, &mut layer.data, config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::blend::BlendPolicy;
    use crate::color::ChannelMask;
    use crate::groups::ColorGroup;
    use crate::layers::ColorLayer;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    /// Strip of four vertices along x with two triangles per unit.
    ///
    /// ```text
    /// 4---5---6---7
    /// | \ | \ | \ |
    /// 0---1---2---3
    /// ```
    fn strip() -> ColorMesh {
        let mut positions = Vec::new();
        for y in [0.0, 1.0] {
            for x in 0..4_i32 {
                positions.push(Point3::new(f64::from(x), y, 0.0));
            }
        }
        let mut triangles = Vec::new();
        for i in 0..3 {
            triangles.push([i, i + 1, i + 4]);
            triangles.push([i + 1, i + 5, i + 4]);
        }
        ColorMesh::from_triangles(positions, triangles)
    }

    fn ends(strip_vertices: usize) -> (VertexGroups, GroupList) {
        let mut vg = VertexGroups::new(strip_vertices);
        let left = vg.add_group("left");
        let right = vg.add_group("right");
        vg.assign_all([0, 4], left, 1.0);
        vg.assign_all([3, 7], right, 1.0);

        let mut groups = GroupList::new();
        groups.add(ColorGroup::new("left", Rgba::WHITE)).unwrap();
        groups
            .add(ColorGroup::new("right", Rgba::TRANSPARENT))
            .unwrap();
        (vg, groups)
    }

    fn layers_for(mesh: &ColorMesh) -> ColorLayers {
        let mut layers = ColorLayers::new();
        layers.push(ColorLayer::filled(
            "Col",
            mesh.loop_count(),
            Rgba::new(0.2, 0.4, 0.6, 0.8),
        ));
        layers
    }

    #[test]
    fn colorize_writes_selected_layer() {
        let mesh = strip();
        let (vg, groups) = ends(8);
        let mut layers = layers_for(&mesh);
        layers.push(ColorLayer::filled("Other", mesh.loop_count(), Rgba::BLACK));

        let config = ColorizeConfig::default()
            .with_mask(ChannelMask::ALL)
            .with_layer("Other");
        let report = colorize(&mesh, &vg, &groups, &mut layers, &config).unwrap();

        assert_eq!(report.seeded_vertices, 4);
        assert_eq!(report.blended_vertices, 4);
        assert_eq!(report.loops_written, mesh.loop_count());
        // Active layer untouched
        assert!(layers
            .get("Col")
            .unwrap()
            .data
            .iter()
            .all(|&c| c == Rgba::new(0.2, 0.4, 0.6, 0.8)));
        // Loop 0 is vertex 0, a "left" seed
        assert_eq!(layers.get("Other").unwrap().data[0], Rgba::WHITE);
    }

    #[test]
    fn symmetric_strip_blends_symmetrically() {
        let mesh = strip();
        let (vg, groups) = ends(8);

        for policy in [BlendPolicy::Polynomial, BlendPolicy::WeightedInverse] {
            let config = ColorizeConfig::default().with_policy(policy);
            let colors = compute_vertex_colors(&mesh, &vg, &groups, &config).unwrap();

            let a = colors.get(1).unwrap();
            let b = colors.get(2).unwrap();
            // Vertex 1 is closer to the white end
            assert!(a.r > 0.5);
            assert!(b.r < 0.5);
        }
    }

    #[test]
    fn default_mask_keeps_blue_and_alpha() {
        let mesh = strip();
        let (vg, groups) = ends(8);
        let mut layers = layers_for(&mesh);

        colorize(&mesh, &vg, &groups, &mut layers, &ColorizeConfig::default()).unwrap();

        for c in &layers.get("Col").unwrap().data {
            assert_relative_eq!(c.b, 0.6);
            assert_relative_eq!(c.a, 0.8);
        }
    }

    #[test]
    fn no_groups_is_an_error_before_writing() {
        let mesh = strip();
        let mut layers = layers_for(&mesh);
        let before = layers.get("Col").unwrap().clone();

        let result = colorize(
            &mesh,
            &VertexGroups::new(8),
            &GroupList::new(),
            &mut layers,
            &ColorizeConfig::default(),
        );
        assert!(matches!(result, Err(ColorizeError::NoGroups)));
        assert_eq!(layers.get("Col").unwrap(), &before);
    }

    #[test]
    fn missing_layer_is_an_error() {
        let mesh = strip();
        let (vg, groups) = ends(8);
        let mut layers = ColorLayers::new();

        let result = colorize(&mesh, &vg, &groups, &mut layers, &ColorizeConfig::default());
        assert!(matches!(result, Err(ColorizeError::NoColorLayer)));

        let config = ColorizeConfig::default().with_layer("Col");
        let result = colorize(&mesh, &vg, &groups, &mut layers, &config);
        assert!(matches!(result, Err(ColorizeError::MissingColorLayer { .. })));
    }

    #[test]
    fn bad_triangle_leaves_buffer() {
        let mut mesh = strip();
        mesh.triangles.push([0, 1, 42]);
        let (vg, groups) = ends(8);
        let mut buffer = vec![Rgba::BLACK; mesh.loop_count()];

        let result = colorize_buffer(&mesh, &vg, &groups, &mut buffer, &ColorizeConfig::default());
        assert!(matches!(result, Err(ColorizeError::InvalidVertex { .. })));
        assert!(buffer.iter().all(|&c| c == Rgba::BLACK));
    }

    #[test]
    fn buffer_size_is_checked() {
        let mesh = strip();
        let (vg, groups) = ends(8);
        let mut buffer = vec![Rgba::BLACK; 3];

        let result = colorize_buffer(&mesh, &vg, &groups, &mut buffer, &ColorizeConfig::default());
        assert!(matches!(
            result,
            Err(ColorizeError::BufferSizeMismatch { actual: 3, .. })
        ));
    }

    #[test]
    fn empty_mesh_is_not_an_error() {
        let mesh = ColorMesh::new();
        let (_, groups) = ends(0);
        let mut layers = ColorLayers::new();
        layers.push(ColorLayer::filled("Col", 0, Rgba::WHITE));

        let report = colorize(
            &mesh,
            &VertexGroups::default(),
            &groups,
            &mut layers,
            &ColorizeConfig::default(),
        )
        .unwrap();
        assert_eq!(report.vertices, 0);
        assert!(!report.wrote_colors());
        assert!(layers.get("Col").unwrap().data.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mesh = strip();
        let (vg, groups) = ends(8);
        let config = ColorizeConfig::default().with_iterations(0);
        assert!(compute_vertex_colors(&mesh, &vg, &groups, &config).is_err());
    }

    #[test]
    fn weighted_inverse_fallback_keeps_prior_color() {
        // Vertex 2 is isolated and far away, so its only weight is
        // 0.01 / 500, below the epsilon floor
        let mesh = ColorMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(500.0, 0.0, 0.0),
            ],
            vec![[0, 1, 1]],
            vec![0, 1, 2],
        );

        let mut vg = VertexGroups::new(3);
        let slot = vg.add_group("faint");
        vg.assign(0, slot, 1.0);

        let mut groups = GroupList::new();
        groups
            .add(ColorGroup::new("faint", Rgba::WHITE).with_weight(0.01))
            .unwrap();

        let prior = Rgba::new(0.3, 0.3, 0.3, 0.3);
        let mut buffer = vec![prior; 3];
        let config = ColorizeConfig::default()
            .with_policy(BlendPolicy::WeightedInverse)
            .with_mask(ChannelMask::ALL);

        let report = colorize_buffer(&mesh, &vg, &groups, &mut buffer, &config).unwrap();

        assert_eq!(report.seeded_vertices, 1);
        assert_eq!(report.blended_vertices, 1);
        assert_eq!(report.kept_vertices, 1);
        assert_eq!(report.loops_written, 2);
        assert_eq!(buffer[0], Rgba::WHITE);
        assert_eq!(buffer[2], prior);
    }

    #[test]
    fn empty_mesh_with_dangling_loops_is_rejected() {
        let mesh = ColorMesh::from_parts(Vec::new(), Vec::new(), vec![7, 9]);
        let (_, groups) = ends(0);
        let mut buffer = vec![Rgba::BLACK; 2];

        let result = colorize_buffer(
            &mesh,
            &VertexGroups::default(),
            &groups,
            &mut buffer,
            &ColorizeConfig::default(),
        );
        assert!(matches!(
            result,
            Err(ColorizeError::InvalidLoop {
                corner: 0,
                index: 7,
                ..
            })
        ));
        assert!(buffer.iter().all(|&c| c == Rgba::BLACK));
    }
}
