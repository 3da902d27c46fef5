mod common;

use common::triangle_gltf;
use orbit_viewer::renderer::commands::{PassCommand, CLEAR_COLOR};
use orbit_viewer::renderer::depth::Depth;
use orbit_viewer::renderer::{
    load_mesh_from_slice, DrawEntry, FramePlan, SceneGeometry, Viewport,
};
use winit::dpi::PhysicalSize;

fn triangle_geometry() -> SceneGeometry {
    let mesh = load_mesh_from_slice(&triangle_gltf(), None).expect("triangle import");
    SceneGeometry::from_mesh(&mesh).expect("geometry")
}

#[test]
fn triangle_buffers_are_exactly_sized() {
    let geometry = triangle_geometry();
    assert_eq!(geometry.position_size(), 9 * 4);
    assert_eq!(geometry.position_bytes().len(), 9 * 4);
    assert_eq!(geometry.index_size(), 3 * 4);
    assert_eq!(geometry.index_bytes().len(), 3 * 4);
}

#[test]
fn triangle_issues_exactly_one_draw() {
    let geometry = triangle_geometry();
    let size = PhysicalSize::new(640, 480);
    let plan = FramePlan::new(Viewport::full(size), &geometry.draws);
    let draws: Vec<_> = plan.draws().copied().collect();

    assert_eq!(
        draws,
        vec![DrawEntry {
            index_count: 3,
            instance_count: 1,
            start_index: 0,
            base_vertex: 0,
            start_instance: 0,
        }]
    );
    assert_eq!(plan.commands.last(), Some(&PassCommand::DrawIndexed(draws[0])));
    assert_eq!(plan.clear_color, CLEAR_COLOR);
    assert_eq!(plan.clear_depth, 1.0);
}

#[test]
fn viewport_follows_resize_dimensions() {
    let geometry = triangle_geometry();
    for (w, h) in [(1280, 720), (300, 900)] {
        let plan = FramePlan::new(Viewport::full(PhysicalSize::new(w, h)), &geometry.draws);
        assert_eq!(
            plan.commands[0],
            PassCommand::SetViewport(Viewport {
                x: 0.0,
                y: 0.0,
                width: w as f32,
                height: h as f32,
                min_depth: 0.0,
                max_depth: 1.0,
            })
        );
    }
}

#[test]
fn repeated_resize_with_same_size_changes_nothing() {
    let geometry = triangle_geometry();
    let size = PhysicalSize::new(800, 600);

    let first = Depth::descriptor(size);
    let second = Depth::descriptor(size);
    assert_eq!(first.size, second.size);

    assert_eq!(
        FramePlan::new(Viewport::full(size), &geometry.draws),
        FramePlan::new(Viewport::full(size), &geometry.draws)
    );
}
