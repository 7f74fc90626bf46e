use wire3d_core::{navigate, render_frame, update_transforms, Navigation, Scene, Transform};

const HOUSE_SCENE: &str = r#"{
    "view": {
        "prp": [0, 10, -5],
        "srp": [0, 10, -40],
        "vup": [0, 1, 0],
        "clip": [-12, 6, -12, 6, 10, 100]
    },
    "models": [
        {
            "type": "generic",
            "vertices": [
                [0, 0, -30], [20, 0, -30], [20, 12, -30], [10, 20, -30], [0, 12, -30],
                [0, 0, -60], [20, 0, -60], [20, 12, -60], [10, 20, -60], [0, 12, -60]
            ],
            "edges": [[0, 1, 2, 3, 4, 0], [5, 6, 7, 8, 9, 5], [0, 5], [1, 6], [2, 7], [3, 8], [4, 9]]
        },
        { "type": "cube", "center": [0, 0, -10], "width": 5, "height": 5, "depth": 5 },
        {
            "type": "sphere", "center": [-15, 5, -50], "radius": 6, "slices": 12, "stacks": 8,
            "animation": { "axis": "y", "rps": 0.25 }
        }
    ]
}"#;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    fn house() -> Scene {
        Scene::from_json(HOUSE_SCENE).unwrap()
    }

    #[test]
    fn test_every_line_lands_on_the_raster() {
        let frame = render_frame(&house(), WIDTH, HEIGHT).unwrap();
        assert!(!frame.lines.is_empty());

        let tolerance = 1e-2;
        for line in &frame.lines {
            for p in [line.start, line.end] {
                assert!(p.x >= -tolerance && p.x <= WIDTH as f64 + tolerance, "{:?}", p);
                assert!(p.y >= -tolerance && p.y <= HEIGHT as f64 + tolerance, "{:?}", p);
            }
        }
    }

    #[test]
    fn test_clipping_never_adds_segments() {
        let scene = house();
        let frame = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        let total: usize = scene.models.iter().map(|m| m.wireframe.segment_count()).sum();
        assert_eq!(scene.models[0].wireframe.segment_count(), 15);
        assert!(frame.lines.len() <= total);
    }

    #[test]
    fn test_cube_straddling_near_plane_is_partially_clipped() {
        let mut scene = house();
        scene.models.retain(|m| m.shape.name() == "cube");
        let frame = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        // Cube spans z in [-12.5, -7.5]; the near plane sits at z = -15, so nothing is visible
        assert!(frame.lines.is_empty());

        for _ in 0..5 {
            navigate(&mut scene.view, Navigation::MoveBackward).unwrap();
        }
        // Eye now at z = 0: the near plane is at z = -10, cutting through the cube
        let frame = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        assert!(!frame.lines.is_empty());
        assert!(frame.lines.len() < 12);
    }

    #[test]
    fn test_look_at_projects_to_screen_centre() {
        let mut scene = house();
        scene.view.clip = wire3d_core::ClipVolume::new(-6.0, 6.0, -6.0, 6.0, 10.0, 100.0).unwrap();
        let nper = scene.view.perspective_matrix().unwrap();
        let projected = Transform::homogeneous_divide(
            &(Transform::perspective_to_plane() * nper * scene.view.look_at.to_homogeneous()),
        );
        let pixel = Transform::viewport(WIDTH, HEIGHT) * projected;
        assert!((pixel.x - 400.0).abs() < 1e-9);
        assert!((pixel.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_backward_restores_the_frame() {
        let mut scene = house();
        let before = render_frame(&scene, WIDTH, HEIGHT).unwrap();

        navigate(&mut scene.view, Navigation::MoveForward).unwrap();
        let moved = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        assert_ne!(moved, before);

        navigate(&mut scene.view, Navigation::MoveBackward).unwrap();
        let after = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        assert_eq!(after.lines.len(), before.lines.len());
        for (a, b) in after.lines.iter().zip(&before.lines) {
            assert!((a.start - b.start).norm() < 1e-6);
            assert!((a.end - b.end).norm() < 1e-6);
        }
    }

    #[test]
    fn test_animation_changes_only_animated_models() {
        let mut scene = house();
        let still = render_frame(&scene, WIDTH, HEIGHT).unwrap();

        let mut house_only = house();
        house_only.models.truncate(1);
        let house_lines = render_frame(&house_only, WIDTH, HEIGHT).unwrap().lines.len();

        update_transforms(&mut scene, 0.5);
        let spun = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        assert_ne!(spun, still);

        // The house is static, so its lines come first and are unchanged
        for (a, b) in spun.lines.iter().zip(&still.lines).take(house_lines) {
            assert_eq!(a, b);
        }

        // A full revolution (0.25 rps for 4 s) brings the sphere back
        update_transforms(&mut scene, 4.0);
        let home = render_frame(&scene, WIDTH, HEIGHT).unwrap();
        assert_eq!(home.lines.len(), still.lines.len());
        for (a, b) in home.lines.iter().zip(&still.lines) {
            assert!((a.start - b.start).norm() < 1e-6);
        }
    }
}
