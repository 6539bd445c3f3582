use scene_demos::viewport::Viewport;
use scene_demos::{demos, DemoConfig, DemoKind};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() < eps
}

#[test]
fn aspect_follows_every_resize() {
    let sizes = [
        (800, 600),
        (1920, 1080),
        (1080, 1920),
        (1, 1),
        (4096, 17),
        (333, 777),
    ];

    for kind in DemoKind::ALL {
        let config = DemoConfig {
            demo: kind,
            ..DemoConfig::default()
        };
        let mut stage = demos::build(&config, Viewport::new(640, 480, 1.0));
        for &(w, h) in &sizes {
            stage.resize(Viewport::new(w, h, 1.0));
            assert_eq!(
                stage.camera.aspect,
                w as f32 / h as f32,
                "{kind} at {w}x{h}"
            );
        }
    }
}

#[test]
fn resize_is_idempotent() {
    let mut stage = demos::build(&DemoConfig::default(), Viewport::new(640, 480, 1.0));
    let viewport = Viewport::new(1280, 720, 2.0);
    stage.resize(viewport);
    let first = (stage.camera.aspect, stage.viewport().drawing_buffer());
    stage.resize(viewport);
    stage.resize(viewport);
    assert_eq!((stage.camera.aspect, stage.viewport().drawing_buffer()), first);
    assert_eq!(first.1, (2560, 1440));
}

#[test]
fn collapsed_container_keeps_last_aspect() {
    let mut stage = demos::build(&DemoConfig::default(), Viewport::new(800, 600, 1.0));
    stage.resize(Viewport::new(800, 0, 1.0));
    assert!(approx_eq(stage.camera.aspect, 4.0 / 3.0, 1e-6));
    assert!(stage.camera.projection().is_finite());
}
