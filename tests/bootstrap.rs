use scene_demos::bootstrap::{launch, Container, Launch, FALLBACK_ID, FALLBACK_MESSAGE};
use scene_demos::viewport::Viewport;
use scene_demos::{demos, DemoConfig, DemoError};

#[derive(Debug, PartialEq)]
enum Child {
    Canvas,
    Message { id: &'static str, text: String },
}

struct FakeContainer {
    size: (u32, u32),
    webgl2: bool,
    children: Vec<Child>,
}

impl FakeContainer {
    fn new(width: u32, height: u32, webgl2: bool) -> Self {
        Self {
            size: (width, height),
            webgl2,
            children: Vec::new(),
        }
    }

    fn canvases(&self) -> usize {
        self.children.iter().filter(|c| **c == Child::Canvas).count()
    }
}

impl Container for FakeContainer {
    type Surface = usize;

    fn id(&self) -> &str {
        "container"
    }

    fn client_size(&self) -> (u32, u32) {
        self.size
    }

    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    fn supports_webgl2(&self) -> bool {
        self.webgl2
    }

    fn mount_surface(&mut self) -> Result<usize, DemoError> {
        self.children.push(Child::Canvas);
        Ok(self.children.len() - 1)
    }

    fn mount_fallback(&mut self, message: &str) -> Result<(), DemoError> {
        self.children.push(Child::Message {
            id: FALLBACK_ID,
            text: message.to_string(),
        });
        Ok(())
    }
}

#[test]
fn capable_800x600_mounts_one_canvas() {
    let mut container = FakeContainer::new(800, 600, true);
    let launched = launch(Some(&mut container), "container").expect("launch");
    assert!(matches!(launched, Launch::Ready(0)));
    assert_eq!(container.children, vec![Child::Canvas]);

    let stage = demos::build(&DemoConfig::default(), container.viewport());
    assert!((stage.camera.aspect - 1.333).abs() < 1e-3);
    assert_eq!(container.viewport(), Viewport::new(800, 600, 1.0));
}

#[test]
fn missing_webgl2_mounts_only_the_message() {
    let mut container = FakeContainer::new(800, 600, false);
    let launched = launch(Some(&mut container), "container").expect("launch");
    assert!(matches!(launched, Launch::Fallback));
    assert_eq!(container.canvases(), 0);
    assert_eq!(
        container.children,
        vec![Child::Message {
            id: FALLBACK_ID,
            text: FALLBACK_MESSAGE.to_string()
        }]
    );
}

#[test]
fn missing_container_aborts() {
    let result = launch::<FakeContainer>(None, "stage");
    match result {
        Err(DemoError::ContainerNotFound(id)) => assert_eq!(id, "stage"),
        _ => panic!("expected ContainerNotFound"),
    }
}
