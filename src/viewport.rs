/// Container size in CSS pixels plus the device pixel ratio in effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Width over height, or `None` for a collapsed container.
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }

    /// Back-buffer size in device pixels. Never smaller than 1x1 so GL
    /// allocations stay valid while the container is collapsed.
    pub fn drawing_buffer(&self) -> (u32, u32) {
        let scale = |css: u32| ((css as f32 * self.pixel_ratio).floor() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawing_buffer_scales_with_pixel_ratio() {
        let viewport = Viewport::new(800, 600, 1.5);
        assert_eq!(viewport.drawing_buffer(), (1200, 900));
        assert_eq!(Viewport::new(0, 0, 2.0).drawing_buffer(), (1, 1));
    }

    #[test]
    fn collapsed_container_has_no_aspect() {
        assert_eq!(Viewport::new(300, 0, 1.0).aspect(), None);
        assert_eq!(Viewport::new(300, 150, 1.0).aspect(), Some(2.0));
    }
}
