//! Capability check and mount.
//!
//! The DOM side is hidden behind [`Container`] so the decision logic can be
//! exercised without a browser.

use crate::error::DemoError;
use crate::viewport::Viewport;

/// Id of the element mounted when WebGL2 is missing.
pub const FALLBACK_ID: &str = "webglmessage";

pub const FALLBACK_MESSAGE: &str =
    "Your browser or graphics card does not seem to support WebGL 2.";

/// The element a demo is mounted into.
pub trait Container {
    /// Drawing surface created on a successful launch.
    type Surface;

    fn id(&self) -> &str;
    /// CSS client size.
    fn client_size(&self) -> (u32, u32);
    fn pixel_ratio(&self) -> f32;
    fn supports_webgl2(&self) -> bool;
    fn mount_surface(&mut self) -> Result<Self::Surface, DemoError>;
    fn mount_fallback(&mut self, message: &str) -> Result<(), DemoError>;

    fn viewport(&self) -> Viewport {
        let (width, height) = self.client_size();
        Viewport::new(width, height, self.pixel_ratio())
    }
}

pub enum Launch<S> {
    Ready(S),
    Fallback,
}

/// Mount a surface, or the fallback message when WebGL2 is unavailable.
/// `id` names the element that was looked up, for the missing-container
/// error.
pub fn launch<C: Container>(
    container: Option<&mut C>,
    id: &str,
) -> Result<Launch<C::Surface>, DemoError> {
    let Some(container) = container else {
        log::warn!("container `#{id}` not found");
        return Err(DemoError::ContainerNotFound(id.to_string()));
    };

    if !container.supports_webgl2() {
        log::warn!("WebGL2 unavailable, mounting fallback in `#{}`", container.id());
        container.mount_fallback(FALLBACK_MESSAGE)?;
        return Ok(Launch::Fallback);
    }

    let surface = container.mount_surface()?;
    let (width, height) = container.client_size();
    log::info!("mounted {width}x{height} surface in `#{}`", container.id());
    Ok(Launch::Ready(surface))
}
