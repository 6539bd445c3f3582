use thiserror::Error;

/// Errors raised while parsing a [`crate::config::DemoConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown demo `{0}` (expected simple-scene, material-gallery or toon-post)")]
    UnknownDemo(String),
    #[error("invalid number for `{key}`: `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

/// Everything that can go wrong between page load and the first frame.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("container element `#{0}` not found")]
    ContainerNotFound(String),
    #[error("WebGL2 is not available")]
    WebGl2Unavailable,
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
    #[error("failed to allocate {0}")]
    Allocation(&'static str),
    #[error("framebuffer incomplete (status {0:#x})")]
    FramebufferIncomplete(u32),
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DemoError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DemoError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DemoError> for wasm_bindgen::JsValue {
    fn from(err: DemoError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
