//! Error types.
//!
//! Every failure names the operation that failed so a single diagnostic
//! line is enough to tell which stage of bring-up, rendering or teardown
//! went wrong.

use crate::controller::LifecycleState;
use crate::gpu::{GlError, ShaderStage};
use std::fmt;
use std::io;
use thiserror::Error;

/// Failures reported by the display/context platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// No native display could be opened.
    #[error("fail to get display")]
    NoDisplay,

    /// The display connection could not be initialized.
    #[error("fail to initialize display: {0}")]
    Initialize(String),

    /// No framebuffer configuration matched the requested attributes.
    #[error("fail to choose config: {0}")]
    ChooseConfig(String),

    /// The client API could not be bound.
    #[error("fail to bind API: {0}")]
    BindApi(String),

    /// The rendering context could not be created.
    #[error("fail to create context: {0}")]
    CreateContext(String),

    /// The size of the attached display could not be queried.
    #[error("fail to get display size")]
    DisplaySize,

    /// The window surface could not be created.
    #[error("fail to create window surface: {0}")]
    CreateSurface(String),

    /// The context could not be made current on this thread.
    #[error("fail to make current: {0}")]
    MakeCurrent(String),

    /// The back buffer could not be posted to the display.
    #[error("fail to swap buffers: {0}")]
    SwapBuffers(String),

    /// A step of context destruction failed.
    #[error("fail to destroy context: {0}")]
    Teardown(String),
}

/// Failures reported by the GPU resource primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GpuError {
    /// The driver raised an error code.
    #[error("{0}")]
    Native(GlError),

    /// Shader compilation failed.
    #[error("fail compile {stage} shader: {log}")]
    Compile {
        /// Which stage failed.
        stage: ShaderStage,
        /// Driver info log.
        log: String,
    },

    /// Program linking failed.
    #[error("fail link program: {log}")]
    Link {
        /// Driver info log.
        log: String,
    },

    /// A vertex attribute is not active in the linked program.
    #[error("no attribute `{0}` in program")]
    MissingAttribute(String),

    /// A uniform is not active in the linked program.
    #[error("no uniform `{0}` in program")]
    MissingUniform(String),

    /// A handle does not refer to a live resource.
    #[error("stale resource handle {0}")]
    StaleHandle(u32),
}

/// Scene sub-resource being set up when a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneResource {
    /// Geometry buffer.
    VertexBuffer,
    /// Texture image.
    Texture,
    /// Vertex stage shader.
    VertexShader,
    /// Fragment stage shader.
    FragmentShader,
    /// Linked shader program.
    Program,
    /// Attribute bindings of the program.
    Bindings,
    /// Viewport and clear state.
    Viewport,
}

impl fmt::Display for SceneResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VertexBuffer => "vertex buffer",
            Self::Texture => "texture",
            Self::VertexShader => "vertex shader",
            Self::FragmentShader => "fragment shader",
            Self::Program => "shader program",
            Self::Bindings => "attribute bindings",
            Self::Viewport => "viewport",
        })
    }
}

/// Top-level error.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration rejected before anything was created.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Context acquisition failed; nothing was created.
    #[error("fail create context: {0}")]
    ContextAcquire(#[source] PlatformError),

    /// The acquired context could not be bound to the render thread.
    #[error("fail bind context: {0}")]
    BindCurrent(#[source] PlatformError),

    /// A required extension function could not be resolved.
    #[error("fail resolve extension `{0}`")]
    MissingExtension(String),

    /// A scene resource could not be set up.
    #[error("fail init {resource}: {source}")]
    Scene {
        /// Which sub-resource failed.
        resource: SceneResource,
        /// Underlying failure.
        #[source]
        source: GpuError,
    },

    /// Per-frame scene update failed.
    #[error("fail update scene: {0}")]
    Update(#[source] GpuError),

    /// A draw call reported an error.
    #[error("fail draw: {0}")]
    Draw(#[source] GpuError),

    /// Presenting the frame failed.
    #[error("fail present: {0}")]
    Present(#[source] PlatformError),

    /// Scene resources could not be released.
    #[error("fail release scene: {0}")]
    SceneTeardown(#[source] GpuError),

    /// The context could not be destroyed.
    #[error("fail destroy context: {0}")]
    ContextTeardown(#[source] PlatformError),

    /// An operation was attempted in the wrong lifecycle state.
    #[error("not allowed in state {0:?}")]
    InvalidState(LifecycleState),

    /// A pacing lane could not be started.
    #[error("fail spawn {lane} thread: {source}")]
    Spawn {
        /// Lane name.
        lane: &'static str,
        /// OS error.
        #[source]
        source: io::Error,
    },

    /// The interrupt hook could not be installed.
    #[error("fail install interrupt handler: {0}")]
    Interrupt(#[from] ctrlc::Error),
}

impl Error {
    /// Whether this error happened during bring-up (before the loop ran).
    pub const fn is_setup(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_)
                | Self::ContextAcquire(_)
                | Self::BindCurrent(_)
                | Self::MissingExtension(_)
                | Self::Scene { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_error_names_resource() {
        let err = Error::Scene {
            resource: SceneResource::FragmentShader,
            source: GpuError::Compile {
                stage: ShaderStage::Fragment,
                log: "0:3: syntax error".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "fail init fragment shader: fail compile fragment shader: 0:3: syntax error"
        );
        assert!(err.is_setup());
    }

    #[test]
    fn test_draw_error_names_gl_code() {
        let err = Error::Draw(GpuError::Native(GlError::InvalidOperation));
        assert_eq!(err.to_string(), "fail draw: INVALID_OPERATION");
        assert!(!err.is_setup());
    }
}
