//! GPU resource primitives.
//!
//! The scene talks to the driver only through [`Gpu`]: upload a buffer,
//! upload a texture, compile and link, bind attributes, set a uniform, draw,
//! and ask what went wrong. Handles are plain driver names.

use crate::error::GpuError;
use crate::platform::SurfaceSize;
use std::fmt;

/// Vertex buffer name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Texture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Shader object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Program object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Shader pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage.
    Vertex,
    /// Per-fragment stage.
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Driver error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlError {
    /// `GL_INVALID_ENUM`
    InvalidEnum,
    /// `GL_INVALID_VALUE`
    InvalidValue,
    /// `GL_INVALID_OPERATION`
    InvalidOperation,
    /// `GL_INVALID_FRAMEBUFFER_OPERATION`
    InvalidFramebufferOperation,
    /// `GL_OUT_OF_MEMORY`
    OutOfMemory,
    /// Any code not in the table.
    Unknown(u32),
}

impl GlError {
    /// `GL_NO_ERROR`
    pub const NO_ERROR: u32 = 0;

    /// Decode a raw code; `None` for `GL_NO_ERROR`.
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            Self::NO_ERROR => return None,
            0x0500 => Self::InvalidEnum,
            0x0501 => Self::InvalidValue,
            0x0502 => Self::InvalidOperation,
            0x0505 => Self::OutOfMemory,
            0x0506 => Self::InvalidFramebufferOperation,
            other => Self::Unknown(other),
        })
    }

    /// Raw code.
    pub const fn code(self) -> u32 {
        match self {
            Self::InvalidEnum => 0x0500,
            Self::InvalidValue => 0x0501,
            Self::InvalidOperation => 0x0502,
            Self::OutOfMemory => 0x0505,
            Self::InvalidFramebufferOperation => 0x0506,
            Self::Unknown(code) => code,
        }
    }

    /// Symbolic name as the driver headers spell it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InvalidEnum => "INVALID_ENUM",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidOperation => "INVALID_OPERATION",
            Self::InvalidFramebufferOperation => "INVALID_FRAMEBUFFER_OPERATION",
            Self::OutOfMemory => "OUT_OF_MEMORY",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One float attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name in the vertex shader.
    pub name: &'static str,
    /// Number of floats.
    pub components: u32,
    /// Offset in floats from the start of the vertex.
    pub offset: u32,
}

/// Interleaved vertex layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Floats per vertex.
    pub stride: u32,
    /// Attributes in the vertex.
    pub attributes: &'static [VertexAttribute],
}

impl VertexLayout {
    /// Stride in bytes.
    pub const fn stride_bytes(&self) -> u32 {
        self.stride * 4
    }
}

/// Tightly packed RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes, row-major.
    pub pixels: Vec<u8>,
}

/// One draw of a triangle list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    /// Program to draw with.
    pub program: ProgramId,
    /// Geometry.
    pub buffer: BufferId,
    /// Bound texture.
    pub texture: TextureId,
    /// Number of vertices.
    pub vertex_count: u32,
}

/// Scene-resource primitives of the graphics driver.
///
/// Creation methods report failures directly. `draw` follows the driver's
/// own model: it never fails by itself and callers query [`Gpu::last_error`].
pub trait Gpu {
    /// Upload static interleaved vertex data.
    fn create_vertex_buffer(&mut self, vertices: &[f32]) -> Result<BufferId, GpuError>;

    /// Upload an RGBA8 texture with linear filtering.
    fn create_texture(&mut self, image: &TextureImage) -> Result<TextureId, GpuError>;

    /// Compile one shader stage.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GpuError>;

    /// Link a vertex and fragment shader into a program.
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId)
        -> Result<ProgramId, GpuError>;

    /// Bind `layout` of `buffer` to the program's attributes.
    fn bind_vertex_layout(
        &mut self,
        program: ProgramId,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<(), GpuError>;

    /// Set the viewport to the full surface and the clear color.
    fn configure_viewport(&mut self, size: SurfaceSize, clear: [f32; 4]) -> Result<(), GpuError>;

    /// Upload a column-major 4x4 matrix uniform.
    fn set_uniform_mat4(
        &mut self,
        program: ProgramId,
        name: &str,
        matrix: &[f32; 16],
    ) -> Result<(), GpuError>;

    /// Clear and draw a triangle list.
    fn draw(&mut self, call: &DrawCall);

    /// Take the oldest pending driver error, if any.
    fn last_error(&mut self) -> Option<GlError>;

    /// Delete a program.
    fn delete_program(&mut self, program: ProgramId);

    /// Delete a shader.
    fn delete_shader(&mut self, shader: ShaderId);

    /// Delete a texture.
    fn delete_texture(&mut self, texture: TextureId);

    /// Delete a buffer.
    fn delete_buffer(&mut self, buffer: BufferId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_table() {
        assert_eq!(GlError::from_code(GlError::NO_ERROR), None);
        assert_eq!(GlError::from_code(0x0500), Some(GlError::InvalidEnum));
        assert_eq!(GlError::from_code(0x0506), Some(GlError::InvalidFramebufferOperation));
        assert_eq!(GlError::from_code(0x1234), Some(GlError::Unknown(0x1234)));
        assert_eq!(GlError::Unknown(0x1234).name(), "UNKNOWN");
        assert_eq!(GlError::OutOfMemory.code(), 0x0505);
    }
}
