//! Headless backend: a display-less stand-in for development hosts.
//!
//! Resources are bookkept in memory with the same validity rules the driver
//! applies (live handles, matching shader stages, declared attributes and
//! uniforms), so a scene that runs here makes the same calls it would make
//! on the device.

use super::{ExtensionFn, Platform, RendererInfo, SurfaceSize};
use crate::error::{GpuError, PlatformError};
use crate::gpu::{
    BufferId, DrawCall, GlError, Gpu, ProgramId, ShaderId, ShaderStage, TextureId, TextureImage,
    VertexLayout,
};
use crossbeam_channel::Sender;
use std::collections::{HashMap, HashSet, VecDeque};

/// Handle to the headless context.
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessContext {
    serial: u32,
}

/// In-memory platform and GPU.
#[derive(Debug)]
pub struct HeadlessPlatform {
    size: SurfaceSize,
    next_name: u32,
    context: Option<u32>,
    buffers: HashSet<u32>,
    textures: HashSet<u32>,
    shaders: HashMap<u32, (ShaderStage, String)>,
    programs: HashMap<u32, String>,
    errors: VecDeque<GlError>,
    presented: u64,
    stop_after: Option<(u64, Sender<()>)>,
}

impl HeadlessPlatform {
    /// Create a headless display of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            next_name: 1,
            context: None,
            buffers: HashSet::new(),
            textures: HashSet::new(),
            shaders: HashMap::new(),
            programs: HashMap::new(),
            errors: VecDeque::new(),
            presented: 0,
            stop_after: None,
        }
    }

    /// Request a stop through `requests` once `frames` frames are presented.
    ///
    /// The request travels the same path as an operator interrupt and is
    /// sent once. A limit of zero fires on the first present.
    #[must_use]
    pub fn with_stop_after(mut self, frames: u64, requests: Sender<()>) -> Self {
        self.stop_after = Some((frames, requests));
        self
    }

    /// Frames presented so far.
    pub const fn presented(&self) -> u64 {
        self.presented
    }

    /// Number of GPU objects still alive.
    pub fn live_resources(&self) -> usize {
        self.buffers.len() + self.textures.len() + self.shaders.len() + self.programs.len()
    }

    /// Whether a context is currently acquired.
    pub const fn has_context(&self) -> bool {
        self.context.is_some()
    }

    fn next_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new(SurfaceSize::new(1920, 1080))
    }
}

impl Platform for HeadlessPlatform {
    type Context = HeadlessContext;

    fn acquire_context(&mut self) -> Result<HeadlessContext, PlatformError> {
        if self.context.is_some() {
            return Err(PlatformError::CreateContext("context already live".to_string()));
        }
        if self.size.width == 0 || self.size.height == 0 {
            return Err(PlatformError::DisplaySize);
        }
        let serial = self.next_name();
        self.context = Some(serial);
        log::debug!("headless: context {serial} on {} surface", self.size);
        Ok(HeadlessContext { serial })
    }

    fn bind_current(&mut self, context: &HeadlessContext) -> Result<(), PlatformError> {
        if self.context == Some(context.serial) {
            Ok(())
        } else {
            Err(PlatformError::MakeCurrent("EGL_BAD_CONTEXT".to_string()))
        }
    }

    fn surface_size(&self, _context: &HeadlessContext) -> SurfaceSize {
        self.size
    }

    fn renderer_info(&self, _context: &HeadlessContext) -> RendererInfo {
        RendererInfo {
            vendor: "frameloop".to_string(),
            renderer: "headless".to_string(),
            version: "OpenGL ES 2.0".to_string(),
            shading_language: "OpenGL ES GLSL ES 1.00".to_string(),
        }
    }

    fn resolve_extension(&self, name: &str) -> Option<ExtensionFn> {
        log::debug!("headless: no driver to resolve `{name}`");
        None
    }

    fn present(&mut self, context: &HeadlessContext) -> Result<(), PlatformError> {
        if self.context != Some(context.serial) {
            return Err(PlatformError::SwapBuffers("EGL_BAD_SURFACE".to_string()));
        }
        self.presented += 1;
        let reached = matches!(&self.stop_after, Some((limit, _)) if self.presented >= *limit);
        if reached {
            if let Some((limit, requests)) = self.stop_after.take() {
                log::debug!("headless: frame limit {limit} reached");
                let _ = requests.try_send(());
            }
        }
        Ok(())
    }

    fn release_context(&mut self, context: HeadlessContext) -> Result<(), PlatformError> {
        if self.context != Some(context.serial) {
            return Err(PlatformError::Teardown("unknown context".to_string()));
        }
        self.context = None;
        self.buffers.clear();
        self.textures.clear();
        self.shaders.clear();
        self.programs.clear();
        self.errors.clear();
        Ok(())
    }
}

impl Gpu for HeadlessPlatform {
    fn create_vertex_buffer(&mut self, vertices: &[f32]) -> Result<BufferId, GpuError> {
        if vertices.is_empty() {
            return Err(GpuError::Native(GlError::InvalidValue));
        }
        let name = self.next_name();
        self.buffers.insert(name);
        Ok(BufferId(name))
    }

    fn create_texture(&mut self, image: &TextureImage) -> Result<TextureId, GpuError> {
        let expected = image.width as usize * image.height as usize * 4;
        if image.width == 0 || image.height == 0 || image.pixels.len() != expected {
            return Err(GpuError::Native(GlError::InvalidValue));
        }
        let name = self.next_name();
        self.textures.insert(name);
        Ok(TextureId(name))
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GpuError> {
        if !source.contains("void main") {
            return Err(GpuError::Compile {
                stage,
                log: "no entry point `main`".to_string(),
            });
        }
        let name = self.next_name();
        self.shaders.insert(name, (stage, source.to_string()));
        Ok(ShaderId(name))
    }

    fn link_program(
        &mut self,
        vertex: ShaderId,
        fragment: ShaderId,
    ) -> Result<ProgramId, GpuError> {
        let source = match (self.shaders.get(&vertex.0), self.shaders.get(&fragment.0)) {
            (Some((ShaderStage::Vertex, vs)), Some((ShaderStage::Fragment, fs))) => {
                format!("{vs}\n{fs}")
            }
            _ => {
                return Err(GpuError::Link {
                    log: "expected one vertex and one fragment shader".to_string(),
                })
            }
        };
        let name = self.next_name();
        self.programs.insert(name, source);
        Ok(ProgramId(name))
    }

    fn bind_vertex_layout(
        &mut self,
        program: ProgramId,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<(), GpuError> {
        let source = self
            .programs
            .get(&program.0)
            .ok_or(GpuError::StaleHandle(program.0))?;
        if !self.buffers.contains(&buffer.0) {
            return Err(GpuError::StaleHandle(buffer.0));
        }
        match layout.attributes.iter().find(|a| !source.contains(a.name)) {
            Some(missing) => Err(GpuError::MissingAttribute(missing.name.to_string())),
            None => Ok(()),
        }
    }

    fn configure_viewport(&mut self, size: SurfaceSize, _clear: [f32; 4]) -> Result<(), GpuError> {
        if size.width > self.size.width || size.height > self.size.height {
            return Err(GpuError::Native(GlError::InvalidValue));
        }
        Ok(())
    }

    fn set_uniform_mat4(
        &mut self,
        program: ProgramId,
        name: &str,
        _matrix: &[f32; 16],
    ) -> Result<(), GpuError> {
        let source = self
            .programs
            .get(&program.0)
            .ok_or(GpuError::StaleHandle(program.0))?;
        if source.contains(&format!("mat4 {name};")) {
            Ok(())
        } else {
            Err(GpuError::MissingUniform(name.to_string()))
        }
    }

    fn draw(&mut self, call: &DrawCall) {
        let live = self.programs.contains_key(&call.program.0)
            && self.buffers.contains(&call.buffer.0)
            && self.textures.contains(&call.texture.0);
        if !live {
            self.errors.push_back(GlError::InvalidOperation);
        }
    }

    fn last_error(&mut self) -> Option<GlError> {
        self.errors.pop_front()
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.programs.remove(&program.0);
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.shaders.remove(&shader.0);
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.textures.remove(&texture.0);
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer.0);
    }
}
