//! Test double for the platform and GPU: records every call in order and
//! fails on demand.

use crate::error::{GpuError, PlatformError};
use crate::gpu::{
    BufferId, DrawCall, GlError, Gpu, ProgramId, ShaderId, ShaderStage, TextureId, TextureImage,
    VertexLayout,
};
use crate::platform::{ExtensionFn, Platform, RendererInfo, SurfaceSize};
use crossbeam_channel::Sender;
use std::sync::{Arc, Mutex, MutexGuard};

/// One recorded capability call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Acquire,
    Bind,
    Resolve(String),
    CreateBuffer,
    CreateTexture,
    Compile(ShaderStage),
    Link,
    BindLayout,
    Viewport,
    Uniform,
    Draw,
    Present,
    DeleteProgram,
    DeleteShader,
    DeleteTexture,
    DeleteBuffer,
    Release,
}

/// Operation to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Acquire,
    Bind,
    VertexBuffer,
    Texture,
    Compile(ShaderStage),
    Link,
    Bindings,
    Draw(GlError),
    Present,
    Release,
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<Call>,
    uniforms: Vec<[f32; 16]>,
}

/// Shared view of what a [`RecordingPlatform`] saw.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Recorded>>);

impl CallLog {
    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.0.lock().unwrap()
    }

    fn push(&self, call: Call) {
        self.lock().calls.push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.lock().calls.iter().filter(|c| *c == call).count()
    }

    /// Index the next recorded call will get.
    pub fn mark(&self) -> usize {
        self.lock().calls.len()
    }

    /// Matrices uploaded through `set_uniform_mat4`, in order.
    pub fn uniforms(&self) -> Vec<[f32; 16]> {
        self.lock().uniforms.clone()
    }
}

pub struct RecordingPlatform {
    log: CallLog,
    fault: Option<Fault>,
    present_hook: Option<Sender<()>>,
    next_name: u32,
    pending: Option<GlError>,
}

#[derive(Debug)]
pub struct RecordingContext;

impl RecordingPlatform {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            fault: None,
            present_hook: None,
            next_name: 1,
            pending: None,
        }
    }

    pub fn failing(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Block each present until the hook's receiver takes the message.
    pub fn on_present(mut self, hook: Sender<()>) -> Self {
        self.present_hook = Some(hook);
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn fails(&self, fault: Fault) -> bool {
        self.fault == Some(fault)
    }

    fn name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

impl Platform for RecordingPlatform {
    type Context = RecordingContext;

    fn acquire_context(&mut self) -> Result<RecordingContext, PlatformError> {
        self.log.push(Call::Acquire);
        if self.fails(Fault::Acquire) {
            return Err(PlatformError::NoDisplay);
        }
        Ok(RecordingContext)
    }

    fn bind_current(&mut self, _context: &RecordingContext) -> Result<(), PlatformError> {
        self.log.push(Call::Bind);
        if self.fails(Fault::Bind) {
            return Err(PlatformError::MakeCurrent("EGL_BAD_ACCESS".to_string()));
        }
        Ok(())
    }

    fn surface_size(&self, _context: &RecordingContext) -> SurfaceSize {
        SurfaceSize::new(1280, 720)
    }

    fn renderer_info(&self, _context: &RecordingContext) -> RendererInfo {
        RendererInfo::default()
    }

    fn resolve_extension(&self, name: &str) -> Option<ExtensionFn> {
        self.log.push(Call::Resolve(name.to_string()));
        None
    }

    fn present(&mut self, _context: &RecordingContext) -> Result<(), PlatformError> {
        self.log.push(Call::Present);
        if self.fails(Fault::Present) {
            return Err(PlatformError::SwapBuffers("EGL_BAD_SURFACE".to_string()));
        }
        if let Some(hook) = &self.present_hook {
            let _ = hook.send(());
        }
        Ok(())
    }

    fn release_context(&mut self, _context: RecordingContext) -> Result<(), PlatformError> {
        self.log.push(Call::Release);
        if self.fails(Fault::Release) {
            return Err(PlatformError::Teardown("fail to close display!!".to_string()));
        }
        Ok(())
    }
}

impl Gpu for RecordingPlatform {
    fn create_vertex_buffer(&mut self, _vertices: &[f32]) -> Result<BufferId, GpuError> {
        self.log.push(Call::CreateBuffer);
        if self.fails(Fault::VertexBuffer) {
            return Err(GpuError::Native(GlError::OutOfMemory));
        }
        Ok(BufferId(self.name()))
    }

    fn create_texture(&mut self, _image: &TextureImage) -> Result<TextureId, GpuError> {
        self.log.push(Call::CreateTexture);
        if self.fails(Fault::Texture) {
            return Err(GpuError::Native(GlError::InvalidValue));
        }
        Ok(TextureId(self.name()))
    }

    fn compile_shader(&mut self, stage: ShaderStage, _source: &str) -> Result<ShaderId, GpuError> {
        self.log.push(Call::Compile(stage));
        if self.fails(Fault::Compile(stage)) {
            return Err(GpuError::Compile {
                stage,
                log: "syntax error".to_string(),
            });
        }
        Ok(ShaderId(self.name()))
    }

    fn link_program(&mut self, _vs: ShaderId, _fs: ShaderId) -> Result<ProgramId, GpuError> {
        self.log.push(Call::Link);
        if self.fails(Fault::Link) {
            return Err(GpuError::Link {
                log: "varying mismatch".to_string(),
            });
        }
        Ok(ProgramId(self.name()))
    }

    fn bind_vertex_layout(
        &mut self,
        _program: ProgramId,
        _buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<(), GpuError> {
        self.log.push(Call::BindLayout);
        if self.fails(Fault::Bindings) {
            return Err(GpuError::MissingAttribute(layout.attributes[0].name.to_string()));
        }
        Ok(())
    }

    fn configure_viewport(&mut self, _size: SurfaceSize, _clear: [f32; 4]) -> Result<(), GpuError> {
        self.log.push(Call::Viewport);
        Ok(())
    }

    fn set_uniform_mat4(
        &mut self,
        _program: ProgramId,
        _name: &str,
        matrix: &[f32; 16],
    ) -> Result<(), GpuError> {
        let mut recorded = self.log.lock();
        recorded.calls.push(Call::Uniform);
        recorded.uniforms.push(*matrix);
        Ok(())
    }

    fn draw(&mut self, _call: &DrawCall) {
        self.log.push(Call::Draw);
        if let Some(Fault::Draw(code)) = self.fault {
            self.pending = Some(code);
        }
    }

    fn last_error(&mut self) -> Option<GlError> {
        self.pending.take()
    }

    fn delete_program(&mut self, _program: ProgramId) {
        self.log.push(Call::DeleteProgram);
    }

    fn delete_shader(&mut self, _shader: ShaderId) {
        self.log.push(Call::DeleteShader);
    }

    fn delete_texture(&mut self, _texture: TextureId) {
        self.log.push(Call::DeleteTexture);
    }

    fn delete_buffer(&mut self, _buffer: BufferId) {
        self.log.push(Call::DeleteBuffer);
    }
}
