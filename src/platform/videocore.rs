//! VideoCore backend: fullscreen EGL/GLES2 on the Raspberry Pi's HDMI
//! display through the Broadcom userland libraries.
//!
//! # Safety
//!
//! Every function here calls into the vendor driver. Handles are only ever
//! produced by the driver itself and are used on the thread that created
//! them; the context type holds raw pointers and is therefore `!Send`.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use super::{ExtensionFn, Platform, RendererInfo, SurfaceSize};
use crate::error::{GpuError, PlatformError};
use crate::gpu::{
    BufferId, DrawCall, GlError, Gpu, ProgramId, ShaderId, ShaderStage, TextureId, TextureImage,
    VertexLayout,
};
use std::ffi::{c_char, c_void, CStr, CString};
use std::ptr;

// =============================================================================
// Native bindings
// =============================================================================

type EglDisplay = *mut c_void;
type EglConfig = *mut c_void;
type EglContext = *mut c_void;
type EglSurface = *mut c_void;
type EglBoolean = u32;
type EglInt = i32;
type DispmanxHandle = u32;

#[repr(C)]
struct VcRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[repr(C)]
#[derive(Debug)]
struct DispmanxWindow {
    element: DispmanxHandle,
    width: i32,
    height: i32,
}

#[link(name = "bcm_host")]
extern "C" {
    fn bcm_host_init();
    fn graphics_get_display_size(display: u16, width: *mut u32, height: *mut u32) -> i32;
    fn vc_dispmanx_display_open(device: u32) -> DispmanxHandle;
    fn vc_dispmanx_display_close(display: DispmanxHandle) -> i32;
    fn vc_dispmanx_update_start(priority: i32) -> DispmanxHandle;
    fn vc_dispmanx_update_submit_sync(update: DispmanxHandle) -> i32;
    #[allow(clippy::too_many_arguments)]
    fn vc_dispmanx_element_add(
        update: DispmanxHandle,
        display: DispmanxHandle,
        layer: i32,
        dest: *const VcRect,
        src: DispmanxHandle,
        src_rect: *const VcRect,
        protection: u32,
        alpha: *mut c_void,
        clamp: *mut c_void,
        transform: u32,
    ) -> DispmanxHandle;
    fn vc_dispmanx_element_remove(update: DispmanxHandle, element: DispmanxHandle) -> i32;
}

#[link(name = "brcmEGL")]
extern "C" {
    fn eglGetDisplay(native: *mut c_void) -> EglDisplay;
    fn eglInitialize(display: EglDisplay, major: *mut EglInt, minor: *mut EglInt) -> EglBoolean;
    fn eglChooseConfig(
        display: EglDisplay,
        attributes: *const EglInt,
        configs: *mut EglConfig,
        size: EglInt,
        count: *mut EglInt,
    ) -> EglBoolean;
    fn eglBindAPI(api: u32) -> EglBoolean;
    fn eglCreateContext(
        display: EglDisplay,
        config: EglConfig,
        share: EglContext,
        attributes: *const EglInt,
    ) -> EglContext;
    fn eglCreateWindowSurface(
        display: EglDisplay,
        config: EglConfig,
        window: *mut c_void,
        attributes: *const EglInt,
    ) -> EglSurface;
    fn eglMakeCurrent(
        display: EglDisplay,
        draw: EglSurface,
        read: EglSurface,
        context: EglContext,
    ) -> EglBoolean;
    fn eglSwapBuffers(display: EglDisplay, surface: EglSurface) -> EglBoolean;
    fn eglDestroySurface(display: EglDisplay, surface: EglSurface) -> EglBoolean;
    fn eglDestroyContext(display: EglDisplay, context: EglContext) -> EglBoolean;
    fn eglTerminate(display: EglDisplay) -> EglBoolean;
    fn eglGetError() -> EglInt;
    fn eglGetProcAddress(name: *const c_char) -> *mut c_void;
}

#[link(name = "brcmGLESv2")]
extern "C" {
    fn glGenBuffers(n: i32, buffers: *mut u32);
    fn glBindBuffer(target: u32, buffer: u32);
    fn glBufferData(target: u32, size: isize, data: *const c_void, usage: u32);
    fn glDeleteBuffers(n: i32, buffers: *const u32);
    fn glActiveTexture(unit: u32);
    fn glGenTextures(n: i32, textures: *mut u32);
    fn glBindTexture(target: u32, texture: u32);
    fn glTexParameteri(target: u32, pname: u32, param: i32);
    #[allow(clippy::too_many_arguments)]
    fn glTexImage2D(
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        border: i32,
        format: u32,
        kind: u32,
        pixels: *const c_void,
    );
    fn glDeleteTextures(n: i32, textures: *const u32);
    fn glCreateShader(kind: u32) -> u32;
    fn glShaderSource(shader: u32, count: i32, sources: *const *const c_char, lengths: *const i32);
    fn glCompileShader(shader: u32);
    fn glGetShaderiv(shader: u32, pname: u32, value: *mut i32);
    fn glGetShaderInfoLog(shader: u32, size: i32, length: *mut i32, log: *mut c_char);
    fn glDeleteShader(shader: u32);
    fn glCreateProgram() -> u32;
    fn glAttachShader(program: u32, shader: u32);
    fn glLinkProgram(program: u32);
    fn glGetProgramiv(program: u32, pname: u32, value: *mut i32);
    fn glGetProgramInfoLog(program: u32, size: i32, length: *mut i32, log: *mut c_char);
    fn glDeleteProgram(program: u32);
    fn glUseProgram(program: u32);
    fn glGetAttribLocation(program: u32, name: *const c_char) -> i32;
    fn glEnableVertexAttribArray(index: u32);
    fn glVertexAttribPointer(
        index: u32,
        size: i32,
        kind: u32,
        normalized: u8,
        stride: i32,
        offset: *const c_void,
    );
    fn glGetUniformLocation(program: u32, name: *const c_char) -> i32;
    fn glUniformMatrix4fv(location: i32, count: i32, transpose: u8, value: *const f32);
    fn glViewport(x: i32, y: i32, width: i32, height: i32);
    fn glClearColor(r: f32, g: f32, b: f32, a: f32);
    fn glClear(mask: u32);
    fn glDrawArrays(mode: u32, first: i32, count: i32);
    fn glGetError() -> u32;
    fn glGetString(name: u32) -> *const u8;
}

const EGL_FALSE: EglBoolean = 0;
const EGL_SUCCESS: EglInt = 0x3000;
const EGL_ALPHA_SIZE: EglInt = 0x3021;
const EGL_BLUE_SIZE: EglInt = 0x3022;
const EGL_GREEN_SIZE: EglInt = 0x3023;
const EGL_RED_SIZE: EglInt = 0x3024;
const EGL_DEPTH_SIZE: EglInt = 0x3025;
const EGL_SURFACE_TYPE: EglInt = 0x3033;
const EGL_NONE: EglInt = 0x3038;
const EGL_WINDOW_BIT: EglInt = 0x0004;
const EGL_CONTEXT_CLIENT_VERSION: EglInt = 0x3098;
const EGL_OPENGL_ES_API: u32 = 0x30A0;

const DISPMANX_PROTECTION_NONE: u32 = 0;

const GL_FALSE: u8 = 0;
const GL_ARRAY_BUFFER: u32 = 0x8892;
const GL_STATIC_DRAW: u32 = 0x88E4;
const GL_TEXTURE0: u32 = 0x84C0;
const GL_TEXTURE_2D: u32 = 0x0DE1;
const GL_TEXTURE_MAG_FILTER: u32 = 0x2800;
const GL_TEXTURE_MIN_FILTER: u32 = 0x2801;
const GL_LINEAR: i32 = 0x2601;
const GL_RGBA: u32 = 0x1908;
const GL_UNSIGNED_BYTE: u32 = 0x1401;
const GL_FLOAT: u32 = 0x1406;
const GL_FRAGMENT_SHADER: u32 = 0x8B30;
const GL_VERTEX_SHADER: u32 = 0x8B31;
const GL_COMPILE_STATUS: u32 = 0x8B81;
const GL_LINK_STATUS: u32 = 0x8B82;
const GL_INFO_LOG_LENGTH: u32 = 0x8B84;
const GL_COLOR_BUFFER_BIT: u32 = 0x4000;
const GL_DEPTH_BUFFER_BIT: u32 = 0x0100;
const GL_TRIANGLES: u32 = 0x0004;
const GL_VENDOR: u32 = 0x1F00;
const GL_RENDERER: u32 = 0x1F01;
const GL_VERSION: u32 = 0x1F02;
const GL_SHADING_LANGUAGE_VERSION: u32 = 0x8B8C;

/// Symbolic name of an EGL error code.
pub fn egl_error_name(code: i32) -> &'static str {
    match code {
        0x3000 => "EGL_SUCCESS",
        0x3001 => "EGL_NOT_INITIALIZED",
        0x3002 => "EGL_BAD_ACCESS",
        0x3003 => "EGL_BAD_ALLOC",
        0x3004 => "EGL_BAD_ATTRIBUTE",
        0x3005 => "EGL_BAD_CONFIG",
        0x3006 => "EGL_BAD_CONTEXT",
        0x3007 => "EGL_BAD_CURRENT_SURFACE",
        0x3008 => "EGL_BAD_DISPLAY",
        0x3009 => "EGL_BAD_MATCH",
        0x300A => "EGL_BAD_NATIVE_PIXMAP",
        0x300B => "EGL_BAD_NATIVE_WINDOW",
        0x300C => "EGL_BAD_PARAMETER",
        0x300D => "EGL_BAD_SURFACE",
        0x300E => "EGL_CONTEXT_LOST",
        _ => "UNKNOWN",
    }
}

/// Name of the most recent EGL error on this thread.
fn egl_error() -> String {
    let code = unsafe { eglGetError() };
    if code == EGL_SUCCESS {
        "no EGL error reported".to_string()
    } else {
        egl_error_name(code).to_string()
    }
}

fn gl_check() -> Result<(), GpuError> {
    match GlError::from_code(unsafe { glGetError() }) {
        Some(code) => Err(GpuError::Native(code)),
        None => Ok(()),
    }
}

fn gl_string(name: u32) -> String {
    let raw = unsafe { glGetString(name) };
    if raw.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(raw.cast()) }
        .to_string_lossy()
        .into_owned()
}

fn c_name(name: &str) -> Result<CString, GpuError> {
    CString::new(name).map_err(|_| GpuError::Native(GlError::InvalidValue))
}

// =============================================================================
// Context
// =============================================================================

/// Live EGL context, window surface and dispmanx element.
#[derive(Debug)]
pub struct VideoCoreContext {
    display: EglDisplay,
    context: EglContext,
    surface: EglSurface,
    dispman_display: DispmanxHandle,
    element: DispmanxHandle,
    size: SurfaceSize,
    /// Referenced by the surface for its whole life.
    _window: Box<DispmanxWindow>,
}

/// Raspberry Pi display platform.
#[derive(Debug, Default)]
pub struct VideoCore {
    host_initialized: bool,
}

impl VideoCore {
    /// Create the platform; the host is initialized on first acquisition.
    pub const fn new() -> Self {
        Self {
            host_initialized: false,
        }
    }

    fn ensure_host(&mut self) {
        if !self.host_initialized {
            log::debug!("broadcom host init");
            unsafe { bcm_host_init() };
            self.host_initialized = true;
        }
    }

    /// Display, config and context; terminates the display on failure.
    fn create_egl(&self) -> Result<(EglDisplay, EglConfig, EglContext), PlatformError> {
        #[rustfmt::skip]
        const CONFIG_ATTRIBUTES: [EglInt; 13] = [
            EGL_RED_SIZE, 8,
            EGL_GREEN_SIZE, 8,
            EGL_BLUE_SIZE, 8,
            EGL_ALPHA_SIZE, 8,
            EGL_DEPTH_SIZE, 16,
            EGL_SURFACE_TYPE, EGL_WINDOW_BIT,
            EGL_NONE,
        ];
        const CONTEXT_ATTRIBUTES: [EglInt; 3] = [EGL_CONTEXT_CLIENT_VERSION, 2, EGL_NONE];

        let display = unsafe { eglGetDisplay(ptr::null_mut()) };
        if display.is_null() {
            return Err(PlatformError::NoDisplay);
        }

        if unsafe { eglInitialize(display, ptr::null_mut(), ptr::null_mut()) } == EGL_FALSE {
            return Err(PlatformError::Initialize(egl_error()));
        }

        let fail = |err: PlatformError| {
            unsafe { eglTerminate(display) };
            err
        };

        let mut config: EglConfig = ptr::null_mut();
        let mut count: EglInt = 0;
        let chosen = unsafe {
            eglChooseConfig(display, CONFIG_ATTRIBUTES.as_ptr(), &mut config, 1, &mut count)
        };
        if chosen == EGL_FALSE || count < 1 {
            return Err(fail(PlatformError::ChooseConfig(egl_error())));
        }

        if unsafe { eglBindAPI(EGL_OPENGL_ES_API) } == EGL_FALSE {
            return Err(fail(PlatformError::BindApi(egl_error())));
        }

        let context = unsafe {
            eglCreateContext(display, config, ptr::null_mut(), CONTEXT_ATTRIBUTES.as_ptr())
        };
        if context.is_null() {
            return Err(fail(PlatformError::CreateContext(egl_error())));
        }

        Ok((display, config, context))
    }

    /// Fullscreen dispmanx element on display 0.
    fn open_element(size: SurfaceSize) -> (DispmanxHandle, DispmanxHandle) {
        let dest = VcRect {
            x: 0,
            y: 0,
            width: size.width as i32,
            height: size.height as i32,
        };
        // Source rectangle is in 16.16 fixed point
        let src = VcRect {
            x: 0,
            y: 0,
            width: (size.width << 16) as i32,
            height: (size.height << 16) as i32,
        };

        unsafe {
            let dispman_display = vc_dispmanx_display_open(0);
            let update = vc_dispmanx_update_start(0);
            let element = vc_dispmanx_element_add(
                update,
                dispman_display,
                0,
                &dest,
                0,
                &src,
                DISPMANX_PROTECTION_NONE,
                ptr::null_mut(),
                ptr::null_mut(),
                0,
            );
            vc_dispmanx_update_submit_sync(update);
            (dispman_display, element)
        }
    }

    fn close_element(
        dispman_display: DispmanxHandle,
        element: DispmanxHandle,
    ) -> Result<(), PlatformError> {
        unsafe {
            let update = vc_dispmanx_update_start(0);
            if vc_dispmanx_element_remove(update, element) != 0 {
                return Err(PlatformError::Teardown(
                    "fail to remove element from display".to_string(),
                ));
            }
            vc_dispmanx_update_submit_sync(update);
            if vc_dispmanx_display_close(dispman_display) != 0 {
                return Err(PlatformError::Teardown("fail to close display".to_string()));
            }
        }
        Ok(())
    }
}

impl Platform for VideoCore {
    type Context = VideoCoreContext;

    fn acquire_context(&mut self) -> Result<VideoCoreContext, PlatformError> {
        self.ensure_host();
        let (display, config, context) = self.create_egl()?;

        let destroy_egl = || unsafe {
            eglDestroyContext(display, context);
            eglTerminate(display);
        };

        let (mut width, mut height) = (0u32, 0u32);
        if unsafe { graphics_get_display_size(0, &mut width, &mut height) } < 0 {
            destroy_egl();
            return Err(PlatformError::DisplaySize);
        }
        let size = SurfaceSize::new(width, height);
        log::debug!("display {size}");

        let (dispman_display, element) = Self::open_element(size);
        let mut window = Box::new(DispmanxWindow {
            element,
            width: width as i32,
            height: height as i32,
        });

        let surface = unsafe {
            eglCreateWindowSurface(
                display,
                config,
                ptr::addr_of_mut!(*window).cast(),
                ptr::null(),
            )
        };
        if surface.is_null() {
            let err = PlatformError::CreateSurface(egl_error());
            let _ = Self::close_element(dispman_display, element);
            destroy_egl();
            return Err(err);
        }

        Ok(VideoCoreContext {
            display,
            context,
            surface,
            dispman_display,
            element,
            size,
            _window: window,
        })
    }

    fn bind_current(&mut self, ctx: &VideoCoreContext) -> Result<(), PlatformError> {
        let bound = unsafe { eglMakeCurrent(ctx.display, ctx.surface, ctx.surface, ctx.context) };
        if bound == EGL_FALSE {
            return Err(PlatformError::MakeCurrent(egl_error()));
        }
        Ok(())
    }

    fn surface_size(&self, ctx: &VideoCoreContext) -> SurfaceSize {
        ctx.size
    }

    fn renderer_info(&self, _ctx: &VideoCoreContext) -> RendererInfo {
        RendererInfo {
            vendor: gl_string(GL_VENDOR),
            renderer: gl_string(GL_RENDERER),
            version: gl_string(GL_VERSION),
            shading_language: gl_string(GL_SHADING_LANGUAGE_VERSION),
        }
    }

    fn resolve_extension(&self, name: &str) -> Option<ExtensionFn> {
        let name = CString::new(name).ok()?;
        ExtensionFn::new(unsafe { eglGetProcAddress(name.as_ptr()) })
    }

    fn present(&mut self, ctx: &VideoCoreContext) -> Result<(), PlatformError> {
        if unsafe { eglSwapBuffers(ctx.display, ctx.surface) } == EGL_FALSE {
            return Err(PlatformError::SwapBuffers(egl_error()));
        }
        Ok(())
    }

    fn release_context(&mut self, ctx: VideoCoreContext) -> Result<(), PlatformError> {
        if unsafe { eglDestroySurface(ctx.display, ctx.surface) } == EGL_FALSE {
            log::warn!("eglDestroySurface: {}", egl_error());
        }

        Self::close_element(ctx.dispman_display, ctx.element)?;

        let unbound = unsafe {
            eglMakeCurrent(ctx.display, ptr::null_mut(), ptr::null_mut(), ptr::null_mut())
        };
        if unbound == EGL_FALSE {
            return Err(PlatformError::MakeCurrent(egl_error()));
        }

        unsafe {
            eglDestroyContext(ctx.display, ctx.context);
            eglTerminate(ctx.display);
        }
        log::debug!("terminated.");
        Ok(())
    }
}

// =============================================================================
// GPU
// =============================================================================

fn info_log(object: u32, program: bool) -> String {
    let mut length = 0;
    unsafe {
        if program {
            glGetProgramiv(object, GL_INFO_LOG_LENGTH, &mut length);
        } else {
            glGetShaderiv(object, GL_INFO_LOG_LENGTH, &mut length);
        }
    }
    if length <= 1 {
        return String::new();
    }

    let mut buffer = vec![0u8; length as usize];
    let mut written = 0;
    unsafe {
        if program {
            glGetProgramInfoLog(object, length, &mut written, buffer.as_mut_ptr().cast());
        } else {
            glGetShaderInfoLog(object, length, &mut written, buffer.as_mut_ptr().cast());
        }
    }
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

impl Gpu for VideoCore {
    fn create_vertex_buffer(&mut self, vertices: &[f32]) -> Result<BufferId, GpuError> {
        let mut name = 0;
        unsafe {
            glGenBuffers(1, &mut name);
            glBindBuffer(GL_ARRAY_BUFFER, name);
            glBufferData(
                GL_ARRAY_BUFFER,
                std::mem::size_of_val(vertices) as isize,
                vertices.as_ptr().cast(),
                GL_STATIC_DRAW,
            );
        }
        gl_check()?;
        Ok(BufferId(name))
    }

    fn create_texture(&mut self, image: &TextureImage) -> Result<TextureId, GpuError> {
        let mut name = 0;
        unsafe {
            glActiveTexture(GL_TEXTURE0);
            glGenTextures(1, &mut name);
            glBindTexture(GL_TEXTURE_2D, name);
            glTexParameteri(GL_TEXTURE_2D, GL_TEXTURE_MIN_FILTER, GL_LINEAR);
            glTexParameteri(GL_TEXTURE_2D, GL_TEXTURE_MAG_FILTER, GL_LINEAR);
            glTexImage2D(
                GL_TEXTURE_2D,
                0,
                GL_RGBA as i32,
                image.width as i32,
                image.height as i32,
                0,
                GL_RGBA,
                GL_UNSIGNED_BYTE,
                image.pixels.as_ptr().cast(),
            );
        }
        gl_check()?;
        Ok(TextureId(name))
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, GpuError> {
        let source = CString::new(source).map_err(|_| GpuError::Compile {
            stage,
            log: "source contains a NUL byte".to_string(),
        })?;
        let kind = match stage {
            ShaderStage::Vertex => GL_VERTEX_SHADER,
            ShaderStage::Fragment => GL_FRAGMENT_SHADER,
        };

        let mut status = 0;
        let shader = unsafe {
            let shader = glCreateShader(kind);
            let sources = [source.as_ptr()];
            glShaderSource(shader, 1, sources.as_ptr(), ptr::null());
            glCompileShader(shader);
            glGetShaderiv(shader, GL_COMPILE_STATUS, &mut status);
            shader
        };
        if status == i32::from(GL_FALSE) {
            let log = info_log(shader, false);
            unsafe { glDeleteShader(shader) };
            return Err(GpuError::Compile { stage, log });
        }
        Ok(ShaderId(shader))
    }

    fn link_program(
        &mut self,
        vertex: ShaderId,
        fragment: ShaderId,
    ) -> Result<ProgramId, GpuError> {
        let mut status = 0;
        let program = unsafe {
            let program = glCreateProgram();
            glAttachShader(program, vertex.0);
            glAttachShader(program, fragment.0);
            glLinkProgram(program);
            glGetProgramiv(program, GL_LINK_STATUS, &mut status);
            program
        };
        if status == i32::from(GL_FALSE) {
            let log = info_log(program, true);
            unsafe { glDeleteProgram(program) };
            return Err(GpuError::Link { log });
        }
        Ok(ProgramId(program))
    }

    fn bind_vertex_layout(
        &mut self,
        program: ProgramId,
        buffer: BufferId,
        layout: &VertexLayout,
    ) -> Result<(), GpuError> {
        unsafe {
            glUseProgram(program.0);
            glBindBuffer(GL_ARRAY_BUFFER, buffer.0);
        }
        for attribute in layout.attributes {
            let name = c_name(attribute.name)?;
            let location = unsafe { glGetAttribLocation(program.0, name.as_ptr()) };
            if location < 0 {
                return Err(GpuError::MissingAttribute(attribute.name.to_string()));
            }
            let offset = (attribute.offset as usize * std::mem::size_of::<f32>()) as *const c_void;
            unsafe {
                glEnableVertexAttribArray(location as u32);
                glVertexAttribPointer(
                    location as u32,
                    attribute.components as i32,
                    GL_FLOAT,
                    GL_FALSE,
                    layout.stride_bytes() as i32,
                    offset,
                );
            }
        }
        gl_check()
    }

    fn configure_viewport(&mut self, size: SurfaceSize, clear: [f32; 4]) -> Result<(), GpuError> {
        let [r, g, b, a] = clear;
        unsafe {
            glViewport(0, 0, size.width as i32, size.height as i32);
            glClearColor(r, g, b, a);
        }
        gl_check()
    }

    fn set_uniform_mat4(
        &mut self,
        program: ProgramId,
        name: &str,
        matrix: &[f32; 16],
    ) -> Result<(), GpuError> {
        let c_uniform = c_name(name)?;
        unsafe {
            glUseProgram(program.0);
            let location = glGetUniformLocation(program.0, c_uniform.as_ptr());
            if location < 0 {
                return Err(GpuError::MissingUniform(name.to_string()));
            }
            glUniformMatrix4fv(location, 1, GL_FALSE, matrix.as_ptr());
        }
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) {
        unsafe {
            glClear(GL_COLOR_BUFFER_BIT | GL_DEPTH_BUFFER_BIT);
            glUseProgram(call.program.0);
            glBindBuffer(GL_ARRAY_BUFFER, call.buffer.0);
            glBindTexture(GL_TEXTURE_2D, call.texture.0);
            glDrawArrays(GL_TRIANGLES, 0, call.vertex_count as i32);
        }
    }

    fn last_error(&mut self) -> Option<GlError> {
        GlError::from_code(unsafe { glGetError() })
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { glDeleteProgram(program.0) };
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { glDeleteShader(shader.0) };
    }

    fn delete_texture(&mut self, texture: TextureId) {
        unsafe { glDeleteTextures(1, &texture.0) };
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { glDeleteBuffers(1, &buffer.0) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_egl_error_names() {
        assert_eq!(egl_error_name(0x3000), "EGL_SUCCESS");
        assert_eq!(egl_error_name(0x3003), "EGL_BAD_ALLOC");
        assert_eq!(egl_error_name(0x300E), "EGL_CONTEXT_LOST");
        assert_eq!(egl_error_name(0x4000), "UNKNOWN");
    }
}
