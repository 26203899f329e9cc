//! The default scene: a textured quad swinging about the vertical axis.
//!
//! The render loop only needs three things from a scene: set it up once,
//! advance it to an elapsed time, and draw it. Everything here goes through
//! [`Gpu`], so the scene never touches the driver directly.

use crate::error::{Error, GpuError, SceneResource};
use crate::gpu::{
    BufferId, DrawCall, Gpu, ProgramId, ShaderId, ShaderStage, TextureId, TextureImage,
    VertexAttribute, VertexLayout,
};
use crate::platform::SurfaceSize;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::{FRAC_PI_4, TAU};
use std::time::Duration;

/// Interleaved quad: position (xyz), texCoord (st), color (rgba).
#[rustfmt::skip]
pub const VERTEX_DATA: [f32; 54] = [
    // x,    y,   z,   s,   t,   r,   g,   b,   a
    -1.0, -1.0, 0.0, 0.0, 1.0, 0.2, 0.2, 0.2, 1.0, // A    D     C
     1.0, -1.0, 0.0, 1.0, 1.0, 0.2, 0.2, 0.2, 1.0, // B     +---+
     1.0,  1.0, 0.0, 1.0, 0.0, 0.8, 0.8, 0.8, 1.0, // C     |  /|
                                                   //       | / |
    -1.0, -1.0, 0.0, 0.0, 1.0, 0.2, 0.2, 0.2, 1.0, // A     |/  |
     1.0,  1.0, 0.0, 1.0, 0.0, 0.8, 0.8, 0.8, 1.0, // C     +---+
    -1.0,  1.0, 0.0, 0.0, 0.0, 0.8, 0.8, 0.8, 1.0, // D    A     B
];

/// Layout of [`VERTEX_DATA`].
pub const VERTEX_LAYOUT: VertexLayout = VertexLayout {
    stride: 9,
    attributes: &[
        VertexAttribute {
            name: "position",
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            name: "texCoord",
            components: 2,
            offset: 3,
        },
        VertexAttribute {
            name: "color",
            components: 4,
            offset: 5,
        },
    ],
};

/// Vertex stage source.
pub const VERTEX_SOURCE: &str = "
uniform mat4 camera;
attribute vec3 position;
attribute vec2 texCoord; varying vec2 vTexCoord;
attribute vec4 color;    varying vec4 vColor;
void main() {
    vTexCoord = texCoord;
    vColor = color;
    gl_Position = camera * vec4(position, 1);
}
";

/// Fragment stage source. Color comes from the vertex, coverage from the
/// texture's alpha.
pub const FRAGMENT_SOURCE: &str = "
uniform sampler2D texture;
varying vec2 vTexCoord;
varying vec4 vColor;
void main() {
    vec4 texColor = texture2D(texture, vTexCoord);
    gl_FragColor = vec4(vColor.rgb, texColor.a);
}
";

const CAMERA_UNIFORM: &str = "camera";

/// Scene parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Peak swing angle in radians.
    pub swing_amplitude: f32,
    /// Duration of one full swing.
    pub swing_period: Duration,
    /// Vertical field of view in radians.
    pub field_of_view: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Camera position; it looks at the origin with +Y up.
    pub eye: [f32; 3],
    /// Clear color (RGBA).
    pub clear_color: [f32; 4],
    /// Edge length of the generated texture in pixels.
    pub texture_size: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            swing_amplitude: FRAC_PI_4,
            swing_period: Duration::from_secs_f32(TAU),
            field_of_view: 45f32.to_radians(),
            near: 0.01,
            far: 10.0,
            eye: [0.0, 0.0, 5.0],
            clear_color: [0.0, 0.0, 0.0, 0.0],
            texture_size: 64,
        }
    }
}

/// Swing angle at `elapsed`: `amplitude * sin(2π t / period)`.
pub fn swing_angle(elapsed: Duration, amplitude: f32, period: Duration) -> f32 {
    let period = period.as_secs_f32();
    if period <= 0.0 {
        return 0.0;
    }
    amplitude * (TAU * elapsed.as_secs_f32() / period).sin()
}

/// Projection times view for a surface.
pub fn camera_matrix(size: SurfaceSize, config: &SceneConfig) -> Matrix4<f32> {
    let projection = Matrix4::new_perspective(
        size.aspect_ratio(),
        config.field_of_view,
        config.near,
        config.far,
    );
    let [x, y, z] = config.eye;
    let view = Matrix4::look_at_rh(&Point3::new(x, y, z), &Point3::origin(), &Vector3::y());
    projection * view
}

/// Horizontal alpha ramp, opaque white on the right edge.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gradient_texture(size: u32) -> TextureImage {
    let size = size.max(1);
    let span = (size - 1).max(1) as f32;
    let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);
    for _row in 0..size {
        for col in 0..size {
            let alpha = (col as f32 / span * 255.0).round() as u8;
            pixels.extend_from_slice(&[255, 255, 255, alpha]);
        }
    }
    TextureImage {
        width: size,
        height: size,
        pixels,
    }
}

/// GPU-resident state of the quad scene.
#[derive(Debug)]
pub struct QuadScene {
    program: ProgramId,
    vertex_shader: ShaderId,
    fragment_shader: ShaderId,
    buffer: BufferId,
    texture: TextureId,
    camera: Matrix4<f32>,
    swing_amplitude: f32,
    swing_period: Duration,
}

/// Resources uploaded so far during [`QuadScene::init`].
#[derive(Default)]
struct Staged {
    buffer: Option<BufferId>,
    texture: Option<TextureId>,
    vertex_shader: Option<ShaderId>,
    fragment_shader: Option<ShaderId>,
    program: Option<ProgramId>,
}

impl Staged {
    fn discard<G: Gpu + ?Sized>(self, gpu: &mut G) {
        if let Some(program) = self.program {
            gpu.delete_program(program);
        }
        for shader in [self.vertex_shader, self.fragment_shader].into_iter().flatten() {
            gpu.delete_shader(shader);
        }
        if let Some(texture) = self.texture {
            gpu.delete_texture(texture);
        }
        if let Some(buffer) = self.buffer {
            gpu.delete_buffer(buffer);
        }
    }
}

fn stage<T>(resource: SceneResource, result: Result<T, GpuError>) -> Result<T, Error> {
    result.map_err(|source| Error::Scene { resource, source })
}

impl QuadScene {
    /// Upload geometry, texture and program, and set up the viewport.
    ///
    /// On failure, whatever was already uploaded is deleted again and the
    /// error names the sub-resource that failed.
    pub fn init<G: Gpu + ?Sized>(
        gpu: &mut G,
        size: SurfaceSize,
        config: &SceneConfig,
    ) -> Result<Self, Error> {
        let mut staged = Staged::default();
        match Self::upload(gpu, size, config, &mut staged) {
            Ok(scene) => Ok(scene),
            Err(err) => {
                staged.discard(gpu);
                Err(err)
            }
        }
    }

    fn upload<G: Gpu + ?Sized>(
        gpu: &mut G,
        size: SurfaceSize,
        config: &SceneConfig,
        staged: &mut Staged,
    ) -> Result<Self, Error> {
        let camera = camera_matrix(size, config);

        let buffer = stage(SceneResource::VertexBuffer, gpu.create_vertex_buffer(&VERTEX_DATA))?;
        staged.buffer = Some(buffer);

        let texture = stage(
            SceneResource::Texture,
            gpu.create_texture(&gradient_texture(config.texture_size)),
        )?;
        staged.texture = Some(texture);

        let vertex_shader = stage(
            SceneResource::VertexShader,
            gpu.compile_shader(ShaderStage::Vertex, VERTEX_SOURCE),
        )?;
        staged.vertex_shader = Some(vertex_shader);

        let fragment_shader = stage(
            SceneResource::FragmentShader,
            gpu.compile_shader(ShaderStage::Fragment, FRAGMENT_SOURCE),
        )?;
        staged.fragment_shader = Some(fragment_shader);

        let program = stage(
            SceneResource::Program,
            gpu.link_program(vertex_shader, fragment_shader),
        )?;
        staged.program = Some(program);

        stage(
            SceneResource::Bindings,
            gpu.bind_vertex_layout(program, buffer, &VERTEX_LAYOUT),
        )?;
        stage(
            SceneResource::Viewport,
            gpu.configure_viewport(size, config.clear_color),
        )?;

        Ok(Self {
            program,
            vertex_shader,
            fragment_shader,
            buffer,
            texture,
            camera,
            swing_amplitude: config.swing_amplitude,
            swing_period: config.swing_period,
        })
    }

    /// Camera with the model rotation for `elapsed` applied.
    pub fn transform_at(&self, elapsed: Duration) -> Matrix4<f32> {
        let angle = swing_angle(elapsed, self.swing_amplitude, self.swing_period);
        self.camera * Matrix4::from_axis_angle(&Vector3::y_axis(), angle)
    }

    /// Advance the scene to `elapsed` since the animation origin.
    pub fn update<G: Gpu + ?Sized>(&mut self, gpu: &mut G, elapsed: Duration) -> Result<(), Error> {
        let mut matrix = [0.0f32; 16];
        matrix.copy_from_slice(self.transform_at(elapsed).as_slice());
        gpu.set_uniform_mat4(self.program, CAMERA_UNIFORM, &matrix)
            .map_err(Error::Update)
    }

    /// Clear and draw the quad, then check the driver for errors.
    pub fn draw<G: Gpu + ?Sized>(&self, gpu: &mut G) -> Result<(), Error> {
        gpu.draw(&DrawCall {
            program: self.program,
            buffer: self.buffer,
            texture: self.texture,
            vertex_count: 6,
        });
        match gpu.last_error() {
            Some(code) => Err(Error::Draw(GpuError::Native(code))),
            None => Ok(()),
        }
    }

    /// Delete every GPU object of the scene.
    pub fn release<G: Gpu + ?Sized>(self, gpu: &mut G) -> Result<(), Error> {
        gpu.delete_program(self.program);
        gpu.delete_shader(self.vertex_shader);
        gpu.delete_shader(self.fragment_shader);
        gpu.delete_texture(self.texture);
        gpu.delete_buffer(self.buffer);
        match gpu.last_error() {
            Some(code) => Err(Error::SceneTeardown(GpuError::Native(code))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_swing_angle() {
        let period = Duration::from_secs(4);
        assert!(approx(swing_angle(Duration::ZERO, 0.5, period), 0.0));
        assert!(approx(swing_angle(Duration::from_secs(1), 0.5, period), 0.5));
        assert!(approx(swing_angle(Duration::from_secs(3), 0.5, period), -0.5));
        assert!(approx(swing_angle(Duration::from_secs(1), 0.5, Duration::ZERO), 0.0));
    }

    #[test]
    fn test_default_swing_is_quarter_pi_sine() {
        let config = SceneConfig::default();
        let t = Duration::from_millis(1500);
        let expected = FRAC_PI_4 * 1.5f32.sin();
        let angle = swing_angle(t, config.swing_amplitude, config.swing_period);
        assert!((angle - expected).abs() < 1e-4);
    }

    #[test]
    fn test_gradient_texture() {
        let image = gradient_texture(4);
        assert_eq!(image.pixels.len(), 4 * 4 * 4);
        assert_eq!(image.pixels[3], 0);
        assert_eq!(image.pixels[4 * 3 + 3], 255);
        assert_eq!(gradient_texture(0).width, 1);
    }

    #[test]
    fn test_camera_centers_origin() {
        let camera = camera_matrix(SurfaceSize::new(800, 600), &SceneConfig::default());
        let clip = camera * nalgebra::Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx(clip.x, 0.0));
        assert!(approx(clip.y, 0.0));
        assert!(clip.w > 0.0);
    }

    #[test]
    fn test_init_update_draw_release_on_headless() {
        let mut gpu = HeadlessPlatform::default();
        let size = SurfaceSize::new(1920, 1080);
        let mut scene = QuadScene::init(&mut gpu, size, &SceneConfig::default()).unwrap();
        assert_eq!(gpu.live_resources(), 5);

        scene.update(&mut gpu, Duration::from_millis(16)).unwrap();
        scene.draw(&mut gpu).unwrap();

        scene.release(&mut gpu).unwrap();
        assert_eq!(gpu.live_resources(), 0);
    }

    #[test]
    fn test_failed_viewport_discards_uploads() {
        let mut gpu = HeadlessPlatform::new(SurfaceSize::new(640, 480));
        let oversized = SurfaceSize::new(4096, 4096);
        let err = QuadScene::init(&mut gpu, oversized, &SceneConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Scene {
                resource: SceneResource::Viewport,
                ..
            }
        ));
        assert_eq!(gpu.live_resources(), 0);
    }
}
