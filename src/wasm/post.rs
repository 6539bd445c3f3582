//! Offscreen targets and fullscreen effect passes, plus the executor that
//! walks a [`FramePlan`].

use web_sys::{
    WebGl2RenderingContext as GL, WebGlFramebuffer, WebGlProgram, WebGlRenderbuffer,
    WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::render::SceneRenderer;
use super::shader;
use crate::composer::{Buffer, Destination, Effect, FramePlan, PassKind};
use crate::error::DemoError;
use crate::glitch::{GlitchUniforms, DISPLACEMENT_SIZE};
use crate::stage::Stage;

fn texture(gl: &GL, filter: u32) -> Result<WebGlTexture, DemoError> {
    let texture = gl
        .create_texture()
        .ok_or(DemoError::Allocation("texture"))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, filter as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
    Ok(texture)
}

/// Color texture plus depth renderbuffer behind one framebuffer.
struct RenderTarget {
    framebuffer: WebGlFramebuffer,
    color: WebGlTexture,
    depth: WebGlRenderbuffer,
    size: (u32, u32),
}

impl RenderTarget {
    fn new(gl: &GL, size: (u32, u32)) -> Result<Self, DemoError> {
        let target = Self {
            framebuffer: gl
                .create_framebuffer()
                .ok_or(DemoError::Allocation("framebuffer"))?,
            color: texture(gl, GL::LINEAR)?,
            depth: gl
                .create_renderbuffer()
                .ok_or(DemoError::Allocation("renderbuffer"))?,
            size,
        };
        target.allocate(gl)?;

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&target.framebuffer));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&target.color),
            0,
        );
        gl.framebuffer_renderbuffer(
            GL::FRAMEBUFFER,
            GL::DEPTH_ATTACHMENT,
            GL::RENDERBUFFER,
            Some(&target.depth),
        );
        let status = gl.check_framebuffer_status(GL::FRAMEBUFFER);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        if status != GL::FRAMEBUFFER_COMPLETE {
            return Err(DemoError::FramebufferIncomplete(status));
        }
        Ok(target)
    }

    fn allocate(&self, gl: &GL) -> Result<(), DemoError> {
        let (width, height) = (self.size.0 as i32, self.size.1 as i32);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.color));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA8 as i32,
            width,
            height,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            None,
        )?;
        gl.bind_renderbuffer(GL::RENDERBUFFER, Some(&self.depth));
        gl.renderbuffer_storage(GL::RENDERBUFFER, GL::DEPTH_COMPONENT24, width, height);
        gl.bind_renderbuffer(GL::RENDERBUFFER, None);
        Ok(())
    }

    fn resize(&mut self, gl: &GL, size: (u32, u32)) -> Result<(), DemoError> {
        if self.size != size {
            self.size = size;
            self.allocate(gl)?;
        }
        Ok(())
    }
}

struct FullscreenProgram {
    program: WebGlProgram,
    source: Option<WebGlUniformLocation>,
}

impl FullscreenProgram {
    fn new(gl: &GL, fragment: &str) -> Result<Self, DemoError> {
        let program = shader::program(gl, shader::FULLSCREEN_VS, fragment)?;
        let source = gl.get_uniform_location(&program, "u_source");
        Ok(Self { program, source })
    }

    fn uniform(&self, gl: &GL, name: &str) -> Option<WebGlUniformLocation> {
        gl.get_uniform_location(&self.program, name)
    }
}

pub struct PostChain {
    targets: [RenderTarget; 2],
    film_grain: FullscreenProgram,
    glitch: FullscreenProgram,
    output: FullscreenProgram,
    displacement: WebGlTexture,
    empty: WebGlVertexArrayObject,
}

impl PostChain {
    pub fn new(gl: &GL, stage: &mut Stage, size: (u32, u32)) -> Result<Self, DemoError> {
        let displacement = texture(gl, GL::NEAREST)?;
        let pixels = match stage.glitch.and_then(|id| stage.composer.pass_mut(id)) {
            Some(PassKind::Glitch(state)) => state.displacement_map(),
            _ => vec![0; DISPLACEMENT_SIZE * DISPLACEMENT_SIZE * 4],
        };
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA8 as i32,
            DISPLACEMENT_SIZE as i32,
            DISPLACEMENT_SIZE as i32,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(pixels.as_slice()),
        )?;

        let chain = Self {
            targets: [RenderTarget::new(gl, size)?, RenderTarget::new(gl, size)?],
            film_grain: FullscreenProgram::new(gl, shader::FILM_GRAIN_FS)?,
            glitch: FullscreenProgram::new(gl, shader::GLITCH_FS)?,
            output: FullscreenProgram::new(gl, shader::OUTPUT_FS)?,
            displacement,
            empty: gl
                .create_vertex_array()
                .ok_or(DemoError::Allocation("vertex array"))?,
        };
        log::info!("post chain ready at {}x{}", size.0, size.1);
        Ok(chain)
    }

    pub fn resize(&mut self, gl: &GL, size: (u32, u32)) -> Result<(), DemoError> {
        for target in &mut self.targets {
            target.resize(gl, size)?;
        }
        Ok(())
    }

    fn target(&self, buffer: Buffer) -> &RenderTarget {
        match buffer {
            Buffer::A => &self.targets[0],
            Buffer::B => &self.targets[1],
        }
    }

    fn draw_effect(&self, gl: &GL, effect: &Effect, source: Buffer) {
        let program = match effect {
            Effect::FilmGrain { .. } => &self.film_grain,
            Effect::Glitch(_) => &self.glitch,
            Effect::Output => &self.output,
            Effect::Scene { .. } => return,
        };
        gl.disable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);
        gl.use_program(Some(&program.program));

        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.target(source).color));
        gl.uniform1i(program.source.as_ref(), 0);

        match effect {
            Effect::FilmGrain { strength, time } => {
                gl.uniform1f(program.uniform(gl, "u_strength").as_ref(), *strength);
                gl.uniform1f(program.uniform(gl, "u_time").as_ref(), *time);
            }
            Effect::Glitch(uniforms) => self.bind_glitch(gl, program, uniforms),
            _ => {}
        }

        gl.bind_vertex_array(Some(&self.empty));
        gl.draw_arrays(GL::TRIANGLES, 0, 3);
        gl.bind_vertex_array(None);
    }

    fn bind_glitch(&self, gl: &GL, program: &FullscreenProgram, u: &GlitchUniforms) {
        gl.active_texture(GL::TEXTURE1);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.displacement));
        gl.uniform1i(program.uniform(gl, "u_displacement").as_ref(), 1);
        gl.uniform1i(program.uniform(gl, "u_bypass").as_ref(), u.bypass as i32);
        for (name, value) in [
            ("u_amount", u.amount),
            ("u_angle", u.angle),
            ("u_seed", u.seed),
            ("u_seed_x", u.seed_x),
            ("u_seed_y", u.seed_y),
            ("u_distortion_x", u.distortion_x),
            ("u_distortion_y", u.distortion_y),
            ("u_column_size", u.column_size),
        ] {
            gl.uniform1f(program.uniform(gl, name).as_ref(), value);
        }
        gl.active_texture(GL::TEXTURE0);
    }
}

/// Draw one frame by walking the plan in order.
pub fn execute(
    gl: &GL,
    plan: &FramePlan,
    stage: &Stage,
    scene: &SceneRenderer,
    post: Option<&PostChain>,
) -> Result<(), DemoError> {
    let (width, height) = stage.viewport().drawing_buffer();

    for step in plan {
        match step.destination {
            Destination::Screen => {
                gl.bind_framebuffer(GL::FRAMEBUFFER, None);
                gl.viewport(0, 0, width as i32, height as i32);
            }
            Destination::Offscreen(buffer) => {
                let target = post
                    .ok_or(DemoError::Allocation("offscreen render targets"))?
                    .target(buffer);
                gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&target.framebuffer));
                gl.viewport(0, 0, target.size.0 as i32, target.size.1 as i32);
            }
        }

        match (&step.effect, step.source) {
            (Effect::Scene { encode_srgb }, _) => scene.draw(gl, stage, *encode_srgb),
            (effect, Some(source)) => post
                .ok_or(DemoError::Allocation("post-processing programs"))?
                .draw_effect(gl, effect, source),
            (_, None) => log::warn!("effect step without a source buffer"),
        }
    }
    Ok(())
}
