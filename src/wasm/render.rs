use std::mem::{offset_of, size_of};

use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::shader;
use crate::actor::Actor;
use crate::error::DemoError;
use crate::geometry::{Geometry, Vertex};
use crate::material::{Material, Shading};
use crate::scene::Scene;
use crate::stage::Stage;
use crate::viewport::Viewport;

/// Size the canvas back-buffer in device pixels and its box in CSS pixels.
pub fn fit_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) -> Result<(), DemoError> {
    let (width, height) = viewport.drawing_buffer();
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width))?;
    style.set_property("height", &format!("{}px", viewport.height))?;
    Ok(())
}

/// An index buffer bound to the shared vertex buffer through its own VAO.
struct DrawList {
    vao: WebGlVertexArrayObject,
    _indices: WebGlBuffer,
    count: i32,
}

impl DrawList {
    fn new(gl: &GL, vertices: &WebGlBuffer, indices: &[u32]) -> Result<Self, DemoError> {
        let vao = gl
            .create_vertex_array()
            .ok_or(DemoError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(vertices));

        let stride = size_of::<Vertex>() as i32;
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(
            1,
            3,
            GL::FLOAT,
            false,
            stride,
            offset_of!(Vertex, normal) as i32,
        );

        let index_buffer = gl
            .create_buffer()
            .ok_or(DemoError::Allocation("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        gl.buffer_data_with_u8_array(
            GL::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(indices),
            GL::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            _indices: index_buffer,
            count: indices.len() as i32,
        })
    }

    fn draw(&self, gl: &GL, mode: u32) {
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(mode, self.count, GL::UNSIGNED_INT, 0);
    }
}

struct GpuMesh {
    _vertices: WebGlBuffer,
    triangles: DrawList,
    lines: DrawList,
}

impl GpuMesh {
    fn upload(gl: &GL, geometry: &Geometry) -> Result<Self, DemoError> {
        let vertices = gl
            .create_buffer()
            .ok_or(DemoError::Allocation("vertex buffer"))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        gl.buffer_data_with_u8_array(
            GL::ARRAY_BUFFER,
            bytemuck::cast_slice(&geometry.vertices),
            GL::STATIC_DRAW,
        );
        let triangles = DrawList::new(gl, &vertices, &geometry.indices)?;
        let lines = DrawList::new(gl, &vertices, &geometry.edge_indices())?;
        Ok(Self {
            _vertices: vertices,
            triangles,
            lines,
        })
    }
}

struct MeshUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    extrude: Option<WebGlUniformLocation>,
    shading: Option<WebGlUniformLocation>,
    color: Option<WebGlUniformLocation>,
    specular: Option<WebGlUniformLocation>,
    shininess: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    light_color: Option<WebGlUniformLocation>,
    light_direction: Option<WebGlUniformLocation>,
    camera_position: Option<WebGlUniformLocation>,
    encode_srgb: Option<WebGlUniformLocation>,
}

impl MeshUniforms {
    fn locate(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            model: at("u_model"),
            view: at("u_view"),
            projection: at("u_projection"),
            extrude: at("u_extrude"),
            shading: at("u_shading"),
            color: at("u_color"),
            specular: at("u_specular"),
            shininess: at("u_shininess"),
            ambient: at("u_ambient"),
            light_color: at("u_light_color"),
            light_direction: at("u_light_direction"),
            camera_position: at("u_camera_position"),
            encode_srgb: at("u_encode_srgb"),
        }
    }
}

/// Draws the scene's actors with the shared mesh program.
pub struct SceneRenderer {
    program: WebGlProgram,
    uniforms: MeshUniforms,
    meshes: Vec<GpuMesh>,
}

impl SceneRenderer {
    pub fn new(gl: &GL, scene: &Scene) -> Result<Self, DemoError> {
        let program = shader::program(gl, shader::MESH_VS, shader::MESH_FS)?;
        let uniforms = MeshUniforms::locate(gl, &program);
        let meshes = scene
            .geometries
            .iter()
            .map(|geometry| GpuMesh::upload(gl, geometry))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "uploaded {} meshes ({} triangles)",
            meshes.len(),
            scene.geometries.iter().map(Geometry::triangle_count).sum::<usize>()
        );
        Ok(Self {
            program,
            uniforms,
            meshes,
        })
    }

    /// Clear the bound framebuffer and draw every actor into it.
    pub fn draw(&self, gl: &GL, stage: &Stage, encode_srgb: bool) {
        let scene = &stage.scene;
        let camera = &stage.camera;
        let u = &self.uniforms;

        let background = if encode_srgb {
            scene.background.to_srgb()
        } else {
            scene.background
        };
        gl.clear_color(background.r, background.g, background.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);
        gl.cull_face(GL::BACK);

        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(u.view.as_ref(), false, &camera.view().to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(
            u.projection.as_ref(),
            false,
            &camera.projection().to_cols_array(),
        );
        gl.uniform3fv_with_f32_array(u.camera_position.as_ref(), &camera.position.to_array());
        gl.uniform3fv_with_f32_array(
            u.ambient.as_ref(),
            &scene.ambient.color.scaled(scene.ambient.intensity).to_array(),
        );
        match scene.directional {
            Some(light) => {
                gl.uniform3fv_with_f32_array(
                    u.light_color.as_ref(),
                    &light.color.scaled(light.intensity).to_array(),
                );
                gl.uniform3fv_with_f32_array(
                    u.light_direction.as_ref(),
                    &light.direction().to_array(),
                );
            }
            None => {
                gl.uniform3f(u.light_color.as_ref(), 0.0, 0.0, 0.0);
                gl.uniform3f(u.light_direction.as_ref(), 0.0, 1.0, 0.0);
            }
        }
        gl.uniform1i(u.encode_srgb.as_ref(), encode_srgb as i32);

        for actor in &scene.actors {
            match self.meshes.get(actor.geometry.0) {
                Some(mesh) => self.draw_actor(gl, actor, mesh),
                None => log::warn!("actor references missing geometry {:?}", actor.geometry),
            }
        }
        gl.bind_vertex_array(None);
    }

    fn draw_actor(&self, gl: &GL, actor: &Actor, mesh: &GpuMesh) {
        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(
            u.model.as_ref(),
            false,
            &actor.transform.matrix().to_cols_array(),
        );

        // inverted hull: back faces of a slightly inflated copy
        if let Some(outline) = actor.visible_outline() {
            gl.cull_face(GL::FRONT);
            gl.uniform1i(u.shading.as_ref(), Shading::Unlit as i32);
            gl.uniform3fv_with_f32_array(u.color.as_ref(), &outline.color.to_array());
            gl.uniform1f(u.extrude.as_ref(), outline.thickness);
            mesh.triangles.draw(gl, GL::TRIANGLES);
            gl.cull_face(GL::BACK);
        }

        let material = &actor.material;
        gl.uniform1f(u.extrude.as_ref(), 0.0);
        gl.uniform1i(u.shading.as_ref(), material.shading() as i32);
        gl.uniform3fv_with_f32_array(u.color.as_ref(), &material.color().to_array());
        if let Material::Phong {
            specular,
            shininess,
            ..
        } = *material
        {
            gl.uniform3fv_with_f32_array(u.specular.as_ref(), &specular.to_array());
            gl.uniform1f(u.shininess.as_ref(), shininess);
        }

        if material.wireframe() {
            mesh.lines.draw(gl, GL::LINES);
        } else {
            mesh.triangles.draw(gl, GL::TRIANGLES);
        }
    }
}
