//! GLSL sources and program helpers.

use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader};

use crate::error::DemoError;

pub const MESH_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_extrude;

out vec3 v_world_position;
out vec3 v_world_normal;
out vec3 v_view_normal;

void main() {
    vec4 world = u_model * vec4(a_position + a_normal * u_extrude, 1.0);
    v_world_position = world.xyz;
    v_world_normal = normalize(mat3(u_model) * a_normal);
    v_view_normal = normalize(mat3(u_view) * v_world_normal);
    gl_Position = u_projection * u_view * world;
}
"#;

pub const MESH_FS: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_world_normal;
in vec3 v_view_normal;

uniform int u_shading;
uniform vec3 u_color;
uniform vec3 u_specular;
uniform float u_shininess;
uniform vec3 u_ambient;
uniform vec3 u_light_color;
uniform vec3 u_light_direction;
uniform vec3 u_camera_position;
uniform bool u_encode_srgb;

out vec4 out_color;

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    vec3 n = normalize(v_world_normal);
    float n_dot_l = max(dot(n, u_light_direction), 0.0);
    vec3 color;

    if (u_shading == 0) {
        color = u_color;
    } else if (u_shading == 1) {
        color = u_color * (u_ambient + u_light_color * n_dot_l);
    } else if (u_shading == 2) {
        vec3 v = normalize(u_camera_position - v_world_position);
        vec3 h = normalize(u_light_direction + v);
        float spec = n_dot_l > 0.0 ? pow(max(dot(n, h), 0.0), u_shininess) : 0.0;
        color = u_color * (u_ambient + u_light_color * n_dot_l) + u_specular * u_light_color * spec;
    } else if (u_shading == 3) {
        color = normalize(v_view_normal) * 0.5 + 0.5;
    } else {
        float band = n_dot_l > 0.5 ? 1.0 : (n_dot_l > 0.1 ? 0.6 : 0.3);
        color = u_color * (u_ambient + u_light_color * band);
    }

    if (u_encode_srgb) {
        color = linear_to_srgb(clamp(color, 0.0, 1.0));
    }
    out_color = vec4(color, 1.0);
}
"#;

/// Fullscreen triangle generated from `gl_VertexID`; no buffers needed.
pub const FULLSCREEN_VS: &str = r#"#version 300 es
out vec2 v_uv;

void main() {
    vec2 p = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2));
    v_uv = p;
    gl_Position = vec4(p * 2.0 - 1.0, 0.0, 1.0);
}
"#;

pub const FILM_GRAIN_FS: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
uniform sampler2D u_source;
uniform float u_strength;
uniform float u_time;
out vec4 out_color;

float rand(vec2 co) {
    return fract(sin(dot(co, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
    vec4 base = texture(u_source, v_uv);
    float noise = rand(fract(v_uv + u_time));
    vec3 grain = base.rgb + base.rgb * clamp(0.1 + noise, 0.0, 1.0);
    out_color = vec4(mix(base.rgb, grain, u_strength), base.a);
}
"#;

pub const GLITCH_FS: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
uniform sampler2D u_source;
uniform sampler2D u_displacement;
uniform bool u_bypass;
uniform float u_amount;
uniform float u_angle;
uniform float u_seed;
uniform float u_seed_x;
uniform float u_seed_y;
uniform float u_distortion_x;
uniform float u_distortion_y;
uniform float u_column_size;
out vec4 out_color;

float rand(vec2 co) {
    return fract(sin(dot(co, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
    if (u_bypass) {
        out_color = texture(u_source, v_uv);
        return;
    }
    vec2 p = v_uv;
    float xs = floor(gl_FragCoord.x / 0.5);
    float ys = floor(gl_FragCoord.y / 0.5);
    vec4 disp = texture(u_displacement, p * u_seed * u_seed);

    if (p.y < u_distortion_x + u_column_size && p.y > u_distortion_x - u_column_size * u_seed) {
        p.y = u_seed_x > 0.0 ? 1.0 - (p.y + u_distortion_y) : u_distortion_y;
    }
    if (p.x < u_distortion_y + u_column_size && p.x > u_distortion_y - u_column_size * u_seed) {
        p.x = u_seed_y > 0.0 ? u_distortion_x : 1.0 - (p.x + u_distortion_x);
    }
    p.x += disp.x * u_seed_x * (u_seed / 5.0);
    p.y += disp.y * u_seed_y * (u_seed / 5.0);

    vec2 offset = u_amount * vec2(cos(u_angle), sin(u_angle));
    vec4 cr = texture(u_source, p + offset);
    vec4 cga = texture(u_source, p);
    vec4 cb = texture(u_source, p - offset);
    vec4 snow = 200.0 * u_amount * vec4(rand(vec2(xs * u_seed, ys * u_seed * 50.0)) * 0.2);
    out_color = vec4(cr.r, cga.g, cb.b, cga.a) + snow;
}
"#;

pub const OUTPUT_FS: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;
uniform sampler2D u_source;
out vec4 out_color;

vec3 linear_to_srgb(vec3 c) {
    return mix(c * 12.92, 1.055 * pow(c, vec3(1.0 / 2.4)) - 0.055, step(vec3(0.0031308), c));
}

void main() {
    vec4 color = texture(u_source, v_uv);
    out_color = vec4(linear_to_srgb(clamp(color.rgb, 0.0, 1.0)), color.a);
}
"#;

fn compile(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, DemoError> {
    let stage = if kind == GL::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(DemoError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(DemoError::ShaderCompile { stage, log })
    }
}

/// Compile and link a vertex/fragment pair.
pub fn program(gl: &GL, vertex: &str, fragment: &str) -> Result<WebGlProgram, DemoError> {
    let vs = compile(gl, GL::VERTEX_SHADER, vertex)?;
    let fs = compile(gl, GL::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or(DemoError::Allocation("program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    // shaders are owned by the program once linked
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(DemoError::ProgramLink(log))
    }
}
