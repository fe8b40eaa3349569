//! WebGL2 renderer for the flat-coloured scene triangles.
//!
//! WebXR base layers bind to a WebGL context, so the browser side draws with
//! WebGL2 directly. One program, one dynamic vertex buffer, one draw per view.

use glam::Mat4;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_sys::WebGl2RenderingContext as Gl;
use xr_core::constants::SKY_COLOR;
use xr_core::{SceneVertex, SCENE_VERTEX_STRIDE};

use crate::constants::INITIAL_VERTEX_CAPACITY;

const VERTEX_SHADER: &str = include_str!("../shaders/scene.vert");
const FRAGMENT_SHADER: &str = include_str!("../shaders/scene.frag");

/// Pixel rectangle to draw into.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// WebGL2 context that can back an XR session.
pub fn create_context(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Gl> {
    let options = js_sys::Object::new();
    _ = js_sys::Reflect::set(&options, &"xrCompatible".into(), &true.into());
    _ = js_sys::Reflect::set(&options, &"antialias".into(), &true.into());
    let ctx = canvas
        .get_context_with_context_options("webgl2", &options)
        .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("WebGL2 not available"))?;
    ctx.dyn_into::<Gl>()
        .map_err(|e| anyhow::anyhow!("not a WebGL2 context: {:?}", e))
}

fn compile_shader(gl: &Gl, kind: u32, source: &str) -> anyhow::Result<web::WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| anyhow::anyhow!("create_shader failed"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(anyhow::anyhow!("shader compile error: {}", info))
    }
}

fn link_program(
    gl: &Gl,
    vs: &web::WebGlShader,
    fs: &web::WebGlShader,
) -> anyhow::Result<web::WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| anyhow::anyhow!("create_program failed"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    let ok = gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(anyhow::anyhow!("program link error: {}", info))
    }
}

pub struct Renderer {
    gl: Gl,
    program: web::WebGlProgram,
    vao: web::WebGlVertexArrayObject,
    vbo: web::WebGlBuffer,
    u_view_proj: web::WebGlUniformLocation,
    capacity: usize,
    count: i32,
}

impl Renderer {
    pub fn new(gl: Gl) -> anyhow::Result<Self> {
        let vs = compile_shader(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vs, &fs)?;
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let u_view_proj = gl
            .get_uniform_location(&program, "u_view_proj")
            .ok_or_else(|| anyhow::anyhow!("missing u_view_proj"))?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| anyhow::anyhow!("create_vertex_array failed"))?;
        let vbo = gl
            .create_buffer()
            .ok_or_else(|| anyhow::anyhow!("create_buffer failed"))?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vbo));
        gl.buffer_data_with_i32(
            Gl::ARRAY_BUFFER,
            (INITIAL_VERTEX_CAPACITY * SCENE_VERTEX_STRIDE) as i32,
            Gl::DYNAMIC_DRAW,
        );
        let stride = SCENE_VERTEX_STRIDE as i32;
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 3, Gl::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_with_i32(1, 4, Gl::FLOAT, false, stride, 12);
        gl.bind_vertex_array(None);

        gl.enable(Gl::DEPTH_TEST);
        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);

        Ok(Self {
            gl,
            program,
            vao,
            vbo,
            u_view_proj,
            capacity: INITIAL_VERTEX_CAPACITY,
            count: 0,
        })
    }

    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    /// Replace the vertex data drawn by [`Renderer::draw`].
    pub fn upload(&mut self, vertices: &[SceneVertex]) {
        let gl = &self.gl;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.vbo));
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        if vertices.len() > self.capacity {
            self.capacity = vertices.len().next_power_of_two();
            log::debug!("[gl] growing vertex buffer to {}", self.capacity);
            gl.buffer_data_with_i32(
                Gl::ARRAY_BUFFER,
                (self.capacity * SCENE_VERTEX_STRIDE) as i32,
                Gl::DYNAMIC_DRAW,
            );
        }
        gl.buffer_sub_data_with_i32_and_u8_array(Gl::ARRAY_BUFFER, 0, bytes);
        self.count = vertices.len() as i32;
    }

    /// Bind `framebuffer` (None = canvas) and clear it to the sky colour.
    pub fn begin(&self, framebuffer: Option<&web::WebGlFramebuffer>, width: i32, height: i32) {
        let gl = &self.gl;
        gl.bind_framebuffer(Gl::FRAMEBUFFER, framebuffer);
        gl.viewport(0, 0, width, height);
        let [r, g, b, a] = SKY_COLOR;
        gl.clear_color(r, g, b, a);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    pub fn draw(&self, viewport: Viewport, view_proj: Mat4) {
        let gl = &self.gl;
        gl.viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        gl.use_program(Some(&self.program));
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.u_view_proj),
            false,
            &view_proj.to_cols_array(),
        );
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(Gl::TRIANGLES, 0, self.count);
        gl.bind_vertex_array(None);
    }
}
