//! Geometry for one frame, expressed as backend draw batches.

use math::{
    mat::Mat4,
    vec::{Vec2, Vec3, Vec4},
};
use scene::{Light, Model, Primitive, Texture};

use crate::backend::{DrawBatch, Topology, Vertex};

/// Inset of the playing area inside the board texture.
const BOARD_CENTRE_INSET: f32 = 46.0 / 512.0;

/// Height of the selector quads above the square.
const SELECTOR_HEIGHT: f32 = 0.1;

const UP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// One batch per mesh group. Without a light every vertex gets full
/// intensity. `tex_offset` slides the texture along u after wrap scaling.
pub fn model_batches(
    model: &Model,
    transform: Mat4,
    alpha: f32,
    light: Option<Light>,
    tex_offset: f32,
) -> Vec<DrawBatch> {
    let mesh = &model.mesh;
    let scale = model.texture.wrap_scale;

    mesh.groups
        .iter()
        .map(|group| {
            let vertices = group
                .indices
                .iter()
                .map(|&i| {
                    let i = i as usize;
                    let normal = mesh.normals[i];
                    let level = light.map_or(1.0, |l| l.intensity(normal));
                    let uv = mesh.uvs[i];

                    Vertex {
                        position: mesh.positions[i],
                        normal,
                        uv: Vec2::new(uv.x * scale.x + tex_offset, uv.y * scale.y),
                        colour: Vec4::new(level, level, level, alpha),
                    }
                })
                .collect();

            DrawBatch {
                topology: match group.primitive {
                    Primitive::Triangles => Topology::Triangles,
                    Primitive::Strip => Topology::Strip,
                },
                transform,
                texture: model.texture.handle,
                vertices,
            }
        })
        .collect()
}

/// Corners in fan order with their texture coordinates, counter-clockwise
/// seen from above.
fn quad(corners: [(Vec3, Vec2); 4], colour: Vec4) -> Vec<Vertex> {
    corners
        .iter()
        .map(|&(position, uv)| Vertex { position, normal: UP, uv, colour })
        .collect()
}

/// The playing area of the board texture stretched over the 8x8 squares.
pub fn board_centre(texture: &Texture, transform: Mat4, colour: Vec4) -> DrawBatch {
    let tc = BOARD_CENTRE_INSET;

    DrawBatch {
        topology: Topology::Fan,
        transform,
        texture: texture.handle,
        vertices: quad(
            [
                (Vec3::new(-4.0, -4.0, 0.0), Vec2::new(tc, tc)),
                (Vec3::new(4.0, -4.0, 0.0), Vec2::new(1.0 - tc, tc)),
                (Vec3::new(4.0, 4.0, 0.0), Vec2::new(1.0 - tc, 1.0 - tc)),
                (Vec3::new(-4.0, 4.0, 0.0), Vec2::new(tc, 1.0 - tc)),
            ],
            colour,
        ),
    }
}

/// Black outline quad followed by the fill quad, lifted by `bounce`.
pub fn selector(
    texture: &Texture,
    transform: Mat4,
    half_size: f32,
    bounce: f32,
    colour: Vec4,
) -> [DrawBatch; 2] {
    let w = half_size;
    let h = SELECTOR_HEIGHT;
    let corners = [
        (Vec3::new(-w, -w, h), Vec2::new(0.0, 1.0)),
        (Vec3::new(w, -w, h), Vec2::new(1.0, 1.0)),
        (Vec3::new(w, w, h), Vec2::new(1.0, 0.0)),
        (Vec3::new(-w, w, h), Vec2::new(0.0, 0.0)),
    ];

    let outline = DrawBatch {
        topology: Topology::Fan,
        transform,
        texture: texture.handle,
        vertices: quad(corners, Vec4::new(0.0, 0.0, 0.0, 1.0)),
    };

    let fill = DrawBatch {
        topology: Topology::Fan,
        transform: transform * Mat4::translation(Vec3::new(0.0, 0.0, bounce + 0.01)),
        texture: texture.handle,
        vertices: quad(corners, colour),
    };

    [outline, fill]
}
