use std::rc::Rc;

use math::vec::{Vec2, Vec3};
use thiserror::Error;

pub mod camera;
pub mod lighting;

pub use camera::*;
pub use lighting::*;

/// Topology of one index batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Strip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub primitive: Primitive,
    pub indices: Vec<u32>,
}

/// A joint of a skinned mesh. `children` index into the owning mesh's
/// `bones`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub offset: Vec3,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub groups: Vec<Group>,

    /// Set for meshes read from a skinned file, even one with no bones.
    pub has_bones: bool,
    /// Per vertex, the bone that last claimed it. Empty for unskinned meshes.
    pub vertex_bones: Vec<Option<usize>>,
    pub bones: Vec<Bone>,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    #[error("{positions} positions but {normals} normals")]
    NormalCount { positions: usize, normals: usize },

    #[error("{positions} positions but {uvs} texture coordinates")]
    UvCount { positions: usize, uvs: usize },

    #[error("group {group} references vertex {index} of {count}")]
    IndexOutOfRange { group: usize, index: u32, count: usize },

    #[error("bone {bone} lists child {child} of {count}")]
    ChildOutOfRange { bone: usize, child: usize, count: usize },

    #[error("bone hierarchy loops back to bone {0}")]
    BoneCycle(usize),
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn has_bones(&self) -> bool {
        self.has_bones
    }

    /// A single four-index group is how flat sprite piece sets are authored.
    pub fn is_flat_sprite(&self) -> bool {
        self.groups.len() == 1 && self.groups[0].indices.len() == 4
    }

    /// Bones no other bone lists as a child.
    pub fn root_bones(&self) -> Vec<usize> {
        let mut has_parent = vec![false; self.bones.len()];
        for b in &self.bones {
            for &c in &b.children {
                if let Some(p) = has_parent.get_mut(c) {
                    *p = true;
                }
            }
        }
        (0..self.bones.len()).filter(|&i| !has_parent[i]).collect()
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.positions.len();
        if self.normals.len() != count {
            return Err(MeshError::NormalCount { positions: count, normals: self.normals.len() });
        }
        if self.uvs.len() != count {
            return Err(MeshError::UvCount { positions: count, uvs: self.uvs.len() });
        }

        for (g, group) in self.groups.iter().enumerate() {
            if let Some(&index) = group.indices.iter().find(|&&i| i as usize >= count) {
                return Err(MeshError::IndexOutOfRange { group: g, index, count });
            }
        }

        for (b, bone) in self.bones.iter().enumerate() {
            if let Some(&child) = bone.children.iter().find(|&&c| c >= self.bones.len()) {
                return Err(MeshError::ChildOutOfRange { bone: b, child, count: self.bones.len() });
            }
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), MeshError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Open,
            Done,
        }

        let mut marks = vec![Mark::New; self.bones.len()];
        for start in 0..self.bones.len() {
            if marks[start] != Mark::New {
                continue;
            }

            // (bone, next child to visit)
            let mut stack = vec![(start, 0usize)];
            marks[start] = Mark::Open;

            while let Some(top) = stack.last_mut() {
                let (bone, next) = *top;
                match self.bones[bone].children.get(next) {
                    Some(&child) => {
                        top.1 += 1;
                        match marks[child] {
                            Mark::Open => return Err(MeshError::BoneCycle(child)),
                            Mark::New => {
                                marks[child] = Mark::Open;
                                stack.push((child, 0));
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[bone] = Mark::Done;
                        stack.pop();
                    }
                }
            }
        }
        Ok(())
    }
}

/// Decoded RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Opaque identifier handed out by whichever backend owns the GPU copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    /// Fraction of the allocated texture the image covers (u2, v2), for
    /// backends that pad to power-of-two sizes.
    pub wrap_scale: Vec2,
}

/// One renderable: a cached mesh drawn with a cached texture.
#[derive(Debug, Clone)]
pub struct Model {
    pub mesh: Rc<Mesh>,
    pub texture: Rc<Texture>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh {
            positions: vec![Vec3::ZERO; 3],
            normals: vec![Vec3::new(0., 0., 1.); 3],
            uvs: vec![Vec2::ZERO; 3],
            groups: vec![Group { primitive: Primitive::Triangles, indices: vec![0, 1, 2] }],
            ..Default::default()
        }
    }

    fn bone(children: Vec<usize>) -> Bone {
        Bone { name: String::from("b"), offset: Vec3::ZERO, children }
    }

    #[test]
    fn valid_mesh_passes() {
        assert_eq!(triangle().validate(), Ok(()));
        assert!(!triangle().has_bones());
        assert!(!triangle().is_flat_sprite());
    }

    #[test]
    fn index_past_vertex_count_is_rejected() {
        let mut m = triangle();
        m.groups[0].indices[2] = 3;
        assert_eq!(m.validate(), Err(MeshError::IndexOutOfRange { group: 0, index: 3, count: 3 }));
    }

    #[test]
    fn mismatched_normals_are_rejected() {
        let mut m = triangle();
        m.normals.pop();
        assert!(matches!(m.validate(), Err(MeshError::NormalCount { .. })));
    }

    #[test]
    fn bone_tree_roots() {
        let mut m = triangle();
        m.bones = vec![bone(vec![1, 2]), bone(vec![]), bone(vec![3]), bone(vec![])];
        assert_eq!(m.validate(), Ok(()));
        assert_eq!(m.root_bones(), vec![0]);
    }

    #[test]
    fn shared_child_is_not_a_cycle() {
        let mut m = triangle();
        m.bones = vec![bone(vec![2]), bone(vec![2]), bone(vec![])];
        assert_eq!(m.validate(), Ok(()));
    }

    #[test]
    fn bone_cycle_is_rejected() {
        let mut m = triangle();
        m.bones = vec![bone(vec![1]), bone(vec![2]), bone(vec![0])];
        assert_eq!(m.validate(), Err(MeshError::BoneCycle(0)));

        m.bones = vec![bone(vec![0])];
        assert_eq!(m.validate(), Err(MeshError::BoneCycle(0)));
    }

    #[test]
    fn child_out_of_range_is_rejected() {
        let mut m = triangle();
        m.bones = vec![bone(vec![5])];
        assert_eq!(m.validate(), Err(MeshError::ChildOutOfRange { bone: 0, child: 5, count: 1 }));
    }
}
