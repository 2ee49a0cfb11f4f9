//! DreamChess Model (DCM) text meshes.
//!
//! Two revisions exist in shipped asset directories. Both are whitespace
//! separated text starting with `DCM <version>`:
//!
//! * version 100, static: vertex count, then every position, every normal
//!   and every texture coordinate, then a list of `STRIP`/`TRIANGLES` groups.
//! * version 1, skinned: `VERTICES`, one triangle list under `TRIANGLES`
//!   and a `BONES` hierarchy whose `VERTEXWEIGHTS` bind vertices to bones.
//!
//! The header is read as two tokens, so `DCM100` and a version on the line
//! after `DCM` are accepted as well as `DCM 100`.
//!
//! The image loader keeps rows top to bottom, so the second texture
//! coordinate is stored as `1 - v`.

use std::str::{Lines, SplitWhitespace};

use math::vec::{Vec2, Vec3};
use scene::{Bone, Group, Mesh, MeshError, Primitive};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcmFormat {
    /// Header `DCM 100`.
    Static,
    /// Header `DCM 1`.
    Skinned,
}

impl DcmFormat {
    pub fn version(self) -> i64 {
        match self {
            DcmFormat::Static => 100,
            DcmFormat::Skinned => 1,
        }
    }

    pub fn from_version(version: i64) -> Option<DcmFormat> {
        match version {
            100 => Some(DcmFormat::Static),
            1 => Some(DcmFormat::Skinned),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("line {line}: {field}: {kind}")]
pub struct FileFormatError {
    pub line: usize,
    pub field: &'static str,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormatErrorKind {
    #[error("invalid DCM file header")]
    BadMagic,

    #[error("DCM version {0} not supported")]
    UnsupportedVersion(i64),

    #[error("unexpected end of file")]
    Truncated,

    #[error("expected `{expected}`, found `{found}`")]
    Keyword { expected: &'static str, found: String },

    #[error("malformed value `{0}`")]
    Malformed(String),

    #[error("vertex {index} out of range ({count} vertices)")]
    VertexOutOfRange { index: i64, count: usize },

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

// Counts come from untrusted files; don't let one reserve gigabytes up front.
const MAX_RESERVE: usize = 1 << 16;

/// Whitespace tokenizer that remembers which line each token came from.
struct Tokens<'a> {
    lines: Lines<'a>,
    words: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            words: "".split_whitespace(),
            line: 0,
        }
    }

    fn error(&self, field: &'static str, kind: FormatErrorKind) -> FileFormatError {
        FileFormatError { line: self.line, field, kind }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        loop {
            if let Some(w) = self.words.next() {
                return Some(w);
            }
            self.words = self.lines.next()?.split_whitespace();
            self.line += 1;
        }
    }

    fn token(&mut self, field: &'static str) -> Result<&'a str, FileFormatError> {
        match self.next_token() {
            Some(t) => Ok(t),
            None => Err(self.error(field, FormatErrorKind::Truncated)),
        }
    }

    fn keyword(&mut self, field: &'static str, expected: &'static str) -> Result<(), FileFormatError> {
        let t = self.token(field)?;
        if t != expected {
            return Err(self.error(field, FormatErrorKind::Keyword {
                expected,
                found: t.to_string(),
            }));
        }
        Ok(())
    }

    fn parse<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, FileFormatError> {
        let t = self.token(field)?;
        t.parse()
            .map_err(|_| self.error(field, FormatErrorKind::Malformed(t.to_string())))
    }

    fn float(&mut self, field: &'static str) -> Result<f32, FileFormatError> {
        self.parse(field)
    }

    fn count(&mut self, field: &'static str) -> Result<usize, FileFormatError> {
        self.parse(field)
    }

    fn index(&mut self, field: &'static str) -> Result<u32, FileFormatError> {
        self.parse(field)
    }

    fn vec3(&mut self, field: &'static str) -> Result<Vec3, FileFormatError> {
        Ok(Vec3::new(self.float(field)?, self.float(field)?, self.float(field)?))
    }
}

fn read_header(tokens: &mut Tokens) -> Result<i64, FileFormatError> {
    let magic = tokens
        .token("header")
        .map_err(|_| tokens.error("header", FormatErrorKind::BadMagic))?;

    let rest = magic
        .strip_prefix("DCM")
        .ok_or_else(|| tokens.error("header", FormatErrorKind::BadMagic))?;

    // `DCM100` is accepted as well as `DCM 100`.
    let version = if rest.is_empty() { tokens.token("header")? } else { rest };
    version
        .parse()
        .map_err(|_| tokens.error("header", FormatErrorKind::BadMagic))
}

/// Reads the header only.
pub fn detect_format(text: &str) -> Result<DcmFormat, FileFormatError> {
    let mut tokens = Tokens::new(text);
    let version = read_header(&mut tokens)?;
    DcmFormat::from_version(version)
        .ok_or_else(|| tokens.error("header", FormatErrorKind::UnsupportedVersion(version)))
}

/// Parses a mesh that must be in `format`. Nothing is returned unless the
/// whole file parsed and the result passed [`Mesh::validate`].
pub fn parse(text: &str, format: DcmFormat) -> Result<Mesh, FileFormatError> {
    let mut tokens = Tokens::new(text);
    let version = read_header(&mut tokens)?;
    if version != format.version() {
        return Err(tokens.error("header", FormatErrorKind::UnsupportedVersion(version)));
    }

    let mesh = match format {
        DcmFormat::Static => parse_static(&mut tokens)?,
        DcmFormat::Skinned => parse_skinned(&mut tokens)?,
    };

    mesh.validate().map_err(|e| tokens.error("mesh", e.into()))?;
    Ok(mesh)
}

/// Parses either revision, picking by header.
pub fn parse_any(text: &str) -> Result<Mesh, FileFormatError> {
    parse(text, detect_format(text)?)
}

fn parse_static(tokens: &mut Tokens) -> Result<Mesh, FileFormatError> {
    let vertices = tokens.count("vertex count")?;
    let reserve = vertices.min(MAX_RESERVE);

    let mut positions = Vec::with_capacity(reserve);
    for _ in 0..vertices {
        positions.push(tokens.vec3("vertex position")?);
    }

    let mut normals = Vec::with_capacity(reserve);
    for _ in 0..vertices {
        normals.push(tokens.vec3("vertex normal")?);
    }

    let mut uvs = Vec::with_capacity(reserve);
    for _ in 0..vertices {
        let u = tokens.float("texture coordinate")?;
        let v = tokens.float("texture coordinate")?;
        uvs.push(Vec2::new(u, 1.0 - v));
    }

    let group_count = tokens.count("group count")?;
    let mut groups = Vec::with_capacity(group_count.min(MAX_RESERVE));
    for _ in 0..group_count {
        let primitive = match tokens.token("group type")? {
            "STRIP" => Primitive::Strip,
            "TRIANGLES" => Primitive::Triangles,
            other => {
                return Err(tokens.error("group type", FormatErrorKind::Keyword {
                    expected: "STRIP or TRIANGLES",
                    found: other.to_string(),
                }))
            }
        };

        let len = tokens.count("group length")?;
        let mut indices = Vec::with_capacity(len.min(MAX_RESERVE));
        for _ in 0..len {
            indices.push(tokens.index("group index")?);
        }

        groups.push(Group { primitive, indices });
    }

    Ok(Mesh {
        has_bones: false,
        positions,
        normals,
        uvs,
        groups,
        vertex_bones: Vec::new(),
        bones: Vec::new(),
    })
}

fn parse_skinned(tokens: &mut Tokens) -> Result<Mesh, FileFormatError> {
    tokens.keyword("vertex count", "VERTICES")?;
    let vertices = tokens.count("vertex count")?;
    let reserve = vertices.min(MAX_RESERVE);

    let mut positions = Vec::with_capacity(reserve);
    let mut normals = Vec::with_capacity(reserve);
    for _ in 0..vertices {
        positions.push(tokens.vec3("vertex position")?);
        normals.push(tokens.vec3("vertex normal")?);
    }

    // Skinned files carry no texture coordinates; they get the flipped zero.
    let uvs = vec![Vec2::new(0.0, 1.0); vertices];

    tokens.keyword("triangle count", "TRIANGLES")?;
    let triangles = tokens.count("triangle count")?;
    let mut indices = Vec::with_capacity(triangles.saturating_mul(3).min(MAX_RESERVE));
    for _ in 0..triangles {
        for _ in 0..3 {
            indices.push(tokens.index("triangle index")?);
        }
        // Per-corner colour placeholders, unused.
        for _ in 0..6 {
            tokens.float("triangle attribute")?;
        }
    }
    let groups = vec![Group { primitive: Primitive::Triangles, indices }];

    tokens.keyword("bone count", "BONES")?;
    let bone_count = tokens.count("bone count")?;

    let mut vertex_bones = vec![None; vertices];
    let mut bones = Vec::with_capacity(bone_count.min(MAX_RESERVE));
    for b in 0..bone_count {
        tokens.keyword("bone", "BONE")?;
        let name = tokens.token("bone name")?.to_string();
        let offset = tokens.vec3("bone offset")?;

        tokens.keyword("bone children", "CHILDREN")?;
        let child_count = tokens.count("bone children")?;
        let mut children = Vec::with_capacity(child_count.min(MAX_RESERVE));
        for _ in 0..child_count {
            children.push(tokens.count("bone child")?);
        }

        tokens.keyword("vertex weights", "VERTEXWEIGHTS")?;
        let weights = tokens.count("vertex weights")?;
        for _ in 0..weights {
            let vertex: i64 = tokens.parse("weighted vertex")?;
            let _weight = tokens.float("vertex weight")?;

            let slot = usize::try_from(vertex)
                .ok()
                .and_then(|v| vertex_bones.get_mut(v))
                .ok_or_else(|| {
                    tokens.error("weighted vertex", FormatErrorKind::VertexOutOfRange {
                        index: vertex,
                        count: vertices,
                    })
                })?;
            // A vertex listed under several bones belongs to the last one.
            *slot = Some(b);
        }

        bones.push(Bone { name, offset, children });
    }

    Ok(Mesh {
        has_bones: true,
        positions,
        normals,
        uvs,
        groups,
        vertex_bones,
        bones,
    })
}
