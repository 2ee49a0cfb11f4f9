#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// One triangle facing up.
pub const PIECE_DCM: &str = "DCM 100
3
-0.3 -0.3 0
0.3 -0.3 0
0 0.3 0.8
0 -1 0
1 0 0
0 0 1
0 0
1 0
0.5 1
1
TRIANGLES
3
0 1 2
";

/// A single sprite quad, which marks a set as 2D.
pub const SPRITE_DCM: &str = "DCM 100
4
-0.5 -0.5 0
0.5 -0.5 0
-0.5 0.5 0
0.5 0.5 0
0 0 1
0 0 1
0 0 1
0 0 1
0 1
1 1
0 0
1 0
1
STRIP
4
0 1 2 3
";

pub const BOARD_DCM: &str = "DCM 100
4
-4.5 -4.5 0
4.5 -4.5 0
4.5 4.5 0
-4.5 4.5 0
0 0 1
0 0 1
0 0 1
0 0 1
0 1
1 1
1 0
0 0
1
TRIANGLES
6
0 1 2
0 2 3
";

pub fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).unwrap();
    }
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba)).save(path).unwrap();
}

/// Writes `pieces/<name>/` with every model sharing one mesh and two
/// textures, one per side.
pub fn write_piece_set(data: &Path, name: &str, mesh: &str) {
    let dir = data.join("pieces").join(name);
    fs::create_dir_all(&dir).unwrap();

    fs::write(dir.join("piece.dcm"), mesh).unwrap();
    write_png(&dir.join("white.png"), 4, 4, [255, 255, 255, 255]);
    write_png(&dir.join("black.png"), 4, 4, [0, 0, 0, 255]);
    write_png(&dir.join("selector.png"), 2, 2, [255, 255, 0, 255]);

    let mut cfg = String::new();
    for i in 0..12 {
        let tex = if i % 2 == 0 { "white.png" } else { "black.png" };
        cfg.push_str(&format!("piece.dcm\n{tex}\n"));
    }
    fs::write(dir.join("set.cfg"), cfg).unwrap();
}

pub fn write_board(data: &Path, name: &str) {
    let dir = data.join("boards").join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("board.dcm"), BOARD_DCM).unwrap();
    write_png(&dir.join("board.png"), 48, 64, [120, 80, 40, 255]);
}

/// Data directory holding the default theme's `classiclow` pieces and
/// `classic` board, plus a `sprites` 2D set.
pub fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_piece_set(dir.path(), "classiclow", PIECE_DCM);
    write_piece_set(dir.path(), "sprites", SPRITE_DCM);
    write_board(dir.path(), "classic");
    dir
}
