use std::path::PathBuf;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use asset::DcmFormat;

/// Print what a DCM mesh contains.
#[derive(Parser, Debug)]
#[command(name = "dcm_info")]
struct Args {
    /// Mesh files to inspect.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut failed = false;

    for path in &args.files {
        let mesh = match asset::load_any_mesh_from_file(path) {
            Ok(mesh) => mesh,
            Err(e) => {
                error!("{e}");
                failed = true;
                continue;
            }
        };

        let kind = if mesh.has_bones() { DcmFormat::Skinned } else { DcmFormat::Static };
        let indices: usize = mesh.groups.iter().map(|g| g.indices.len()).sum();
        let weighted = mesh.vertex_bones.iter().filter(|b| b.is_some()).count();

        println!("{}: {kind:?}", path.display());
        println!("  vertices: {:6}", mesh.vertex_count());
        println!("  groups:   {:6} ({indices} indices)", mesh.groups.len());
        if mesh.has_bones() {
            println!("  bones:    {:6} (roots {:?})", mesh.bones.len(), mesh.root_bones());
            println!("  weighted: {weighted:6}");
        }
        if mesh.is_flat_sprite() {
            println!("  flat sprite");
        }
    }

    if failed {
        std::process::exit(1);
    }
}
