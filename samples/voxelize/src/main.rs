use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use hedron::{
    de::obj::{load_obj, ObjError},
    ser::obj::{write_obj, ObjWriteOptions},
    TriMesh,
};
use sixfold::{VoxelizeConfig, Voxelizer};

mod cli;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("couldn't load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ObjError,
    },
    #[error(transparent)]
    Voxelize(#[from] sixfold::Error<f32>),
    #[error("couldn't write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write `mesh` next to `path`, then move it into place, so that `path` is never left
/// half-written.
fn persist(mesh: &TriMesh<f32>, path: &Path, opts: ObjWriteOptions) -> Result<(), AppError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let res = (|| -> io::Result<()> {
        let mut out = BufWriter::new(fs::File::create(&tmp)?);
        write_obj(mesh, &mut out, opts)?;
        out.flush()?;
        drop(out);
        fs::rename(&tmp, path)
    })();
    if res.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    res.map_err(|source| AppError::Write {
        path: path.to_owned(),
        source,
    })
}

fn run(cli: &cli::Cli) -> Result<(), AppError> {
    let mesh = load_obj::<f32>(&cli.input).map_err(|source| AppError::Load {
        path: cli.input.clone(),
        source,
    })?;
    tracing::info!(
        path = %cli.input.display(),
        vertices = mesh.positions().len(),
        faces = mesh.face_count(),
        "loaded mesh"
    );

    let config = VoxelizeConfig {
        resolution: cli.resolution,
        normalization: cli.normalization.into(),
        range_policy: cli.range_policy.into(),
        anchor: cli.anchor.into(),
    };
    let cubes = Voxelizer::new(config)
        .with_reducer(cli.merge.reducer())
        .cube_mesh(&mesh)?;

    let output = cli.output_path();
    persist(
        &cubes,
        &output,
        ObjWriteOptions {
            vertex_colors: cli.vertex_colors,
        },
    )?;
    tracing::info!(
        path = %output.display(),
        vertices = cubes.positions().len(),
        faces = cubes.face_count(),
        "wrote cube mesh"
    );
    Ok(())
}

pub fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    cli::initialize_tracing(&cli.log_filter, cli.log_format);
    tracing::debug!("{cli:?}");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
