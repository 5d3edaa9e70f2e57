use std::path::PathBuf;

use clap::ValueHint;
use sixfold::{CellAnchor, FirstSample, MeanSample, Normalization, RangePolicy, SampleReduce};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// How positions are scaled onto the grid.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum NormalizationArg {
    /// Divide every axis by the largest extent of the mesh
    #[default]
    Global,
    /// Stretch each axis over the whole grid
    PerAxis,
}

impl From<NormalizationArg> for Normalization {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::Global => Normalization::GlobalSpan,
            NormalizationArg::PerAxis => Normalization::PerAxis,
        }
    }
}

/// What to do with vertices that fall outside of the grid.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum RangePolicyArg {
    /// Move them into the nearest cell
    #[default]
    Clamp,
    /// Fail
    Reject,
    /// Keep them where they are
    PassThrough,
}

impl From<RangePolicyArg> for RangePolicy {
    fn from(arg: RangePolicyArg) -> Self {
        match arg {
            RangePolicyArg::Clamp => RangePolicy::Clamp,
            RangePolicyArg::Reject => RangePolicy::Reject,
            RangePolicyArg::PassThrough => RangePolicy::PassThrough,
        }
    }
}

/// How the vertices landing in one cell are merged.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum MergeArg {
    /// Keep the first vertex
    #[default]
    First,
    /// Average all of them
    Mean,
}

impl MergeArg {
    pub fn reducer(self) -> Box<dyn SampleReduce<f32>> {
        match self {
            MergeArg::First => Box::new(FirstSample),
            MergeArg::Mean => Box::new(MeanSample),
        }
    }
}

/// Where each cube sits relative to its cell.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum AnchorArg {
    /// Centered on the cell's minimum corner
    #[default]
    Centered,
    /// Filling the cell
    Corner,
}

impl From<AnchorArg> for CellAnchor {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Centered => CellAnchor::Centered,
            AnchorArg::Corner => CellAnchor::Corner,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,sixfold=info,hedron=info,voxelize=info",
        env = "VOXELIZE_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Number of voxels along each axis
    #[arg(short, long, default_value_t = 1, env = "VOXELIZE_RESOLUTION")]
    pub resolution: u32,
    /// Where to write the cube mesh. Defaults to `<input>Vox.obj`, next to the input
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t)]
    pub normalization: NormalizationArg,
    #[arg(long, value_enum, default_value_t)]
    pub range_policy: RangePolicyArg,
    #[arg(short, long, value_enum, default_value_t)]
    pub merge: MergeArg,
    #[arg(short, long, value_enum, default_value_t)]
    pub anchor: AnchorArg,
    /// Write each vertex's color after its position
    #[arg(long)]
    pub vertex_colors: bool,
    /// OBJ file to voxelize
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,
}

impl Cli {
    /// The output path, defaulting to a sibling of the input.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(out) => out.clone(),
            None => {
                let stem = self
                    .input
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.input.with_file_name(format!("{stem}Vox.obj"))
            }
        }
    }
}

/// Set up pretty log output
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
