//! Sequential batch processing with per-image failure isolation.

use backplane_core::RgbImage;
use backplane_grid::ScheduleMatrix;
use image::error::{ParameterError, ParameterErrorKind};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    load_rgb, rgb_view, to_image_rgb, ArtifactNaming, BatchReport, ImageReport, ImageStatus,
    PipelineError, ScheduleReader,
};

/// Which stages of the pipeline a batch runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchMode {
    /// Detect, rectify and scan.
    Read,
    /// Detect and rectify only.
    Rectify,
    /// Scan inputs that are already rectified.
    Scan,
}

#[derive(Clone, Debug)]
pub struct BatchOptions {
    pub mode: BatchMode,
    /// Directory for rectified images; `None` disables writing them.
    pub out_dir: Option<PathBuf>,
    pub naming: ArtifactNaming,
}

impl BatchOptions {
    pub fn new(mode: BatchMode) -> Self {
        Self {
            mode,
            out_dir: None,
            naming: ArtifactNaming::default(),
        }
    }
}

/// Process `paths` in order, writing each matrix to `out`.
///
/// For every image that yields a matrix, `out` receives the input path, one
/// line per grid row and a blank line. A failing image is logged and
/// recorded in the report; the batch continues. Only errors writing to
/// `out` abort the run.
pub fn run_batch<W: Write>(
    reader: &ScheduleReader,
    paths: &[PathBuf],
    options: &BatchOptions,
    out: &mut W,
) -> io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for (i, path) in paths.iter().enumerate() {
        let index = i + 1;
        let mut entry = ImageReport::new(path.display().to_string(), index);

        match process_one(reader, path, index, options, &mut entry) {
            Ok(Some(matrix)) => {
                writeln!(out, "{}", path.display())?;
                write!(out, "{matrix}")?;
                writeln!(out)?;
                entry.matrix = Some(matrix.row_strings());
            }
            Ok(None) => {}
            Err(err) => {
                match err.cell() {
                    Some((row, col)) => log::error!(
                        "{} [{}] at cell ({row}, {col}): {err}",
                        path.display(),
                        err.kind()
                    ),
                    None => log::error!("{} [{}]: {err}", path.display(), err.kind()),
                }
                entry.status = ImageStatus::Failed;
                entry.error = Some(err.to_string());
                entry.error_kind = Some(err.kind().to_string());
            }
        }
        report.images.push(entry);
    }

    log::info!(
        "processed {} images: {} ok, {} failed",
        report.images.len(),
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

fn process_one(
    reader: &ScheduleReader,
    path: &Path,
    index: usize,
    options: &BatchOptions,
    entry: &mut ImageReport,
) -> Result<Option<ScheduleMatrix>, PipelineError> {
    let img = load_rgb(path)?;
    log::debug!("{}: {}x{}", path.display(), img.width(), img.height());

    if options.mode == BatchMode::Scan {
        return reader.scan_rectified(&rgb_view(&img)).map(Some);
    }

    let detection = reader.rectify(&img)?;
    let rectified = &detection.rectified.image;
    entry.polygon = Some(
        detection
            .polygon
            .vertices
            .iter()
            .map(|p| [p.x, p.y])
            .collect(),
    );
    entry.anchors = Some(detection.anchors);
    entry.rectified_size = Some([rectified.width, rectified.height]);

    if let Some(dir) = &options.out_dir {
        let artifact = options.naming.path_in(dir, index);
        write_artifact(rectified, &artifact)?;
        log::info!("{} -> {}", path.display(), artifact.display());
        entry.artifact = Some(artifact.display().to_string());
    }

    match options.mode {
        BatchMode::Rectify => Ok(None),
        _ => reader.scan_rectified(&rectified.view()).map(Some),
    }
}

fn write_artifact(img: &RgbImage, path: &Path) -> Result<(), PipelineError> {
    let write_err = |source: image::ImageError| PipelineError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| write_err(e.into()))?;
    }
    let buf = to_image_rgb(img).ok_or_else(|| {
        write_err(image::ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        )))
    })?;
    buf.save(path).map_err(write_err)
}
