//! End-to-end helpers over `image::RgbImage`.

use backplane_core::{RgbImage, RgbImageView};
use backplane_detect::{BackplaneDetection, BackplaneDetector};
use backplane_grid::{GridScanner, ScanError, ScheduleMatrix};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{PipelineConfig, PipelineError};

/// Borrow an `image::RgbImage` as a core view.
pub fn rgb_view(img: &::image::RgbImage) -> RgbImageView<'_> {
    RgbImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert a core image into an `image::RgbImage`.
pub fn to_image_rgb(img: &RgbImage) -> Option<::image::RgbImage> {
    ::image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}

/// Decode any supported image file into RGB8.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<::image::RgbImage, PipelineError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| PipelineError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Detection plus grid readout of one photograph.
#[derive(Clone, Debug)]
pub struct ScheduleReading {
    pub detection: BackplaneDetection,
    pub matrix: ScheduleMatrix,
}

/// Locate, rectify and scan backplanes with a fixed configuration.
#[derive(Clone, Debug)]
pub struct ScheduleReader {
    detector: BackplaneDetector,
    scanner: GridScanner,
}

impl ScheduleReader {
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ScanError> {
        Ok(Self {
            detector: BackplaneDetector::new(config.detect.clone()),
            scanner: GridScanner::new(config.grid, config.classifier.clone())?,
        })
    }

    pub fn detector(&self) -> &BackplaneDetector {
        &self.detector
    }

    pub fn scanner(&self) -> &GridScanner {
        &self.scanner
    }

    /// Locate and rectify the backplane only.
    pub fn rectify(&self, img: &::image::RgbImage) -> Result<BackplaneDetection, PipelineError> {
        Ok(self.detector.detect(&rgb_view(img))?)
    }

    /// Scan an image that is already rectified.
    pub fn scan_rectified(
        &self,
        img: &RgbImageView<'_>,
    ) -> Result<ScheduleMatrix, PipelineError> {
        Ok(self.scanner.scan(img)?)
    }

    /// Full pipeline: mask, polygon, anchors, warp, grid scan.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip_all, fields(w = img.width(), h = img.height()))
    )]
    pub fn read_image(&self, img: &::image::RgbImage) -> Result<ScheduleReading, PipelineError> {
        let detection = self.rectify(img)?;
        let matrix = self.scan_rectified(&detection.rectified.image.view())?;
        Ok(ScheduleReading { detection, matrix })
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<ScheduleReading, PipelineError> {
        self.read_image(&load_rgb(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backplane_detect::DetectError;

    #[test]
    fn view_matches_image_layout() {
        let mut img = ::image::RgbImage::new(3, 2);
        img.put_pixel(2, 1, ::image::Rgb([1, 2, 3]));
        let view = rgb_view(&img);
        assert_eq!((view.width, view.height), (3, 2));
        assert_eq!(view.pixel(2, 1), [1, 2, 3]);

        let mut core = RgbImage::new(3, 2);
        core.put_pixel(0, 1, [9, 8, 7]);
        let back = to_image_rgb(&core).unwrap();
        assert_eq!(back.get_pixel(0, 1).0, [9, 8, 7]);
    }

    #[test]
    fn blank_photo_fails_detection() {
        let reader = ScheduleReader::from_config(&PipelineConfig::default()).unwrap();
        let img = ::image::RgbImage::from_pixel(40, 40, ::image::Rgb([90, 90, 90]));
        let err = reader.read_image(&img).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Detect(DetectError::NoBackplaneDetected)
        ));
        assert_eq!(err.kind(), "no_backplane_detected");
    }

    #[test]
    fn missing_file_is_image_load_failure() {
        let err = load_rgb("/definitely/not/here.png").unwrap_err();
        assert_eq!(err.kind(), "image_load_failure");
    }
}
