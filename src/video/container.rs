//! Container video files through OpenCV's `videoio`.
use super::{FrameSink, FrameSource};
use crate::error::{LaneError, Result};
use crate::image::{ImageView, RgbFrame};
use log::info;
use opencv::{
    core::{self, Mat},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, VideoWriter},
};
use std::path::{Path, PathBuf};

const DEFAULT_FPS: f64 = 25.0;

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| LaneError::Video(format!("non UTF-8 path {}", path.display())))
}

pub struct VideoFileSource {
    cap: VideoCapture,
    fps: f64,
    total_frames: usize,
}

impl VideoFileSource {
    pub fn open(path: &Path) -> Result<Self> {
        let cap = VideoCapture::from_file(path_str(path)?, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(LaneError::Video(format!(
                "failed to open video {}",
                path.display()
            )));
        }
        let fps = cap.get(videoio::CAP_PROP_FPS)?;
        let total_frames = cap.get(videoio::CAP_PROP_FRAME_COUNT)?.max(0.0) as usize;
        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)?;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)?;
        info!(
            "video {}: {}x{} @ {:.1} fps, {} frames",
            path.display(),
            width,
            height,
            fps,
            total_frames
        );
        Ok(Self {
            cap,
            fps,
            total_frames,
        })
    }
}

impl FrameSource for VideoFileSource {
    fn next_frame(&mut self) -> Result<Option<RgbFrame>> {
        let mut bgr = Mat::default();
        if !self.cap.read(&mut bgr)? || bgr.empty() {
            return Ok(None);
        }
        let mut rgb = Mat::default();
        imgproc::cvt_color(&bgr, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
        let (w, h) = (rgb.cols() as usize, rgb.rows() as usize);
        RgbFrame::from_raw(w, h, rgb.data_bytes()?.to_vec()).map(Some)
    }

    fn fps(&self) -> Option<f64> {
        (self.fps > 0.0).then_some(self.fps)
    }

    fn frame_count_hint(&self) -> Option<usize> {
        (self.total_frames > 0).then_some(self.total_frames)
    }
}

/// Writes an mp4v stream. The writer is opened on the first frame, once the
/// frame size is known.
pub struct VideoFileSink {
    path: PathBuf,
    fps: f64,
    writer: Option<VideoWriter>,
    size: (usize, usize),
}

impl VideoFileSink {
    pub fn create(path: &Path, fps: Option<f64>) -> Self {
        Self {
            path: path.to_path_buf(),
            fps: fps.filter(|f| *f > 0.0).unwrap_or(DEFAULT_FPS),
            writer: None,
            size: (0, 0),
        }
    }

    fn writer_for(&mut self, w: usize, h: usize) -> Result<&mut VideoWriter> {
        if self.writer.is_none() {
            crate::image::io::ensure_parent_dir(&self.path)?;
            let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
            let writer = VideoWriter::new(
                path_str(&self.path)?,
                fourcc,
                self.fps,
                core::Size::new(w as i32, h as i32),
                true,
            )?;
            if !writer.is_opened()? {
                return Err(LaneError::Video(format!(
                    "failed to open writer for {}",
                    self.path.display()
                )));
            }
            info!("writing {} @ {:.1} fps", self.path.display(), self.fps);
            self.size = (w, h);
            self.writer = Some(writer);
        }
        if self.size != (w, h) {
            return Err(LaneError::ShapeMismatch {
                left: (self.size.0, self.size.1, 3),
                right: (w, h, 3),
            });
        }
        self.writer
            .as_mut()
            .ok_or_else(|| LaneError::Video("writer not initialised".to_string()))
    }
}

impl FrameSink for VideoFileSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<()> {
        let (w, h) = (frame.width(), frame.height());
        let mut rgb =
            Mat::new_rows_cols_with_default(h as i32, w as i32, core::CV_8UC3, core::Scalar::all(0.0))?;
        rgb.data_bytes_mut()?.copy_from_slice(frame.as_bytes());
        let mut bgr = Mat::default();
        imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
        self.writer_for(w, h)?.write(&bgr)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.release()?;
        }
        Ok(())
    }
}
