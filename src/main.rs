use lane_finder::config::{load_config, ImageJob, RuntimeConfig, VideoJob};
use lane_finder::image::io::{load_rgb_image, save_rgb_image, write_json_file};
use lane_finder::video::{open_sink, open_source};
use lane_finder::{FrameDriver, LaneDetector};
use log::info;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    if config.image.is_none() && config.video.is_none() {
        return Err("config has neither an `image` nor a `video` job".to_string());
    }
    run_jobs(&config).map_err(|e| e.to_string())
}

fn run_jobs(config: &RuntimeConfig) -> lane_finder::Result<()> {
    let detector = LaneDetector::new(config.params.clone())?;
    if let Some(job) = &config.image {
        run_image(&detector, job)?;
    }
    if let Some(job) = &config.video {
        run_video(&detector, job)?;
    }
    Ok(())
}

fn run_image(detector: &LaneDetector, job: &ImageJob) -> lane_finder::Result<()> {
    info!("image job: {}", job.input.display());
    let frame = load_rgb_image(&job.input)?;
    let lane = if job.save_stages {
        let (lane, stages) = detector.process_with_stages(&frame)?;
        stages.save(&lane.output, &job.output_dir)?;
        lane
    } else {
        detector.process(&frame)?
    };

    let stem = job
        .input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("frame");
    let image_path = job.output_dir.join(format!("{stem}_lanes.png"));
    let report_path = job.output_dir.join(format!("{stem}_report.json"));
    save_rgb_image(&lane.output, &image_path)?;
    write_json_file(&report_path, &lane.report)?;

    println!(
        "Found {} segments ({} in region) in {:.2} ms. Saved {}",
        lane.report.segments.len(),
        lane.report.segments_inside().count(),
        lane.report.timings.total_ms,
        image_path.display()
    );
    Ok(())
}

fn run_video(detector: &LaneDetector, job: &VideoJob) -> lane_finder::Result<()> {
    info!(
        "video job: {} -> {}",
        job.input.display(),
        job.output.display()
    );
    let mut source = open_source(&job.input)?;
    let fps = source.fps().or(job.fps);
    let mut sink = open_sink(&job.output, fps)?;
    let summary = FrameDriver::new(detector).run(source.as_mut(), sink.as_mut())?;
    println!(
        "Processed {} frames ({} without segments) at {:.1} fps. Saved {}",
        summary.frames,
        summary.frames_without_segments,
        summary.fps,
        job.output.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: lane_finder <config.json>".to_string()
}
