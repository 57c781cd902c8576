use lane_finder::image::io::{load_rgb_image, write_json_file};
use lane_finder::{LaneDetector, LaneParams};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let input = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let out_dir = args.next().map(PathBuf::from).ok_or_else(usage)?;

    let frame = load_rgb_image(&input).map_err(|e| e.to_string())?;
    let detector = LaneDetector::new(LaneParams::default()).map_err(|e| e.to_string())?;
    let (lane, stages) = detector
        .process_with_stages(&frame)
        .map_err(|e| e.to_string())?;
    stages
        .save(&lane.output, &out_dir)
        .map_err(|e| e.to_string())?;
    write_json_file(&out_dir.join("report.json"), &lane.report).map_err(|e| e.to_string())?;

    for timing in &lane.report.timings.stages {
        println!("{:<14} {:>8.3} ms", timing.label, timing.elapsed_ms);
    }
    println!(
        "{} edge pixels, {} segments. Stages written to {}",
        lane.report.edge_pixels,
        lane.report.segments.len(),
        out_dir.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: lane_stages <image> <out_dir>".to_string()
}
