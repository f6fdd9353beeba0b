// Example runner: finds blobs in an already-filtered image file and logs them.
//
// Usage: blob_vision <image_path> [min_width] [min_height]

use blob_vision::Image;
use blob_vision::pipeline::{PipelineConfig, VisionPipeline};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> blob_vision::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: blob_vision <image_path> [min_width] [min_height]");
        return Ok(());
    }

    let config = PipelineConfig {
        min_blob_width: parse_size(args.get(2), "min_width")?,
        min_blob_height: parse_size(args.get(3), "min_height")?,
        worker_count: 1,
    };
    let mut pipeline = VisionPipeline::new(config)?;

    let frame = image::open(&args[1])?.to_rgba8();
    let image = Image::from_rgba_image(&frame)?;
    tracing::info!(path = %args[1], width = image.width(), height = image.height(), "loaded frame");

    let analysis = pipeline.process_frame(&image)?;
    tracing::info!(count = analysis.blobs.len(), "blob scan finished");
    for (i, blob) in analysis.blobs.iter().enumerate() {
        let center = blob.mid_point();
        println!(
            "blob {i}: ({}, {}) -> ({}, {})  {}x{}  center ({}, {})",
            blob.left(),
            blob.top(),
            blob.right(),
            blob.bottom(),
            blob.width(),
            blob.height(),
            center.x,
            center.y
        );
    }

    Ok(())
}

fn parse_size(arg: Option<&String>, name: &str) -> blob_vision::Result<i32> {
    match arg {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| {
            blob_vision::BlobError::InvalidConfiguration(format!("{name} must be an integer, got {value:?}"))
        }),
    }
}
