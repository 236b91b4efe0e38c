use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use panelkit::cli::exec_mode;
use panelkit::{
    parse_clip, Cli, Commands, ContainRequest, ImageProcessor, LetterboxRequest, ProcessConfig,
    SliceRequest, VideoConfig, VideoRequest, WidthScaleRequest,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let mut config = ProcessConfig {
        jpeg_quality: cli.quality,
        ..Default::default()
    };

    match cli.command {
        Commands::Slice {
            input,
            output_dir,
            max_height,
            min_height,
            aspect_ratio,
            format,
            keep_partial,
        } => {
            let processor = build_processor(config)?;
            let request = SliceRequest {
                source: input,
                output_dir,
                max_height,
                min_height,
                aspect_ratio,
                format: format.into(),
            };

            match processor.slice(&request) {
                Ok(written) => {
                    println!(
                        "Wrote {} segment(s) to: {}",
                        written.len(),
                        request.output_dir.display()
                    );
                }
                Err(failure) => {
                    if !keep_partial {
                        failure
                            .cleanup()
                            .context("Failed to remove partial segments")?;
                    }
                    return Err(failure)
                        .with_context(|| format!("Slicing {} failed", request.source.display()));
                }
            }
        }
        Commands::Downscale {
            input,
            output,
            width,
            algorithm,
        } => {
            let request = WidthScaleRequest {
                source: input,
                output,
                width,
                filter: algorithm.into(),
            };
            build_processor(config)?
                .scale_down_by_width(&request)
                .with_context(|| format!("Downscaling {} failed", request.source.display()))?;

            if request.output.exists() {
                println!("Downscaled image saved to: {}", request.output.display());
            } else {
                println!("Image is already within {}px; nothing written", width);
            }
        }
        Commands::Fit {
            input,
            output,
            max_width,
            max_height,
            algorithm,
        } => {
            let request = ContainRequest {
                source: input,
                output,
                max_width,
                max_height,
                filter: algorithm.into(),
            };
            build_processor(config)?
                .scale_by_resolution(&request)
                .with_context(|| format!("Resizing {} failed", request.source.display()))?;
            println!("Resized image saved to: {}", request.output.display());
        }
        Commands::Letterbox {
            input,
            output,
            width,
            height,
            color,
        } => {
            let request = LetterboxRequest {
                source: input,
                output,
                width,
                height,
                color,
            };
            build_processor(config)?
                .scale_up_and_fill(&request)
                .with_context(|| format!("Letterboxing {} failed", request.source.display()))?;
            println!("Letterboxed image saved to: {}", request.output.display());
        }
        Commands::Convert { input, output } => {
            build_processor(config)?
                .convert(&input, &output)
                .with_context(|| format!("Converting {} failed", input.display()))?;
            println!("Converted image saved to: {}", output.display());
        }
        Commands::Video {
            clips,
            output,
            ffmpeg,
            codec,
            pixel_format,
            no_shell,
        } => {
            config.video = VideoConfig {
                program: ffmpeg,
                codec,
                pixel_format,
                mode: exec_mode(no_shell),
                ..Default::default()
            };
            let clips = clips
                .iter()
                .map(|spec| parse_clip(spec))
                .collect::<panelkit::Result<Vec<_>>>()?;
            let request = VideoRequest { clips, output };

            let mut stdout = std::io::stdout();
            build_processor(config)?
                .compose_video(&request, &mut stdout)
                .context("Video encoding failed")?;
            println!("Video saved to: {}", request.output.display());
        }
    }

    Ok(())
}

fn build_processor(config: ProcessConfig) -> Result<ImageProcessor> {
    config.validate().context("Invalid configuration")?;
    Ok(ImageProcessor::new(config))
}
