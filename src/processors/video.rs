// panelkit/src/processors/video.rs
use crate::core::{Clip, ExecMode, ImageToolError, Result, VideoConfig, VideoRequest};
use std::io::{self, Write};
use std::process::{Command, Stdio};

/// Turns an ordered list of stills into one video file.
pub trait VideoEncoder: Send + Sync {
    /// Blocks until the encoder has finished. Everything the encoder prints
    /// is forwarded to `sink` as it arrives, stdout and stderr interleaved.
    fn encode(&self, request: &VideoRequest, sink: &mut dyn Write) -> Result<()>;
}

/// Drives an `ffmpeg` process.
///
/// Each clip becomes `-loop 1 -t <secs> -i <path>`, followed by a single
/// `concat` filter over all inputs.
#[derive(Debug, Clone, Default)]
pub struct FfmpegEncoder {
    config: VideoConfig,
}

impl FfmpegEncoder {
    pub fn new(config: VideoConfig) -> Self {
        Self { config }
    }

    /// Arguments after the program name, one element per shell word.
    pub fn args(&self, request: &VideoRequest) -> Vec<String> {
        let mut args = Vec::with_capacity(request.clips.len() * 6 + 12);

        for Clip { path, duration } in &request.clips {
            args.extend([
                "-loop".to_string(),
                "1".to_string(),
                "-t".to_string(),
                format!("{:.2}", duration),
                "-i".to_string(),
                path.display().to_string(),
            ]);
        }

        args.extend([
            "-filter_complex".to_string(),
            concat_filter(request.clips.len()),
            "-map".to_string(),
            "[v]".to_string(),
            "-c:v".to_string(),
            self.config.codec.clone(),
            "-pix_fmt".to_string(),
            self.config.pixel_format.clone(),
            request.output.display().to_string(),
            "-y".to_string(),
        ]);

        args
    }

    /// The full command as handed to the shell. Paths are inserted verbatim.
    pub fn command_line(&self, request: &VideoRequest) -> String {
        let mut line = format!("{} ", self.config.program);
        for Clip { path, duration } in &request.clips {
            line.push_str(&format!("-loop 1 -t {:.2} -i {} ", duration, path.display()));
        }
        line.push_str(&format!(
            "-filter_complex \"{}\" -map \"[v]\" -c:v {} -pix_fmt {} {} -y",
            concat_filter(request.clips.len()),
            self.config.codec,
            self.config.pixel_format,
            request.output.display()
        ));
        line
    }

    fn command(&self, request: &VideoRequest) -> Command {
        match self.config.mode {
            ExecMode::Shell => {
                let mut command = Command::new(&self.config.shell);
                command.arg("-c").arg(self.command_line(request));
                command
            }
            ExecMode::Direct => {
                let mut command = Command::new(&self.config.program);
                command.args(self.args(request));
                command
            }
        }
    }

}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, request: &VideoRequest, sink: &mut dyn Write) -> Result<()> {
        let mut command = self.command(request);
        log::debug!("Running video encoder: {:?}", command);

        // both streams share one pipe so the sink sees them in emission order
        let (mut reader, writer) = io::pipe()?;
        command
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);

        let launched = command.get_program().to_string_lossy().into_owned();
        let spawned = command.spawn();
        // the command holds the parent's write ends; the reader only sees EOF once they are gone
        drop(command);
        let mut child = spawned.map_err(|e| {
            ImageToolError::Subprocess(format!("failed to launch {}: {}", launched, e))
        })?;

        let copied = io::copy(&mut reader, sink).and_then(|_| sink.flush());
        // a failed sink must not leave the child blocked on a full pipe
        drop(reader);
        let status = child.wait()?;
        copied?;

        if !status.success() {
            return Err(ImageToolError::Subprocess(format!(
                "{} exited with {}",
                self.config.program, status
            )));
        }

        log::info!(
            "Encoded {} clip(s) into {}",
            request.clips.len(),
            request.output.display()
        );
        Ok(())
    }
}

fn concat_filter(inputs: usize) -> String {
    format!("concat=n={}:v=1:a=0[v]", inputs)
}
