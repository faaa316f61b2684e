use std::ffi::OsString;
use std::path::Path;

use anyhow::Result;
use tokio::process::Command;

use crate::config::Renderer;
use crate::error::Error;

/// Turns an SVG into a square PNG `pixels` wide, keeping the aspect ratio.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    async fn rasterize(&self, source: &Path, pixels: u64, dest: &Path) -> Result<()>;
}

/// Shells out to `rsvg-convert` or `inkscape`.
pub struct CommandRasterizer {
    renderer: Renderer,
}

impl CommandRasterizer {
    pub fn new(renderer: Renderer) -> Self {
        Self { renderer }
    }

    pub fn program(&self) -> &'static str {
        match self.renderer {
            Renderer::Rsvg => "rsvg-convert",
            Renderer::Inkscape => "inkscape",
        }
    }

    pub fn args(&self, source: &Path, pixels: u64, dest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self.renderer {
            Renderer::Rsvg => vec![
                "--keep-aspect-ratio".into(),
                "--width".into(),
                pixels.to_string().into(),
                "--height".into(),
                pixels.to_string().into(),
                "--output".into(),
                dest.into(),
            ],
            Renderer::Inkscape => {
                let mut filename = OsString::from("--export-filename=");
                filename.push(dest);
                vec![
                    "--export-type=png".into(),
                    format!("--export-width={}", pixels).into(),
                    filename,
                ]
            }
        };
        args.push(source.into());
        args
    }
}

impl Rasterizer for CommandRasterizer {
    async fn rasterize(&self, source: &Path, pixels: u64, dest: &Path) -> Result<()> {
        let program = self.program();
        let output = Command::new(program)
            .args(self.args(source, pixels, dest))
            .output()
            .await
            .map_err(|e| Error::Rasterization {
                program,
                dest: dest.to_path_buf(),
                reason: format!("could not start: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Rasterization {
                program,
                dest: dest.to_path_buf(),
                reason: format!("{} {}", output.status, stderr.trim()),
            }
            .into());
        }

        Ok(())
    }
}
