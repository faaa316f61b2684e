use std::ffi::OsString;
use std::path::Path;

use phosphor_uikit::config::Renderer;
use phosphor_uikit::render::CommandRasterizer;

fn strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.into_string().unwrap())
        .collect()
}

#[test]
fn rsvg_command_line() {
    let rasterizer = CommandRasterizer::new(Renderer::Rsvg);
    assert_eq!(rasterizer.program(), "rsvg-convert");
    assert_eq!(
        strings(rasterizer.args(Path::new("in/person.svg"), 88, Path::new("out/p@2x.png"))),
        vec![
            "--keep-aspect-ratio",
            "--width",
            "88",
            "--height",
            "88",
            "--output",
            "out/p@2x.png",
            "in/person.svg",
        ]
    );
}

#[test]
fn inkscape_command_line() {
    let rasterizer = CommandRasterizer::new(Renderer::Inkscape);
    assert_eq!(rasterizer.program(), "inkscape");
    assert_eq!(
        strings(rasterizer.args(Path::new("in/person.svg"), 132, Path::new("out/p@3x.png"))),
        vec![
            "--export-type=png",
            "--export-width=132",
            "--export-filename=out/p@3x.png",
            "in/person.svg",
        ]
    );
}
