use clef_shift::config::{parse_cli, usage, CliCommand, RuntimeConfig};
use clef_shift::document::{output_path, DocumentConverter, PdfWriter, PopplerRasterizer};
use clef_shift::image::io::write_json_file;
use clef_shift::ClefShifter;
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
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "clef_shift".to_string());
    let (inputs, config) = match parse_cli(args) {
        Ok(CliCommand::Help) => {
            println!("{}", usage(&program));
            return Ok(());
        }
        Ok(CliCommand::Run { inputs, config }) => (inputs, config),
        Err(err) => return Err(format!("{err}\n\n{}", usage(&program))),
    };

    let shifter = ClefShifter::new(config.params.clone()).map_err(|e| e.to_string())?;
    let converter = DocumentConverter::new(
        shifter,
        PopplerRasterizer::new(config.dpi),
        PdfWriter::new(config.dpi),
    );

    for input in &inputs {
        convert_one(&converter, &config, input)?;
    }
    Ok(())
}

fn convert_one(
    converter: &DocumentConverter<PopplerRasterizer, PdfWriter>,
    config: &RuntimeConfig,
    input: &Path,
) -> Result<(), String> {
    let output = output_path(input, config.params.direction);
    let report = converter
        .convert_file(input, &output)
        .map_err(|e| format!("{}: {e}", input.display()))?;
    println!(
        "{} -> {} ({} pages, {} staves)",
        input.display(),
        output.display(),
        report.pages.len(),
        report.staff_count()
    );

    if let Some(dir) = &config.report_dir {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let path = dir.join(format!("{stem}.json"));
        write_json_file(&path, &report)?;
        println!("  report written to {}", path.display());
    }
    Ok(())
}
