use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use sensor_pixfmt_rs::logger::{self, info};
use sensor_pixfmt_rs::pixel_pipeline::{
    ColorRange, DecoderConfig, DecoderRegistry, DemosaicMethod, FormatDescriptor, FramePipeline,
    PixelFormatId, RawFrame, RecordCompression, TiffRecorder,
};

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new("sensor-pixfmt")
        .about("Decode raw camera frames into standard images")
        .arg(Arg::new("list-formats")
            .long("list-formats")
            .action(ArgAction::SetTrue)
            .help("List the supported pixel formats and exit"))
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .help("Raw frame to decode")
            .value_parser(value_parser!(PathBuf))
            .required_unless_present("list-formats"))
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("TIFF file to write the decoded image to")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("format")
            .short('f')
            .long("format")
            .help("Pixel format name (e.g. Mono12p) or identifier (e.g. 0x010c0047)")
            .required_unless_present("list-formats"))
        .arg(Arg::new("width")
            .long("width")
            .help("Frame width in pixels")
            .value_parser(value_parser!(u32))
            .required_unless_present("list-formats"))
        .arg(Arg::new("height")
            .long("height")
            .help("Frame height in pixels")
            .value_parser(value_parser!(u32))
            .required_unless_present("list-formats"))
        .arg(Arg::new("luma-only")
            .long("luma-only")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Produce grayscale output for chroma and Bayer formats"))
        .arg(Arg::new("demosaic")
            .long("demosaic")
            .help_heading("DECODING")
            .help("Bayer demosaicing algorithm")
            .value_parser(["nearest", "linear", "cubic"])
            .default_value("linear"))
        .arg(Arg::new("full-range")
            .long("full-range")
            .action(ArgAction::SetTrue)
            .help_heading("DECODING")
            .help("Treat YUV samples as full range instead of limited range"))
        .arg(Arg::new("compression")
            .long("compression")
            .help_heading("OUTPUT")
            .help("TIFF compression")
            .value_parser(["none", "lzw", "deflate"])
            .default_value("none"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
}

fn decoder_config(args: &ArgMatches) -> DecoderConfig {
    let demosaic = match args.get_one::<String>("demosaic").map(String::as_str) {
        Some("nearest") => DemosaicMethod::NearestNeighbour,
        Some("cubic") => DemosaicMethod::Cubic,
        _ => DemosaicMethod::Linear,
    };
    let range = if args.get_flag("full-range") {
        ColorRange::Full
    } else {
        ColorRange::Limited
    };
    DecoderConfig::builder()
        .luma_only(args.get_flag("luma-only"))
        .demosaic(demosaic)
        .color_range(range)
        .build()
}

fn record_compression(args: &ArgMatches) -> RecordCompression {
    match args.get_one::<String>("compression").map(String::as_str) {
        Some("lzw") => RecordCompression::Lzw,
        Some("deflate") => RecordCompression::Deflate,
        _ => RecordCompression::None,
    }
}

fn parse_format(value: &str) -> Result<FormatDescriptor> {
    if let Some(format) = FormatDescriptor::from_name(value) {
        return Ok(format);
    }
    let hex = value.trim_start_matches("0x").trim_start_matches("0X");
    let id = u32::from_str_radix(hex, 16).map_err(|_| anyhow!("Unknown pixel format '{}'", value))?;
    FormatDescriptor::from_id(PixelFormatId(id)).ok_or_else(|| anyhow!("Unknown pixel format {}", PixelFormatId(id)))
}

fn list_formats() -> Result<()> {
    let registry = DecoderRegistry::with_builtin(&DecoderConfig::default(), None)?;
    println!("{:<22} {:<12} {:>4}  {:?}", "Name", "Id", "Bits", "Packing");
    for format in registry.supported_descriptors() {
        println!(
            "{:<22} {:<12} {:>4}  {:?}",
            format.name,
            format.id.to_string(),
            format.bits_per_sample,
            format.packing
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = create_cmd_args().get_matches();
    logger::init_with_default(if args.get_flag("debug") { "debug" } else { "info" });

    if args.get_flag("list-formats") {
        return list_formats();
    }

    let input = args.get_one::<PathBuf>("input").context("missing --input")?;
    let format = parse_format(args.get_one::<String>("format").context("missing --format")?)?;
    let width = *args.get_one::<u32>("width").context("missing --width")?;
    let height = *args.get_one::<u32>("height").context("missing --height")?;

    let config = decoder_config(&args);
    info!("Decoding {} {}x{} from {}", format, width, height, input.display());
    let data = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let pipeline = FramePipeline::with_builtin(&config)?;
    let image = pipeline.decode(&RawFrame::new(&data, width, height, format))?;
    pipeline.stats().snapshot().log_summary();
    info!(
        "Decoded {}x{} {} image",
        image.width(),
        image.height(),
        image.layout().name()
    );

    if let Some(output) = args.get_one::<PathBuf>("output") {
        TiffRecorder::new(record_compression(&args))
            .write_file(&image, output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }

    Ok(())
}
