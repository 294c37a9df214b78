use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use palstream::FrameSource as _;

#[derive(Parser, Debug)]
#[command(name = "palstream", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a video into a palstream file (requires `ffmpeg` and `ffprobe` on PATH).
    Encode(EncodeArgs),
    /// Print the header, palette and frame record sizes of a palstream file.
    Info(InfoArgs),
    /// Decode one frame of a palstream file to a PNG.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input video.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output stream path.
    #[arg(long, default_value = "video.bin")]
    out: PathBuf,

    /// JSON encode config; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed palette: 1/standard16, 2/gameboy, 3/gray16, 4/mono. Unknown values fall back to
    /// standard16.
    #[arg(long, conflicts_with = "learned")]
    palette: Option<String>,

    /// Learn the palette from frames sampled out of the input.
    #[arg(long)]
    learned: bool,

    /// Learned palette size.
    #[arg(long, requires = "learned")]
    colors: Option<usize>,

    /// Frames sampled for the learned palette.
    #[arg(long, requires = "learned")]
    samples: Option<u32>,

    /// Seed for learned palette sampling; omit for a clock-drawn seed.
    #[arg(long, requires = "learned")]
    seed: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long)]
    chunk_size: Option<usize>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input palstream file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Also print every frame record size.
    #[arg(long)]
    frames: bool,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input palstream file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Integer upscale factor.
    #[arg(long, default_value_t = 3)]
    scale: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Info(args) => cmd_info(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn build_config(args: &EncodeArgs) -> anyhow::Result<palstream::EncodeConfig> {
    let mut cfg = match &args.config {
        Some(path) => palstream::EncodeConfig::from_json_path(path)?,
        None => palstream::EncodeConfig::default(),
    };

    if let Some(key) = &args.palette {
        cfg.palette = palstream::PaletteStrategy::Fixed {
            preset: palstream::PresetPalette::select_or_default(key),
        };
    }
    if args.learned {
        let mut opts = match &cfg.palette {
            palstream::PaletteStrategy::Learned(opts) => opts.clone(),
            palstream::PaletteStrategy::Fixed { .. } => palstream::LearnOpts::default(),
        };
        if let Some(colors) = args.colors {
            opts.colors = colors;
        }
        if let Some(samples) = args.samples {
            opts.sample_frames = samples;
        }
        if args.seed.is_some() {
            opts.seed = args.seed;
        }
        cfg.palette = palstream::PaletteStrategy::Learned(opts);
    }

    if args.parallel {
        cfg.threading.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threading.threads = args.threads;
    }
    if let Some(chunk_size) = args.chunk_size {
        cfg.threading.chunk_size = chunk_size;
    }

    cfg.validate()?;
    Ok(cfg)
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args)?;

    let mut source = palstream::FfmpegSource::open(&args.in_path)
        .with_context(|| format!("open video '{}'", args.in_path.display()))?;
    let info = source.info();
    // Reject before the output file exists.
    palstream::check_resolution(info.width, info.height)?;

    let palette = cfg.palette.build(&mut source)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;

    eprintln!(
        "encoding {}x{} @ {} fps with {} colors",
        info.width,
        info.height,
        info.fps,
        palette.len()
    );
    let (out, stats) =
        palstream::encode_stream(&mut source, &palette, BufWriter::new(file), &cfg.threading)?;
    drop(out);

    eprintln!(
        "wrote {} ({} frames, {:.1} KB)",
        args.out.display(),
        stats.frames_written,
        stats.bytes_written as f64 / 1024.0
    );
    Ok(())
}

fn open_reader(path: &Path) -> anyhow::Result<palstream::StreamReader<BufReader<File>>> {
    let f = File::open(path).with_context(|| format!("open stream '{}'", path.display()))?;
    Ok(palstream::StreamReader::new(BufReader::new(f))?)
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let mut reader = open_reader(&args.in_path)?;
    let header = *reader.header();

    println!("frames:  {}", header.frame_count);
    println!("size:    {}x{}", header.width, header.height);
    println!("fps:     {}", header.fps);
    println!("palette: {} colors", header.palette_len);
    for (i, packed) in reader.palette_rgb565().iter().enumerate() {
        let c = palstream::unpack_rgb565(*packed);
        println!(
            "  {i:>3}: 0x{packed:04x}  #{:02x}{:02x}{:02x}",
            c.r, c.g, c.b
        );
    }

    if args.frames {
        let mut idx = 0u32;
        while let Some((_, record_len)) = reader.next_frame_with_len()? {
            println!("  frame {idx:>6}: {} runs, {record_len} bytes", record_len / 2);
            idx += 1;
        }
    }
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.scale >= 1, "--scale must be >= 1");

    let mut reader = open_reader(&args.in_path)?;
    let frame_count = reader.header().frame_count;
    anyhow::ensure!(
        args.frame < frame_count,
        "frame {} out of range for {} frames",
        args.frame,
        frame_count
    );
    for _ in 0..args.frame {
        reader.skip_frame()?;
    }
    let frame = reader
        .next_frame_rgb()?
        .with_context(|| format!("frame {} missing from stream", args.frame))?;

    let (w, h) = (frame.width * args.scale, frame.height * args.scale);
    let mut data = Vec::with_capacity(w as usize * h as usize * 3);
    for y in 0..h {
        let row = (y / args.scale) as usize * frame.width as usize;
        for x in 0..w {
            let c = frame.pixels[row + (x / args.scale) as usize];
            data.extend_from_slice(&[c.r, c.g, c.b]);
        }
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &data,
        w,
        h,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
