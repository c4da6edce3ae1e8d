//! glimg CLI - Command-line tool for inspecting DDS texture containers.
//!
//! This is the main entry point for the glimg command-line application.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use memmap2::Mmap;
use serde::Serialize;

use glimg::dds::{LayoutEntry, TextureInfo};
use glimg::prelude::*;

/// glimg - DDS texture container inspection tool
#[derive(Parser)]
#[command(name = "glimg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the format, dimensions and image layout of a DDS file
    DdsInfo {
        /// Input DDS file
        #[arg(short, long, env = "GLIMG_INPUT")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Accept files whose image data is truncated
        #[arg(long)]
        lenient: bool,
    },

    /// Write every image of a DDS file to a separate raw file
    DdsExtract {
        /// Input DDS file
        #[arg(short, long, env = "GLIMG_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "GLIMG_OUTPUT")]
        output: PathBuf,

        /// Accept files whose image data is truncated
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::DdsInfo { input, json, lenient } => {
            cmd_dds_info(&input, json, lenient)?;
        }
        Commands::DdsExtract { input, output, lenient } => {
            cmd_dds_extract(&input, &output, lenient)?;
        }
    }

    Ok(())
}

/// JSON report for `dds-info`.
#[derive(Serialize)]
struct DdsReport<'a> {
    file: String,
    format: ImageFormat,
    dimensions: Dimensions,
    texture: &'a TextureInfo,
    mip_count: u32,
    array_count: u32,
    face_count: u32,
    payload_offset: usize,
    layout: &'a [LayoutEntry],
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file) }.context("Failed to map input file")?;
    Ok(mmap)
}

fn decode_options(lenient: bool) -> DecodeOptions {
    DecodeOptions {
        payload: if lenient {
            PayloadCheck::Lenient
        } else {
            PayloadCheck::Strict
        },
    }
}

fn cmd_dds_info(input: &Path, json: bool, lenient: bool) -> Result<()> {
    let data = map_file(input)?;
    let origin = input.display().to_string();
    let dds = DdsFile::parse_with_options(&data, &origin, &decode_options(lenient))
        .context("Failed to parse DDS file")?;

    if json {
        let report = DdsReport {
            file: origin,
            format: dds.format(),
            dimensions: dds.dimensions(),
            texture: dds.texture_info(),
            mip_count: dds.mip_count(),
            array_count: dds.array_count(),
            face_count: dds.face_count(),
            payload_offset: dds.payload_offset(),
            layout: dds.layout(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let dims = dds.dimensions();
    let info = dds.texture_info();
    println!("File:       {}", input.display());
    println!("Format:     {}", dds.format());
    println!(
        "Dimensions: {}D {}x{}x{}",
        dims.num_dimensions, dims.width, dims.height, dims.depth
    );
    println!(
        "Texture:    {:?}{}{}",
        info.dimension,
        if info.cubemap { ", cubemap" } else { "" },
        if info.extended { ", DX10 header" } else { "" }
    );
    println!(
        "Images:     {} mips x {} layers x {} faces",
        dds.mip_count(),
        dds.array_count(),
        dds.face_count()
    );
    println!();
    println!("{:>5} {:>4} {:>3} {:>12} {:>12}", "array", "face", "mip", "offset", "length");

    for entry in dds.layout() {
        let marker = if entry.end() > data.len() { " (missing)" } else { "" };
        println!(
            "{:>5} {:>4} {:>3} {:>12} {:>12}{}",
            entry.array, entry.face, entry.mip, entry.offset, entry.length, marker
        );
    }

    Ok(())
}

fn cmd_dds_extract(input: &Path, output: &Path, lenient: bool) -> Result<()> {
    println!("Extracting DDS: {} -> {}", input.display(), output.display());

    let data = map_file(input)?;
    let origin = input.display().to_string();
    let dds = DdsFile::parse_with_options(&data, &origin, &decode_options(lenient))
        .context("Failed to parse DDS file")?;

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(dds.layout().len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut written = 0;

    for image in dds.images() {
        let name = format!("array{}_face{}_mip{}.bin", image.array, image.face, image.mip);
        let path = output.join(name);
        fs::write(&path, image.data)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        written += 1;
        pb.inc(1);
    }

    pb.finish_with_message("Done");

    let skipped = dds.layout().len() - written;
    if skipped > 0 {
        tracing::warn!(skipped, "images past the end of the file were not written");
    }
    println!("Wrote {} images in {:?}", written, start.elapsed());

    Ok(())
}
