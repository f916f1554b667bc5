use barscan::encode::render_gray;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "eantool", version, about = "EAN-13 barcode CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode an EAN-13 barcode from an image file
    Decode {
        /// Path to the crop image
        image: PathBuf,
        /// Skip the 90/180/270 degree retries
        #[arg(long)]
        no_rotations: bool,
    },
    /// Render a synthetic barcode to a PNG file
    Synth {
        /// The 13 digits to render (used as-is, no check digit computed)
        digits: String,
        /// Output path
        #[arg(long, default_value = "barcode.png")]
        output: PathBuf,
        /// Pixels per module
        #[arg(long, default_value_t = 3)]
        scale: usize,
        /// Image height in pixels
        #[arg(long, default_value_t = 60)]
        height: usize,
    },
}

fn main() -> ExitCode {
    match Cli::parse().command {
        Command::Decode {
            image,
            no_rotations,
        } => decode_image(&image, no_rotations),
        Command::Synth {
            digits,
            output,
            scale,
            height,
        } => synth_image(&digits, &output, scale, height),
    }
}

fn decode_image(path: &PathBuf, no_rotations: bool) -> ExitCode {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(err) => {
            eprintln!("failed to load {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let scanner = if no_rotations {
        barscan::Scanner::without_rotations()
    } else {
        barscan::Scanner::new()
    };

    let text = scanner.decode(&rgb.into_raw(), width, height);
    if text.is_empty() {
        println!("no barcode");
        ExitCode::FAILURE
    } else {
        println!("{}", text);
        ExitCode::SUCCESS
    }
}

fn synth_image(digits: &str, output: &PathBuf, scale: usize, height: usize) -> ExitCode {
    let Some((pixels, width, rows)) = render_gray(digits, scale.max(1), 10, height.max(1)) else {
        eprintln!("expected exactly 13 digits, got {:?}", digits);
        return ExitCode::FAILURE;
    };

    let Some(buffer) = image::GrayImage::from_raw(width as u32, rows as u32, pixels) else {
        eprintln!("failed to build image buffer");
        return ExitCode::FAILURE;
    };

    match buffer.save(output) {
        Ok(()) => {
            println!("wrote {}x{} barcode to {}", width, rows, output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to save {}: {}", output.display(), err);
            ExitCode::FAILURE
        }
    }
}
