//! imgsection CLI - Cut images into sections or derive thumbnails

use clap::{Args, Parser, Subcommand};
use imgsection::{
    CutDirection, FilePipeline, GeometryMode, ImageFile, OutputFormat, SectionError,
    SectionRequest, ThumbnailRequest,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgsection", about = "Cut large images into sections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Cut an image into horizontal or vertical sections
    Section {
        /// Input image file
        input: PathBuf,
        /// Width of each section (vertical cuts, or zoom target for horizontal cuts)
        #[arg(short = 'W', long)]
        section_width: Option<u32>,
        /// Height of each section (horizontal cuts, or zoom target for vertical cuts)
        #[arg(short = 'H', long)]
        section_height: Option<u32>,
        /// Cut direction
        #[arg(short, long, value_enum)]
        direction: Option<CutDirection>,
        /// Resize the image to the section size before cutting
        #[arg(short = 'z', long)]
        allow_zoom: bool,
        /// Formulas used for vertical cuts
        #[arg(long, value_enum)]
        geometry: Option<GeometryMode>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Resize an image into a thumbnail
    Thumb {
        /// Input image file
        input: PathBuf,
        /// Thumbnail width
        #[arg(short = 'W', long)]
        width: Option<u32>,
        /// Thumbnail height
        #[arg(short = 'H', long)]
        height: Option<u32>,
        /// Honor both width and height even if the aspect ratio changes
        #[arg(long)]
        distorted: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Output MIME type
    #[arg(long, default_value = "image/png")]
    mime: String,
    /// Encoder quality (0.0-1.0, default: 1.0)
    #[arg(short, long)]
    quality: Option<f32>,
}

impl OutputArgs {
    fn pipeline(&self) -> Result<FilePipeline, SectionError> {
        let format = OutputFormat::resolve(Some(&self.mime), self.quality)?;
        std::fs::create_dir_all(&self.out_dir)?;
        Ok(FilePipeline::new().with_format(format))
    }
}

fn main() -> Result<(), SectionError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Section {
            input,
            section_width,
            section_height,
            direction,
            allow_zoom,
            geometry,
            output,
        } => {
            let options = SectionRequest {
                section_width,
                section_height,
                cut_direction: direction,
                allow_zoom: Some(allow_zoom),
                geometry,
            }
            .resolve()?;
            let file = ImageFile::read(&input)?;
            for section in output.pipeline()?.section_file(&file, &options)? {
                println!("{}", section.write_to(&output.out_dir)?.display());
            }
        }
        Command::Thumb { input, width, height, distorted, output } => {
            let spec = ThumbnailRequest {
                thumb_width: width,
                thumb_height: height,
                distorted: Some(distorted),
            }
            .resolve();
            let file = ImageFile::read(&input)?;
            let thumb = output.pipeline()?.thumbnail_file(&file, &spec)?;
            println!("{}", thumb.write_to(&output.out_dir)?.display());
        }
    }

    Ok(())
}
