mod logger;

use anyhow::{Context, Result};
use booklet_impose::layout::plan_signatures;
use booklet_impose::{BookletOptions, CoverOptions, ImpositionStatistics};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use logger::ConsoleLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "booklet", about = "Booklet imposition for images and text", version)]
struct Cli {
    /// Log every step (debug level)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impose a directory of images (or one image) into a booklet PDF
    Images {
        /// Image directory or single image file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Images per region
        #[arg(long, default_value = "1", value_enum)]
        density: DensityArg,

        /// Split landscape images into two portrait halves
        #[arg(long)]
        split_landscape: bool,

        /// Pixel width of the black lines between four-up cells
        #[arg(long, default_value = "2")]
        divider: u32,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Lay out a .txt or .epub file into a booklet PDF
    Text {
        /// Text or EPUB file
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// TrueType font to embed (needed for CJK text)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Body font size in points
        #[arg(long, default_value = "10")]
        font_size: f32,

        /// Text regions per sheet side (2 = landscape, 4 = portrait)
        #[arg(long, default_value = "4")]
        regions: usize,

        /// Don't outline text regions
        #[arg(long)]
        no_borders: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Put a front (and back) cover image around a spine on one sheet
    Cover {
        /// Front cover image
        front: PathBuf,

        /// Back cover image
        #[arg(long)]
        back: Option<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Spine width in mm
        #[arg(long, default_value = "5")]
        spine: f32,

        /// Text printed down the spine
        #[arg(long, default_value = "")]
        spine_text: String,

        /// TrueType font for the spine text (needed for CJK text)
        #[arg(long)]
        font: Option<PathBuf>,

        /// Which side of the sheet the book opens from
        #[arg(long, default_value = "left", value_enum)]
        fold: FoldArg,

        /// Output paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,

        /// Don't draw dashed lines on the spine edges
        #[arg(long)]
        no_fold_guide: bool,
    },

    /// Print the sheet page sets of a booklet plan
    Plan {
        /// Number of logical pages
        #[arg(long)]
        pages: usize,

        /// Sheets per signature
        #[arg(long, default_value = "5")]
        sheets: usize,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Sheets per signature
    #[arg(long, default_value = "5")]
    sheets: usize,

    /// Which side of the sheet the first page is read from
    #[arg(long, default_value = "left", value_enum)]
    fold: FoldArg,

    /// Folded booklet order or plain reading spreads
    #[arg(long, default_value = "booklet", value_enum)]
    order: OrderArg,

    /// Output paper size
    #[arg(long, default_value = "a4", value_enum)]
    paper: PaperArg,

    /// Blank logical pages before the content
    #[arg(long, default_value = "0")]
    leading_blanks: usize,

    /// Don't print page numbers
    #[arg(long)]
    no_page_numbers: bool,

    /// Number of the first content page
    #[arg(long, default_value = "1")]
    page_start: i64,

    /// Centre gutter in mm
    #[arg(long)]
    gutter: Option<f32>,

    /// Don't draw the dashed centre fold guide
    #[arg(long)]
    no_fold_guide: bool,

    /// JSON options file; replaces the options given by flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum DensityArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "4")]
    Four,
}

#[derive(Clone, Copy, ValueEnum)]
enum FoldArg {
    Left,
    Right,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Booklet,
    Spread,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    A6,
}

impl From<DensityArg> for booklet_impose::Density {
    fn from(arg: DensityArg) -> Self {
        match arg {
            DensityArg::One => Self::One,
            DensityArg::Two => Self::Two,
            DensityArg::Four => Self::Four,
        }
    }
}

impl From<FoldArg> for booklet_impose::FoldDirection {
    fn from(arg: FoldArg) -> Self {
        match arg {
            FoldArg::Left => Self::LeftStart,
            FoldArg::Right => Self::RightStart,
        }
    }
}

impl From<OrderArg> for booklet_impose::PageOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Booklet => Self::Booklet,
            OrderArg::Spread => Self::Spread,
        }
    }
}

impl From<PaperArg> for booklet_impose::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::A6 => Self::A6,
        }
    }
}

impl CommonArgs {
    /// Options from flags, or the `--config` file when given
    fn options(&self, customize: impl FnOnce(&mut BookletOptions)) -> Result<BookletOptions> {
        if let Some(path) = &self.config {
            let options = BookletOptions::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            log::info!("Using options from {}", path.display());
            return Ok(options);
        }

        let mut options = BookletOptions {
            paper_size: self.paper.into(),
            sheets_per_signature: self.sheets,
            fold_direction: self.fold.into(),
            page_order: self.order.into(),
            leading_blanks: self.leading_blanks,
            fold_guide: !self.no_fold_guide,
            ..Default::default()
        };
        options.page_numbers.enabled = !self.no_page_numbers;
        options.page_numbers.start = self.page_start;
        if let Some(gutter) = self.gutter {
            options.margins.gutter_mm = gutter;
        }
        customize(&mut options);
        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    ConsoleLogger::new(level).init()?;

    match cli.command {
        Commands::Images {
            input,
            output,
            density,
            split_landscape,
            divider,
            common,
        } => {
            let options = common.options(|options| {
                options.density = density.into();
                options.split_landscape = split_landscape;
                options.cell_divider_px = divider;
            })?;
            options.validate()?;

            let paths = booklet_impose::source::collect_images(&input)?;
            let units = booklet_impose::source::expand_units(&paths, options.split_landscape);
            let stats = booklet_impose::calculate_statistics(units.len(), &options)?;
            print_statistics(&stats);
            if common.stats_only {
                return Ok(());
            }

            let imposed = booklet_impose::impose_images(&units, &options)?;
            booklet_impose::save_pdf(imposed, &output)?;
            print_summary(&output, &stats);
        }

        Commands::Text {
            input,
            output,
            font,
            font_size,
            regions,
            no_borders,
            common,
        } => {
            let options = common.options(|options| {
                options.text.font_path = font;
                options.text.font_size = font_size;
                options.text.regions_per_side = regions;
                options.text.draw_borders = !no_borders;
            })?;
            options.validate()?;

            let text = booklet_impose::read_text_input(&input)?;
            let stats = booklet_impose::text_statistics(&text, &options)?;
            print_statistics(&stats);
            if common.stats_only {
                return Ok(());
            }

            let imposed = booklet_impose::impose_text(&text, &options)?;
            booklet_impose::save_pdf(imposed, &output)?;
            print_summary(&output, &stats);
        }

        Commands::Cover {
            front,
            back,
            output,
            spine,
            spine_text,
            font,
            fold,
            paper,
            no_fold_guide,
        } => {
            let options = CoverOptions {
                paper_size: paper.into(),
                fold_direction: fold.into(),
                spine_mm: spine,
                spine_text,
                font_path: font,
                fold_guide: !no_fold_guide,
            };
            let cover = booklet_impose::impose_cover(&front, back.as_deref(), &options)?;
            booklet_impose::save_pdf(cover, &output)?;
            println!("Cover sheet → {}", output.display());
        }

        Commands::Plan { pages, sheets } => {
            if sheets == 0 {
                anyhow::bail!("Sheets per signature must be at least 1");
            }
            let per_signature = sheets * 4;
            for (index, set) in plan_signatures(pages, sheets).iter().enumerate() {
                if index % sheets == 0 {
                    println!("Signature {}:", index / sheets + 1);
                }
                let (back_outside, front_outside, front_inside, back_inside) = set.as_tuple();
                println!(
                    "  Sheet {:>3}: front [{}, {}]  back [{}, {}]",
                    index + 1,
                    back_outside,
                    front_outside,
                    front_inside,
                    back_inside
                );
            }
            println!(
                "{} pages padded to {} ({} per signature)",
                pages,
                pages.div_ceil(per_signature) * per_signature,
                per_signature
            );
        }
    }

    Ok(())
}

fn print_statistics(stats: &ImpositionStatistics) {
    println!("Imposition Statistics:");
    println!("  Source units: {}", stats.source_units);
    println!("  Logical pages: {}", stats.logical_pages);
    if stats.leading_blanks > 0 {
        println!("  Leading blanks: {}", stats.leading_blanks);
    }
    println!("  Blank pages added: {}", stats.blank_pages_added);
    if let Some(sigs) = stats.signatures {
        println!("  Signatures: {}", sigs);
    }
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Output pages: {}", stats.output_pages);
}

fn print_summary(output: &std::path::Path, stats: &ImpositionStatistics) {
    println!(
        "Imposed {} logical pages onto {} sheets ({} PDF pages) → {}",
        stats.logical_pages,
        stats.output_sheets,
        stats.output_pages,
        output.display()
    );
}
