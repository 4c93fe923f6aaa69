use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use brandpress::{
    AnalysisResult, Assignments, AssetStore, BatchRequest, BatchSources, Composer, FormatCatalog,
    FormatRule, OverrideMap, SourceImage, annotate_placement, decode_image,
};

#[derive(Parser, Debug)]
#[command(name = "brandpress", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose the full format catalog for two source images.
    Compose(ComposeArgs),
    /// Print the resolved format catalog as JSON.
    Formats(FormatsArgs),
    /// Render one format's automatic placement with its rule zones drawn on
    /// top, for visual debugging.
    Annotate(AnnotateArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Format catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Root directory of brand logo folders.
    #[arg(long)]
    logos_root: PathBuf,

    /// Root directory of font files.
    #[arg(long)]
    fonts_root: PathBuf,

    /// First source image.
    #[arg(long)]
    image_a: PathBuf,

    /// Second source image.
    #[arg(long)]
    image_b: PathBuf,

    /// Subject analysis JSON for the first source (focus point centered when
    /// omitted).
    #[arg(long)]
    analysis_a: Option<PathBuf>,

    /// Subject analysis JSON for the second source.
    #[arg(long)]
    analysis_b: Option<PathBuf>,

    /// Assignment JSON mapping `NAME.jpg` to `imageA`/`imageB`.
    #[arg(long)]
    assignments: PathBuf,

    /// Per-format override JSON.
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Brand folder to draw logos from.
    #[arg(long)]
    logo_folder: String,

    /// Logo file inside the brand folder; repeat for multi-logo layouts.
    /// With no selection, logos are picked per format by zone brightness.
    #[arg(long = "logo")]
    logos: Vec<String>,

    /// Output directory for the composed JPEGs.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FormatsArgs {
    /// Format catalog JSON.
    #[arg(long)]
    catalog: PathBuf,
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// Format catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Format name to debug.
    #[arg(long)]
    format: String,

    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Subject analysis JSON (focus point centered when omitted).
    #[arg(long)]
    analysis: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().cmd {
        Command::Compose(args) => compose(args),
        Command::Formats(args) => formats(args),
        Command::Annotate(args) => annotate(args),
    }
}

fn compose(args: ComposeArgs) -> anyhow::Result<()> {
    let catalog = FormatCatalog::load(&args.catalog);
    let composer = Composer::new(catalog, AssetStore::new(args.logos_root, args.fonts_root));

    let sources = BatchSources {
        image_a: load_source(&args.image_a, args.analysis_a.as_deref())?,
        image_b: load_source(&args.image_b, args.analysis_b.as_deref())?,
    };

    let assignments: Assignments = read_json(&args.assignments).context("read assignments")?;
    let overrides: OverrideMap = match &args.overrides {
        Some(path) => read_json(path).context("read overrides")?,
        None => OverrideMap::new(),
    };

    let request = BatchRequest {
        assignments,
        logo_folder: args.logo_folder,
        logo_filenames: args.logos,
        overrides,
    };

    let outputs = composer.compose_batch(&sources, &request)?;
    std::fs::create_dir_all(&args.out).context("create output directory")?;
    for (name, output) in &outputs {
        let path = args.out.join(name);
        std::fs::write(&path, &output.image_bytes)
            .with_context(|| format!("write {}", path.display()))?;
        println!("{name}: {} bytes", output.image_bytes.len());
    }
    println!("{} formats composed", outputs.len());
    Ok(())
}

fn formats(args: FormatsArgs) -> anyhow::Result<()> {
    let catalog = FormatCatalog::load(&args.catalog);
    let formats: Vec<&FormatRule> = catalog.iter().collect();
    println!("{}", serde_json::to_string_pretty(&formats)?);
    Ok(())
}

fn annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let catalog = FormatCatalog::load(&args.catalog);
    let format = catalog
        .get(&args.format)
        .with_context(|| format!("format '{}' not found in catalog", args.format))?;

    let source = load_source(&args.image, args.analysis.as_deref())?;
    let annotated = annotate_placement(&source.image, &source.analysis, format);
    annotated
        .save(&args.out)
        .with_context(|| format!("write {}", args.out.display()))?;
    println!("annotated {} -> {}", args.format, args.out.display());
    Ok(())
}

fn load_source(image_path: &Path, analysis_path: Option<&Path>) -> anyhow::Result<SourceImage> {
    let bytes =
        std::fs::read(image_path).with_context(|| format!("read {}", image_path.display()))?;
    let image = decode_image(&bytes)?;
    let analysis: AnalysisResult = match analysis_path {
        Some(path) => read_json(path).with_context(|| format!("read {}", path.display()))?,
        None => AnalysisResult::centered(image.width(), image.height()),
    };
    Ok(SourceImage { image, analysis })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse {}", path.display()))
}
