use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pantrysense::canonicalizer::Canonicalizer;
use pantrysense::config::ScanConfig;
use pantrysense::engine::DetectionAggregator;
use pantrysense::lexicon::{Category, ConfidencePolicy, IngredientLexicon};
use pantrysense::schema::DetectionSource;
use pantrysense::vision::VisionClient;
use serde_json::json;
use std::io::{IsTerminal, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pantrysense",
    about = "Ingredient detection utilities",
    arg_required_else_help = true
)]
struct Cli {
    /// Disable color
    #[arg(long = "no-color", global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect ingredients in an image
    Scan(ScanArgs),
    /// Evaluate one raw detection against the lexicon
    Check(CheckArgs),
    /// Show the active ingredient vocabulary
    Lexicon(LexiconArgs),
}

#[derive(Args, Clone)]
struct ScanArgs {
    /// Image to classify
    image: PathBuf,

    /// Output JSON (stable schema)
    #[arg(long)]
    json: bool,

    /// Also print every raw detection with its confidence
    #[arg(long)]
    diagnostics: bool,
}

#[derive(Args, Clone)]
struct CheckArgs {
    /// Raw detection name
    name: String,

    /// Confidence score in [0,1]
    #[arg(long)]
    score: f32,

    /// Where the detection came from
    #[arg(long, value_enum, default_value = "label")]
    source: SourceArg,

    /// Output result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Label,
    Object,
}

impl From<SourceArg> for DetectionSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Label => DetectionSource::Label,
            SourceArg::Object => DetectionSource::Object,
        }
    }
}

#[derive(Args, Clone)]
struct LexiconArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color
        && std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
        && stdout().is_terminal();

    match cli.command {
        Commands::Scan(args) => run_scan(args, color).await,
        Commands::Check(args) => run_check(args, color),
        Commands::Lexicon(args) => run_lexicon(args, color),
    }
}

async fn run_scan(args: ScanArgs, color: bool) -> anyhow::Result<()> {
    let config = ScanConfig::load();
    let client = VisionClient::new(&config)?;

    let annotations = client.annotate_file(&args.image).await?;

    let aggregator = DetectionAggregator::new(Canonicalizer::new(
        ScanConfig::load_lexicon(),
        ConfidencePolicy::default(),
    ));
    let report = aggregator.aggregate(
        &annotations.label_annotations,
        &annotations.localized_object_annotations,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let ingredients: Vec<&str> = report.ingredients.iter().map(String::as_str).collect();
    if ingredients.is_empty() {
        println!("{}", heading("Ingredients:", color));
    } else {
        println!("{} {}", heading("Ingredients:", color), ingredients.join(", "));
    }

    if args.diagnostics {
        println!("{}", heading("Detections:", color));
        for line in &report.diagnostics {
            println!("  {}", line);
        }
    }

    Ok(())
}

fn run_check(args: CheckArgs, color: bool) -> anyhow::Result<()> {
    let canonicalizer = Canonicalizer::new(ScanConfig::load_lexicon(), ConfidencePolicy::default());
    let canonical = canonicalizer.canonicalize(&args.name, args.score, args.source.into());

    if args.json {
        println!(
            "{}",
            json!({
                "name": args.name.to_lowercase(),
                "score": args.score,
                "canonical": canonical,
                "accepted": canonical.is_some(),
            })
        );
    } else {
        let verdict = match canonical {
            Some(canonical) if color => canonical.green().to_string(),
            Some(canonical) => canonical.to_string(),
            None if color => "rejected".red().to_string(),
            None => "rejected".to_string(),
        };
        println!("{} -> {}", args.name.to_lowercase(), verdict);
    }

    if canonical.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_lexicon(args: LexiconArgs, color: bool) -> anyhow::Result<()> {
    let lexicon = ScanConfig::load_lexicon();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&lexicon_json(&lexicon))?);
        return Ok(());
    }

    println!("{}", heading("Taxonomy:", color));
    for category in Category::ALL {
        let members = lexicon.taxonomy().members_of(category);
        println!("  {}: {}", category.name(), members.join(", "));
    }

    println!("{}", heading("Synonyms:", color));
    for (alias, canonical) in lexicon.synonyms().entries() {
        println!("  {} -> {}", alias, canonical);
    }

    Ok(())
}

fn lexicon_json(lexicon: &IngredientLexicon) -> serde_json::Value {
    let taxonomy: serde_json::Map<String, serde_json::Value> = Category::ALL
        .iter()
        .map(|category| {
            (
                category.name().to_string(),
                json!(lexicon.taxonomy().members_of(*category)),
            )
        })
        .collect();
    let synonyms: serde_json::Map<String, serde_json::Value> = lexicon
        .synonyms()
        .entries()
        .into_iter()
        .map(|(alias, canonical)| (alias.to_string(), json!(canonical)))
        .collect();
    json!({ "taxonomy": taxonomy, "synonyms": synonyms })
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}
