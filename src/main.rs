use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use repolens::ad::default_file_name;
use repolens::review::DEFAULT_REPORT_FILE;
use repolens::{
    AdGenerator, BpeCounter, CompletionSettings, FileFilter, GithubRepo, HeuristicCounter,
    Language, OpenAiClient, ReviewConfig, Reviewer, SnapshotBuilder, Thresholds, TokenCounter,
    DEFAULT_MAX_TOKENS,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

#[derive(Parser)]
#[command(name = "repolens", version, about = "Token-budgeted LLM review of Laravel repositories")]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write daily-rolling log files here
    #[arg(long, global = true, env = "REPOLENS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Review a GitHub repository or local checkout and write a markdown report
    Review(ReviewArgs),
    /// Show how a file would be chunked for review
    Chunk(ChunkArgs),
    /// Generate ad copy for a product
    Ad(AdArgs),
}

#[derive(Args)]
struct ModelArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = CompletionSettings::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = CompletionSettings::DEFAULT_MODEL)]
    model: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 120)]
    timeout: u64,
}

impl ModelArgs {
    fn client(&self) -> Result<OpenAiClient> {
        let settings = CompletionSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout),
        };
        OpenAiClient::new(settings).context("Failed to build HTTP client")
    }
}

#[derive(Args)]
struct ReviewArgs {
    /// GitHub URL (https://github.com/owner/repo) or local directory
    source: String,

    /// Report path
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    output: PathBuf,

    /// Sent as bearer auth when downloading the archive
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: i64,

    #[arg(long, env = "MAX_FILE_LINES", default_value_t = 300)]
    max_file_lines: usize,

    #[arg(long, env = "MAX_METHODS", default_value_t = 20)]
    max_methods: usize,

    #[arg(long, env = "MAX_METHOD_LINES", default_value_t = 50)]
    max_method_lines: usize,

    /// Count tokens with the cl100k_base vocabulary instead of estimating
    #[arg(long)]
    bpe: bool,

    #[command(flatten)]
    model: ModelArgs,
}

#[derive(Args)]
struct ChunkArgs {
    file: PathBuf,

    /// Token budget per chunk
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS / 2, allow_negative_numbers = true)]
    budget: i64,

    #[arg(long)]
    bpe: bool,
}

#[derive(Args)]
struct AdArgs {
    product: String,

    /// Language name or ISO code
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Directory for the JSON output
    #[arg(long, default_value = ".")]
    out: PathBuf,

    #[command(flatten)]
    model: ModelArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values from .env (current dir or a parent) back the env-driven flags;
    // variables already set in the process win
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = repolens::logging::init(cli.verbose, cli.log_dir.as_deref())?;

    match cli.command {
        Command::Review(args) => review(args).await,
        Command::Chunk(args) => chunk(args),
        Command::Ad(args) => ad(args).await,
    }
}

fn boxed_counter(bpe: bool) -> Result<Box<dyn TokenCounter>> {
    if bpe {
        Ok(Box::new(BpeCounter::cl100k().context("Failed to load cl100k_base")?))
    } else {
        Ok(Box::new(HeuristicCounter))
    }
}

fn review_config(args: &ReviewArgs) -> ReviewConfig {
    ReviewConfig {
        max_tokens: args.max_tokens,
        thresholds: Thresholds {
            max_file_lines: args.max_file_lines,
            max_methods: args.max_methods,
            max_method_lines: args.max_method_lines,
        },
        ..ReviewConfig::default()
    }
}

async fn review(args: ReviewArgs) -> Result<()> {
    let start = Instant::now();
    let config = review_config(&args);
    if config.chunk_budget() <= 0 {
        bail!("MAX_TOKENS must be at least 2 (got {})", config.max_tokens);
    }

    println!("Using configuration:");
    println!("- Max file lines: {}", config.thresholds.max_file_lines);
    println!("- Max methods per class: {}", config.thresholds.max_methods);
    println!("- Max lines per method: {}", config.thresholds.max_method_lines);
    println!("- Chunk budget: {} tokens\n", config.chunk_budget());

    let filter = FileFilter::laravel();
    let local = Path::new(&args.source);
    let snapshot = if local.is_dir() {
        SnapshotBuilder::new()
            .ingest_dir(local, &filter)
            .with_context(|| format!("Failed to scan {}", local.display()))?
            .build()
    } else {
        let repo = GithubRepo::parse(&args.source)?;
        SnapshotBuilder::new()
            .ingest_github(&repo, args.github_token.as_deref(), &filter)
            .await
            .with_context(|| format!("Failed to fetch {}", repo.full_name()))?
            .build()
    };

    if snapshot.file_count() == 0 {
        println!("No files to analyze in {}", args.source);
        return Ok(());
    }
    println!(
        "Loaded {} files ({} bytes)\n",
        snapshot.file_count(),
        snapshot.total_size()
    );

    let client = args.model.client()?;
    let report = if args.bpe {
        let counter = BpeCounter::cl100k().context("Failed to load cl100k_base")?;
        Reviewer::new(client, counter, config)
            .review_snapshot(&snapshot)
            .await
    } else {
        Reviewer::new(client, HeuristicCounter, config)
            .review_snapshot(&snapshot)
            .await
    };

    report
        .write_to(&args.output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    let summary = report.summary();
    println!("Analysis Summary:");
    println!("- Total Files Analyzed: {}", summary.total);
    println!("- Files with Issues:    {}", summary.with_warnings);
    println!("- Failed Files:         {}", summary.failed);
    println!("- Clean Files:          {}", summary.clean);
    println!("\nResults saved to {}", args.output.display());
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "Done");
    Ok(())
}

fn chunk(args: ChunkArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let counter = boxed_counter(args.bpe)?;
    let chunks = repolens::split_text(&text, counter.as_ref(), args.budget)?;

    for (i, chunk) in chunks.iter().enumerate() {
        println!(
            "chunk {:>3}  lines {:>5}-{:<5}  {:>6} tokens{}",
            i + 1,
            chunk.metadata.start_line,
            chunk.metadata.end_line,
            chunk.metadata.token_count,
            if chunk.metadata.token_count as i64 > args.budget {
                "  (over budget: single line)"
            } else {
                ""
            }
        );
    }
    println!("{} chunks, budget {}", chunks.len(), args.budget);
    Ok(())
}

async fn ad(args: AdArgs) -> Result<()> {
    let language = Language::from_name(&args.language);
    let generator = AdGenerator::new(args.model.client()?);
    let copy = generator.generate(&args.product, language).await?;

    for (title, content) in &copy.components {
        println!("{}:\n  {}\n", title, content);
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    let path = args.out.join(default_file_name(chrono::Local::now()));
    std::fs::write(&path, copy.to_json())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}
