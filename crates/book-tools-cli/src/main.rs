mod logger;

use anyhow::{Context, Result, bail};
use book_capture::BookUrl;
use book_reflow::{BookOptions, InputPages, PipelineEvent, ReflowContext, Zoom};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "bookdl", about = "Download books from the web reader as PDF", version)]
struct Cli {
    /// Log debug output
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
    /// Download a book into `<output-dir>/<title>.pdf`
    Download {
        /// Book URL (https://www.everand.com/book/... or https://www.scribd.com/book/...)
        url: String,

        /// JSON options file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the cache and the finished book
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Scale applied to every page
        #[arg(long)]
        zoom: Option<f64>,

        /// Number of pages rendered concurrently
        #[arg(long)]
        workers: Option<usize>,

        /// Keep per-page and per-chapter PDFs after success
        #[arg(long)]
        keep_cache: bool,

        /// Reuse the saved session instead of opening a login window first
        #[arg(long)]
        skip_login: bool,

        /// Session cookie file
        #[arg(long)]
        session: Option<PathBuf>,

        /// Chromium executable
        #[arg(long)]
        chrome: Option<PathBuf>,
    },

    /// Sign in interactively and save the session
    Login {
        /// Any book URL on the site to sign in to
        url: String,

        /// Session cookie file
        #[arg(long)]
        session: Option<PathBuf>,
    },

    /// Turn one captured page fragment into a printable document
    Reflow {
        /// Page fragment
        #[arg(short, long)]
        input: PathBuf,

        /// Printable page
        #[arg(short, long)]
        output: PathBuf,

        /// Origin for root-relative `src` references
        #[arg(long, default_value = "https://www.scribd.com")]
        origin: String,

        /// File with `@font-face` declarations
        #[arg(long)]
        fonts: Option<PathBuf>,

        /// Scale applied to the page
        #[arg(long, default_value_t = book_reflow::constants::DEFAULT_ZOOM)]
        zoom: f64,
    },

    /// Merge PDF files in the order given
    Merge {
        /// Input PDF files
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Require every input to have exactly one page
        #[arg(long)]
        single_page: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    logger::StderrLogger::new(level)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Download {
            url,
            config,
            output_dir,
            zoom,
            workers,
            keep_cache,
            skip_login,
            session,
            chrome,
        } => {
            let url = BookUrl::parse(&url)?;

            let mut options = match &config {
                Some(path) => BookOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => BookOptions::default(),
            };
            if let Some(dir) = output_dir {
                options.output_dir = dir;
            }
            if let Some(zoom) = zoom {
                options.zoom = Zoom::new(zoom)?;
            }
            if let Some(workers) = workers {
                options.workers = workers;
            }
            if keep_cache {
                options.keep_cache = true;
            }
            if let Some(session) = session {
                options.session_file = session;
            }
            if chrome.is_some() {
                options.chrome_executable = chrome;
            }
            options.validate()?;

            if !skip_login {
                book_capture::login(&url, &options).await?;
            }

            let (tx, mut rx) = mpsc::unbounded_channel();
            let progress = tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    print_progress(&event);
                }
            });

            let result = book_capture::download_book(&url, &options, Some(&tx)).await;
            drop(tx);
            let _ = progress.await;

            let summary = result?;
            println!(
                "Saved {} ({} chapters, {} pages)",
                summary.book_file.display(),
                summary.chapters,
                summary.pages
            );
        }

        Commands::Login { url, session } => {
            let url = BookUrl::parse(&url)?;
            let mut options = BookOptions::default();
            if let Some(session) = session {
                options.session_file = session;
            }
            book_capture::login(&url, &options).await?;
            println!("Session saved to {}", options.session_file.display());
        }

        Commands::Reflow {
            input,
            output,
            origin,
            fonts,
            zoom,
        } => {
            let fragment = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let font_faces = match &fonts {
                Some(path) => tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => String::new(),
            };

            let ctx = ReflowContext::new(origin, Zoom::new(zoom)?, font_faces);
            let document = book_reflow::reflow_page(&fragment, &ctx)
                .with_context(|| format!("Cannot reflow {}", input.display()))?;
            tokio::fs::write(&output, document)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Reflowed {} → {}", input.display(), output.display());
        }

        Commands::Merge {
            input,
            output,
            single_page,
        } => {
            if input.iter().any(|path| *path == output) {
                bail!("Output {} is also an input", output.display());
            }
            let expected = if single_page {
                InputPages::Single
            } else {
                InputPages::AtLeastOne
            };
            let pages = book_reflow::assemble(&input, &output, expected).await?;
            println!(
                "Merged {} files ({} pages) → {}",
                input.len(),
                pages,
                output.display()
            );
        }
    }

    Ok(())
}

fn print_progress(event: &PipelineEvent) {
    match event {
        PipelineEvent::ChapterStarted {
            chapter,
            chapter_count,
            page_count,
        } => println!("Chapter {}/{}: {} pages", chapter, chapter_count, page_count),
        PipelineEvent::PageRendered { .. } => {}
        PipelineEvent::ChapterAssembled {
            chapter,
            path,
            page_count,
        } => println!(
            "Chapter {} done ({} pages) → {}",
            chapter,
            page_count,
            path.display()
        ),
        PipelineEvent::BookAssembled { path, page_count } => {
            println!("Book assembled ({} pages) → {}", page_count, path.display())
        }
    }
}
