use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use docflow::application::ports::{AuthProvider, DocumentStore};
use docflow::application::services::{
    ExportFormat, SyncManager, UploadOutcome, UploadQueue, ViewMode, analyze_text, export,
    format_content, summarize,
};
use docflow::domain::{DocumentId, Tone, UploadFile, builtin_templates};
use docflow::infrastructure::auth::StaticAuthProvider;
use docflow::infrastructure::observability::init_tracing;
use docflow::infrastructure::persistence::{
    InMemoryDocumentStore, PgDocumentStore, create_pool, run_migrations,
};
use docflow::infrastructure::text_processing::ExtractorFactory;
use docflow::presentation::config::{Settings, StoreProvider, StoreSettings};

#[derive(Parser, Debug)]
#[command(name = "docflow", version, about = "Ingest, reformat, summarize and export documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload files, print their statistics and optionally export them.
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, default_value = "formal")]
        tone: Tone,
        /// Reformat the extracted text and save it as the processed content.
        #[arg(long)]
        reformat: bool,
        /// Export the extractive summary instead of the full document.
        #[arg(long)]
        summary: bool,
        /// Directory to write exports to.
        #[arg(long)]
        export: Option<PathBuf>,
        #[arg(long, default_value = "txt")]
        format: ExportFormat,
    },
    /// List the built-in document templates.
    Templates,
    /// List the tones accepted by `--tone`.
    Tones,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (environment, settings) = Settings::load().context("Failed to load settings")?;
    init_tracing(settings.tracing_config(environment));

    match cli.command {
        Commands::Templates => {
            for template in builtin_templates() {
                println!(
                    "{:<18} {:<20} {:<10} {}",
                    template.id, template.name, template.category, template.description
                );
            }
            Ok(())
        }
        Commands::Tones => {
            for tone in Tone::ALL {
                println!("{:<14} {}", tone.as_str(), tone.description());
            }
            Ok(())
        }
        Commands::Ingest {
            files,
            tone,
            reformat,
            summary,
            export: export_dir,
            format,
        } => {
            let store = build_store(&settings.store).await?;
            let auth: Arc<dyn AuthProvider> =
                Arc::new(StaticAuthProvider::new(settings.auth.user()));
            if auth.current_user().is_none() {
                tracing::warn!("No user configured; uploads will fail with auth-required");
            }

            let sync = Arc::new(SyncManager::new(store, auth));
            let queue = UploadQueue::spawn(
                Arc::new(ExtractorFactory::create_ingestor()),
                Arc::clone(&sync),
                settings.upload.queue_config(),
            );

            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(read_upload(path).await?);
            }

            let task_ids = queue.enqueue_with_tone(uploads, tone).await?;
            let mut failures = 0usize;

            for (path, task_id) in files.iter().zip(task_ids) {
                match queue.wait_for_outcome(task_id).await? {
                    UploadOutcome::Complete(document_id) => {
                        let options = OutputOptions {
                            reformat,
                            summary,
                            export_dir: export_dir.as_deref(),
                            format,
                        };
                        report_document(&sync, document_id, &options).await?;
                    }
                    UploadOutcome::Failed(failure) => {
                        failures += 1;
                        eprintln!("{}: {} ({})", path.display(), failure.message, failure.kind);
                    }
                    UploadOutcome::Removed => {
                        eprintln!("{}: removed before completion", path.display());
                    }
                }
            }

            if failures > 0 {
                bail!("{failures} of {} file(s) failed", files.len());
            }
            Ok(())
        }
    }
}

struct OutputOptions<'a> {
    reformat: bool,
    summary: bool,
    export_dir: Option<&'a Path>,
    format: ExportFormat,
}

async fn build_store(settings: &StoreSettings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match settings.provider {
        StoreProvider::Memory => Ok(Arc::new(InMemoryDocumentStore::new())),
        StoreProvider::Postgres => {
            let url = settings
                .database_url
                .as_deref()
                .context("store.database_url is required for the postgres provider")?;
            let pool = create_pool(url, settings.max_connections).await?;
            run_migrations(&pool).await?;
            Ok(Arc::new(PgDocumentStore::new(pool)))
        }
    }
}

async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Invalid file name: {}", path.display()))?;

    // No declared type; classification falls back to the extension.
    Ok(UploadFile::new(name, "", content))
}

async fn report_document(
    sync: &SyncManager,
    document_id: DocumentId,
    options: &OutputOptions<'_>,
) -> anyhow::Result<()> {
    let mut document = sync.open(document_id).await?;

    if options.reformat {
        let formatted = format_content(&document.processed_content);
        document = sync.update_content(document_id, formatted).await?;
    }

    let stats = analyze_text(&document.processed_content);
    println!(
        "{}: {} words, {} characters, {} sentences, {} paragraphs, ~{} min read, {}",
        document.title,
        stats.words,
        stats.characters,
        stats.sentences,
        stats.paragraphs,
        stats.reading_time_minutes,
        stats.readability.as_str()
    );

    if let Some(dir) = options.export_dir {
        let (mode, content) = if options.summary {
            (ViewMode::Summary, summarize(&document.processed_content))
        } else {
            (ViewMode::Document, document.processed_content.clone())
        };
        let blob = export(&document.title, &content, mode, options.format);
        let path = blob.write_to(dir).await?;
        println!("  exported {}", path.display());
    }

    Ok(())
}
