// src/cli.rs
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::controller::{BulkPage, Mode, ResumePage, WorkbenchPage};
use crate::core::{ApiClient, ConfigManager, FsOps};
use crate::export::ExportFormat;
use crate::heatmap::{Point, Size, LEGEND};
use crate::upload::{UploadEvent, UploadFile};
use crate::view::{AnalyticsView, ExtractionView, MatchScoreView, SuggestionView};

#[derive(Parser)]
#[command(name = "resumesense")]
#[command(about = "Analyze, match and inspect resumes against the ResumeSense backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL, overrides configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory for exports and rendered heatmaps
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract structured information from a resume
    Analyze { file: PathBuf },
    /// Score a resume against a job description
    Match {
        file: PathBuf,
        #[command(flatten)]
        jd: JobDescription,
    },
    /// Predict where a recruiter looks first
    Saliency {
        file: PathBuf,
        /// Google API key, falls back to GOOGLE_API_KEY
        #[arg(long)]
        api_key: Option<String>,
        /// Pointer position over the displayed page, as `x,y`
        #[arg(long, value_parser = parse_point)]
        hover: Option<Point>,
        /// Displayed page size, as `WIDTHxHEIGHT`. Defaults to the image size.
        #[arg(long, value_parser = parse_size)]
        display: Option<Size>,
        /// Save the painted heatmap as PNG
        #[arg(long)]
        render: Option<PathBuf>,
    },
    /// Extraction pipeline with keyword/semantic match, AI suggestions and export
    Workbench {
        file: PathBuf,
        #[command(flatten)]
        jd: JobDescription,
        #[arg(long)]
        suggest: bool,
        #[arg(long, value_enum)]
        export: Vec<ExportFormat>,
    },
    /// Parse many resumes at once and summarize them
    Bulk {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long)]
        anonymize: bool,
        #[arg(long, value_enum)]
        export: Option<ExportFormat>,
    },
}

#[derive(clap::Args, Default)]
pub struct JobDescription {
    /// Job description text
    #[arg(long, conflicts_with = "jd_file")]
    pub jd: Option<String>,
    /// Read the job description from a file
    #[arg(long)]
    pub jd_file: Option<PathBuf>,
}

impl JobDescription {
    pub async fn resolve(&self) -> Result<String> {
        match (&self.jd, &self.jd_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => FsOps::read_file_safe(path).await,
            (None, None) => Ok(String::new()),
        }
    }
}

fn parse_pair(value: &str, separator: char) -> Result<(f64, f64), String> {
    let (a, b) = value
        .split_once(separator)
        .ok_or_else(|| format!("expected two numbers separated by '{}'", separator))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid number '{}': {}", s, e))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_point(value: &str) -> Result<Point, String> {
    parse_pair(value, ',').map(|(x, y)| Point::new(x, y))
}

fn parse_size(value: &str) -> Result<Size, String> {
    parse_pair(&value.to_lowercase(), 'x').map(|(w, h)| Size::new(w, h))
}

/// Print the page error and turn it into a failing exit.
fn check(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => {
            eprintln!("❌ {}", message);
            Err(anyhow!(message.to_string()))
        }
        None => Ok(()),
    }
}

/// Fail when the page's upload control turned the file down.
fn ensure_selected(file_name: Option<&str>, path: &Path) -> Result<()> {
    if file_name.is_none() {
        bail!("Unsupported file type: {}", path.display());
    }
    Ok(())
}

async fn load(path: &Path) -> Result<UploadFile> {
    UploadFile::from_path(path)
        .await
        .with_context(|| format!("Cannot load {}", path.display()))
}

pub async fn handle_command(command: Command, config: ConfigManager) -> Result<()> {
    let api = ApiClient::new(&config.service)?;
    info!("Using backend at {}", api.base_url());

    match command {
        Command::Analyze { file } => {
            let mut page = ResumePage::new(api, None);
            page.set_mode(Mode::Analyze);
            page.handle_upload(UploadEvent::Pick(load(&file).await?))
                .await;
            ensure_selected(page.state().file_name.as_deref(), &file)?;
            check(page.error())?;
            if let Some(resume) = page.resume() {
                println!("{}", ExtractionView::new(resume));
            }
        }

        Command::Match { file, jd } => {
            let mut page = ResumePage::new(api, None);
            page.set_mode(Mode::Match);
            page.handle_upload(UploadEvent::Pick(load(&file).await?))
                .await;
            ensure_selected(page.state().file_name.as_deref(), &file)?;
            page.set_job_description(jd.resolve().await?);
            page.run_match().await;
            check(page.error())?;

            if let Some(resume) = page.resume() {
                println!("{}\n", ExtractionView::new(resume));
            }
            if let Some(result) = page.match_result() {
                println!("{}", MatchScoreView::from_match_result(result));
            }
        }

        Command::Saliency {
            file,
            api_key,
            hover,
            display,
            render,
        } => {
            let mut page = ResumePage::new(api, config.service.google_api_key.clone());
            page.set_mode(Mode::Saliency);
            if let Some(key) = api_key {
                page.set_api_key(key);
            }
            page.handle_upload(UploadEvent::Pick(load(&file).await?))
                .await;
            ensure_selected(page.state().file_name.as_deref(), &file)?;
            check(page.error())?;

            let Some(viewer) = page.heatmap_mut() else {
                bail!("Backend returned no heatmap");
            };
            println!("{}", viewer);
            for (label, colors) in LEGEND {
                println!("  {}: {}", label, colors);
            }

            if let Some(pointer) = hover {
                let display = display
                    .or(viewer.surface_size())
                    .unwrap_or(Size::new(0.0, 0.0));
                viewer.pointer_move(pointer, display);
                match viewer.tooltip() {
                    Some(tooltip) => println!("\n{}", tooltip),
                    None => println!("\nNo attention zone under the pointer"),
                }
            }

            if let Some(path) = render {
                viewer.write_png(&path)?;
                println!("🖼  Heatmap saved to {}", path.display());
            }
        }

        Command::Workbench {
            file,
            jd,
            suggest,
            export,
        } => {
            let mut page = WorkbenchPage::new(api);
            page.set_job_description(jd.resolve().await?);
            page.handle_upload(UploadEvent::Pick(load(&file).await?))
                .await;
            ensure_selected(page.state().file_name.as_deref(), &file)?;

            if let Some(record) = page.extracted() {
                println!("{}\n", ExtractionView::new(record));
            }
            if let Some(analytics) = &page.state().analytics {
                println!("{}\n", AnalyticsView::new(&analytics.summary, None));
            }
            check(page.error())?;

            if !page.state().job_description.trim().is_empty() {
                page.run_match().await;
                if let Some(keyword) = &page.state().keyword_match {
                    let view =
                        MatchScoreView::from_keyword(keyword, page.state().semantic_match.as_ref());
                    println!("{}\n", view);
                }
                check(page.error())?;
            }

            if suggest {
                page.run_suggest().await;
                check(page.error())?;
                if let Some(suggestion) = &page.state().suggestion {
                    println!("{}\n", SuggestionView::new(suggestion));
                }
            }

            for format in export {
                let saved = page.export(format, &config.output_path).await;
                check(page.error())?;
                if let Some(path) = saved {
                    println!("💾 Exported {}", path.display());
                }
            }
        }

        Command::Bulk {
            files,
            anonymize,
            export,
        } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(load(path).await?);
            }

            let mut page = BulkPage::new(api);
            page.set_anonymize(anonymize);
            page.set_files(uploads);
            if page.state().file_names.is_empty() {
                bail!("None of the given files is a supported resume format");
            }
            page.run().await;

            if let Some(parsed) = &page.state().parsed {
                println!("Parsed {} resumes", parsed.results.len());
                for result in &parsed.results {
                    println!("  {} ({} skills)", result.filename, result.skills.len());
                }
            }
            if let Some(analytics) = &page.state().analytics {
                println!(
                    "\n{}",
                    AnalyticsView::new(&analytics.summary, Some(&analytics.charts))
                );
            }
            check(page.error())?;

            if let Some(format) = export {
                let saved = page.export(format, &config.output_path).await;
                check(page.error())?;
                if let Some(path) = saved {
                    println!("💾 Exported {}", path.display());
                }
            }
        }
    }

    Ok(())
}
