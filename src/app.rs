use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use reqwest::Client;
use serde::Serialize;

use crate::{
    classifier::{ClassificationBridge, ClassifierClient},
    config::AppConfig,
    overlay::{artifact, report, tooltip, Badge, LayoutSnapshot, PlacedTooltip},
    page::{Page, PageFetcher},
    scan::{ScanOutput, Scanner},
};

#[derive(Debug, Parser)]
#[command(name = "toxscan", about = "Scan a rendered page for toxic comments")]
pub struct Cli {
    /// Page to scan: an http(s) URL or a local HTML file.
    pub input: Option<String>,

    /// Toxicity threshold in [0, 1]. Defaults to the configured value.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Where the annotated page is written.
    #[arg(long, default_value = "toxscan-annotated.html")]
    pub out: PathBuf,

    /// Optional machine-readable JSON report.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Layout snapshot (viewport + per-index element rects) used to plan
    /// tooltip placements in the JSON report.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Probe the classification service and exit.
    #[arg(long)]
    pub check_health: bool,

    /// Re-emit the page without any annotations instead of scanning.
    #[arg(long)]
    pub clear: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    source: Option<String>,
    platform: String,
    session: &'a crate::domain::ScanSession,
    category_breakdown: Vec<report::CategoryStat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip_plan: Option<Vec<PlacedTooltip>>,
}

pub struct ToxScanApp {
    config: AppConfig,
    fetcher: PageFetcher,
    classifier: Arc<ClassifierClient>,
    scanner: Scanner,
}

impl ToxScanApp {
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("toxscan/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let fetcher = PageFetcher::new(http.clone(), config.fetch.clone());
        let classifier = Arc::new(ClassifierClient::new(http, config.classifier.clone()));
        let scanner = Scanner::new(classifier.clone(), &config.scan);

        Ok(Self {
            config,
            fetcher,
            classifier,
            scanner,
        })
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        if cli.check_health {
            return self.check_health().await;
        }

        let input = cli
            .input
            .as_deref()
            .context("an input URL or HTML file is required (see --help)")?;
        let page = self.load_page(input).await?;

        if cli.clear {
            let html = artifact::render_clean(&page);
            tokio::fs::write(&cli.out, html)
                .await
                .with_context(|| format!("failed to write {}", cli.out.display()))?;
            tracing::info!(out = %cli.out.display(), "page re-emitted without annotations");
            return Ok(());
        }

        let threshold = cli
            .threshold
            .unwrap_or(self.config.scan.default_threshold)
            .clamp(0.0, 1.0);
        let output = self.scanner.scan(&page, threshold).await?;

        let html =
            artifact::render_annotated(&page, &output.annotations, &output.session, self.config.theme);
        tokio::fs::write(&cli.out, html)
            .await
            .with_context(|| format!("failed to write {}", cli.out.display()))?;

        match Badge::from_session(&output.session) {
            Some(badge) => tracing::info!(
                out = %cli.out.display(),
                total = output.session.total_comments,
                "{}",
                badge.label()
            ),
            None => tracing::info!(
                out = %cli.out.display(),
                total = output.session.total_comments,
                "no toxic comments found"
            ),
        }

        if let Some(report_path) = &cli.report {
            let json = self.build_report(&page, &output, cli.layout.as_deref()).await?;
            tokio::fs::write(report_path, json)
                .await
                .with_context(|| format!("failed to write {}", report_path.display()))?;
            tracing::info!(report = %report_path.display(), "report written");
        }

        Ok(())
    }

    async fn check_health(&self) -> Result<()> {
        let healthy = self.classifier.health().await?;
        if healthy {
            tracing::info!(base = %self.config.classifier.base_url, "classification service online");
            Ok(())
        } else {
            anyhow::bail!(
                "classification service at {} is not reporting healthy",
                self.config.classifier.base_url
            )
        }
    }

    async fn load_page(&self, input: &str) -> Result<Page> {
        if input.starts_with("http://") || input.starts_with("https://") {
            self.fetcher.fetch(input).await
        } else {
            let raw = tokio::fs::read_to_string(input)
                .await
                .with_context(|| format!("failed to read {input}"))?;
            Ok(Page::parse(&raw, None))
        }
    }

    async fn build_report(
        &self,
        page: &Page,
        output: &ScanOutput,
        layout: Option<&std::path::Path>,
    ) -> Result<String> {
        let tooltip_plan = match layout {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read layout snapshot {}", path.display()))?;
                let snapshot: LayoutSnapshot = serde_json::from_str(&raw)
                    .with_context(|| format!("invalid layout snapshot {}", path.display()))?;
                Some(tooltip::plan(&output.annotations, &snapshot))
            }
            None => None,
        };

        let report = JsonReport {
            generated_at: Utc::now(),
            source: page.source().map(|u| u.to_string()),
            platform: output.platform.to_string(),
            session: &output.session,
            category_breakdown: report::category_breakdown(&output.session),
            tooltip_plan,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
