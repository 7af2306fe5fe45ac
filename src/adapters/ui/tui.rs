//! Implements InputPort. Inquire-based interactive dashboard.
//!
//! Main menu -> list panel -> item detail. Picking an item records it as the panel's
//! selection; the AI Deep Dive reads selections back through the dashboard port.

use crate::domain::{AnalysisMode, DomainError, ItemQuery, ItemSource};
use crate::ports::{AnalysisView, DashboardPort, InputPort, ItemDetailView, ItemsView};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const LIST_PAGE_SIZE: usize = 15;
const TITLE_WIDTH: usize = 80;

/// Applies the prompt theme globally. Call once before the first prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("★").with_fg(Color::LightRed))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(Color::LightBlue));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainAction {
    Bills,
    Orders,
    Cases,
    DeepDive,
    Search,
    Quit,
}

impl MainAction {
    const ALL: [MainAction; 6] = [
        MainAction::Bills,
        MainAction::Orders,
        MainAction::Cases,
        MainAction::DeepDive,
        MainAction::Search,
        MainAction::Quit,
    ];
}

impl fmt::Display for MainAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MainAction::Bills => "Proposed Laws",
            MainAction::Orders => "Executive Orders",
            MainAction::Cases => "Supreme Court Cases",
            MainAction::DeepDive => "AI Deep Dive",
            MainAction::Search => "Search",
            MainAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
struct ItemOption {
    id: String,
    label: String,
}

impl fmt::Display for ItemOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, Copy)]
struct SourceOption(ItemSource);

impl fmt::Display for SourceOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

#[derive(Debug, Clone, Copy)]
struct ModeOption(AnalysisMode);

impl fmt::Display for ModeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.0 {
            AnalysisMode::Impact => "Impact summary",
            AnalysisMode::Sentiment => "Public sentiment",
            AnalysisMode::Constitution => "Constitutional risk",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
struct SelectedOption {
    source: ItemSource,
    item_id: String,
}

impl fmt::Display for SelectedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.label(), self.item_id)
    }
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// `Ok(None)` when the user backs out with Esc or Ctrl-C.
fn prompt_or_back<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Ten-cell meter. The bar clamps to 1..=10; the printed number is the score as given.
pub fn render_risk_meter(score: i64) -> String {
    let filled = score.clamp(1, 10) as usize;
    let level = match filled {
        1..=3 => "LOW",
        4..=6 => "MODERATE",
        _ => "HIGH",
    };
    format!(
        "Risk [{}{}] {}/10 {}",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        score,
        level
    )
}

fn print_detail(view: &ItemDetailView) {
    let item = &view.item;
    println!();
    println!("{}", item.title);
    println!("  {} · {}", item.id, item.status_text);
    if let Some(url) = &item.url {
        println!("  {}", url);
    }
    if let Some(details) = &view.details {
        if let Some(party) = &details.sponsor_party {
            println!("  Sponsor party: {}", party);
        }
        if !details.floor_votes.is_empty() {
            println!("  Floor votes:");
            for vote in &details.floor_votes {
                println!("    - {}", vote);
            }
        }
        if let Some(summary) = &details.summary {
            println!("\n{}", summary);
        } else {
            println!("\n{}", item.body_text);
        }
    } else {
        println!("\n{}", item.body_text);
    }
    println!();
}

fn print_analysis(mode: AnalysisMode, view: &AnalysisView) {
    println!();
    match view {
        AnalysisView::Pending { message } => println!("⏳ {}", message),
        AnalysisView::Failed { message } => println!("✖ {}", message),
        AnalysisView::Ready(result) => {
            if mode == AnalysisMode::Constitution {
                println!("{}", render_risk_meter(result.score.value()));
                if !result.score.is_extracted() {
                    println!("(no score in response; showing default)");
                }
                println!();
            }
            println!("{}", result.body);
        }
    }
    println!();
}

/// TUI adapter. Inquire prompts over the dashboard port.
pub struct TuiInputPort {
    dashboard: Arc<dyn DashboardPort>,
}

impl TuiInputPort {
    pub fn new(dashboard: Arc<dyn DashboardPort>) -> Self {
        Self { dashboard }
    }

    async fn load(&self, source: ItemSource, query: &ItemQuery) -> ItemsView {
        let pb = spinner(format!("Loading {}...", source.label()));
        let view = match source {
            ItemSource::Legislation => self.dashboard.get_bills_view(query).await,
            ItemSource::ExecutiveOrder => self.dashboard.get_orders_view(query).await,
            ItemSource::CourtCase => self.dashboard.get_cases_view(query).await,
        };
        pb.finish_and_clear();
        view
    }

    async fn browse(&self, source: ItemSource, query: ItemQuery) -> Result<(), DomainError> {
        let view = self.load(source, &query).await;
        if let Some(warning) = &view.warning {
            println!("⚠ {}", warning);
        }
        if view.items.is_empty() {
            println!("No {} found.", source.label());
            return Ok(());
        }

        let options: Vec<ItemOption> = view
            .items
            .iter()
            .map(|i| ItemOption {
                id: i.id.clone(),
                label: format!("{:<12} {}", i.id, truncate(&i.title, TITLE_WIDTH)),
            })
            .collect();

        loop {
            let picked = prompt_or_back(
                Select::new(source.label(), options.clone())
                    .with_page_size(LIST_PAGE_SIZE)
                    .with_help_message("↑↓ to move, enter to open, esc to go back")
                    .prompt(),
            )?;
            let Some(picked) = picked else {
                return Ok(());
            };
            self.dashboard.set_selection(source.panel(), &picked.id);
            let detail = self.dashboard.get_item_detail(&picked.id).await?;
            print_detail(&detail);
        }
    }

    async fn search(&self) -> Result<(), DomainError> {
        let Some(term) = prompt_or_back(Text::new("Search term:").prompt())? else {
            return Ok(());
        };
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }
        let sources: Vec<SourceOption> = ItemSource::ALL.iter().copied().map(SourceOption).collect();
        let Some(SourceOption(source)) =
            prompt_or_back(Select::new("Search in", sources).prompt())?
        else {
            return Ok(());
        };
        self.browse(source, ItemQuery::search(term)).await
    }

    async fn deep_dive(&self) -> Result<(), DomainError> {
        let selected: Vec<SelectedOption> = ItemSource::ALL
            .iter()
            .filter_map(|&source| {
                self.dashboard
                    .get_selection(source.panel())
                    .map(|item_id| SelectedOption { source, item_id })
            })
            .collect();

        let target = match selected.len() {
            0 => {
                println!("Open an item in one of the panels first.");
                return Ok(());
            }
            1 => selected.into_iter().next(),
            _ => prompt_or_back(Select::new("Analyze which selection?", selected).prompt())?,
        };
        let Some(target) = target else {
            return Ok(());
        };

        let modes: Vec<ModeOption> = AnalysisMode::ALL.iter().copied().map(ModeOption).collect();
        let Some(ModeOption(mode)) = prompt_or_back(Select::new("Analysis mode", modes).prompt())?
        else {
            return Ok(());
        };

        let pb = spinner(format!("Analyzing {} ({})...", target.item_id, mode));
        let view = self
            .dashboard
            .get_item_analysis(&target.item_id, mode)
            .await;
        pb.finish_and_clear();
        print_analysis(mode, &view?);
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let Some(action) = prompt_or_back(
                Select::new("Policy Tracker", MainAction::ALL.to_vec()).prompt(),
            )?
            else {
                return Ok(());
            };

            let outcome = match action {
                MainAction::Bills => self.browse(ItemSource::Legislation, ItemQuery::latest()).await,
                MainAction::Orders => {
                    self.browse(ItemSource::ExecutiveOrder, ItemQuery::latest())
                        .await
                }
                MainAction::Cases => self.browse(ItemSource::CourtCase, ItemQuery::latest()).await,
                MainAction::DeepDive => self.deep_dive().await,
                MainAction::Search => self.search().await,
                MainAction::Quit => return Ok(()),
            };

            match outcome {
                Err(e @ DomainError::Ui(_)) => return Err(e),
                Err(e) => {
                    warn!(error = %e, "dashboard action failed");
                    println!("Error: {}", e);
                }
                Ok(()) => {}
            }
        }
    }
}
