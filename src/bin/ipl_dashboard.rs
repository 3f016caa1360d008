//! IPL Dashboard - Graphical User Interface
//!
//! Sidebar filters (team, venue, top-N sliders) over the aggregated tables,
//! with the filtered tables and horizontal bar charts in the main panel.

use ipl_dashboard::chart::{self, BarChart};
use ipl_dashboard::config::DashboardConfig;
use ipl_dashboard::selection::{TOP_N_MAX, TOP_N_MIN};
use ipl_dashboard::{load_aggregates, Aggregates, FilteredView, Selection, TopN};
use iced::widget::{
    button, column, container, pick_list, progress_bar, row, rule, scrollable, slider, text,
    text_input,
};
use iced::{Center, Color, Element, Fill, Task, Theme};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> iced::Result {
    env_logger::init();
    iced::application(App::new, App::update, App::view)
        .theme(App::theme)
        .centered()
        .run()
}

// ============================================================================
// App State
// ============================================================================

#[derive(Debug, Clone)]
enum LoadState {
    Loading,
    Failed(String),
    Ready(Arc<Aggregates>),
}

struct App {
    config: DashboardConfig,
    dataset: String,
    state: LoadState,
    selection: Selection,
    team_options: Vec<String>,
    venue_options: Vec<String>,
}

impl App {
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn new() -> (Self, Task<Message>) {
        let config = DashboardConfig::load();
        let selection = Selection {
            top_batters: config.top_batters,
            top_bowlers: config.top_bowlers,
            ..Default::default()
        };
        let app = App {
            dataset: config.dataset.display().to_string(),
            config,
            state: LoadState::Loading,
            selection,
            team_options: Vec::new(),
            venue_options: Vec::new(),
        };
        let task = app.load_task();
        (app, task)
    }

    /// Load the dataset and run the pipeline off the UI update path.
    ///
    /// Rankings are computed to the slider maximum so every slider position
    /// only slices an existing table.
    fn load_task(&self) -> Task<Message> {
        Task::perform(
            load_in_background(PathBuf::from(&self.dataset)),
            Message::Loaded,
        )
    }

    fn save_config(&mut self) {
        self.config.dataset = PathBuf::from(&self.dataset);
        self.config.top_batters = self.selection.top_batters;
        self.config.top_bowlers = self.selection.top_bowlers;
        self.config.save();
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone)]
enum Message {
    // Dataset
    DatasetChanged(String),
    BrowseDataset,
    DatasetSelected(Option<PathBuf>),
    Reload,
    Loaded(Result<Arc<Aggregates>, String>),

    // Filters
    TeamSelected(String),
    VenueSelected(String),
    TopBattersChanged(u8),
    TopBowlersChanged(u8),
}

// ============================================================================
// Update
// ============================================================================

impl App {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // -- Dataset --
            Message::DatasetChanged(v) => {
                self.dataset = v;
                Task::none()
            }
            Message::BrowseDataset => Task::perform(
                async {
                    let file = rfd::AsyncFileDialog::new()
                        .set_title("Select deliveries CSV")
                        .add_filter("CSV files", &["csv"])
                        .pick_file()
                        .await;
                    file.map(|f| f.path().to_path_buf())
                },
                Message::DatasetSelected,
            ),
            Message::DatasetSelected(path) => match path {
                Some(p) => {
                    self.dataset = p.display().to_string();
                    self.state = LoadState::Loading;
                    self.load_task()
                }
                None => Task::none(),
            },
            Message::Reload => {
                self.state = LoadState::Loading;
                self.load_task()
            }
            Message::Loaded(result) => {
                match result {
                    Ok(aggregates) => {
                        self.selection = self.selection.rebase(&aggregates);
                        self.team_options = aggregates.team_names();
                        self.venue_options = aggregates.venue_names();
                        self.state = LoadState::Ready(aggregates);
                        self.save_config();
                    }
                    Err(e) => {
                        log::error!("{}", e);
                        self.team_options.clear();
                        self.venue_options.clear();
                        self.state = LoadState::Failed(e);
                    }
                }
                Task::none()
            }

            // -- Filters --
            Message::TeamSelected(team) => {
                self.selection.team = Some(team);
                Task::none()
            }
            Message::VenueSelected(venue) => {
                self.selection.venue = Some(venue);
                Task::none()
            }
            Message::TopBattersChanged(n) => {
                self.selection.top_batters = TopN::clamped(n as usize);
                self.save_config();
                Task::none()
            }
            Message::TopBowlersChanged(n) => {
                self.selection.top_bowlers = TopN::clamped(n as usize);
                self.save_config();
                Task::none()
            }
        }
    }
}

// ============================================================================
// View
// ============================================================================

impl App {
    fn view(&self) -> Element<'_, Message> {
        let main: Element<'_, Message> = match &self.state {
            LoadState::Loading => container(text("Loading dataset...").size(16))
                .padding(20)
                .into(),
            LoadState::Failed(e) => self.view_error(e),
            LoadState::Ready(aggregates) => self.view_dashboard(aggregates),
        };

        row![
            container(self.view_sidebar()).padding(20).width(300),
            rule::vertical(1),
            container(main).padding(20).width(Fill).height(Fill),
        ]
        .into()
    }

    fn view_sidebar(&self) -> Element<'_, Message> {
        let loading = matches!(self.state, LoadState::Loading);

        let dataset = column![
            text("Dataset").size(16),
            text_input("Path to deliveries CSV...", &self.dataset)
                .on_input_maybe(if loading {
                    None
                } else {
                    Some(Message::DatasetChanged)
                })
                .on_submit(Message::Reload),
            row![
                button(text("Browse").size(13)).on_press_maybe(if loading {
                    None
                } else {
                    Some(Message::BrowseDataset)
                }),
                button(text("Reload").size(13)).on_press_maybe(if loading {
                    None
                } else {
                    Some(Message::Reload)
                }),
            ]
            .spacing(10),
        ]
        .spacing(8);

        let filters = column![
            text("Filters").size(20),
            text("Select Team").size(13),
            pick_list(
                self.team_options.as_slice(),
                self.selection.team.clone(),
                Message::TeamSelected,
            )
            .placeholder("No teams")
            .width(Fill),
            text("Select Venue").size(13),
            pick_list(
                self.venue_options.as_slice(),
                self.selection.venue.clone(),
                Message::VenueSelected,
            )
            .placeholder("No venues")
            .width(Fill),
        ]
        .spacing(8);

        let top_performers = column![
            text("Top Performers").size(16),
            text(format!("Number of Top Batters: {}", self.selection.top_batters)).size(13),
            slider(
                TOP_N_MIN..=TOP_N_MAX,
                self.selection.top_batters.as_u8(),
                Message::TopBattersChanged,
            ),
            text(format!("Number of Top Bowlers: {}", self.selection.top_bowlers)).size(13),
            slider(
                TOP_N_MIN..=TOP_N_MAX,
                self.selection.top_bowlers.as_u8(),
                Message::TopBowlersChanged,
            ),
        ]
        .spacing(8);

        column![
            dataset,
            rule::horizontal(1),
            filters,
            rule::horizontal(1),
            top_performers
        ]
        .spacing(16)
        .into()
    }

    fn view_error<'a>(&self, error: &'a str) -> Element<'a, Message> {
        column![
            text("IPL 2024 Analysis Dashboard").size(28),
            text("The dataset could not be loaded.").size(16),
            container(
                text(error)
                    .size(14)
                    .font(iced::Font::MONOSPACE)
                    .color(Color::from_rgb(1.0, 0.45, 0.45))
            )
            .padding(8),
            text("Fix the file or pick another one, then press Reload.").size(13),
        ]
        .spacing(12)
        .into()
    }

    fn view_dashboard<'a>(&'a self, aggregates: &'a Aggregates) -> Element<'a, Message> {
        let view = self.selection.apply(aggregates);

        let team_rows: Vec<[String; 3]> = view
            .team
            .iter()
            .map(|t| {
                [
                    t.team.clone(),
                    t.total_runs.to_string(),
                    t.total_wickets.to_string(),
                ]
            })
            .collect();
        let venue_rows: Vec<[String; 3]> = view
            .venue
            .iter()
            .map(|v| {
                [
                    v.venue.clone(),
                    v.total_runs.to_string(),
                    v.total_wickets.to_string(),
                ]
            })
            .collect();

        let mut items: Vec<Element<'a, Message>> = vec![
            text("IPL 2024 Analysis Dashboard").size(28).into(),
            section_header("Team Performance"),
            data_table(["Team", "Total Runs", "Total Wickets"], team_rows),
            section_header("Venue Performance"),
            data_table(["Venue", "Total Runs", "Total Wickets"], venue_rows),
            section_header("Top Performers"),
            row![
                column![
                    text("Top Batters").size(16),
                    ranking_table("Batter", "Total Runs", batter_rows(&view)),
                ]
                .spacing(6)
                .width(Fill),
                column![
                    text("Top Bowlers").size(16),
                    ranking_table("Bowler", "Total Wickets", bowler_rows(&view)),
                ]
                .spacing(6)
                .width(Fill),
            ]
            .spacing(20)
            .into(),
            section_header("Visualizations"),
        ];

        for c in chart::dashboard_charts(aggregates, &view) {
            items.push(bar_chart(c));
        }

        scrollable(column(items).spacing(14).padding([0, 16]))
            .height(Fill)
            .into()
    }
}

// ============================================================================
// Helper widgets
// ============================================================================

fn batter_rows(view: &FilteredView<'_>) -> Vec<(String, u64)> {
    view.batters
        .iter()
        .map(|b| (b.striker.clone(), b.total_runs))
        .collect()
}

fn bowler_rows(view: &FilteredView<'_>) -> Vec<(String, u64)> {
    view.bowlers
        .iter()
        .map(|b| (b.bowler.clone(), b.total_wickets))
        .collect()
}

fn section_header<'a>(label: &'a str) -> Element<'a, Message> {
    column![text(label).size(20), rule::horizontal(1)]
        .spacing(4)
        .into()
}

/// Render a three-column read-only table: name, then two numeric columns.
fn data_table<'a>(headers: [&'a str; 3], rows: Vec<[String; 3]>) -> Element<'a, Message> {
    let mut lines: Vec<Element<'a, Message>> = vec![
        row![
            text(headers[0]).size(13).width(Fill),
            text(headers[1]).size(13).width(120),
            text(headers[2]).size(13).width(120),
        ]
        .spacing(10)
        .into(),
        rule::horizontal(1).into(),
    ];

    if rows.is_empty() {
        lines.push(text("-- no matching row --").size(13).color(muted()).into());
    }
    for [name, runs, wickets] in rows {
        lines.push(
            row![
                text(name).size(13).width(Fill),
                text(runs).size(13).width(120),
                text(wickets).size(13).width(120),
            ]
            .spacing(10)
            .align_y(Center)
            .into(),
        );
    }

    column(lines).spacing(4).width(Fill).into()
}

/// Render a ranked table: position, name, metric.
fn ranking_table<'a>(
    name_header: &'a str,
    value_header: &'a str,
    rows: Vec<(String, u64)>,
) -> Element<'a, Message> {
    let mut lines: Vec<Element<'a, Message>> = vec![
        row![
            text("#").size(13).width(30),
            text(name_header).size(13).width(Fill),
            text(value_header).size(13).width(110),
        ]
        .spacing(10)
        .into(),
        rule::horizontal(1).into(),
    ];

    if rows.is_empty() {
        lines.push(text("-- none --").size(13).color(muted()).into());
    }
    for (i, (name, value)) in rows.into_iter().enumerate() {
        lines.push(
            row![
                text((i + 1).to_string()).size(13).width(30),
                text(name).size(13).width(Fill),
                text(value.to_string()).size(13).width(110),
            ]
            .spacing(10)
            .into(),
        );
    }

    column(lines).spacing(4).width(Fill).into()
}

/// Render a horizontal bar chart; the selected bar uses the success style.
fn bar_chart<'a>(chart: BarChart) -> Element<'a, Message> {
    let max = chart.max_value().max(1) as f32;

    let mut lines: Vec<Element<'a, Message>> = vec![
        text(chart.title.clone()).size(16).into(),
        row![
            text(chart.category_label.clone())
                .size(12)
                .color(muted())
                .width(240),
            text(chart.value_label.clone()).size(12).color(muted()),
        ]
        .spacing(10)
        .into(),
    ];

    if chart.bars.is_empty() {
        lines.push(text("-- no data --").size(13).color(muted()).into());
    }
    for bar in &chart.bars {
        let mut bar_widget = progress_bar(0.0..=max, bar.value as f32);
        if chart.is_highlighted(bar) {
            bar_widget = bar_widget.style(progress_bar::success);
        }
        lines.push(
            row![
                text(bar.label.clone()).size(13).width(240),
                bar_widget,
                text(bar.value.to_string()).size(13).width(60),
            ]
            .spacing(10)
            .align_y(Center)
            .into(),
        );
    }

    column(lines).spacing(4).into()
}

fn muted() -> Color {
    Color::from_rgb(0.6, 0.6, 0.6)
}

// ============================================================================
// Background Loading
// ============================================================================

/// CSV parsing and aggregation are synchronous, so they run on the blocking pool
/// rather than on the executor thread that drives the UI.
async fn load_in_background(path: PathBuf) -> Result<Arc<Aggregates>, String> {
    tokio::task::spawn_blocking(move || load_aggregates(&path, TOP_N_MAX as usize))
        .await
        .map_err(|e| format!("Load task failed: {}", e))?
        .map(Arc::new)
        .map_err(|e| e.to_string())
}
