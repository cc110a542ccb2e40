//! Screen state: the controllers composed behind one front end
//!
//! `Screen` never touches the network. Operations that need a remote call
//! return the `BackendCommand` to dispatch, and `apply` routes each
//! `BackendEvent` to the controller that issued it.

use recos_client::ClientError;
use recos_core::{filter, CatalogItem, Completion, FilterCriteria, ItemId};
use tracing::debug;

use crate::analytics::AnalyticsController;
use crate::backend::{BackendCommand, BackendEvent};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::search::SearchController;
use crate::selection::SelectionController;

/// Filter fields exactly as the user typed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInputs {
    pub category: String,
    pub min_price: String,
    pub max_price: String,
}

impl FilterInputs {
    /// Criteria for the filter engine; blank or unreadable bounds are unset
    ///
    /// The category text is matched exactly as typed, surrounding spaces included.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            category_substring: self.category.clone(),
            min_price: parse_bound(&self.min_price),
            max_price: parse_bound(&self.max_price),
        }
    }
}

const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£', '¥'];

/// A signed number, ignoring currency symbols and thousands separators
fn parse_bound(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Global screen state
pub struct Screen {
    config: SessionConfig,
    search: SearchController,
    selection: SelectionController,
    analytics: AnalyticsController,
    filters: FilterInputs,
}

impl Screen {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            search: SearchController::new(config.default_query.clone()),
            selection: SelectionController::new(),
            analytics: AnalyticsController::new(),
            filters: FilterInputs::default(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn analytics(&self) -> &AnalyticsController {
        &self.analytics
    }

    pub fn filters(&self) -> &FilterInputs {
        &self.filters
    }

    /// Whether any operation is still waiting on the backend
    pub fn is_busy(&self) -> bool {
        self.search.is_loading() || self.selection.is_loading() || self.analytics.is_loading()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Called once by the host when the screen first appears
    pub fn activate(&mut self) -> Option<BackendCommand> {
        let ticket = self.search.activate()?;
        Some(BackendCommand::Search {
            ticket,
            limit: self.config.search_limit,
        })
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search.set_query(text);
    }

    pub fn run_search(&mut self) -> BackendCommand {
        BackendCommand::Search {
            ticket: self.search.run_search(),
            limit: self.config.search_limit,
        }
    }

    // ========================================================================
    // Local filtering
    // ========================================================================

    pub fn set_category_filter(&mut self, text: impl Into<String>) {
        self.filters.category = text.into();
    }

    pub fn set_min_price(&mut self, text: impl Into<String>) {
        self.filters.min_price = text.into();
    }

    pub fn set_max_price(&mut self, text: impl Into<String>) {
        self.filters.max_price = text.into();
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.filters.criteria()
    }

    /// Current results narrowed by the current filter inputs
    pub fn visible_results(&self) -> Vec<CatalogItem> {
        filter(self.search.results(), &self.criteria())
    }

    // ========================================================================
    // Selection and derived views
    // ========================================================================

    /// Select an item from the current results; false if it is not there
    pub fn select(&mut self, id: &ItemId) -> bool {
        match self.search.item(id) {
            Some(item) => {
                let item = item.clone();
                self.selection.select(item);
                true
            }
            None => {
                debug!("Ignoring selection of unknown item {}", id);
                false
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn request_recommendations(&mut self) -> Option<BackendCommand> {
        let ticket = self.selection.request_recommendations()?;
        Some(BackendCommand::Recommend {
            ticket,
            limit: self.config.recommend_limit,
        })
    }

    pub fn request_description(&mut self) -> Option<BackendCommand> {
        let ticket = self.selection.request_description()?;
        Some(BackendCommand::Generate { ticket })
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    pub fn open_analytics(&mut self) -> Option<BackendCommand> {
        let ticket = self.analytics.activate()?;
        Some(BackendCommand::AnalyticsSummary { ticket })
    }

    pub fn close_analytics(&mut self) {
        self.analytics.deactivate();
    }

    // ========================================================================
    // Backend events
    // ========================================================================

    /// Hand a finished request to the controller that issued it
    pub fn apply(&mut self, event: BackendEvent) -> Completion {
        match event {
            BackendEvent::SearchCompleted { ticket, result } => self.search.complete(&ticket, result),
            BackendEvent::RecommendationsCompleted { ticket, result } => {
                self.selection.complete_recommendations(&ticket, result)
            }
            BackendEvent::DescriptionCompleted { ticket, result } => {
                self.selection.complete_description(&ticket, result)
            }
            BackendEvent::AnalyticsCompleted { ticket, result } => {
                self.analytics.complete(&ticket, result)
            }
        }
    }

    /// Settle a command the worker refused, failing the controller that issued it
    pub fn abandon(&mut self, cmd: BackendCommand, reason: &SessionError) -> Completion {
        let error = ClientError::Transport(format!("Request not sent: {}", reason));
        self.apply(cmd.into_failure(error))
    }
}

#[cfg(test)]
mod tests {
    use recos_core::{AnalyticsSummary, Status};

    use super::*;
    use crate::display::{description_view, DescriptionView, GENERATION_FALLBACK};

    fn catalog() -> Vec<CatalogItem> {
        vec![
            CatalogItem::new("x").with_title("Oak Chair").with_categories("Home,Furniture").with_price("₹1,200"),
            CatalogItem::new("y").with_title("Desk Lamp").with_categories("Office").with_price("499"),
        ]
    }

    /// Complete the pending search command with `items`
    fn finish_search(screen: &mut Screen, cmd: BackendCommand, items: Vec<CatalogItem>) {
        let BackendCommand::Search { ticket, .. } = cmd else {
            panic!("expected a search command");
        };
        screen.apply(BackendEvent::SearchCompleted { ticket, result: Ok(items) });
    }

    fn loaded_screen() -> Screen {
        let mut screen = Screen::new(SessionConfig::default());
        let cmd = screen.activate().unwrap();
        finish_search(&mut screen, cmd, catalog());
        screen
    }

    #[test]
    fn test_activation_searches_default_query_once() {
        let mut screen = Screen::new(SessionConfig::default());
        let Some(BackendCommand::Search { ticket, limit }) = screen.activate() else {
            panic!("expected the initial search");
        };
        assert_eq!(ticket.query(), "modern wooden chair");
        assert_eq!(limit, 12);
        assert!(screen.activate().is_none());
        assert!(screen.is_busy());
    }

    #[test]
    fn test_filter_inputs_need_no_request() {
        let mut screen = loaded_screen();
        assert_eq!(screen.visible_results().len(), 2);

        screen.set_category_filter("FURN");
        let visible = screen.visible_results();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, ItemId::new("x"));

        screen.set_category_filter("");
        screen.set_max_price("500");
        assert_eq!(screen.visible_results()[0].id, ItemId::new("y"));

        screen.set_max_price("  ");
        assert_eq!(screen.criteria(), FilterCriteria::new());
        assert!(!screen.is_busy());
    }

    #[test]
    fn test_bound_text_parsing() {
        let inputs = FilterInputs {
            category: " lamp ".into(),
            min_price: "₹1,000".into(),
            max_price: "cheap".into(),
        };
        let criteria = inputs.criteria();
        assert_eq!(criteria.category_substring, " lamp ");
        assert_eq!(criteria.min_price, Some(1000.0));
        assert_eq!(criteria.max_price, None);

        assert_eq!(parse_bound(" -5 "), Some(-5.0));
        assert_eq!(parse_bound("$ 2,500.50"), Some(2500.5));
        assert_eq!(parse_bound("inf"), None);
        assert_eq!(parse_bound(""), None);
    }

    #[test]
    fn test_negative_max_hides_everything() {
        let mut screen = loaded_screen();
        screen.set_max_price("-5");
        assert_eq!(screen.criteria().max_price, Some(-5.0));
        assert!(screen.visible_results().is_empty());

        screen.set_max_price("₹1,000");
        let visible = screen.visible_results();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, ItemId::new("y"));
    }

    #[test]
    fn test_category_text_is_not_trimmed() {
        let mut screen = loaded_screen();
        screen.set_category_filter(" furniture");
        assert!(screen.visible_results().is_empty());

        screen.set_category_filter("furniture");
        assert_eq!(screen.visible_results().len(), 1);
    }

    #[test]
    fn test_select_copies_from_results() {
        let mut screen = loaded_screen();
        assert!(!screen.select(&ItemId::new("missing")));
        assert!(screen.selection().selected().is_none());

        assert!(screen.select(&ItemId::new("x")));

        // A refresh that no longer contains the item leaves the selection intact
        let cmd = screen.run_search();
        finish_search(&mut screen, cmd, vec![CatalogItem::new("z")]);
        assert_eq!(screen.selection().selected().unwrap().display_title(), "Oak Chair");
    }

    #[test]
    fn test_switching_selection_drops_late_derived_views() {
        let mut screen = loaded_screen();
        screen.select(&ItemId::new("x"));
        let Some(BackendCommand::Recommend { ticket: recs, limit }) = screen.request_recommendations() else {
            panic!("expected a recommend command");
        };
        assert_eq!(limit, 6);
        let Some(BackendCommand::Generate { ticket: desc }) = screen.request_description() else {
            panic!("expected a generate command");
        };

        screen.select(&ItemId::new("y"));

        let late_recs = screen.apply(BackendEvent::RecommendationsCompleted {
            ticket: recs,
            result: Ok(vec![CatalogItem::new("x-similar")]),
        });
        let late_desc = screen.apply(BackendEvent::DescriptionCompleted {
            ticket: desc,
            result: Ok("All about the oak chair".into()),
        });

        assert_eq!(late_recs, Completion::Stale);
        assert_eq!(late_desc, Completion::Stale);
        assert_eq!(screen.selection().recommendations().status(), Status::Idle);
        assert_eq!(description_view(screen.selection().description()), DescriptionView::Hidden);
    }

    #[test]
    fn test_generation_failure_leaves_recommendations() {
        let mut screen = loaded_screen();
        screen.select(&ItemId::new("x"));
        let Some(BackendCommand::Recommend { ticket: recs, .. }) = screen.request_recommendations() else {
            panic!("expected a recommend command");
        };
        let Some(BackendCommand::Generate { ticket: desc }) = screen.request_description() else {
            panic!("expected a generate command");
        };

        screen.apply(BackendEvent::RecommendationsCompleted {
            ticket: recs,
            result: Ok(vec![CatalogItem::new("r1"), CatalogItem::new("r2")]),
        });
        screen.apply(BackendEvent::DescriptionCompleted {
            ticket: desc,
            result: Err(ClientError::Transport("connection reset".into())),
        });

        assert_eq!(screen.selection().recommendations().data().len(), 2);
        assert_eq!(
            description_view(screen.selection().description()),
            DescriptionView::Text(GENERATION_FALLBACK)
        );
        assert_eq!(screen.search().results().len(), 2);
    }

    #[test]
    fn test_search_error_keeps_results_and_selection() {
        let mut screen = loaded_screen();
        screen.select(&ItemId::new("y"));

        let cmd = screen.run_search();
        let BackendCommand::Search { ticket, .. } = cmd else {
            panic!("expected a search command");
        };
        screen.apply(BackendEvent::SearchCompleted {
            ticket,
            result: Err(ClientError::Transport("unreachable".into())),
        });

        assert_eq!(screen.search().status(), Status::Error);
        assert_eq!(screen.visible_results().len(), 2);
        assert!(screen.selection().selected().is_some());
    }

    #[test]
    fn test_abandoned_commands_do_not_stay_loading() {
        let mut screen = loaded_screen();
        let search = screen.run_search();
        assert!(screen.is_busy());
        assert_eq!(screen.abandon(search, &SessionError::QueueFull), Completion::Applied);
        assert_eq!(screen.search().status(), Status::Error);
        assert_eq!(screen.search().error(), Some("Network error: Request not sent: Background queue is full"));
        assert_eq!(screen.visible_results().len(), 2);

        screen.select(&ItemId::new("x"));
        let recs = screen.request_recommendations().unwrap();
        let desc = screen.request_description().unwrap();
        let analytics = screen.open_analytics().unwrap();
        assert!(screen.is_busy());

        screen.abandon(recs, &SessionError::Disconnected);
        screen.abandon(desc, &SessionError::Disconnected);
        screen.abandon(analytics, &SessionError::Disconnected);
        assert!(!screen.is_busy());
        assert_eq!(screen.selection().recommendations().status(), Status::Error);
        assert_eq!(screen.analytics().status(), Status::Error);
    }

    #[test]
    fn test_analytics_view() {
        let mut screen = Screen::new(SessionConfig::default());
        let Some(BackendCommand::AnalyticsSummary { ticket }) = screen.open_analytics() else {
            panic!("expected an analytics command");
        };
        assert!(screen.open_analytics().is_none());

        screen.apply(BackendEvent::AnalyticsCompleted {
            ticket,
            result: Ok(AnalyticsSummary::default()),
        });
        assert_eq!(screen.analytics().histogram().map(<[_]>::len), Some(0));

        screen.close_analytics();
        assert!(screen.open_analytics().is_some());
    }
}
