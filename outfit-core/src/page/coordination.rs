use chrono::NaiveDate;

use crate::{
    Config, FetchError, OutfitItem, PageKind, PollError, PollState, SlotSet, WeatherSource,
    carousel::ItemCarousel,
    ui::{Dispatch, EventKind, Node, NodeId, Notice, Selector, UiTree, add_toast_control, toast_for},
};

use super::{SharedSlots, WeatherPage};

pub const SAVE_NOT_READY: &str = "즐겨찾기 저장 기능은 아직 준비 중이에요.";

/// Today/tomorrow comparison plus the item carousel.
#[derive(Debug)]
pub struct CoordinationPage<S> {
    weather: WeatherPage<S>,
    carousel: ItemCarousel,
    tree: UiTree,
    body: NodeId,
    more_button: NodeId,
    save_button: NodeId,
    notices: Vec<Notice>,
}

impl<S: WeatherSource + 'static> CoordinationPage<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self::with_carousel(source, config, ItemCarousel::default())
    }

    pub fn with_carousel(source: S, config: &Config, carousel: ItemCarousel) -> Self {
        let weather = WeatherPage::new(source, PageKind::Coordination, config.city_label());
        carousel.render(&mut weather.shared_slots().lock());

        let mut tree = UiTree::new();
        let body = tree.insert(None, Node::new("body"));
        let more_button = tree.insert(
            Some(body),
            Node::new("button").attr("id", "itemMoreBtn").attr("data-next-item", ""),
        );
        let save_button = tree.insert(
            Some(body),
            Node::new("button").attr("id", "saveBtn").attr("data-save-favorite", ""),
        );

        Self { weather, carousel, tree, body, more_button, save_button, notices: Vec::new() }
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// "Show another item" button.
    pub fn more_button(&self) -> NodeId {
        self.more_button
    }

    pub fn save_button(&self) -> NodeId {
        self.save_button
    }

    /// Register a control that shows `message` as a toast.
    pub fn add_toast_control(&mut self, message: &str) -> NodeId {
        add_toast_control(&mut self.tree, self.body, message)
    }

    pub fn start(&mut self) -> Result<(), PollError> {
        self.weather.start()
    }

    pub async fn stop(&mut self) {
        self.weather.stop().await
    }

    pub fn poll_state(&self) -> PollState {
        self.weather.poll_state()
    }

    pub async fn refresh(&self) -> Result<usize, FetchError> {
        self.weather.refresh().await
    }

    pub async fn refresh_on(&self, today: NaiveDate) -> Result<usize, FetchError> {
        self.weather.refresh_on(today).await
    }

    pub fn snapshot(&self) -> SlotSet {
        self.weather.snapshot()
    }

    pub fn shared_slots(&self) -> SharedSlots {
        self.weather.shared_slots()
    }

    /// "Show another item".
    pub fn next_item(&mut self) -> &'static OutfitItem {
        let item = self.carousel.next();
        self.carousel.render(&mut self.weather.shared_slots().lock());
        item
    }

    pub fn carousel(&self) -> &ItemCarousel {
        &self.carousel
    }

    /// Favorites are not persisted anywhere yet.
    pub fn save_favorite(&mut self) {
        self.notices.push(Notice::Alert(SAVE_NOT_READY.to_string()));
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl<S: WeatherSource + 'static> Dispatch for CoordinationPage<S> {
    fn dispatch(&mut self, event: EventKind, target: NodeId) -> bool {
        if event != EventKind::Click {
            return false;
        }

        let toast = toast_for(&self.tree, target);
        let toasted = toast.is_some();
        self.notices.extend(toast);

        if self.tree.closest(target, Selector::Attr("data-next-item")).is_some() {
            self.next_item();
            return true;
        }
        if self.tree.closest(target, Selector::Attr("data-save-favorite")).is_some() {
            self.save_favorite();
            return true;
        }
        toasted
    }
}
