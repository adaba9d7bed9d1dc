use chrono::NaiveDate;

use crate::{
    Config, FetchError, PageKind, PollError, PollState, SlotSet, WeatherSource,
    ui::{
        Dispatch, EventKind, Navigation, Node, NodeId, Notice, Selector, UiTree, add_toast_control,
        toast_for,
    },
};

use super::{SharedSlots, WeatherPage};

/// Where the call-to-action button leads.
pub const CTA_TARGET: &str = "/coordination";

/// Current weather, tomorrow preview and the server's outfit text.
#[derive(Debug)]
pub struct HomePage<S> {
    weather: WeatherPage<S>,
    tree: UiTree,
    body: NodeId,
    cta_button: NodeId,
    pending: Option<Navigation>,
    notices: Vec<Notice>,
}

impl<S: WeatherSource + 'static> HomePage<S> {
    pub fn new(source: S, config: &Config) -> Self {
        let mut tree = UiTree::new();
        let body = tree.insert(None, Node::new("body"));
        let cta_button = tree.insert(
            Some(body),
            Node::new("button").attr("id", "ctaBtn").attr("data-href", CTA_TARGET),
        );
        Self {
            weather: WeatherPage::new(source, PageKind::Home, config.city_label()),
            tree,
            body,
            cta_button,
            pending: None,
            notices: Vec::new(),
        }
    }

    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    pub fn cta_button(&self) -> NodeId {
        self.cta_button
    }

    /// Register a control that shows `message` as a toast.
    pub fn add_toast_control(&mut self, message: &str) -> NodeId {
        add_toast_control(&mut self.tree, self.body, message)
    }

    /// Navigation requested by the last handled click, if any.
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.pending.take()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
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

    pub fn cta(&self) -> Navigation {
        Navigation(CTA_TARGET.to_string())
    }
}

impl<S: WeatherSource + 'static> Dispatch for HomePage<S> {
    fn dispatch(&mut self, event: EventKind, target: NodeId) -> bool {
        if event != EventKind::Click {
            return false;
        }

        let toast = toast_for(&self.tree, target);
        let toasted = toast.is_some();
        self.notices.extend(toast);

        let href = self
            .tree
            .closest(target, Selector::Attr("data-href"))
            .and_then(|link| self.tree.attr(link, "data-href"));
        match href {
            Some(href) => {
                self.pending = Some(Navigation(href.to_string()));
                true
            }
            None => toasted,
        }
    }
}
