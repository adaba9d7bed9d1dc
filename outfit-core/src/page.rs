//! Page controllers. Each page owns its slots and timers, so several
//! independent instances can coexist.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use parking_lot::Mutex;

use crate::{
    FetchError, PageKind, PollError, PollLoop, PollState, SlotSet, WeatherSource,
    derive::derive_display, poll::Tick, render::render,
};

pub mod closet;
pub mod coordination;
pub mod home;
pub mod mypage;

pub use closet::ClosetPage;
pub use coordination::CoordinationPage;
pub use home::HomePage;
pub use mypage::MyPage;

pub type SharedSlots = Arc<Mutex<SlotSet>>;

/// fetch → derive → render for one page.
#[derive(Debug)]
pub struct WeatherPipeline<S> {
    source: S,
    page: PageKind,
    city_label: String,
    slots: SharedSlots,
}

impl<S: WeatherSource> WeatherPipeline<S> {
    pub fn new(source: S, page: PageKind, city_label: impl Into<String>, slots: SharedSlots) -> Self {
        Self { source, page, city_label: city_label.into(), slots }
    }

    /// One pass with an explicit "today". Returns the number of slots written.
    ///
    /// On failure nothing is written.
    pub async fn refresh_on(&self, today: NaiveDate) -> Result<usize, FetchError> {
        let payload = self.source.fetch().await?;
        let display = derive_display(&payload, today, &self.city_label, self.page);
        let written = render(&display, &mut self.slots.lock());
        tracing::debug!(page = %self.page, written, "rendered weather");
        Ok(written)
    }
}

#[async_trait]
impl<S: WeatherSource + 'static> Tick for WeatherPipeline<S> {
    async fn tick(&self) -> Result<(), FetchError> {
        self.refresh_on(Local::now().date_naive()).await.map(|_| ())
    }
}

/// Slots, pipeline and poll loop shared by the weather-showing pages.
#[derive(Debug)]
pub struct WeatherPage<S> {
    slots: SharedSlots,
    pipeline: Arc<WeatherPipeline<S>>,
    poll: PollLoop,
}

impl<S: WeatherSource + 'static> WeatherPage<S> {
    pub fn new(source: S, page: PageKind, city_label: &str) -> Self {
        let slots: SharedSlots = Arc::new(Mutex::new(SlotSet::for_page(page)));
        let pipeline = Arc::new(WeatherPipeline::new(source, page, city_label, slots.clone()));
        Self { slots, pipeline, poll: PollLoop::new() }
    }

    /// Page ready: load once now and then on every poll period.
    pub fn start(&mut self) -> Result<(), PollError> {
        self.poll.start(self.pipeline.clone())
    }

    pub async fn stop(&mut self) {
        self.poll.stop().await;
    }

    pub fn poll_state(&self) -> PollState {
        self.poll.state()
    }

    /// A single refresh outside the timer.
    pub async fn refresh(&self) -> Result<usize, FetchError> {
        self.pipeline.refresh_on(Local::now().date_naive()).await
    }

    pub async fn refresh_on(&self, today: NaiveDate) -> Result<usize, FetchError> {
        self.pipeline.refresh_on(today).await
    }

    /// Copy of the current slot contents.
    pub fn snapshot(&self) -> SlotSet {
        self.slots.lock().clone()
    }

    pub fn shared_slots(&self) -> SharedSlots {
        self.slots.clone()
    }
}
