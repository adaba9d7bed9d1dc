use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::Text;
use outfit_core::{
    Config, FetchError, HttpWeatherSource, PageKind, PollError, SlotSet,
    carousel::ItemCarousel,
    derive::classify_outfit,
    page::{CoordinationPage, HomePage},
    source::source_from_config,
};

/// How often `watch` checks the slots for changes to print.
const WATCH_REDRAW: Duration = Duration::from_secs(1);

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "outfit", version, about = "Weather-based outfit pages in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PageArg {
    Home,
    Coordination,
}

impl From<PageArg> for PageKind {
    fn from(value: PageArg) -> Self {
        match value {
            PageArg::Home => PageKind::Home,
            PageArg::Coordination => PageKind::Coordination,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the weather server origin and the city label.
    Configure,

    /// Fetch once and print the page.
    Show {
        #[arg(long, value_enum, default_value = "home")]
        page: PageArg,
    },

    /// Keep the page refreshed every five minutes until Ctrl-C.
    Watch {
        #[arg(long, value_enum, default_value = "home")]
        page: PageArg,
    },

    /// Print the outfit hint for given conditions.
    Hint {
        /// Temperature in Celsius.
        #[arg(long, allow_hyphen_values = true)]
        temp: f64,

        /// Probability of precipitation, percent.
        #[arg(long)]
        pop: Option<f64>,

        /// Condition text, e.g. "흐리고 비".
        #[arg(long)]
        cond: Option<String>,
    },

    /// Step through the item carousel.
    Items {
        #[arg(long, default_value_t = 3)]
        steps: usize,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { page } => {
                let page = AnyPage::open(page.into())?;
                page.refresh().await.context("Could not load weather")?;
                print!("{}", page.snapshot());
                Ok(())
            }
            Command::Watch { page } => watch(AnyPage::open(page.into())?).await,
            Command::Hint { temp, pop, cond } => {
                let hint = classify_outfit(temp, pop, cond.as_deref());
                println!("{}", hint.text());
                Ok(())
            }
            Command::Items { steps } => {
                let mut carousel = ItemCarousel::default();
                print_item(&carousel);
                for _ in 0..steps {
                    carousel.next();
                    print_item(&carousel);
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let base_url = Text::new("Weather server base URL:")
        .with_default(cfg.base_url())
        .prompt()
        .context("Base URL prompt was cancelled")?;
    cfg.set_base_url(&base_url)?;

    let city = Text::new("City label:")
        .with_default(cfg.city_label())
        .prompt()
        .context("City prompt was cancelled")?;
    cfg.set_city_label(&city);

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn watch(mut page: AnyPage) -> anyhow::Result<()> {
    page.start()?;

    let mut redraw = tokio::time::interval(WATCH_REDRAW);
    let mut last: Option<SlotSet> = None;
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                break;
            }
            _ = redraw.tick() => {
                let current = page.snapshot();
                if last.as_ref() != Some(&current) {
                    println!("--- {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                    print!("{current}");
                    last = Some(current);
                }
            }
        }
    }

    page.stop().await;
    Ok(())
}

fn print_item(carousel: &ItemCarousel) {
    let item = carousel.current();
    println!("[{}] {}", carousel.page_label(), item.name);
    println!("    {}", item.description);
}

/// The weather pages the CLI can drive.
enum AnyPage {
    Home(HomePage<HttpWeatherSource>),
    Coordination(CoordinationPage<HttpWeatherSource>),
}

impl AnyPage {
    fn open(kind: PageKind) -> anyhow::Result<Self> {
        let cfg = Config::load()?;
        let source = source_from_config(&cfg);
        tracing::debug!(endpoint = source.endpoint(), page = %kind, "opening page");
        Ok(match kind {
            PageKind::Home => AnyPage::Home(HomePage::new(source, &cfg)),
            PageKind::Coordination => AnyPage::Coordination(CoordinationPage::new(source, &cfg)),
        })
    }

    fn start(&mut self) -> Result<(), PollError> {
        match self {
            AnyPage::Home(p) => p.start(),
            AnyPage::Coordination(p) => p.start(),
        }
    }

    async fn stop(&mut self) {
        match self {
            AnyPage::Home(p) => p.stop().await,
            AnyPage::Coordination(p) => p.stop().await,
        }
    }

    async fn refresh(&self) -> Result<usize, FetchError> {
        match self {
            AnyPage::Home(p) => p.refresh().await,
            AnyPage::Coordination(p) => p.refresh().await,
        }
    }

    fn snapshot(&self) -> SlotSet {
        match self {
            AnyPage::Home(p) => p.snapshot(),
            AnyPage::Coordination(p) => p.snapshot(),
        }
    }
}
