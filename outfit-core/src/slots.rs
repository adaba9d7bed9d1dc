use std::{collections::BTreeMap, fmt};

/// Named display slot shared by the renderer and the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    CityText,
    DateText,
    TempText,
    FeelsText,
    HumText,
    WindText,
    PopText,
    CondText,
    WeatherIcon,
    TomorrowTempText,
    TomorrowCondText,
    TomorrowPopText,
    TomorrowTipText,
    OutfitText,
    AirTipText,
    TmrDateText,
    TmrTempText,
    TmrDeltaText,
    TmrHintText,
    TmrTrendText,
    ItemImg,
    ItemName,
    ItemDesc,
    ItemPageText,
    SliderHint,
    AvoidPills,
}

/// How a slot's content is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Text,
    Html,
    Image,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::CityText => "cityText",
            Slot::DateText => "dateText",
            Slot::TempText => "tempText",
            Slot::FeelsText => "feelsText",
            Slot::HumText => "humText",
            Slot::WindText => "windText",
            Slot::PopText => "popText",
            Slot::CondText => "condText",
            Slot::WeatherIcon => "weatherIcon",
            Slot::TomorrowTempText => "tomorrowTempText",
            Slot::TomorrowCondText => "tomorrowCondText",
            Slot::TomorrowPopText => "tomorrowPopText",
            Slot::TomorrowTipText => "tomorrowTipText",
            Slot::OutfitText => "outfitText",
            Slot::AirTipText => "airTipText",
            Slot::TmrDateText => "tmrDateText",
            Slot::TmrTempText => "tmrTempText",
            Slot::TmrDeltaText => "tmrDeltaText",
            Slot::TmrHintText => "tmrHintText",
            Slot::TmrTrendText => "tmrTrendText",
            Slot::ItemImg => "itemImg",
            Slot::ItemName => "itemName",
            Slot::ItemDesc => "itemDesc",
            Slot::ItemPageText => "itemPageText",
            Slot::SliderHint => "sliderHint",
            Slot::AvoidPills => "avoidPills",
        }
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::WeatherIcon | Slot::ItemImg => SlotKind::Image,
            Slot::OutfitText | Slot::AirTipText | Slot::TomorrowTipText | Slot::AvoidPills => {
                SlotKind::Html
            }
            _ => SlotKind::Text,
        }
    }

    pub const fn all() -> &'static [Slot] {
        &[
            Slot::CityText,
            Slot::DateText,
            Slot::TempText,
            Slot::FeelsText,
            Slot::HumText,
            Slot::WindText,
            Slot::PopText,
            Slot::CondText,
            Slot::WeatherIcon,
            Slot::TomorrowTempText,
            Slot::TomorrowCondText,
            Slot::TomorrowPopText,
            Slot::TomorrowTipText,
            Slot::OutfitText,
            Slot::AirTipText,
            Slot::TmrDateText,
            Slot::TmrTempText,
            Slot::TmrDeltaText,
            Slot::TmrHintText,
            Slot::TmrTrendText,
            Slot::ItemImg,
            Slot::ItemName,
            Slot::ItemDesc,
            Slot::ItemPageText,
            Slot::SliderHint,
            Slot::AvoidPills,
        ]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Slot {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Slot::all()
            .iter()
            .copied()
            .find(|slot| slot.as_str() == value)
            .ok_or_else(|| anyhow::anyhow!("Unknown slot '{value}'."))
    }
}

/// Pages that render weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Coordination,
}

impl PageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Coordination => "coordination",
        }
    }

    /// Slots present in this page's markup.
    pub fn slots(&self) -> &'static [Slot] {
        match self {
            PageKind::Home => &[
                Slot::CityText,
                Slot::TempText,
                Slot::FeelsText,
                Slot::HumText,
                Slot::WindText,
                Slot::PopText,
                Slot::CondText,
                Slot::WeatherIcon,
                Slot::AirTipText,
                Slot::TomorrowTempText,
                Slot::TomorrowCondText,
                Slot::TomorrowPopText,
                Slot::TomorrowTipText,
                Slot::OutfitText,
            ],
            PageKind::Coordination => &[
                Slot::CityText,
                Slot::DateText,
                Slot::TempText,
                Slot::FeelsText,
                Slot::HumText,
                Slot::WindText,
                Slot::PopText,
                Slot::TmrDateText,
                Slot::TmrTempText,
                Slot::TmrDeltaText,
                Slot::TmrHintText,
                Slot::TmrTrendText,
                Slot::ItemImg,
                Slot::ItemName,
                Slot::ItemDesc,
                Slot::ItemPageText,
            ],
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PageKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "home" => Ok(PageKind::Home),
            "coordination" => Ok(PageKind::Coordination),
            _ => Err(anyhow::anyhow!("Unknown page '{value}'. Supported pages: home, coordination.")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    Text(String),
    Html(String),
    Image(String),
}

impl SlotContent {
    pub fn as_str(&self) -> &str {
        match self {
            SlotContent::Text(s) | SlotContent::Html(s) | SlotContent::Image(s) => s,
        }
    }
}

/// Placeholder text shown before the first successful render.
pub const PLACEHOLDER: &str = "-";

/// The slots of one page, resolved once when the page is built.
///
/// Writes to a slot the page does not have are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotSet {
    slots: BTreeMap<Slot, SlotContent>,
}

impl SlotSet {
    pub fn new(slots: &[Slot]) -> Self {
        let slots = slots
            .iter()
            .map(|slot| {
                let content = match slot.kind() {
                    SlotKind::Image => SlotContent::Image(String::new()),
                    _ => SlotContent::Text(PLACEHOLDER.to_string()),
                };
                (*slot, content)
            })
            .collect();
        Self { slots }
    }

    pub fn for_page(page: PageKind) -> Self {
        Self::new(page.slots())
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn get(&self, slot: Slot) -> Option<&SlotContent> {
        self.slots.get(&slot)
    }

    /// Current content as a string, whatever its kind.
    pub fn text(&self, slot: Slot) -> Option<&str> {
        self.get(slot).map(SlotContent::as_str)
    }

    /// Returns `false` when the page has no such slot.
    pub fn set_text(&mut self, slot: Slot, text: impl Into<String>) -> bool {
        self.write(slot, SlotContent::Text(text.into()))
    }

    /// Store already-sanitised markup. Callers own the trust decision.
    pub fn set_html(&mut self, slot: Slot, html: impl Into<String>) -> bool {
        self.write(slot, SlotContent::Html(html.into()))
    }

    pub fn set_image(&mut self, slot: Slot, src: impl Into<String>) -> bool {
        self.write(slot, SlotContent::Image(src.into()))
    }

    fn write(&mut self, slot: Slot, content: SlotContent) -> bool {
        match self.slots.get_mut(&slot) {
            Some(current) => {
                *current = content;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Slot, &SlotContent)> {
        self.slots.iter().map(|(slot, content)| (*slot, content))
    }
}

impl fmt::Display for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, content) in self.iter() {
            writeln!(f, "{:<18} {}", slot.as_str(), content.as_str())?;
        }
        Ok(())
    }
}
