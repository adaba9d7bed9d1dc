//! "My page" preferences: avoided-item pills and the two style sliders.

use crate::{ValidationError, render::escape_html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PillId(u64);

impl PillId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::str::FromStr for PillId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PillId)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePill {
    pub id: PillId,
    pub label: String,
}

impl PreferencePill {
    /// Markup of one pill. The label is user input and is escaped.
    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="pill">{} <button class="pill-x" type="button" aria-label="삭제" data-remove-pill>✕</button></span>"#,
            escape_html(&self.label)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added(PillId),
    Duplicate,
}

/// One slider axis: values below 34 read as `left`, above 66 as `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderAxis {
    pub left: &'static str,
    pub right: &'static str,
}

pub const STYLE_AXIS: SliderAxis = SliderAxis { left: "캐주얼", right: "포멀" };
pub const MOOD_AXIS: SliderAxis = SliderAxis { left: "심플", right: "러블리" };

pub const MIDDLE_LABEL: &str = "중간";
const MISSING_LABEL: &str = "-";

impl SliderAxis {
    pub fn label_for(&self, value: u8) -> &'static str {
        if value < 34 {
            self.left
        } else if value > 66 {
            self.right
        } else {
            MIDDLE_LABEL
        }
    }
}

/// Joined hint for both sliders; a slider that is absent reads `-`.
pub fn style_hint(style: Option<u8>, mood: Option<u8>) -> String {
    let a = style.map_or(MISSING_LABEL, |v| STYLE_AXIS.label_for(v));
    let b = mood.map_or(MISSING_LABEL, |v| MOOD_AXIS.label_for(v));
    format!("{a} · {b}")
}

/// Pill list plus slider state for one page instance.
#[derive(Debug, Clone)]
pub struct PreferenceEditor {
    pills: Vec<PreferencePill>,
    input: String,
    next_id: u64,
    style: Option<u8>,
    mood: Option<u8>,
}

impl Default for PreferenceEditor {
    fn default() -> Self {
        Self { pills: Vec::new(), input: String::new(), next_id: 0, style: Some(50), mood: Some(50) }
    }
}

impl PreferenceEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pills(&self) -> &[PreferencePill] {
        &self.pills
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Add the current input as a pill.
    ///
    /// Empty input is refused and left as is. A label equal to an existing
    /// one (after trimming, case-sensitive) only clears the input.
    pub fn submit(&mut self) -> Result<AddOutcome, ValidationError> {
        let label = self.input.clone();
        self.add_pill(&label)
    }

    pub fn add_pill(&mut self, raw: &str) -> Result<AddOutcome, ValidationError> {
        let label = raw.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyPill);
        }

        self.input.clear();
        if self.pills.iter().any(|p| p.label == label) {
            return Ok(AddOutcome::Duplicate);
        }

        let id = PillId(self.next_id);
        self.next_id += 1;
        self.pills.push(PreferencePill { id, label: label.to_string() });
        Ok(AddOutcome::Added(id))
    }

    /// Returns `false` when no such pill exists.
    pub fn remove_pill(&mut self, id: PillId) -> bool {
        let before = self.pills.len();
        self.pills.retain(|p| p.id != id);
        self.pills.len() != before
    }

    /// Values are clamped to 0..=100.
    pub fn set_style(&mut self, value: u8) -> String {
        self.style = Some(value.min(100));
        self.hint()
    }

    pub fn set_mood(&mut self, value: u8) -> String {
        self.mood = Some(value.min(100));
        self.hint()
    }

    pub fn hint(&self) -> String {
        style_hint(self.style, self.mood)
    }

    pub fn pills_html(&self) -> String {
        self.pills.iter().map(PreferencePill::to_html).collect()
    }
}
