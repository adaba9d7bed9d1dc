//! Writes a [`DerivedDisplay`] into a [`SlotSet`].
//!
//! Rendering is a partial update: fields that are `None` leave their slot
//! as it was. Only server-supplied tip text is written as HTML, and only
//! after newline conversion; anything a user typed goes through
//! [`escape_html`].

use crate::{DerivedDisplay, Slot, SlotSet};

/// Escape `& < > " '` for insertion into markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

/// Server-controlled text as markup: passed through, newlines become `<br/>`.
pub fn trusted_multiline_html(s: &str) -> String {
    s.replace('\n', "<br/>")
}

/// Apply every present field. Returns how many slots were written.
pub fn render(display: &DerivedDisplay, slots: &mut SlotSet) -> usize {
    let texts = [
        (Slot::CityText, &display.city_label),
        (Slot::DateText, &display.date_label),
        (Slot::TempText, &display.temp_label),
        (Slot::FeelsText, &display.feels_label),
        (Slot::HumText, &display.hum_label),
        (Slot::WindText, &display.wind_label),
        (Slot::PopText, &display.pop_label),
        (Slot::CondText, &display.cond_label),
        (Slot::TomorrowTempText, &display.tomorrow_range_label),
        (Slot::TomorrowCondText, &display.tomorrow_cond_label),
        (Slot::TomorrowPopText, &display.tomorrow_pop_label),
        (Slot::TmrDateText, &display.tomorrow_date_label),
        (Slot::TmrTempText, &display.tomorrow_temp_label),
        (Slot::TmrDeltaText, &display.tomorrow_delta_label),
        (Slot::TmrHintText, &display.tomorrow_hint_text),
        (Slot::TmrTrendText, &display.tomorrow_trend_text),
    ];
    let trusted = [
        (Slot::AirTipText, &display.air_tip_text),
        (Slot::OutfitText, &display.outfit_text),
        (Slot::TomorrowTipText, &display.tomorrow_tip_text),
    ];

    let mut written = 0;
    for (slot, value) in texts {
        if let Some(text) = value {
            written += usize::from(slots.set_text(slot, text.as_str()));
        }
    }
    for (slot, value) in trusted {
        if let Some(text) = value {
            written += usize::from(slots.set_html(slot, trusted_multiline_html(text)));
        }
    }
    if let Some(src) = &display.icon_src {
        written += usize::from(slots.set_image(Slot::WeatherIcon, src.as_str()));
    }
    written
}
