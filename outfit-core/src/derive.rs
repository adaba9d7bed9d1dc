//! Pure functions turning a [`WeatherPayload`] into display strings.
//!
//! Nothing here touches slots or the network, so every rule can be tested
//! with plain values.

use chrono::{Datelike, Days, NaiveDate};

use crate::{DerivedDisplay, PageKind, WeatherPayload};

/// Weekday names indexed by days from Sunday.
const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Probability of precipitation (percent) at which the rain hint wins.
pub const RAINY_POP: f64 = 60.0;

/// At or below this temperature the precipitation hint is the cold variant.
pub const COLD_PRECIP_TEMP: f64 = 5.0;

const PRECIP_KEYWORDS: [&str; 9] =
    ["비", "눈", "소나기", "진눈깨비", "rain", "snow", "shower", "sleet", "drizzle"];

/// Icon used when the payload names none.
pub const UNKNOWN_ICON: &str = "unknown";

/// `YYYY.MM.DD (요일)`
pub fn format_local_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}.{:02}.{:02} ({})", date.year(), date.month(), date.day(), weekday)
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Shortest decimal form: `3.0` prints as `3`, `3.5` as `3.5`.
pub fn format_number(x: f64) -> String {
    if x == 0.0 { "0".to_string() } else { x.to_string() }
}

pub fn rounded_temp(x: Option<f64>) -> Option<String> {
    x.map(|t| format!("{}°C", round_half_up(t)))
}

/// Rounded tomorrow-minus-today difference.
pub fn temp_delta(tomorrow: f64, today: f64) -> i64 {
    round_half_up(tomorrow - today)
}

pub fn delta_label(tomorrow: f64, today: f64) -> String {
    let diff = temp_delta(tomorrow, today);
    let abs = diff.abs();
    match diff {
        d if d < 0 => format!("오늘보다 {abs}°C 낮음"),
        d if d > 0 => format!("오늘보다 {abs}°C 높음"),
        _ => "오늘과 비슷함".to_string(),
    }
}

/// Advice keyed on how much tomorrow differs from today.
pub fn trend_advice(diff: i64) -> &'static str {
    if diff <= -4 {
        "내일은 오늘보다 꽤 더 추워요. 한 단계 두꺼운 아우터 + 목 보온을 추천해요."
    } else if diff <= -2 {
        "내일은 오늘보다 더 추워요. 오늘보다 조금 더 따뜻한 겉옷을 준비해보세요."
    } else if diff >= 4 {
        "내일은 오늘보다 꽤 더 따뜻해요. 이너를 가볍게 하거나 겉옷은 얇게 추천해요."
    } else if diff >= 2 {
        "내일은 오늘보다 조금 더 따뜻해요. 겉옷은 가볍게 조절해도 좋아요."
    } else {
        "내일은 오늘과 비슷한 체감이에요. 실내외 온도차만 조심해요."
    }
}

/// Temperature bands of the outfit hint, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempBand {
    Frigid,
    Freezing,
    Cold,
    Chilly,
    Mild,
    Warm,
    Hot,
}

impl TempBand {
    /// Upper bounds, inclusive, checked in ascending order.
    const LADDER: [(f64, TempBand); 6] = [
        (-3.0, TempBand::Frigid),
        (2.0, TempBand::Freezing),
        (8.0, TempBand::Cold),
        (13.0, TempBand::Chilly),
        (18.0, TempBand::Mild),
        (24.0, TempBand::Warm),
    ];

    pub fn for_temp(temp: f64) -> TempBand {
        Self::LADDER
            .iter()
            .find(|(upper, _)| temp <= *upper)
            .map(|(_, band)| *band)
            .unwrap_or(TempBand::Hot)
    }

    pub fn hint(&self) -> &'static str {
        match self {
            TempBand::Frigid => "한파 수준이에요. 롱패딩에 목도리와 장갑까지 꼭 챙기세요.",
            TempBand::Freezing => "많이 추워요. 두꺼운 패딩이나 울 코트에 니트를 겹쳐 입어요.",
            TempBand::Cold => "쌀쌀해요. 코트나 가죽 재킷에 니트를 추천해요.",
            TempBand::Chilly => "선선해요. 트렌치코트나 재킷에 얇은 니트가 좋아요.",
            TempBand::Mild => "가벼운 가디건이나 맨투맨이면 충분해요.",
            TempBand::Warm => "따뜻해요. 얇은 셔츠나 긴팔 티셔츠를 추천해요.",
            TempBand::Hot => "더워요. 반팔과 반바지처럼 통기성 좋은 옷을 입어요.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitHint {
    Precipitation { cold: bool },
    Band(TempBand),
}

impl OutfitHint {
    pub fn text(&self) -> &'static str {
        match self {
            OutfitHint::Precipitation { cold: true } => {
                "눈이나 찬 비 소식이 있어요. 방수 되는 두꺼운 아우터와 미끄럼 방지 신발을 챙기세요."
            }
            OutfitHint::Precipitation { cold: false } => {
                "비 소식이 있어요. 우산을 챙기고 젖어도 괜찮은 신발을 추천해요."
            }
            OutfitHint::Band(band) => band.hint(),
        }
    }
}

/// True when the condition text names rain or snow.
pub fn is_precipitation(cond_text: &str) -> bool {
    let lower = cond_text.to_lowercase();
    PRECIP_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Precipitation wins over temperature; otherwise the first band whose
/// upper bound is not exceeded.
pub fn classify_outfit(temp: f64, pop: Option<f64>, cond_text: Option<&str>) -> OutfitHint {
    let rainy = pop.is_some_and(|p| p >= RAINY_POP) || cond_text.is_some_and(is_precipitation);
    if rainy {
        OutfitHint::Precipitation { cold: temp <= COLD_PRECIP_TEMP }
    } else {
        OutfitHint::Band(TempBand::for_temp(temp))
    }
}

pub fn outfit_hint(temp: f64, pop: Option<f64>, cond_text: Option<&str>) -> &'static str {
    classify_outfit(temp, pop, cond_text).text()
}

/// The single temperature shown for tomorrow. `low` is preferred on purpose.
pub fn tomorrow_display_temp(hi: Option<f64>, low: Option<f64>) -> Option<f64> {
    low.or(hi)
}

/// Temperature tomorrow is compared against today with.
///
/// The single display temperature comes from the same `hi`/`low` pair, so
/// once both are missing there is nothing left to fall back to.
pub fn comparison_temp(hi: Option<f64>, low: Option<f64>) -> Option<f64> {
    match (hi, low) {
        (Some(hi), Some(low)) => Some((hi + low) / 2.0),
        (Some(t), None) | (None, Some(t)) => Some(t),
        (None, None) => None,
    }
}

pub fn icon_src(icon: Option<&str>) -> String {
    let icon = icon.filter(|i| !i.is_empty()).unwrap_or(UNKNOWN_ICON);
    format!("/static/img/icons/{icon}.png")
}

fn non_empty(text: Option<&String>) -> Option<String> {
    text.filter(|t| !t.is_empty()).cloned()
}

/// Compute everything a page may show for one payload.
pub fn derive_display(
    payload: &WeatherPayload,
    today: NaiveDate,
    city_label: &str,
    page: PageKind,
) -> DerivedDisplay {
    let mut out = DerivedDisplay {
        city_label: Some(city_label.to_string()),
        date_label: Some(format_local_date(today)),
        feels_label: payload.feels_c.map(|f| match page {
            PageKind::Home => format!("체감온도 {}°C", format_number(f)),
            PageKind::Coordination => format!("체감 {}°C", format_number(f)),
        }),
        air_tip_text: non_empty(payload.air_tip_text.as_ref()),
        outfit_text: non_empty(payload.outfit_text.as_ref()),
        tomorrow_tip_text: non_empty(payload.tomorrow_tip_text.as_ref()),
        ..Default::default()
    };

    let today_temp = payload.now.as_ref().and_then(|n| n.temp);

    if let Some(now) = &payload.now {
        out.temp_label = rounded_temp(now.temp);
        out.hum_label = now.hum.map(|h| format!("{}%", round_half_up(h)));
        out.wind_label = now.wind.map(|w| format!("{}m/s", format_number(w)));
        out.pop_label = now.pop.map(|p| format!("{}%", format_number(p)));
        out.cond_label = non_empty(now.cond_text.as_ref());
        out.icon_src = Some(icon_src(now.icon.as_deref()));
    }

    if let Some(tomorrow) = &payload.tomorrow {
        out.tomorrow_date_label = today.checked_add_days(Days::new(1)).map(format_local_date);

        let display = tomorrow_display_temp(tomorrow.hi, tomorrow.low);
        out.tomorrow_temp_label = display.map(|t| format!("{}°C", format_number(t)));
        if let (Some(hi), Some(low)) = (tomorrow.hi, tomorrow.low) {
            out.tomorrow_range_label =
                Some(format!("{}°C / {}°C", format_number(hi), format_number(low)));
        }
        out.tomorrow_cond_label = non_empty(tomorrow.cond_text.as_ref());
        out.tomorrow_pop_label = tomorrow.pop.map(|p| format!("{}%", format_number(p)));

        let compare = comparison_temp(tomorrow.hi, tomorrow.low);
        if let (Some(compare), Some(today_temp)) = (compare, today_temp) {
            out.tomorrow_delta_label = Some(delta_label(compare, today_temp));
            out.tomorrow_trend_text =
                Some(trend_advice(temp_delta(compare, today_temp)).to_string());
        }
        if let Some(compare) = compare {
            out.tomorrow_hint_text = Some(
                outfit_hint(compare, tomorrow.pop, tomorrow.cond_text.as_deref()).to_string(),
            );
        }
    }

    out
}
