use serde::{Deserialize, Serialize};

/// Body of `GET /api/weather`.
///
/// Every field is optional. A missing or `null` field leaves the matching
/// display slot untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPayload {
    pub now: Option<NowWeather>,
    pub feels_c: Option<f64>,
    pub tomorrow: Option<TomorrowWeather>,
    pub air_tip_text: Option<String>,
    pub outfit_text: Option<String>,
    pub tomorrow_tip_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NowWeather {
    pub temp: Option<f64>,
    pub hum: Option<f64>,
    pub wind: Option<f64>,
    pub pop: Option<f64>,
    pub cond_text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomorrowWeather {
    pub hi: Option<f64>,
    pub low: Option<f64>,
    pub pop: Option<f64>,
    pub cond_text: Option<String>,
    pub icon: Option<String>,
}

/// Display-ready strings computed from one payload.
///
/// `None` means "do not touch the slot". The `*_tip_text` and `outfit_text`
/// fields are server-supplied and rendered as trusted HTML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedDisplay {
    pub city_label: Option<String>,
    pub date_label: Option<String>,
    pub temp_label: Option<String>,
    pub feels_label: Option<String>,
    pub hum_label: Option<String>,
    pub wind_label: Option<String>,
    pub pop_label: Option<String>,
    pub cond_label: Option<String>,
    pub icon_src: Option<String>,
    pub tomorrow_date_label: Option<String>,
    pub tomorrow_temp_label: Option<String>,
    pub tomorrow_range_label: Option<String>,
    pub tomorrow_cond_label: Option<String>,
    pub tomorrow_pop_label: Option<String>,
    pub tomorrow_delta_label: Option<String>,
    pub tomorrow_hint_text: Option<String>,
    pub tomorrow_trend_text: Option<String>,
    pub air_tip_text: Option<String>,
    pub outfit_text: Option<String>,
    pub tomorrow_tip_text: Option<String>,
}

/// One entry of the coordination page carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitItem {
    pub name: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let body = r#"{
            "now": {"temp": 3.6, "hum": 41, "wind": 2.5, "pop": 20, "cond_text": "맑음", "icon": "sunny"},
            "feels_c": 1.2,
            "tomorrow": {"hi": 9, "low": 1, "pop": 60, "cond_text": "비", "icon": "rain"},
            "air_tip_text": "미세먼지 보통\n마스크 불필요",
            "outfit_text": "니트 + 코트",
            "tomorrow_tip_text": null
        }"#;

        let payload: WeatherPayload = serde_json::from_str(body).expect("payload should parse");
        let now = payload.now.expect("now present");
        assert_eq!(now.temp, Some(3.6));
        assert_eq!(now.icon.as_deref(), Some("sunny"));
        assert_eq!(payload.tomorrow.and_then(|t| t.low), Some(1.0));
        assert_eq!(payload.tomorrow_tip_text, None);
    }

    #[test]
    fn missing_and_null_fields_are_none() {
        let payload: WeatherPayload =
            serde_json::from_str(r#"{"now": {"temp": null}, "feels_c": null}"#).unwrap();

        let now = payload.now.expect("now present");
        assert_eq!(now, NowWeather::default());
        assert!(payload.tomorrow.is_none());
        assert!(payload.feels_c.is_none());
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(serde_json::from_str::<WeatherPayload>("[1, 2]").is_err());
        assert!(serde_json::from_str::<WeatherPayload>("null").is_err());
    }
}
