//! Wire schemas of the dashboard API and their normalization into domain
//! types.
//!
//! Field decoding never fails: numbers accept JSON numbers or numeric
//! strings (leading numeric prefix, so `"150.25 USD"` reads as `150.25`),
//! everything else becomes `0`; text accepts strings, numbers and booleans,
//! everything else becomes empty. Only the body as a whole can be rejected
//! (not JSON, or missing a required container).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::data_source::{Resource, SourceError};
use crate::format::short_date_label;
use crate::{
    CompanyProfile, Headquarters, HistoryPoint, NewsArticle, QuoteInfo, Sentiment,
    SentimentCounts, SentimentSummary, UtcDateTime, NOT_AVAILABLE,
};

/// Epoch values at or above this are taken as milliseconds.
const EPOCH_MILLIS_THRESHOLD: u64 = 100_000_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LenientNumber(f64);

impl LenientNumber {
    fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => parse_float_prefix(text),
            _ => None,
        };
        Self(parsed.filter(|v| v.is_finite()).unwrap_or(0.0))
    }

    fn to_count(self) -> u64 {
        if self.0 > 0.0 {
            self.0.floor() as u64
        } else {
            0
        }
    }
}

impl<'de> Deserialize<'de> for LenientNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LenientText(String);

impl LenientText {
    fn from_value(value: &Value) -> Self {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => String::new(),
        };
        Self(text)
    }

    fn or_not_available(self) -> String {
        if self.0.is_empty() {
            String::from(NOT_AVAILABLE)
        } else {
            self.0
        }
    }
}

impl<'de> Deserialize<'de> for LenientText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InfoPayload {
    symbol: LenientText,
    name: LenientText,
    sector: LenientText,
    industry: LenientText,
    current_price: LenientNumber,
    market_cap: LenientNumber,
    pe_ratio: LenientNumber,
    dividend_yield: LenientNumber,
    #[serde(rename = "52_week_high")]
    week_high_52: LenientNumber,
    #[serde(rename = "52_week_low")]
    week_low_52: LenientNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HistoryItemPayload {
    #[serde(rename = "Date")]
    date: LenientText,
    #[serde(rename = "Close")]
    close: LenientNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArticlePayload {
    title: LenientText,
    publisher: LenientText,
    sentiment: LenientText,
    published: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SentimentCountsPayload {
    positive: LenientNumber,
    negative: LenientNumber,
    neutral: LenientNumber,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeadquartersPayload {
    city: LenientText,
    state: LenientText,
    country: LenientText,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AboutPayload {
    description: LenientText,
    website: LenientText,
    full_time_employees: LenientText,
    headquarters: Value,
    founded: LenientText,
    ceo: LenientText,
    exchange: LenientText,
}

pub(crate) fn decode_quote_info(body: &str) -> Result<QuoteInfo, SourceError> {
    let payload: InfoPayload = decode_object(body, Resource::Info)?;
    Ok(QuoteInfo {
        symbol: payload.symbol.or_not_available(),
        name: payload.name.or_not_available(),
        sector: payload.sector.or_not_available(),
        industry: payload.industry.or_not_available(),
        price: payload.current_price.0,
        market_cap: payload.market_cap.0,
        pe_ratio: payload.pe_ratio.0,
        dividend_yield: payload.dividend_yield.0,
        week_high_52: payload.week_high_52.0,
        week_low_52: payload.week_low_52.0,
        change: 0.0,
        change_percent: 0.0,
    })
}

pub(crate) fn decode_history(body: &str) -> Result<Vec<HistoryPoint>, SourceError> {
    let root = decode_json(body, Resource::History)?;
    let points = array_field(&root, "data")
        .iter()
        .map(|item| {
            let item = HistoryItemPayload::deserialize(item).unwrap_or_default();
            HistoryPoint {
                label: short_date_label(&item.date.0),
                close: item.close.0,
            }
        })
        .collect();
    Ok(points)
}

pub(crate) fn decode_news(body: &str) -> Result<Vec<NewsArticle>, SourceError> {
    let root = decode_json(body, Resource::News)?;
    let articles = array_field(&root, "articles")
        .iter()
        .map(|item| {
            let item = ArticlePayload::deserialize(item).unwrap_or_default();
            let sentiment_label = if item.sentiment.0.trim().is_empty() {
                String::from(Sentiment::Neutral.as_str())
            } else {
                item.sentiment.0
            };
            NewsArticle {
                title: item.title.0,
                publisher: item.publisher.0,
                sentiment: Sentiment::from_label(&sentiment_label),
                sentiment_label,
                published_at: published_at(&item.published),
            }
        })
        .collect();
    Ok(articles)
}

pub(crate) fn decode_sentiment(body: &str) -> Result<SentimentSummary, SourceError> {
    let root = decode_json(body, Resource::Sentiment)?;
    let analysis = match root.get("sentiment_analysis") {
        None | Some(Value::Null) => {
            return Err(SourceError::malformed(
                "sentiment payload is missing 'sentiment_analysis'",
            ))
        }
        Some(analysis) => analysis,
    };
    let counts = SentimentCountsPayload::deserialize(analysis).unwrap_or_default();
    Ok(SentimentSummary::from(SentimentCounts::new(
        counts.positive.to_count(),
        counts.negative.to_count(),
        counts.neutral.to_count(),
    )))
}

pub(crate) fn decode_company_profile(body: &str) -> Result<CompanyProfile, SourceError> {
    let payload: AboutPayload = decode_object(body, Resource::About)?;
    let headquarters = HeadquartersPayload::deserialize(&payload.headquarters).unwrap_or_default();
    Ok(CompanyProfile {
        description: payload.description.0,
        website: payload.website.0,
        employee_count: payload.full_time_employees.0,
        headquarters: Headquarters {
            city: headquarters.city.0,
            state: headquarters.state.0,
            country: headquarters.country.0,
        },
        founded: payload.founded.0,
        ceo: payload.ceo.0,
        exchange: payload.exchange.0,
    })
}

fn decode_json(body: &str, resource: Resource) -> Result<Value, SourceError> {
    serde_json::from_str(body).map_err(|error| {
        SourceError::malformed(format!("{resource} payload is not valid JSON: {error}"))
    })
}

fn decode_object<T>(body: &str, resource: Resource) -> Result<T, SourceError>
where
    T: for<'de> Deserialize<'de>,
{
    let root = decode_json(body, resource)?;
    if !root.is_object() {
        return Err(SourceError::malformed(format!(
            "{resource} payload must be a JSON object"
        )));
    }
    serde_json::from_value(root).map_err(|error| {
        SourceError::malformed(format!("{resource} payload has unexpected shape: {error}"))
    })
}

fn array_field<'a>(root: &'a Value, field: &str) -> &'a [Value] {
    root.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn published_at(value: &Value) -> Option<UtcDateTime> {
    match value {
        Value::String(text) => UtcDateTime::parse(text).ok(),
        Value::Number(number) => {
            let raw = number.as_i64()?;
            let seconds = if raw.unsigned_abs() >= EPOCH_MILLIS_THRESHOLD {
                raw / 1_000
            } else {
                raw
            };
            UtcDateTime::from_unix_seconds(seconds)
        }
        _ => None,
    }
}

/// Longest leading decimal literal of `input`, after leading whitespace.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;

    #[test]
    fn float_prefix_follows_lenient_parsing() {
        assert_eq!(parse_float_prefix("150.25"), Some(150.25));
        assert_eq!(parse_float_prefix("  42abc"), Some(42.0));
        assert_eq!(parse_float_prefix("-1.5e3x"), Some(-1500.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn quote_info_parses_numeric_strings_and_defaults_missing_fields() {
        let body = r#"{
            "symbol": "AAPL",
            "name": "Apple Inc.",
            "current_price": "189.84",
            "market_cap": 2950000000000,
            "pe_ratio": "n/a",
            "52_week_high": 199.62,
            "52_week_low": "164.08"
        }"#;

        let info = decode_quote_info(body).expect("info should decode");
        assert_eq!(info.symbol, "AAPL");
        assert_eq!(info.sector, "N/A");
        assert_eq!(info.industry, "N/A");
        assert_eq!(info.price, 189.84);
        assert_eq!(info.market_cap, 2_950_000_000_000.0);
        assert_eq!(info.pe_ratio, 0.0);
        assert_eq!(info.dividend_yield, 0.0);
        assert_eq!(info.week_high_52, 199.62);
        assert_eq!(info.week_low_52, 164.08);
        assert_eq!(info.change, 0.0);
        assert_eq!(info.change_percent, 0.0);
    }

    #[test]
    fn quote_info_rejects_non_json_and_non_objects() {
        let error = decode_quote_info("<html>502</html>").expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Malformed);

        let error = decode_quote_info("[1, 2]").expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Malformed);
    }

    #[test]
    fn history_item_gets_short_label_and_parsed_close() {
        let points =
            decode_history(r#"{"data":[{"Date":"2024-01-01","Close":"150.25"}]}"#).expect("ok");
        assert_eq!(
            points,
            vec![HistoryPoint {
                label: String::from("Jan 1"),
                close: 150.25,
            }]
        );
    }

    #[test]
    fn history_without_data_array_is_empty() {
        assert!(decode_history(r#"{"detail":"no rows"}"#).expect("ok").is_empty());
        assert!(decode_history(r#"{"data":"oops"}"#).expect("ok").is_empty());
        assert!(decode_history("null").expect("ok").is_empty());
    }

    #[test]
    fn news_defaults_sentiment_and_parses_publication_time() {
        let body = r#"{"articles":[
            {"title":"Up","publisher":"Wire","sentiment":"positive","published":"2024-01-05T14:30:00Z"},
            {"title":"Flat","publisher":"Wire","published":1704465000},
            {"title":"Odd","sentiment":"Mixed","published":"someday"}
        ]}"#;

        let articles = decode_news(body).expect("news should decode");
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].sentiment, Sentiment::Positive);
        assert!(articles[0].published_at.is_some());
        assert_eq!(articles[1].sentiment_label, "neutral");
        assert_eq!(
            articles[1].published_at.map(UtcDateTime::format_rfc3339),
            Some(String::from("2024-01-05T14:30:00Z"))
        );
        assert_eq!(articles[2].sentiment, Sentiment::Neutral);
        assert_eq!(articles[2].sentiment_label, "Mixed");
        assert_eq!(articles[2].publisher, "");
        assert_eq!(articles[2].published_at, None);
    }

    #[test]
    fn epoch_milliseconds_are_recognized() {
        let value = serde_json::json!(1_704_465_000_000_i64);
        assert_eq!(
            published_at(&value).map(UtcDateTime::format_rfc3339),
            Some(String::from("2024-01-05T14:30:00Z"))
        );

        assert_eq!(published_at(&serde_json::json!(i64::MIN)), None);
        let news = decode_news(r#"{"articles":[{"title":"x","published":-9223372036854775808}]}"#)
            .expect("extreme epoch still decodes");
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].published_at, None);
    }

    #[test]
    fn sentiment_requires_analysis_object() {
        let error = decode_sentiment(r#"{"score":1}"#).expect_err("must fail");
        assert_eq!(error.kind(), SourceErrorKind::Malformed);

        let summary =
            decode_sentiment(r#"{"sentiment_analysis":{"positive":5,"negative":"2","neutral":9}}"#)
                .expect("ok");
        assert_eq!(summary.overall, Sentiment::Positive);
        assert_eq!(summary.counts, SentimentCounts::new(5, 2, 9));
    }

    #[test]
    fn company_profile_accepts_numeric_text_fields() {
        let body = r#"{
            "description": "Makes phones.",
            "full_time_employees": 161000,
            "headquarters": {"city": "Cupertino", "state": "CA"},
            "founded": 1976
        }"#;

        let profile = decode_company_profile(body).expect("profile should decode");
        assert_eq!(profile.employee_count, "161000");
        assert_eq!(profile.founded, "1976");
        assert_eq!(profile.headquarters.country, "");
        assert_eq!(profile.website, "");
    }

    #[test]
    fn company_profile_tolerates_non_object_headquarters() {
        let profile = decode_company_profile(r#"{"headquarters":"Cupertino"}"#).expect("ok");
        assert_eq!(profile.headquarters, Headquarters::default());
    }
}
