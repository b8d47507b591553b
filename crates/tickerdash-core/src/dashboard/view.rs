//! Pure projection of [`DashboardState`] into a view tree.

use serde::Serialize;

use super::state::DashboardState;
use crate::format::{
    capitalize, fixed2, format_change, format_market_cap, format_percent, format_price,
    or_not_available, sparkline,
};
use crate::{NewsArticle, Sentiment, TickerSnapshot, NOT_AVAILABLE};

/// Top-level screen. An error banner wins over loading, loading wins over
/// the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum View {
    Error { message: String },
    Loading,
    Dashboard(DashboardView),
}

impl View {
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Direction marker shown next to sentiment and price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Up,
    Down,
    Dash,
}

impl Icon {
    pub const fn for_sentiment(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Self::Up,
            Sentiment::Negative => Self::Down,
            Sentiment::Neutral => Self::Dash,
        }
    }

    /// Up for zero and gains.
    pub fn for_change(change: f64) -> Self {
        if change >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub header: String,
    pub chart: ChartView,
    pub key_stats: Vec<KeyStat>,
    pub news: NewsSection,
    pub overview: OverviewView,
    pub about: AboutView,
    pub sentiment: SentimentLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub points: Vec<ChartPoint>,
    pub sparkline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub title: String,
    pub publisher: String,
    pub sentiment_label: String,
    pub icon: Icon,
    pub published: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsSection {
    pub heading: String,
    pub articles: Vec<NewsCard>,
    /// Set when there are no articles.
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewView {
    pub heading: String,
    pub name: String,
    pub classification: String,
    pub price: String,
    pub change: String,
    pub trend: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AboutView {
    pub heading: String,
    pub description: String,
    pub website: String,
    pub headquarters: String,
    pub employees: String,
    pub founded: String,
    pub ceo: String,
    pub exchange: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentLine {
    pub overall: Sentiment,
    pub label: String,
    pub icon: Icon,
}

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_NEWS_TEXT: &str = "No news available";
pub const NO_DESCRIPTION_TEXT: &str = "No description available.";
pub const UNKNOWN_DATE_TEXT: &str = "Unknown date";

/// Project `state` into the screen to show. Never mutates state.
pub fn render(state: &DashboardState) -> View {
    if let Some(message) = state.error() {
        return View::Error {
            message: message.to_owned(),
        };
    }
    if state.is_loading() {
        return View::Loading;
    }
    View::Dashboard(dashboard_view(state.data()))
}

fn dashboard_view(data: &TickerSnapshot) -> DashboardView {
    let quote = &data.quote;
    let display_symbol = if quote.symbol.is_empty() || quote.symbol == NOT_AVAILABLE {
        data.symbol.as_str()
    } else {
        quote.symbol.as_str()
    };

    let points = data
        .history
        .iter()
        .map(|point| ChartPoint {
            label: point.label.clone(),
            value: point.close,
        })
        .collect::<Vec<_>>();
    let closes = points.iter().map(|point| point.value).collect::<Vec<_>>();

    let key_stats = vec![
        KeyStat {
            label: "Price",
            value: format_price(quote.price),
        },
        KeyStat {
            label: "Market Cap",
            value: format_market_cap(quote.market_cap),
        },
        KeyStat {
            label: "P/E Ratio",
            value: fixed2(quote.pe_ratio),
        },
        KeyStat {
            label: "52-wk High",
            value: format_price(quote.week_high_52),
        },
        KeyStat {
            label: "52-wk Low",
            value: format_price(quote.week_low_52),
        },
        KeyStat {
            label: "Dividend Yield",
            value: format_percent(quote.dividend_yield),
        },
    ];

    let articles = data.news.iter().map(news_card).collect::<Vec<_>>();
    let empty_message = articles.is_empty().then_some(NO_NEWS_TEXT);

    let profile = &data.profile;
    let description = if profile.description.trim().is_empty() {
        NO_DESCRIPTION_TEXT.to_owned()
    } else {
        profile.description.clone()
    };

    DashboardView {
        header: format!("{} Stock Performance", data.symbol),
        chart: ChartView {
            sparkline: sparkline(&closes),
            points,
        },
        key_stats,
        news: NewsSection {
            heading: format!("Latest {display_symbol} News"),
            articles,
            empty_message,
        },
        overview: OverviewView {
            heading: format!("{display_symbol} Overview"),
            name: quote.name.clone(),
            classification: format!("{} | {}", quote.sector, quote.industry),
            price: format_price(quote.price),
            change: format_change(quote.change, quote.change_percent),
            trend: Icon::for_change(quote.change),
        },
        about: AboutView {
            heading: format!("About {}", quote.name),
            description,
            website: or_not_available(&profile.website).to_owned(),
            headquarters: profile
                .headquarters
                .joined()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            employees: or_not_available(&profile.employee_count).to_owned(),
            founded: or_not_available(&profile.founded).to_owned(),
            ceo: or_not_available(&profile.ceo).to_owned(),
            exchange: or_not_available(&profile.exchange).to_owned(),
        },
        sentiment: SentimentLine {
            overall: data.sentiment.overall,
            label: capitalize(data.sentiment.overall.as_str()),
            icon: Icon::for_sentiment(data.sentiment.overall),
        },
    }
}

fn news_card(article: &NewsArticle) -> NewsCard {
    NewsCard {
        title: article.title.clone(),
        publisher: article.publisher.clone(),
        sentiment_label: capitalize(&article.sentiment_label),
        icon: Icon::for_sentiment(article.sentiment),
        published: article
            .published_at
            .map(|published| published.format_display())
            .unwrap_or_else(|| UNKNOWN_DATE_TEXT.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FetchOutcome;
    use crate::data_source::SourceError;
    use crate::{
        CompanyProfile, Headquarters, HistoryPoint, QuoteInfo, SentimentCounts, SentimentSummary,
        Symbol, UtcDateTime,
    };

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::new(Symbol::parse("aapl").expect("valid symbol"));
        let (generation, _) = state.begin_load();
        let outcomes = [
            FetchOutcome::Info(Ok(QuoteInfo {
                symbol: String::from("AAPL"),
                name: String::from("Apple Inc."),
                sector: String::from("Technology"),
                industry: String::from("Consumer Electronics"),
                price: 189.8,
                market_cap: 2_500_000_000.0,
                pe_ratio: 31.456,
                dividend_yield: 0.005,
                week_high_52: 199.62,
                week_low_52: 124.17,
                ..QuoteInfo::default()
            })),
            FetchOutcome::History(Ok(vec![
                HistoryPoint {
                    label: String::from("Jan 1"),
                    close: 150.25,
                },
                HistoryPoint {
                    label: String::from("Jan 2"),
                    close: 152.0,
                },
            ])),
            FetchOutcome::News(Ok(vec![NewsArticle {
                title: String::from("Apple ships new device"),
                publisher: String::from("Market Wire"),
                sentiment: Sentiment::Negative,
                sentiment_label: String::from("negative"),
                published_at: UtcDateTime::from_unix_seconds(1_704_103_200),
            }])),
            FetchOutcome::Sentiment(Ok(SentimentSummary::from(SentimentCounts::new(5, 2, 0)))),
            FetchOutcome::Profile(Ok(CompanyProfile {
                headquarters: Headquarters {
                    city: String::from("Cupertino"),
                    state: String::from("CA"),
                    country: String::new(),
                },
                ceo: String::from("Tim Cook"),
                ..CompanyProfile::default()
            })),
        ];
        for outcome in outcomes {
            state.apply_fetch_result(generation, outcome);
        }
        state.finish_load(generation);
        state
    }

    #[test]
    fn error_banner_wins_over_loading() {
        let mut state = DashboardState::default();
        let (generation, _) = state.begin_load();
        state.apply_fetch_result(
            generation,
            FetchOutcome::News(Err(SourceError::transport("connection refused"))),
        );

        assert_eq!(
            render(&state),
            View::Error {
                message: String::from("Error fetching news")
            }
        );
        state.finish_load(generation);
        assert!(render(&state).is_error());
    }

    #[test]
    fn loading_until_the_batch_finishes() {
        let mut state = DashboardState::default();
        state.begin_load();
        assert_eq!(render(&state), View::Loading);
    }

    #[test]
    fn dashboard_formats_key_stats() {
        let View::Dashboard(view) = render(&loaded_state()) else {
            panic!("expected dashboard view");
        };

        assert_eq!(view.header, "AAPL Stock Performance");
        let stats = view
            .key_stats
            .iter()
            .map(|stat| (stat.label, stat.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            stats,
            vec![
                ("Price", "$189.80"),
                ("Market Cap", "$2.50B"),
                ("P/E Ratio", "31.46"),
                ("52-wk High", "$199.62"),
                ("52-wk Low", "$124.17"),
                ("Dividend Yield", "0.50%"),
            ]
        );
        assert_eq!(view.chart.points[0].label, "Jan 1");
        assert_eq!(view.chart.sparkline, "▁█");
        assert_eq!(view.overview.change, "+0.00 (0.00%)");
        assert_eq!(view.overview.trend, Icon::Up);
        assert_eq!(view.overview.classification, "Technology | Consumer Electronics");
        assert_eq!(view.sentiment.label, "Positive");
        assert_eq!(view.sentiment.icon, Icon::Up);
    }

    #[test]
    fn news_cards_capitalize_label_and_format_time() {
        let View::Dashboard(view) = render(&loaded_state()) else {
            panic!("expected dashboard view");
        };

        assert_eq!(view.news.heading, "Latest AAPL News");
        assert_eq!(view.news.empty_message, None);
        let card = &view.news.articles[0];
        assert_eq!(card.sentiment_label, "Negative");
        assert_eq!(card.icon, Icon::Down);
        assert_eq!(card.published, "2024-01-01 10:00 UTC");
    }

    #[test]
    fn about_block_falls_back_to_placeholders() {
        let View::Dashboard(view) = render(&loaded_state()) else {
            panic!("expected dashboard view");
        };

        assert_eq!(view.about.heading, "About Apple Inc.");
        assert_eq!(view.about.description, "No description available.");
        assert_eq!(view.about.website, "N/A");
        assert_eq!(view.about.headquarters, "Cupertino, CA");
        assert_eq!(view.about.ceo, "Tim Cook");
        assert_eq!(view.about.exchange, "N/A");
    }

    #[test]
    fn empty_news_shows_placeholder() {
        let mut state = DashboardState::default();
        let (generation, _) = state.begin_load();
        state.finish_load(generation);

        let View::Dashboard(view) = render(&state) else {
            panic!("expected dashboard view");
        };
        assert!(view.news.articles.is_empty());
        assert_eq!(view.news.empty_message, Some("No news available"));
        assert_eq!(view.chart.sparkline, "");
    }
}
