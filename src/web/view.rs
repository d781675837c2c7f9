use super::examples::{self, NO_EXAMPLE};
use crate::core::{ClassificationResult, Result, SentimentCategory};
use crate::presentation::{
    chart_color, format_percentage, interpret_confidence, interpretation, sentiment_colors,
    sentiment_emoji, SentimentColors,
};
use serde::Serialize;

pub const EMPTY_INPUT_WARNING: &str = "Por favor, ingresa un texto para analizar.";

const SUPPORTED_LANGUAGES: [&str; 5] = [
    "Español 🇪🇸",
    "Inglés 🇬🇧",
    "Francés 🇫🇷",
    "Alemán 🇩🇪",
    "Y muchos más...",
];

/// Everything `index.html` renders.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub model_name: String,
    pub text: String,
    pub examples: Vec<ExampleOption>,
    pub show_raw: bool,
    pub show_chart: bool,
    pub warning: Option<&'static str>,
    pub result: Option<ResultView>,
    pub languages: [&'static str; 5],
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Serialize)]
pub struct ExampleOption {
    pub key: &'static str,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub emoji: &'static str,
    pub name: &'static str,
}

impl PageView {
    pub fn new(
        model_name: &str,
        text: impl Into<String>,
        selected_example: Option<&str>,
        show_raw: bool,
        show_chart: bool,
    ) -> Self {
        let selected = selected_example
            .and_then(examples::find)
            .map_or(NO_EXAMPLE, |example| example.key);

        let examples = std::iter::once(NO_EXAMPLE)
            .chain(examples::EXAMPLES.iter().map(|example| example.key))
            .map(|key| ExampleOption {
                key,
                selected: key == selected,
            })
            .collect();

        let categories = SentimentCategory::ALL
            .into_iter()
            .map(|category| CategoryView {
                emoji: sentiment_emoji(category),
                name: category.display_name(),
            })
            .collect();

        Self {
            model_name: model_name.to_string(),
            text: text.into(),
            examples,
            show_raw,
            show_chart,
            warning: None,
            result: None,
            languages: SUPPORTED_LANGUAGES,
            categories,
        }
    }
}

/// The analysis panels for one classification.
#[derive(Debug, Serialize)]
pub struct ResultView {
    pub label: String,
    pub emoji: &'static str,
    pub colors: SentimentColors,
    pub percentage: String,
    pub bucket: &'static str,
    pub interpretation: &'static str,
    pub chart: Option<ChartView>,
    pub raw_json: Option<String>,
}

impl ResultView {
    pub fn new(result: &ClassificationResult, show_raw: bool, show_chart: bool) -> Result<Self> {
        let category = result.category();
        let raw_json = if show_raw {
            Some(serde_json::to_string_pretty(result)?)
        } else {
            None
        };

        Ok(Self {
            label: result.label.clone(),
            emoji: sentiment_emoji(category),
            colors: sentiment_colors(category),
            percentage: format_percentage(result.score),
            bucket: interpret_confidence(result.score).as_str(),
            interpretation: interpretation(result.score),
            chart: show_chart.then(|| ChartView::new(result)),
            raw_json,
        })
    }
}

// Chart geometry in SVG user units.
const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;
const MARGIN: f64 = 20.0;
const LABEL_GUTTER: f64 = 110.0;
const AXIS_TITLE_SPACE: f64 = 40.0;

/// A single horizontal bar on a fixed `[0, 1]` x-axis.
#[derive(Debug, Serialize)]
pub struct ChartView {
    pub width: f64,
    pub height: f64,
    pub label: String,
    /// Score as plotted, e.g. `"0.95"`.
    pub value: String,
    pub text: String,
    pub color: &'static str,
    pub plot_x: f64,
    pub plot_y: f64,
    pub plot_width: f64,
    pub plot_height: f64,
    pub bar_y: f64,
    pub bar_width: f64,
    pub bar_height: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Serialize)]
pub struct Tick {
    pub x: f64,
    pub label: String,
}

impl ChartView {
    pub fn new(result: &ClassificationResult) -> Self {
        let plot_x = MARGIN + LABEL_GUTTER;
        let plot_y = MARGIN;
        let plot_width = CHART_WIDTH - plot_x - MARGIN;
        let plot_height = CHART_HEIGHT - plot_y - MARGIN - AXIS_TITLE_SPACE;
        let bar_height = plot_height * 0.8;
        let score = f64::from(result.score).clamp(0.0, 1.0);

        let ticks = (0..=5)
            .map(|i| {
                let fraction = f64::from(i) / 5.0;
                Tick {
                    x: plot_x + fraction * plot_width,
                    label: format!("{fraction:.1}"),
                }
            })
            .collect();

        Self {
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            label: result.label.clone(),
            value: result.score.to_string(),
            text: format_percentage(result.score),
            color: chart_color(result.category()),
            plot_x,
            plot_y,
            plot_width,
            plot_height,
            bar_y: plot_y + (plot_height - bar_height) / 2.0,
            bar_width: score * plot_width,
            bar_height,
            ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_marks_selected_example() {
        let page = PageView::new("m", "", Some("Neutral (ES)"), false, true);
        let selected: Vec<_> = page.examples.iter().filter(|e| e.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].key, "Neutral (ES)");
        assert_eq!(page.examples.len(), 6);
        assert_eq!(page.examples[0].key, NO_EXAMPLE);
    }

    #[test]
    fn unknown_example_selects_none() {
        let page = PageView::new("m", "", Some("Klingon"), false, true);
        assert!(page.examples[0].selected);
    }

    #[test]
    fn legend_lists_five_categories() {
        let page = PageView::new("m", "", None, false, true);
        let emoji: Vec<_> = page.categories.iter().map(|c| c.emoji).collect();
        assert_eq!(emoji, ["🤩", "😊", "😐", "😞", "😡"]);
    }

    #[test]
    fn result_view_for_confident_positive() {
        let result = ClassificationResult::new("Positive", 0.95);
        let view = ResultView::new(&result, true, true).unwrap();
        assert_eq!(view.emoji, "😊");
        assert_eq!(view.label, "Positive");
        assert_eq!(view.percentage, "95.00%");
        assert_eq!(view.bucket, "Muy alta confianza");
        assert!(view.interpretation.starts_with("Alta confianza"));
        assert!(view.raw_json.unwrap().contains("\"label\": \"Positive\""));

        let chart = view.chart.unwrap();
        assert_eq!(chart.value, "0.95");
        assert_eq!(chart.text, "95.00%");
        assert_eq!(chart.color, "#00CC96");
        assert!((chart.bar_width - 0.95 * chart.plot_width).abs() < 1e-3);
    }

    #[test]
    fn toggles_drop_optional_panels() {
        let result = ClassificationResult::new("Neutral", 0.5);
        let view = ResultView::new(&result, false, false).unwrap();
        assert!(view.chart.is_none());
        assert!(view.raw_json.is_none());
    }

    #[test]
    fn chart_clamps_out_of_range_scores() {
        let chart = ChartView::new(&ClassificationResult::new("Positive", 1.5));
        assert_eq!(chart.bar_width, chart.plot_width);
        assert_eq!(chart.ticks.len(), 6);
        assert_eq!(chart.ticks[5].label, "1.0");
    }
}
