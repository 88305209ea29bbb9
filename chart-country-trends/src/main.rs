//! Country Trends Chart
//!
//! Dual-axis time series for one country: PM2.5 exposure as a line+area on
//! the left axis, a selectable companion metric (population, respiratory
//! or cardiovascular death rate) as a line on the right axis.
//!
//! The companion dataset is fetched when the metric selection changes.
//! Each fetch cycle is generation-stamped: if the user flips the metric
//! again before a slow fetch resolves, the stale result is discarded
//! instead of overwriting the newer selection's chart.

use dioxus::prelude::*;
use pma_chart_ui::components::{
    ChartContainer, ChartHeader, CountrySelector, ErrorDisplay, LoadingSpinner, MetricSelector,
};
use pma_chart_ui::state::AppState;
use pma_chart_ui::{fetch, js_bridge};
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;

const CHART_ID: &str = "country-trends-chart";

/// Companion metrics offered alongside PM2.5.
const COMPANION_METRICS: [Metric; 3] =
    [Metric::Respiratory, Metric::Cardiovascular, Metric::Population];

/// Country shown before the user picks one.
const DEFAULT_COUNTRY: &str = "Australia";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("country-trends-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Initial load: the PM2.5 series is always shown, so fetch it once.
    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();
            let loaded = fetch::load_datasets(&store, &[Dataset::Pm25Exposure]).await;

            if !state.is_current(stamp) {
                return;
            }

            {
                let mut selection = state.selection.write();
                selection.select_metric(Metric::Respiratory);
                let countries = store.countries(Metric::Pm25);
                let default = if countries.iter().any(|c| c == DEFAULT_COUNTRY) {
                    Some(DEFAULT_COUNTRY.to_string())
                } else {
                    countries.first().cloned()
                };
                selection.select_country(default);
            }

            let error = loaded
                .is_empty()
                .then(|| "PM2.5 dataset could not be loaded.".to_string());
            state.store.set(Some(store));
            state.finish_load(stamp, error);
        });
    });

    // Fetch the companion dataset when the metric changes, then redraw.
    use_effect(move || {
        let selection = state.selection.read().clone();
        let Some(store) = state.store.read().clone() else {
            return;
        };
        let Some(country) = selection.country.clone() else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };
        let companion = selection.metric;

        spawn(async move {
            let stamp = state.begin_load();
            let datasets = companion.datasets();
            let loaded = fetch::load_datasets(&store, datasets).await;

            // A newer selection superseded this cycle: drop the results.
            if !state.is_current(stamp) {
                return;
            }

            if !state.finish_load(
                stamp,
                (loaded.len() < datasets.len())
                    .then(|| format!("{} dataset could not be loaded.", companion.label())),
            ) {
                return;
            }

            js_bridge::init_charts();

            // An empty trend still goes through the renderer, which shows
            // its missing-data placeholder instead of axes.
            let trend = store.dual_trend(companion, &country);
            state.mark_rendered(!trend.is_empty());
            let data_json = serde_json::to_string(&trend).unwrap_or_default();
            let config_json = serde_json::json!({
                "country": country,
                "primaryLabel": Metric::Pm25.label(),
                "primaryUnit": Metric::Pm25.unit(),
                "companionLabel": companion.label(),
                "companionUnit": companion.unit(),
            })
            .to_string();

            js_bridge::render_dual_axis_chart(CHART_ID, &data_json, &config_json);
        });
    });

    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "PM2.5 Exposure vs. Companion Metric".to_string(),
                unit_description: "Left axis: µg/m³; right axis: selected metric".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.store)().is_none() {
                LoadingSpinner {}
            } else {
                CountrySelector {}
                MetricSelector { metrics: COMPANION_METRICS.to_vec() }
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)() }
        }
    }
}
