//! Mortality Ranges Chart
//!
//! Buckets countries into 10 µg/m³ PM2.5 concentration ranges and plots
//! each bucket's average death rate (bars, left axis) against its average
//! PM2.5 level (line, right axis). Hovering a bucket lists its country
//! count and the five highest-mortality members.

use dioxus::prelude::*;
use pma_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, YearSlider,
};
use pma_chart_ui::state::AppState;
use pma_chart_ui::{fetch, js_bridge};
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;

const CHART_ID: &str = "mortality-ranges-chart";

/// Width of one PM2.5 bucket in µg/m³.
const BUCKET_WIDTH: f64 = 10.0;

/// Metrics whose common years bound the year slider.
const RANGE_METRICS: [Metric; 2] = [Metric::Pm25, Metric::DeathByPm];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("mortality-ranges-root"))
        .launch(App);
}

fn slider_years(store: &DataStore) -> Vec<i32> {
    let pm25 = store.common_years(Metric::Pm25);
    let deaths = store.common_years(Metric::DeathByPm);
    pm25.into_iter().filter(|y| deaths.contains(y)).collect()
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();
            let required = [Dataset::Pm25Exposure, Dataset::DeathByPm, Dataset::Population];
            let loaded = fetch::load_datasets(&store, &required).await;

            if !state.is_current(stamp) {
                return;
            }

            state.selection.write().snap_year(&slider_years(&store));

            let error = (loaded.len() < required.len())
                .then(|| "Some datasets could not be loaded.".to_string());
            state.store.set(Some(store));
            state.finish_load(stamp, error);
        });
    });

    use_effect(move || {
        if (state.loading)() || (state.error_msg)().is_some() {
            return;
        }
        let Some(store) = state.store.read().clone() else {
            return;
        };
        let years = slider_years(&store);
        let selection = state.selection.read().clone();
        let Some(year) = selection.year.filter(|y| years.contains(y)).or(years.last().copied())
        else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_charts();

        let ranges = store.mortality_ranges(year, BUCKET_WIDTH);
        state.mark_rendered(!ranges.is_empty());
        let data_json = serde_json::to_string(&ranges).unwrap_or_default();
        let config_json = serde_json::json!({ "year": year }).to_string();
        js_bridge::render_range_comparison(CHART_ID, &data_json, &config_json);
    });

    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "Death Rates by PM2.5 Concentration Range".to_string(),
                unit_description: "Bars: avg death rate per bucket; line: avg PM2.5 per bucket".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.loading)() {
                LoadingSpinner {}
            } else {
                YearSlider { metrics: RANGE_METRICS.to_vec() }
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)(), min_height: 540 }
        }
    }
}
