//! Top Countries Chart
//!
//! Ranks countries by derived PM2.5 mortality rate (attributed deaths as a
//! percentage of population) for the selected year and shows the top ten
//! as horizontal bars.

use dioxus::prelude::*;
use pma_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, YearSlider,
};
use pma_chart_ui::state::AppState;
use pma_chart_ui::{fetch, js_bridge};
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;

const CHART_ID: &str = "top-countries-chart";

/// How many countries the ranking shows.
const TOP_N: usize = 10;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("top-countries-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();
            let required = [Dataset::DeathByPm, Dataset::Population];
            let loaded = fetch::load_datasets(&store, &required).await;

            if !state.is_current(stamp) {
                return;
            }

            {
                let mut selection = state.selection.write();
                selection.select_metric(Metric::DeathByPm);
                selection.snap_year(&store.common_years(Metric::DeathByPm));
            }

            let error = (loaded.len() < required.len())
                .then(|| "Mortality or population dataset could not be loaded.".to_string());
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
        let years = store.common_years(Metric::DeathByPm);
        let selection = state.selection.read().clone();
        let Some(year) = selection.year.filter(|y| years.contains(y)).or(years.last().copied())
        else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_charts();

        let ranked = store.top_countries(year, TOP_N);
        state.mark_rendered(!ranked.is_empty());
        let data_json = serde_json::to_string(&ranked).unwrap_or_default();
        let config_json = serde_json::json!({ "year": year }).to_string();
        js_bridge::render_ranked_bars(CHART_ID, &data_json, &config_json);
    });

    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "Most Affected Countries".to_string(),
                unit_description: "Deaths attributed to PM2.5 as % of population".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.loading)() {
                LoadingSpinner {}
            } else {
                YearSlider {}
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)(), min_height: 520 }
        }
    }
}
