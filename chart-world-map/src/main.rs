//! World Choropleth Map
//!
//! Colors every country by the selected metric for the selected year,
//! with a hover tooltip listing every available metric for that country.
//!
//! Data flow:
//! 1. On mount: fetch all six CSV datasets plus `world.geojson`
//!    concurrently and load them into a `DataStore`.
//! 2. The world geometry is handed to the JS side once (it never changes).
//! 3. On metric/year change: re-query `choropleth()` + `country_details()`
//!    and redraw via D3.js.

use dioxus::prelude::*;
use pma_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, MetricSelector, YearSlider};
use pma_chart_ui::{fetch, js_bridge};
use pma_chart_ui::state::AppState;
use pma_dataset::Dataset;
use pma_store::DataStore;

/// Chart container DOM element ID used by D3.js to render into.
const CHART_ID: &str = "world-map-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("world-map-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // Fetch everything once on mount.
    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();

            let loaded = fetch::load_datasets(&store, &Dataset::ALL).await;
            let geometry_ok = fetch::load_world_geometry(&store).await;

            if !state.is_current(stamp) {
                return;
            }

            if let Some(geojson) = store.geometry_json() {
                js_bridge::set_world_geometry(&geojson);
            }

            // Join diagnostic: map features whose name matches no dataset
            // will render in the neutral no-data fill.
            let known = store.countries(pma_dataset::Metric::Pm25);
            let unmatched = store
                .geometry_names()
                .iter()
                .filter(|name| !known.contains(name))
                .count();
            if unmatched > 0 {
                log::info!("{unmatched} geometry features have no PM2.5 data");
            }

            // Default the year to the latest common year of the default metric.
            let years = store.common_years(state.selection.peek().metric);
            state.selection.write().snap_year(&years);

            let error = if loaded.is_empty() {
                Some("None of the datasets could be loaded.".to_string())
            } else if !geometry_ok {
                Some("World geometry could not be loaded.".to_string())
            } else {
                None
            };
            state.store.set(Some(store));
            state.finish_load(stamp, error);
        });
    });

    // Redraw whenever the selection or the loaded data changes.
    use_effect(move || {
        if (state.loading)() || (state.error_msg)().is_some() {
            return;
        }
        let Some(store) = state.store.read().clone() else {
            return;
        };

        let selection = state.selection.read().clone();
        let metric = selection.metric;
        let years = store.common_years(metric);
        let Some(year) = selection.year.filter(|y| years.contains(y)).or(years.last().copied()) else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_charts();

        let values = store.choropleth(metric, year);
        let details = store.country_details(year);
        state.mark_rendered(!values.is_empty());

        let data_json = serde_json::json!({
            "values": values,
            "details": details,
        })
        .to_string();
        let config_json = serde_json::json!({
            "label": metric.label(),
            "unit": metric.unit(),
            "year": year,
        })
        .to_string();

        js_bridge::render_choropleth_map(CHART_ID, &data_json, &config_json);
    });

    rsx! {
        div {
            style: "max-width: 1000px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "Global PM2.5 Exposure Map".to_string(),
                unit_description: "Hover a country for all metrics; colors follow the selected metric".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.loading)() {
                LoadingSpinner {}
            } else {
                MetricSelector {}
                YearSlider {}
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)(), min_height: 560 }
        }
    }
}
