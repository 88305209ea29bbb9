//! Radial Years Chart
//!
//! Wraps one country's years around a circle: the angle walks through the
//! series, the radius encodes PM2.5 exposure, the point size population,
//! and the point color population growth since the first year.

use dioxus::prelude::*;
use pma_chart_ui::components::{
    ChartContainer, ChartHeader, CountrySelector, ErrorDisplay, LoadingSpinner,
};
use pma_chart_ui::state::AppState;
use pma_chart_ui::{fetch, js_bridge};
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;

const CHART_ID: &str = "radial-years-chart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("radial-years-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();
            let required = [Dataset::Pm25Exposure, Dataset::Population];
            let loaded = fetch::load_datasets(&store, &required).await;

            if !state.is_current(stamp) {
                return;
            }

            let countries = store.countries(Metric::Pm25);
            state.selection.write().select_country(countries.first().cloned());

            let error = (loaded.len() < required.len())
                .then(|| "PM2.5 or population dataset could not be loaded.".to_string());
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
        let Some(country) = state.selection.read().country.clone() else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_charts();

        let series = store.radial(&country);
        state.mark_rendered(!series.is_empty());
        let data_json = serde_json::to_string(&series).unwrap_or_default();
        let config_json = serde_json::json!({ "country": country }).to_string();
        js_bridge::render_radial_chart(CHART_ID, &data_json, &config_json);
    });

    rsx! {
        div {
            style: "max-width: 900px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "PM2.5 and Population by Year".to_string(),
                unit_description: "Radius: µg/m³; point size: population; color: growth since first year".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.loading)() {
                LoadingSpinner {}
            } else {
                CountrySelector {}
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)(), min_height: 660 }
        }
    }
}
