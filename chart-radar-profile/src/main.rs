//! Radar Profile Chart
//!
//! Places one country's PM2.5 exposure, population, respiratory and
//! cardiovascular death rates on a common 0-10 scale, each axis normalized
//! against the dataset-wide maximum for the selected year.

use dioxus::prelude::*;
use pma_chart_ui::components::{
    ChartContainer, ChartHeader, CountrySelector, ErrorDisplay, LoadingSpinner, YearSlider,
};
use pma_chart_ui::state::AppState;
use pma_chart_ui::{fetch, js_bridge};
use pma_dataset::{Dataset, Metric};
use pma_store::DataStore;

const CHART_ID: &str = "radar-profile-chart";

/// The four datasets behind the radar's axes.
const REQUIRED: [Dataset; 4] = [
    Dataset::Pm25Exposure,
    Dataset::Population,
    Dataset::RespiratoryDeathRate,
    Dataset::CardiovascularDeathRate,
];

/// Metrics whose common years bound the year slider.
const AXIS_METRICS: [Metric; 4] = [
    Metric::Pm25,
    Metric::Population,
    Metric::Respiratory,
    Metric::Cardiovascular,
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("radar-profile-root"))
        .launch(App);
}

fn slider_years(store: &DataStore) -> Vec<i32> {
    let mut iter = AXIS_METRICS.iter();
    let first = iter
        .next()
        .map(|m| store.common_years(*m))
        .unwrap_or_default();
    iter.fold(first, |acc, m| {
        let other = store.common_years(*m);
        acc.into_iter().filter(|y| other.contains(y)).collect()
    })
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_effect(move || {
        spawn(async move {
            let stamp = state.begin_load();
            let store = DataStore::new();
            let loaded = fetch::load_datasets(&store, &REQUIRED).await;

            if !state.is_current(stamp) {
                return;
            }

            {
                let mut selection = state.selection.write();
                let countries = store.countries(Metric::Pm25);
                selection.select_country(countries.first().cloned());
                selection.snap_year(&slider_years(&store));
            }

            let error = (loaded.len() < REQUIRED.len()).then(|| {
                "Some radar datasets could not be loaded; affected axes will be empty."
                    .to_string()
            });
            state.store.set(Some(store));
            state.finish_load(stamp, error);
        });
    });

    use_effect(move || {
        if (state.loading)() {
            return;
        }
        let Some(store) = state.store.read().clone() else {
            return;
        };
        let selection = state.selection.read().clone();
        let Some(country) = selection.country.clone() else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };
        let years = slider_years(&store);
        let Some(year) = selection.year.filter(|y| years.contains(y)).or(years.last().copied())
        else {
            js_bridge::destroy_chart(CHART_ID);
            return;
        };

        js_bridge::init_charts();

        let profile = store.radar_profile(&country, year);
        state.mark_rendered(profile.has_data());
        let data_json = serde_json::to_string(&profile).unwrap_or_default();
        let config_json = serde_json::json!({ "country": country, "year": year }).to_string();
        js_bridge::render_radar_chart(CHART_ID, &data_json, &config_json);
    });

    rsx! {
        div {
            style: "max-width: 700px; margin: 0 auto; padding: 16px;",
            ChartHeader {
                title: "Country Profile Radar".to_string(),
                unit_description: "All axes normalized to 0-10 against the selected year's maxima".to_string(),
            }
            if let Some(msg) = (state.error_msg)() {
                ErrorDisplay { message: msg }
            }
            if (state.loading)() {
                LoadingSpinner {}
            } else {
                CountrySelector {}
                YearSlider { metrics: AXIS_METRICS.to_vec() }
            }
            ChartContainer { id: CHART_ID.to_string(), loading: (state.loading)() }
        }
    }
}
