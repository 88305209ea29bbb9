//! Browser-side dataset loading.
//!
//! Each resource is fetched independently; an app fans out every fetch it
//! needs and joins them, so one slow or missing dataset never serializes
//! or sinks the rest. A failed fetch is logged and the dataset treated as
//! absent; downstream views degrade to their "no data" state. Every
//! fetch is bounded by a timeout so a hung request cannot leave a chart
//! in Loading forever.

use anyhow::{anyhow, bail, Result};
use flate2::read::GzDecoder;
use futures::future::join_all;
use pma_dataset::Dataset;
use pma_store::DataStore;
use std::io::Read;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, Response};

/// Per-fetch timeout. A dataset that has not arrived by then is treated
/// as a failed load for this cycle.
pub const FETCH_TIMEOUT_MS: i32 = 15_000;

/// Directory the static datasets are served from, next to the WASM bundle.
pub const DATASET_DIR: &str = "./datasets";

fn js_error(context: &str, value: JsValue) -> anyhow::Error {
    anyhow!("{context}: {value:?}")
}

async fn fetch_response(url: &str) -> Result<Response> {
    let window = web_sys::window().ok_or_else(|| anyhow!("no window object"))?;

    let controller =
        AbortController::new().map_err(|e| js_error("AbortController", e))?;
    let signal = controller.signal();

    let init = RequestInit::new();
    init.set_signal(Some(&signal));
    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| js_error("Request", e))?;

    // Abort the fetch if it outlives the timeout.
    let abort = Closure::once(move || controller.abort());
    let timeout_id = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            abort.as_ref().unchecked_ref(),
            FETCH_TIMEOUT_MS,
        )
        .map_err(|e| js_error("setTimeout", e))?;

    let result = JsFuture::from(window.fetch_with_request(&request)).await;
    window.clear_timeout_with_handle(timeout_id);
    drop(abort);

    let response: Response = result
        .map_err(|e| js_error(url, e))?
        .dyn_into()
        .map_err(|_| anyhow!("{url}: fetch returned a non-Response"))?;

    if !response.ok() {
        bail!("{url}: HTTP {}", response.status());
    }
    Ok(response)
}

/// Fetch a resource as text.
pub async fn fetch_text(url: &str) -> Result<String> {
    let response = fetch_response(url).await?;
    let text = JsFuture::from(response.text().map_err(|e| js_error(url, e))?)
        .await
        .map_err(|e| js_error(url, e))?;
    text.as_string()
        .ok_or_else(|| anyhow!("{url}: response body is not text"))
}

/// Fetch a gzip-compressed CSV and decompress it.
pub async fn fetch_gz_csv(url: &str) -> Result<String> {
    let response = fetch_response(url).await?;
    let buffer = JsFuture::from(response.array_buffer().map_err(|e| js_error(url, e))?)
        .await
        .map_err(|e| js_error(url, e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut csv_text = String::new();
    decoder
        .read_to_string(&mut csv_text)
        .map_err(|e| anyhow!("{url}: gzip decode failed: {e}"))?;
    Ok(csv_text)
}

fn dataset_url(dataset: Dataset) -> String {
    format!("{DATASET_DIR}/{}", dataset.file_name())
}

/// Fetch one dataset's CSV, preferring the gzip-compressed variant when
/// the server provides one.
async fn fetch_dataset_csv(dataset: Dataset) -> Result<String> {
    let url = dataset_url(dataset);
    match fetch_gz_csv(&format!("{url}.gz")).await {
        Ok(csv_text) => Ok(csv_text),
        Err(e) => {
            log::debug!("{url}.gz unavailable ({e}), falling back to plain CSV");
            fetch_text(&url).await
        }
    }
}

/// Fetch the given datasets concurrently and load each into the store.
///
/// Returns the datasets that actually loaded. Individual failures are
/// logged and skipped; callers decide whether what loaded is enough to
/// render.
pub async fn load_datasets(store: &DataStore, datasets: &[Dataset]) -> Vec<Dataset> {
    let fetches = datasets.iter().map(|&dataset| async move {
        (dataset, fetch_dataset_csv(dataset).await)
    });

    let mut loaded = Vec::new();
    for (dataset, result) in join_all(fetches).await {
        let name = dataset.file_name();
        match result {
            Ok(csv_text) => match store.load_csv(dataset, &csv_text) {
                Ok(rows) => {
                    log::info!("{name}: loaded {rows} rows");
                    loaded.push(dataset);
                }
                Err(e) => log::warn!("{name}: parse failed, treating as absent: {e}"),
            },
            Err(e) => log::warn!("{name}: fetch failed, treating as absent: {e}"),
        }
    }
    loaded
}

/// Fetch the world-geometry document into the store. Returns false (and
/// logs) on failure; the map app then renders its missing-data state.
pub async fn load_world_geometry(store: &DataStore) -> bool {
    let url = format!("{DATASET_DIR}/world.geojson");
    match fetch_text(&url).await {
        Ok(text) => match store.load_geometry(&text) {
            Ok(features) => {
                log::info!("world geometry: {features} features loaded");
                true
            }
            Err(e) => {
                log::warn!("world geometry parse failed: {e}");
                false
            }
        },
        Err(e) => {
            log::warn!("world geometry fetch failed: {e}");
            false
        }
    }
}
