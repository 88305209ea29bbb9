//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The D3.js chart functions live in `assets/js/*.js`, embedded at compile
//! time and evaluated as globals (no ES modules) once D3 itself has
//! loaded. This module provides safe Rust wrappers that serialize chart
//! data and call those globals.

// Embed all D3 chart JS files at compile time
static TOOLTIP_JS: &str = include_str!("assets/js/tooltip.js");
static CHOROPLETH_JS: &str = include_str!("assets/js/choropleth-map.js");
static DUAL_AXIS_JS: &str = include_str!("assets/js/dual-axis-chart.js");
static RADIAL_JS: &str = include_str!("assets/js/radial-chart.js");
static RADAR_JS: &str = include_str!("assets/js/radar-chart.js");
static RANKED_BARS_JS: &str = include_str!("assets/js/ranked-bars.js");
static RANGE_COMPARISON_JS: &str = include_str!("assets/js/range-comparison.js");

/// Chart functions promoted to `window.*` once D3 is ready.
const CHART_FUNCTIONS: [&str; 10] = [
    "renderChoroplethMap",
    "renderDualAxisChart",
    "renderRadialChart",
    "renderRadarChart",
    "renderRankedBars",
    "renderRangeComparison",
    "renderPlaceholder",
    "initTooltip",
    "showTooltip",
    "hideTooltip",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {code} }} catch(e) {{ console.warn('PMA JS call failed:', e); }}"
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize chart scripts with a wait-for-D3 polling loop.
///
/// The chart JS files use `function` declarations; to make them globally
/// accessible they are evaluated at global scope via indirect eval once
/// D3 is ready, then each function is promoted to `window.*` explicitly.
pub fn init_charts() {
    let all_js = [
        TOOLTIP_JS,
        CHOROPLETH_JS,
        DUAL_AXIS_JS,
        RADIAL_JS,
        RADAR_JS,
        RANKED_BARS_JS,
        RANGE_COMPARISON_JS,
    ]
    .join("\n");

    // Store the scripts on window so the polling callback can eval them
    // at global scope (not block-scoped inside setInterval).
    let store_js = format!(
        "window.__pmaChartScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let promotions: String = CHART_FUNCTIONS
        .iter()
        .map(|f| format!("if (typeof {f} !== 'undefined') window.{f} = {f};\n"))
        .collect();

    let init_js = format!(
        r#"
        (function() {{
            var waitForD3 = setInterval(function() {{
                if (typeof d3 !== 'undefined') {{
                    clearInterval(waitForD3);
                    (0, eval)(window.__pmaChartScripts);
                    delete window.__pmaChartScripts;
                    {promotions}
                    window.__pmaChartsReady = true;
                    console.log('PMA charts initialized');
                }}
            }}, 100);
        }})();
        "#
    );
    let _ = js_sys::eval(&init_js);
}

/// Store the world-geometry GeoJSON on `window` for the map renderer.
///
/// The geometry is large and never changes after load, so it is handed
/// over once instead of being re-escaped into every render call.
pub fn set_world_geometry(geojson: &str) {
    let assign = format!(
        "window.__pmaWorldGeometry = JSON.parse({});",
        serde_json::to_string(geojson).unwrap_or_default()
    );
    call_js(&assign);
}

/// Poll until D3, the chart scripts, and the container element are all
/// present, then invoke one of the render functions.
fn render_when_ready(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    let escaped_data = data_json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    let escaped_config = config_json.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__pmaChartsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', '{escaped_data}', '{escaped_config}');
                    }} catch(e) {{ console.error('[PMA] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the world choropleth map.
pub fn render_choropleth_map(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderChoroplethMap", container_id, data_json, config_json);
}

/// Render the dual-axis PM2.5 + companion metric trend chart.
pub fn render_dual_axis_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderDualAxisChart", container_id, data_json, config_json);
}

/// Render the radial per-year chart.
pub fn render_radial_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderRadialChart", container_id, data_json, config_json);
}

/// Render the radar comparison chart.
pub fn render_radar_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderRadarChart", container_id, data_json, config_json);
}

/// Render the ranked death-rate bar chart.
pub fn render_ranked_bars(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderRankedBars", container_id, data_json, config_json);
}

/// Render the grouped bar+line mortality comparison.
pub fn render_range_comparison(container_id: &str, data_json: &str, config_json: &str) {
    render_when_ready("renderRangeComparison", container_id, data_json, config_json);
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{container_id}'); if (el) el.innerHTML = '';"
    ));
}
