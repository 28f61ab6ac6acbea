//! Vega-Lite line chart for the long-form price rows.

use serde_json::{Value, json};

use crate::{
    long_form::{DATE_FIELD, LongFormRow, NAME_FIELD, PRICE_FIELD},
    state::PriceRange,
};

pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// One line per company; x is the trading date, y the close clipped to `range`.
pub fn line_chart(rows: &[LongFormRow], range: PriceRange) -> Result<Value, serde_json::Error> {
    let values = serde_json::to_value(rows)?;
    Ok(json!({
        "$schema": VEGA_LITE_SCHEMA,
        "width": "container",
        "data": { "values": values },
        "mark": { "type": "line", "opacity": 0.8, "clip": true },
        "encoding": {
            "x": { "field": DATE_FIELD, "type": "temporal" },
            "y": {
                "field": PRICE_FIELD,
                "type": "quantitative",
                "stack": null,
                "scale": { "domain": [range.min(), range.max()] }
            },
            "color": { "field": NAME_FIELD, "type": "nominal" }
        }
    }))
}

/// Standalone page that draws `chart` with vega-embed.
pub fn to_html(chart: &Value, title: &str) -> Result<String, serde_json::Error> {
    // `<` would let a company name close the script element early.
    let spec = serde_json::to_string(chart)?.replace('<', "\\u003c");
    let title = title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    Ok(format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
  <h1>{title}</h1>
  <div id="chart" style="width: 100%"></div>
  <script>vegaEmbed("#chart", {spec});</script>
</body>
</html>
"##
    ))
}
