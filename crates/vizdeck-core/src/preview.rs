/// Standalone HTML page that renders one graphic the way the production embed
/// does: `bundle.js` next to the page, payload inlined, assets resolved
/// relative to the page.
///
/// `payload` is inserted verbatim as the JavaScript expression handed to the
/// bundle's `runGraphic` entry point; callers serialize it with
/// `serde_json::to_string` so it is always a valid expression.
pub fn preview_html(title: &str, style: &str, payload: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">

<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>html, body {{ margin: 0; padding: 0; }}</style>
  <style>{style}</style>
</head>

<body onload="load()">
  <div id="myId"></div>
  <script src="./bundle.js"></script>
  <script>
    const load = () => {{
      const payload = {payload}
      const urlToFetchData = null
      const urlToFetchAssets = './assets'
      VizdeckGraphics.runGraphic({{ payload, urlToFetchData, urlToFetchAssets }})
    }}
  </script>
</body>

</html>
"#
    )
}
