use crate::export::model::GraphExport;

/// Force-graph page with a placeholder where the graph JSON is spliced in.
const TEMPLATE: &str = include_str!("../../web/index.html");

const PLACEHOLDER: &str = "/*__GRAPH_DATA__*/null";

/// Render a standalone HTML page that draws `export` as a force-directed graph.
///
/// The JSON is embedded in a `<script>` block, so `</` is escaped to keep a location such
/// as `</script>` from terminating it.
pub fn render_html(export: &GraphExport) -> serde_json::Result<String> {
    let json = serde_json::to_string(export)?.replace("</", "<\\/");
    Ok(TEMPLATE.replacen(PLACEHOLDER, &json, 1))
}
