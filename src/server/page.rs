/// Dashboard page: sidebar filters plus a grid of Plotly charts
///
/// Every filter change posts the selection to `/api/dashboard` and redraws.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Sales Dashboard</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
  body { margin: 0; font-family: system-ui, sans-serif; display: flex; min-height: 100vh; }
  aside { width: 260px; padding: 1rem; background: #f4f5f7; box-sizing: border-box; }
  aside label { display: block; margin-top: 1rem; font-weight: 600; }
  aside select { width: 100%; min-height: 8rem; margin-top: 0.25rem; }
  main { flex: 1; padding: 1rem 2rem; }
  .metrics { display: flex; gap: 2rem; margin-bottom: 1rem; }
  .metric .label { color: #555; font-size: 0.9rem; }
  .metric .value { font-size: 2rem; font-weight: 600; }
  .charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 1rem; }
  .chart h3 { margin: 0.5rem 0; }
  .notice { padding: 1rem; border-radius: 4px; }
  .notice.warning { background: #fff4ce; }
  .notice.error { background: #fde2e1; }
</style>
</head>
<body>
<aside>
  <h2>Filters</h2>
  <label for="regions">Select Region</label>
  <select id="regions" multiple></select>
  <label for="categories">Select Product Category</label>
  <select id="categories" multiple></select>
</aside>
<main>
  <h1>Sales Data Analysis Dashboard</h1>
  <div id="content"></div>
</main>
<script>
const content = document.getElementById("content");

function notice(kind, text) {
  content.innerHTML = "";
  const div = document.createElement("div");
  div.className = "notice " + kind;
  div.textContent = text;
  content.appendChild(div);
}

function fillSelect(id, values) {
  const select = document.getElementById(id);
  select.innerHTML = "";
  for (const value of values) {
    const option = new Option(value, value, true, true);
    select.add(option);
  }
  select.addEventListener("change", refresh);
}

function selected(id) {
  return Array.from(document.getElementById(id).selectedOptions, o => o.value);
}

function render(view) {
  if (view.status === "empty") {
    notice("warning", view.warning);
    return;
  }
  content.innerHTML = "";
  const metrics = document.createElement("div");
  metrics.className = "metrics";
  for (const m of view.metrics) {
    const card = document.createElement("div");
    card.className = "metric";
    card.innerHTML = '<div class="label"></div><div class="value"></div>';
    card.querySelector(".label").textContent = m.label;
    card.querySelector(".value").textContent = m.value;
    metrics.appendChild(card);
  }
  content.appendChild(metrics);

  const grid = document.createElement("div");
  grid.className = "charts";
  content.appendChild(grid);
  for (const chart of view.charts) {
    const section = document.createElement("section");
    section.className = "chart";
    const heading = document.createElement("h3");
    heading.textContent = chart.heading;
    const target = document.createElement("div");
    target.id = chart.id;
    section.append(heading, target);
    grid.appendChild(section);
    Plotly.newPlot(target, chart.figure.data, chart.figure.layout, { responsive: true });
  }
}

async function refresh() {
  const body = JSON.stringify({
    regions: selected("regions"),
    categories: selected("categories"),
  });
  const response = await fetch("/api/dashboard", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body,
  });
  const payload = await response.json();
  if (!response.ok) {
    notice("error", payload.error);
    return;
  }
  render(payload);
}

async function init() {
  const response = await fetch("/api/filters");
  const payload = await response.json();
  if (!response.ok) {
    notice("error", payload.error);
    return;
  }
  fillSelect("regions", payload.regions);
  fillSelect("categories", payload.categories);
  await refresh();
}

init();
</script>
</body>
</html>
"#;
