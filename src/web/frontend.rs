//! Embedded single-page dashboard.
//!
//! One static HTML page, no build step and no external assets. Charts are
//! plain CSS bars driven by the JSON API; the page keeps no state of its
//! own beyond the last API responses.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>metapress dashboard</title>
<style>
  :root {
    --bg: #101418; --panel: #1a2028; --text: #d8dee6; --dim: #7a8694;
    --accent: #4aa3df; --good: #5cb85c; --bad: #d9534f; --warn: #e8a33d;
  }
  * { box-sizing: border-box; }
  body {
    margin: 0; background: var(--bg); color: var(--text);
    font: 14px/1.5 -apple-system, "Segoe UI", Roboto, sans-serif;
  }
  header {
    padding: 16px 24px; background: var(--panel);
    display: flex; align-items: baseline; gap: 16px;
  }
  header h1 { margin: 0; font-size: 18px; }
  header .status { color: var(--dim); }
  header .status.ok { color: var(--good); }
  header .status.err { color: var(--bad); }
  main { padding: 24px; display: grid; gap: 24px; max-width: 1100px; margin: 0 auto; }
  section { background: var(--panel); border-radius: 8px; padding: 16px 20px; }
  h2 { margin: 0 0 12px; font-size: 15px; color: var(--accent); }
  .controls { display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 12px; }
  input, select, button {
    background: var(--bg); color: var(--text); border: 1px solid #2c3540;
    border-radius: 4px; padding: 6px 10px; font: inherit;
  }
  button { cursor: pointer; }
  button:hover { border-color: var(--accent); }
  table { width: 100%; border-collapse: collapse; }
  th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #2c3540; }
  th { color: var(--dim); font-weight: 500; }
  td.num { color: var(--dim); }
  .bar-row { display: grid; grid-template-columns: 140px 1fr 48px; gap: 8px; align-items: center; margin: 3px 0; }
  .bar-row .label { color: var(--dim); overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
  .bar { height: 14px; background: var(--accent); border-radius: 2px; min-width: 2px; }
  .bar.neg { background: var(--bad); }
  .bar-row .value { text-align: right; color: var(--dim); }
  .hint { color: var(--dim); }
  .charts { display: grid; grid-template-columns: 1fr 1fr; gap: 24px; }
  pre { background: var(--bg); padding: 12px; border-radius: 4px; overflow: auto; max-height: 320px; }
  .danger { color: var(--bad); }
</style>
</head>
<body>
<header>
  <h1>metapress</h1>
  <span id="conn" class="status">checking connection…</span>
</header>
<main>
  <section>
    <h2>Records</h2>
    <div class="controls">
      <input id="search" placeholder="Search title…">
      <select id="status-filter">
        <option value="">Any status</option>
        <option>publish</option><option>draft</option>
        <option>pending</option><option>private</option>
      </select>
      <button onclick="fetchRecords()">Fetch</button>
      <span id="record-count" class="hint"></span>
    </div>
    <table id="records">
      <thead><tr><th>ID</th><th>Title</th><th>Status</th><th>Date</th><th></th></tr></thead>
      <tbody></tbody>
    </table>
  </section>

  <section>
    <h2>Aggregates</h2>
    <div class="charts">
      <div><h2>By status</h2><div id="chart-status" class="hint">Fetch records first.</div></div>
      <div><h2>By month</h2><div id="chart-timeline" class="hint">Fetch records first.</div></div>
    </div>
  </section>

  <section>
    <h2>Sample charts</h2>
    <div class="controls">
      <select id="sample-category">
        <option>Real Estate</option><option>Stock Market</option><option>DISC Assessment</option>
      </select>
      <button onclick="loadSamples()">Show</button>
    </div>
    <div id="samples"></div>
  </section>

  <section>
    <h2>Templates</h2>
    <div class="controls">
      <select id="template-pick"></select>
      <button onclick="showTemplate()">Show skeleton</button>
    </div>
    <pre id="template-json" hidden></pre>
  </section>
</main>
<script>
async function getJson(url, options) {
  const resp = await fetch(url, options);
  const data = await resp.json();
  if (!resp.ok) throw new Error(data.error || ('HTTP ' + resp.status));
  return data;
}

async function checkHealth() {
  const el = document.getElementById('conn');
  try {
    const health = await getJson('/api/health');
    if (health.connected) {
      el.textContent = 'connected to ' + health.base_url + ' (' + health.post_type + ')';
      el.className = 'status ok';
    } else {
      el.textContent = 'not connected: ' + (health.error || 'unknown');
      el.className = 'status err';
    }
  } catch (e) {
    el.textContent = 'health check failed: ' + e.message;
    el.className = 'status err';
  }
}

async function fetchRecords() {
  const search = encodeURIComponent(document.getElementById('search').value);
  const status = encodeURIComponent(document.getElementById('status-filter').value);
  const tbody = document.querySelector('#records tbody');
  try {
    const records = await getJson('/api/records?search=' + search + '&status=' + status);
    document.getElementById('record-count').textContent = records.length + ' record(s)';
    tbody.innerHTML = '';
    for (const r of records) {
      const title = (r.title && (r.title.rendered !== undefined ? r.title.rendered : r.title)) || '';
      const row = document.createElement('tr');
      row.innerHTML = '<td class="num">' + (r.id ?? '') + '</td>'
        + '<td></td><td>' + (r.status || '') + '</td>'
        + '<td class="num">' + (r.date || '') + '</td>'
        + '<td><button class="danger" onclick="deleteRecord(' + r.id + ')">delete</button></td>';
      row.children[1].textContent = title;
      tbody.appendChild(row);
    }
    await refreshAggregates();
  } catch (e) {
    document.getElementById('record-count').textContent = e.message;
  }
}

async function deleteRecord(id) {
  if (!confirm('Permanently delete record ' + id + '?')) return;
  try {
    await getJson('/api/records/' + id + '?force=true', { method: 'DELETE' });
    await fetchRecords();
  } catch (e) {
    alert('Delete failed: ' + e.message);
  }
}

function renderBars(el, counts) {
  if (!counts.length) { el.innerHTML = '<span class="hint">(no data)</span>'; return; }
  const max = Math.max(...counts.map(c => c.count));
  el.innerHTML = counts.map(c =>
    '<div class="bar-row"><span class="label"></span>'
    + '<div><div class="bar" style="width:' + (100 * c.count / max) + '%"></div></div>'
    + '<span class="value">' + c.count + '</span></div>').join('');
  el.querySelectorAll('.label').forEach((span, i) => { span.textContent = counts[i].label; });
}

async function refreshAggregates() {
  renderBars(document.getElementById('chart-status'), await getJson('/api/aggregates/status'));
  renderBars(document.getElementById('chart-timeline'), await getJson('/api/aggregates/timeline'));
}

async function loadSamples() {
  const category = encodeURIComponent(document.getElementById('sample-category').value);
  const charts = await getJson('/api/samples?category=' + category);
  const host = document.getElementById('samples');
  host.innerHTML = '';
  for (const chart of charts) {
    const block = document.createElement('div');
    const title = document.createElement('h2');
    title.textContent = chart.title;
    block.appendChild(title);
    for (const series of chart.series) {
      if (chart.series.length > 1) {
        const name = document.createElement('div');
        name.className = 'hint';
        name.textContent = series.name;
        block.appendChild(name);
      }
      const max = Math.max(...series.points.map(p => Math.abs(p.value)));
      for (const p of series.points) {
        const row = document.createElement('div');
        row.className = 'bar-row';
        row.innerHTML = '<span class="label"></span><div><div class="bar'
          + (p.value < 0 ? ' neg' : '') + '" style="width:'
          + (max ? 100 * Math.abs(p.value) / max : 0) + '%"></div></div>'
          + '<span class="value">' + p.value + '</span>';
        row.querySelector('.label').textContent = p.label;
        block.appendChild(row);
      }
    }
    host.appendChild(block);
  }
}

async function loadTemplates() {
  const pick = document.getElementById('template-pick');
  const data = await getJson('/api/templates');
  for (const group of data.categories) {
    for (const name of group.names) {
      const option = document.createElement('option');
      option.value = group.category + '|' + name;
      option.textContent = group.category + ' - ' + name;
      pick.appendChild(option);
    }
  }
}

async function showTemplate() {
  const [category, name] = document.getElementById('template-pick').value.split('|');
  const skeleton = await getJson('/api/templates/show?category='
    + encodeURIComponent(category) + '&name=' + encodeURIComponent(name));
  const pre = document.getElementById('template-json');
  pre.hidden = false;
  pre.textContent = JSON.stringify(skeleton, null, 2);
}

checkHealth();
loadTemplates();
</script>
</body>
</html>
"#;
