use std::collections::BTreeMap;

use super::OutputRecord;
use crate::i18n::{self, Language};

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn ui_strings_json() -> Result<String, serde_json::Error> {
    let mut by_lang: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();
    for lang in [Language::English, Language::Telugu] {
        by_lang.insert(lang.code(), i18n::ui_table(lang).into_iter().collect());
    }
    serde_json::to_string(&by_lang)
}

fn data_dictionary_json() -> Result<String, serde_json::Error> {
    let dict: BTreeMap<&str, &str> = i18n::data_dictionary().iter().copied().collect();
    serde_json::to_string(&dict)
}

/// Standalone dashboard page: counters, filter/search, table, detail modal,
/// chart, CSV download and the EN/TE toggle, all driven by embedded JSON.
pub fn render_html(
    records: &[OutputRecord],
    language: Language,
) -> Result<Vec<u8>, serde_json::Error> {
    let json = json_for_script_tag(&serde_json::to_string(records)?);
    let ui = json_for_script_tag(&ui_strings_json()?);
    let dict = json_for_script_tag(&data_dictionary_json()?);
    let lang = language.code();
    let csv_header = super::CSV_HEADER;

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>GovPulse Dashboard</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms"></script>
  <style>
    .badge.high {{ background:#fee2e2; color:#b91c1c; }}
    .badge.normal {{ background:#dcfce7; color:#15803d; }}
    .hidden {{ display:none; }}
  </style>
</head>
<body class="bg-slate-50 text-slate-900 min-h-screen">
  <script type="application/json" id="records-data">{json}</script>
  <script type="application/json" id="ui-strings">{ui}</script>
  <script type="application/json" id="data-dictionary">{dict}</script>

  <header class="flex items-center justify-between border-b border-slate-200 bg-white px-8 py-4">
    <h1 class="text-xl font-bold" data-i18n="title"></h1>
    <div class="flex gap-3">
      <button id="download-csv" class="rounded-lg border border-slate-200 px-4 py-2 text-sm font-bold" type="button">CSV</button>
      <button id="lang-toggle" class="rounded-lg bg-blue-600 text-white px-4 py-2 text-sm font-bold" type="button"></button>
    </div>
  </header>

  <main class="max-w-6xl mx-auto px-8 py-8">
    <section class="grid grid-cols-3 gap-4 mb-8">
      <div class="bg-white rounded-xl border p-5"><p class="text-sm text-slate-500" data-i18n="total"></p><p id="total-apps" class="text-3xl font-bold">0</p></div>
      <div class="bg-white rounded-xl border p-5"><p class="text-sm text-slate-500" data-i18n="high"></p><p id="high-risk-apps" class="text-3xl font-bold text-red-600">0</p></div>
      <div class="bg-white rounded-xl border p-5"><p class="text-sm text-slate-500" data-i18n="normal"></p><p id="normal-apps" class="text-3xl font-bold text-green-600">0</p></div>
    </section>

    <section class="bg-white rounded-xl border p-5 mb-8">
      <p class="text-sm font-bold mb-3" data-i18n="breakdown"></p>
      <div id="risk-chart" class="flex flex-col gap-2"></div>
    </section>

    <section class="flex flex-wrap gap-4 mb-4">
      <input id="search-input" class="flex-1 min-w-[240px] rounded-lg border-slate-200" placeholder="Search department or service..." type="text"/>
      <select id="risk-filter" class="rounded-lg border-slate-200">
        <option value="all">All</option>
        <option value="High">High</option>
        <option value="Normal">Normal</option>
      </select>
    </section>

    <div class="bg-white rounded-xl border overflow-x-auto">
      <table class="w-full text-left">
        <thead>
          <tr class="bg-slate-100 text-xs uppercase">
            <th class="px-4 py-3" data-i18n="department"></th>
            <th class="px-4 py-3" data-i18n="service"></th>
            <th class="px-4 py-3" data-i18n="risk"></th>
            <th class="px-4 py-3" data-i18n="roles"></th>
            <th class="px-4 py-3" data-i18n="action"></th>
          </tr>
        </thead>
        <tbody id="table-body" class="divide-y divide-slate-100"></tbody>
      </table>
    </div>
  </main>

  <div id="modal" class="hidden fixed inset-0 bg-black/40 flex items-center justify-center">
    <div class="bg-white rounded-xl max-w-lg w-full p-6">
      <div class="flex justify-between items-start mb-4">
        <h3 id="modal-title" class="text-lg font-bold"></h3>
        <button id="modal-close" class="text-slate-500" type="button">&times;</button>
      </div>
      <p class="text-xs font-bold uppercase text-slate-500" data-i18n="summary"></p>
      <p id="ai-summary" class="mb-3"></p>
      <p class="text-xs font-bold uppercase text-slate-500" data-i18n="details"></p>
      <p id="ai-details" class="mb-3"></p>
      <p class="text-xs font-bold uppercase text-slate-500" data-i18n="what_if"></p>
      <p id="ai-whatif"></p>
    </div>
  </div>

  <script>
    (function() {{
      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }}

      const DATA = JSON.parse(document.getElementById('records-data').textContent || '[]');
      const UI = JSON.parse(document.getElementById('ui-strings').textContent || '{{}}');
      const DICT = JSON.parse(document.getElementById('data-dictionary').textContent || '{{}}');

      let state = {{ filter: 'all', search: '', lang: '{lang}' }};

      function ui(key) {{
        const table = UI[state.lang] || UI.en || {{}};
        return table[key] || key;
      }}
      function data(value) {{
        if (state.lang !== 'te') return value;
        return Object.prototype.hasOwnProperty.call(DICT, value) ? DICT[value] : value;
      }}

      function computeStats() {{
        const high = DATA.filter(d => d.risk_level === 'High').length;
        return {{ total: DATA.length, high: high, normal: DATA.length - high }};
      }}

      function visible() {{
        const needle = state.search.toLowerCase();
        return DATA.filter(d =>
          (state.filter === 'all' || d.risk_level === state.filter) &&
          (d.department + d.service_name).toLowerCase().includes(needle)
        );
      }}

      function renderLabels() {{
        for (const el of document.querySelectorAll('[data-i18n]')) {{
          el.textContent = ui(el.getAttribute('data-i18n'));
        }}
        document.getElementById('lang-toggle').textContent = state.lang === 'te' ? 'English' : 'తెలుగు';
        document.documentElement.lang = state.lang;
      }}

      function renderStats() {{
        const s = computeStats();
        document.getElementById('total-apps').textContent = s.total;
        document.getElementById('high-risk-apps').textContent = s.high;
        document.getElementById('normal-apps').textContent = s.normal;
      }}

      function renderChart() {{
        const s = computeStats();
        const host = document.getElementById('risk-chart');
        host.innerHTML = '';
        for (const [label, count, color] of [['High', s.high, '#dc2626'], ['Normal', s.normal, '#16a34a']]) {{
          const pct = s.total === 0 ? 0 : Math.round(count * 100 / s.total);
          const row = document.createElement('div');
          row.className = 'flex items-center gap-3 text-sm';
          row.innerHTML = `<span class="w-24">${{escapeHtml(data(label))}}</span>
            <span class="flex-1 bg-slate-100 rounded h-4"><span class="block h-4 rounded" style="width:${{pct}}%;background:${{color}}"></span></span>
            <span class="w-20 text-right">${{count}} (${{pct}}%)</span>`;
          host.appendChild(row);
        }}
      }}

      function renderTable() {{
        const body = document.getElementById('table-body');
        body.innerHTML = '';
        const rows = visible();
        if (rows.length === 0) {{
          body.innerHTML = `<tr><td colspan="5" class="px-4 py-6 text-center">${{escapeHtml(ui('no_data'))}}</td></tr>`;
          return;
        }}
        for (const d of rows) {{
          const tr = document.createElement('tr');
          tr.className = 'hover:bg-slate-50 cursor-pointer';
          const roles = (d.delayed_roles || []).map(data).join(', ') || '-';
          const badge = d.risk_level === 'High' ? 'high' : 'normal';
          tr.innerHTML = `
            <td class="px-4 py-3">${{escapeHtml(data(d.department))}}</td>
            <td class="px-4 py-3">${{escapeHtml(data(d.service_name))}}</td>
            <td class="px-4 py-3"><span class="badge ${{badge}} px-3 py-1 rounded-lg text-xs font-bold">${{escapeHtml(data(d.risk_level))}}</span></td>
            <td class="px-4 py-3">${{escapeHtml(roles)}}</td>
            <td class="px-4 py-3 text-blue-600">${{escapeHtml(ui('view_details'))}}</td>`;
          tr.addEventListener('click', function() {{ openDetail(d); }});
          body.appendChild(tr);
        }}
      }}

      function openDetail(d) {{
        if (!d || !d.ai_explanation) return;
        document.getElementById('modal-title').textContent = `${{data(d.department)}} - ${{data(d.service_name)}}`;
        document.getElementById('ai-summary').textContent = d.ai_explanation.summary || '';
        document.getElementById('ai-details').textContent = d.ai_explanation.details || '';
        document.getElementById('ai-whatif').textContent = d.ai_explanation.what_if || '';
        document.getElementById('modal').classList.remove('hidden');
      }}

      function closeDetail() {{
        document.getElementById('modal').classList.add('hidden');
      }}

      function downloadCsv() {{
        const lines = ['{csv_header}'];
        for (const d of DATA) {{
          lines.push([d.department, d.service_name, d.risk_level, d.sla_days ?? '', d.workflow_steps ?? ''].join(','));
        }}
        const blob = new Blob([lines.join('\n') + '\n'], {{ type: 'text/csv' }});
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = 'govpulse_services.csv';
        link.click();
        URL.revokeObjectURL(link.href);
      }}

      function render() {{
        renderLabels();
        renderStats();
        renderChart();
        renderTable();
      }}

      document.getElementById('search-input').addEventListener('input', function(e) {{
        state = Object.assign({{}}, state, {{ search: e.target.value }});
        renderTable();
      }});
      document.getElementById('risk-filter').addEventListener('change', function(e) {{
        state = Object.assign({{}}, state, {{ filter: e.target.value }});
        renderTable();
      }});
      document.getElementById('lang-toggle').addEventListener('click', function() {{
        state = Object.assign({{}}, state, {{ lang: state.lang === 'te' ? 'en' : 'te' }});
        render();
      }});
      document.getElementById('modal-close').addEventListener('click', closeDetail);
      document.getElementById('modal').addEventListener('click', function(e) {{
        if (e.target === e.currentTarget) closeDetail();
      }});
      document.getElementById('download-csv').addEventListener('click', downloadCsv);

      render();
    }})();
  </script>
</body>
</html>"####,
    );

    Ok(html.into_bytes())
}
