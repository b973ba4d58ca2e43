use crate::charts::ChartSlot;

pub fn render_index() -> String {
    let panels: String = ChartSlot::ALL
        .iter()
        .map(|slot| {
            format!(
                r#"      <section class="dashboard-panel{wide}">
        <h3>{title}</h3>
        <div class="chart-box"><canvas id="{id}"></canvas></div>
      </section>
"#,
                wide = if is_wide(*slot) { " wide" } else { "" },
                title = slot_title(*slot),
                id = slot.id(),
            )
        })
        .collect();

    INDEX_HTML.replace("{{PANELS}}", &panels)
}

fn slot_title(slot: ChartSlot) -> &'static str {
    match slot {
        ChartSlot::Paradox => "The Independence Paradox",
        ChartSlot::AuthenticityGap => "The Authenticity Gap",
        ChartSlot::Age => "Age Distribution",
        ChartSlot::Profession => "Professions",
        ChartSlot::Frequency => "Travel Frequency",
        ChartSlot::Budget => "Budget Split",
        ChartSlot::Companions => "Travel Companions",
        ChartSlot::Exploration => "Exploration Methods",
        ChartSlot::Experiences => "Desired Experiences",
        ChartSlot::Problems => "Top Problems",
        ChartSlot::Satisfaction => "Satisfaction",
        ChartSlot::Frustration => "Frustration",
        ChartSlot::MissingExperiences => "Missing Experiences",
        ChartSlot::Overspending => "Overspending",
    }
}

fn is_wide(slot: ChartSlot) -> bool {
    matches!(
        slot,
        ChartSlot::Exploration | ChartSlot::Problems | ChartSlot::AuthenticityGap
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Travel Analytics Dashboard</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #0d1117;
      --panel: #161b22;
      --border: rgba(139, 148, 158, 0.2);
      --ink: #f0f6fc;
      --muted: #8b949e;
      --cyan: #39c5f7;
      --magenta: #e577ff;
      --red: #ff7b72;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, rgba(57, 197, 247, 0.12), transparent 55%), var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    #loadingScreen {
      position: fixed;
      inset: 0;
      display: grid;
      place-items: center;
      background: var(--bg);
      z-index: 50;
      transition: opacity 500ms ease;
    }

    #loadingScreen.fade-out {
      opacity: 0;
      pointer-events: none;
    }

    .hidden {
      display: none !important;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
      padding: 28px 32px 0;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 3vw, 2.4rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
    }

    .actions {
      display: flex;
      gap: 10px;
    }

    button {
      appearance: none;
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--panel);
      color: var(--ink);
      font: inherit;
      font-weight: 600;
      cursor: pointer;
    }

    button.primary {
      background: linear-gradient(135deg, var(--cyan), var(--magenta));
      border: none;
      color: #0d1117;
    }

    main {
      display: grid;
      gap: 20px;
      padding: 24px 32px 48px;
    }

    .kpis {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .kpi-card, .insight, .dashboard-panel {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 18px;
    }

    .kpi-card .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .kpi-card .kpi-value {
      display: block;
      margin-top: 8px;
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--cyan);
    }

    .insights {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .insight .metric {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--magenta);
    }

    .insight p {
      color: var(--muted);
      line-height: 1.5;
    }

    .panels {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 16px;
    }

    .dashboard-panel {
      opacity: 0;
      transform: translateY(12px);
      transition: opacity 400ms ease, transform 400ms ease;
    }

    .dashboard-panel.animate {
      opacity: 1;
      transform: none;
    }

    .dashboard-panel.wide {
      grid-column: 1 / -1;
    }

    .dashboard-panel h3 {
      margin: 0 0 12px;
      font-size: 1rem;
    }

    .chart-box {
      position: relative;
      height: 280px;
    }

    .modal {
      position: fixed;
      inset: 0;
      display: grid;
      place-items: center;
      z-index: 40;
    }

    .modal-overlay {
      position: absolute;
      inset: 0;
      background: rgba(0, 0, 0, 0.6);
    }

    .modal-body {
      position: relative;
      width: min(420px, 92vw);
      display: grid;
      gap: 14px;
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 24px;
    }

    select {
      width: 100%;
      padding: 10px;
      border-radius: 10px;
      background: var(--bg);
      color: var(--ink);
      border: 1px solid var(--border);
      font: inherit;
    }

    .notification {
      position: fixed;
      top: 20px;
      right: 20px;
      padding: 12px 20px;
      border-radius: 8px;
      z-index: 100;
      font-weight: 500;
      color: white;
      background: linear-gradient(135deg, var(--cyan), var(--magenta));
      box-shadow: 0 5px 15px rgba(0, 0, 0, 0.3);
      animation: slideIn 0.3s ease;
    }

    .notification.error {
      background: var(--red);
    }

    @keyframes slideIn {
      from { transform: translateX(110%); }
      to { transform: translateX(0); }
    }
  </style>
</head>
<body>
  <div id="loadingScreen"><h2>Loading travel insights...</h2></div>

  <div id="dashboard" class="hidden">
    <header>
      <div>
        <h1>Travel Behavior Survey</h1>
        <p class="subtitle">How travelers plan, explore and struggle.</p>
      </div>
      <div class="actions">
        <button id="filtersBtn" type="button">Filters</button>
        <button id="exportBtn" class="primary" type="button">Export data</button>
      </div>
    </header>

    <main>
      <section class="kpis">
        <div class="kpi-card"><span class="label">Total responses</span><span class="kpi-value" id="kpi-total-responses">0</span></div>
        <div class="kpi-card"><span class="label">Primary age group</span><span class="kpi-value" id="kpi-primary-age">-</span></div>
        <div class="kpi-card"><span class="label">Top problem</span><span class="kpi-value" id="kpi-top-problem">-</span></div>
      </section>

      <section class="insights">
        <div class="insight">
          <div class="metric" id="metric-independence"></div>
          <p id="detail-independence"></p>
        </div>
        <div class="insight">
          <div class="metric" id="metric-authenticity"></div>
          <p id="detail-authenticity"></p>
        </div>
      </section>

      <div class="panels">
{{PANELS}}      </div>
    </main>
  </div>

  <div id="filterModal" class="modal hidden">
    <div class="modal-overlay"></div>
    <div class="modal-body">
      <h3>Filters</h3>
      <label>Age group <select id="ageFilter"></select></label>
      <label>Profession <select id="professionFilter"></select></label>
      <div class="actions">
        <button id="resetFilters" type="button">Reset</button>
        <button id="applyFilters" class="primary" type="button">Apply</button>
        <button id="closeFilters" type="button">Close</button>
      </div>
    </div>
  </div>

  <script>
    const charts = {};
    const byId = (id) => document.getElementById(id);

    const tooltipCallbacks = {
      shareOfTotal: {
        label: (ctx) => {
          const shares = ctx.dataset.shares || [];
          return `${ctx.label}: ${ctx.raw} (${shares[ctx.dataIndex] ?? 0}%)`;
        }
      },
      datasetValue: {
        label: (ctx) => `${ctx.dataset.label}: ${ctx.raw}`
      }
    };

    const notify = (notice) => {
      if (!notice) {
        return;
      }
      document.querySelector('.notification')?.remove();
      const el = document.createElement('div');
      el.className = `notification ${notice.level}`;
      el.textContent = notice.message;
      document.body.appendChild(el);
      setTimeout(() => el.remove(), 3000);
    };

    const fillSelect = (select, labels, current) => {
      select.innerHTML = '';
      ['all', ...labels].forEach((label) => {
        const option = document.createElement('option');
        option.value = label;
        option.textContent = label === 'all' ? 'All' : label;
        option.selected = label === current;
        select.appendChild(option);
      });
    };

    const mountCharts = (mounted) => {
      Object.values(charts).forEach((chart) => chart.destroy());
      mounted.forEach(({ id, config }) => {
        const canvas = byId(id);
        if (!canvas) {
          return;
        }
        const tooltip = config.options.plugins.tooltip;
        tooltip.callbacks = tooltipCallbacks[tooltip.format];
        charts[id] = new Chart(canvas, config);
      });
      document.querySelectorAll('.dashboard-panel').forEach((panel, index) => {
        setTimeout(() => panel.classList.add('animate'), index * 150);
      });
    };

    const render = (snapshot) => {
      const kpis = snapshot.kpis;
      if (kpis) {
        byId('kpi-total-responses').textContent = kpis.totalResponses.toLocaleString();
        byId('kpi-primary-age').textContent = kpis.primaryAgeGroup;
        byId('kpi-top-problem').textContent = kpis.topProblem;
      }
      const narrative = snapshot.narrative;
      if (narrative) {
        byId('metric-independence').textContent = narrative.independenceHeadline;
        byId('detail-independence').textContent = narrative.independenceDetail;
        byId('metric-authenticity').textContent = narrative.authenticityHeadline;
        byId('detail-authenticity').textContent = narrative.authenticityDetail;
      }
      fillSelect(byId('ageFilter'), snapshot.filters.ages, snapshot.criteria.age);
      fillSelect(byId('professionFilter'), snapshot.filters.professions, snapshot.criteria.profession);
      mountCharts(snapshot.charts);
      notify(snapshot.notice);
    };

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res;
    };

    const load = async () => {
      try {
        const snapshot = await (await request('/api/dashboard')).json();
        byId('loadingScreen').classList.add('fade-out');
        byId('dashboard').classList.remove('hidden');
        render(snapshot);
      } catch (err) {
        byId('loadingScreen').innerHTML = `<h2>${err.message}</h2>`;
      }
    };

    const closeModal = () => byId('filterModal').classList.add('hidden');

    const postFilters = async (url, body) => {
      try {
        const res = await request(url, {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(body)
        });
        closeModal();
        render(await res.json());
      } catch (err) {
        notify({ message: err.message, level: 'error' });
      }
    };

    const exportData = async () => {
      try {
        const res = await request('/api/export');
        const disposition = res.headers.get('content-disposition') || '';
        const match = disposition.match(/filename="([^"]+)"/);
        const url = URL.createObjectURL(await res.blob());
        const a = document.createElement('a');
        a.href = url;
        a.download = match ? match[1] : 'travel-analytics.json';
        a.click();
        URL.revokeObjectURL(url);
        const message = res.headers.get('x-dashboard-notice');
        if (message) {
          notify({ message, level: 'info' });
        }
      } catch (err) {
        notify({ message: err.message, level: 'error' });
      }
    };

    byId('filtersBtn').addEventListener('click', () => byId('filterModal').classList.remove('hidden'));
    byId('closeFilters').addEventListener('click', closeModal);
    document.querySelector('.modal-overlay').addEventListener('click', closeModal);
    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape') {
        closeModal();
      }
    });
    byId('applyFilters').addEventListener('click', () =>
      postFilters('/api/filters', {
        age: byId('ageFilter').value,
        profession: byId('professionFilter').value
      })
    );
    byId('resetFilters').addEventListener('click', () => postFilters('/api/filters/reset', {}));
    byId('exportBtn').addEventListener('click', exportData);

    load();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_has_a_mount_point_per_chart() {
        let html = render_index();
        for slot in ChartSlot::ALL {
            assert!(html.contains(&format!(r#"<canvas id="{}">"#, slot.id())));
        }
        assert!(!html.contains("{{PANELS}}"));
    }

    #[test]
    fn export_notice_is_read_from_the_download_header() {
        let html = render_index();
        assert!(html.contains(&format!("res.headers.get('{}')", crate::handlers::NOTICE_HEADER)));
        assert!(!html.contains("'Data exported successfully!'"));
    }
}
