use crate::models::{RenderState, UnitDescriptor};
use std::fmt::Write;

/// Consumes a render state and produces whatever the target surface needs.
pub trait Renderer {
    type Output;

    fn render(&self, state: &RenderState) -> Self::Output;
}

const DEGENERATE_NOTICE: &str = "The end date is before the start date, so only one day is shown.";

/// The full widget page, dots rendered server-side.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPage;

impl Renderer for HtmlPage {
    type Output = String;

    fn render(&self, state: &RenderState) -> String {
        let initial = serde_json::to_string(state)
            .unwrap_or_else(|_| "null".to_string())
            .replace("</", "<\\/");

        INDEX_HTML
            .replace("{{TITLE}}", &escape_html(&state.title))
            .replace("{{PERCENT}}", &escape_html(&state.percent_label))
            .replace("{{REMAINING}}", &escape_html(&state.remaining_label))
            .replace("{{RANGE}}", &escape_html(&state.range_label))
            .replace("{{NOTICE_MESSAGE}}", DEGENERATE_NOTICE)
            .replace(
                "{{NOTICE}}",
                if state.progress.degenerate { DEGENERATE_NOTICE } else { "" },
            )
            .replace("{{DAY}}", &escape_html(&state.day_label))
            .replace("{{WEEKS}}", &escape_html(&state.weeks_label))
            .replace("{{GRID}}", &render_grid(&state.units))
            .replace("{{INITIAL_STATE}}", &initial)
    }
}

fn render_grid(units: &[UnitDescriptor]) -> String {
    let mut html = String::with_capacity(units.len() * 48);
    for unit in units {
        let mut class = String::from("dot");
        if unit.is_filled {
            class.push_str(" filled");
        }
        if unit.is_current {
            class.push_str(" current");
        }
        if unit.is_milestone {
            class.push_str(" milestone");
        }

        let _ = write!(html, r#"<div class="{class}" data-index="{}" title="{}""#, unit.index, unit.label);
        if let Some(fraction) = unit.current_fraction {
            let _ = write!(html, r#" style="--day-progress: {:.4}""#, fraction);
        }
        html.push_str("></div>");
    }
    html
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --dot-empty: rgba(47, 72, 88, 0.14);
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .notice {
      margin: 0;
      padding: 10px 14px;
      border-radius: 12px;
      background: rgba(198, 59, 43, 0.1);
      color: #c63b2b;
      font-size: 0.95rem;
    }

    .notice:empty {
      display: none;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.percent {
      color: var(--accent);
    }

    #grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(14px, 1fr));
      gap: 6px;
      position: relative;
    }

    .dot {
      width: 12px;
      height: 12px;
      border-radius: 50%;
      background: var(--dot-empty);
    }

    .dot.filled {
      background: var(--accent-2);
    }

    .dot.milestone {
      outline: 2px solid var(--accent);
      outline-offset: 1px;
    }

    .dot.current {
      background: conic-gradient(var(--accent) calc(var(--day-progress, 0) * 360deg), var(--dot-empty) 0);
    }

    .tooltip {
      position: fixed;
      pointer-events: none;
      background: var(--accent-2);
      color: white;
      font-size: 0.8rem;
      padding: 4px 8px;
      border-radius: 8px;
      opacity: 0;
      transition: opacity 120ms ease;
    }

    .tooltip.visible {
      opacity: 1;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-export {
      background: var(--accent);
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .btn-share {
      background: var(--accent-2);
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="title">{{TITLE}}</h1>
      <p id="range" class="subtitle">{{RANGE}}</p>
    </header>

    <p id="notice" class="notice" data-message="{{NOTICE_MESSAGE}}">{{NOTICE}}</p>

    <section class="panel">
      <div class="stat">
        <span class="label">Progress</span>
        <span id="percent" class="value percent">{{PERCENT}}</span>
      </div>
      <div class="stat">
        <span class="label">Remaining</span>
        <span id="remaining" class="value">{{REMAINING}}</span>
      </div>
      <div class="stat">
        <span class="label">Today</span>
        <span id="day" class="value">{{DAY}}</span>
      </div>
      <div class="stat">
        <span class="label">Weeks</span>
        <span id="weeks" class="value">{{WEEKS}}</span>
      </div>
    </section>

    <section id="grid">{{GRID}}</section>

    <section class="actions">
      <button class="btn-export" id="export-btn" type="button">Download image</button>
      <button class="btn-share" id="share-btn" type="button">Share</button>
    </section>

    <div class="status" id="status"></div>
  </main>
  <div class="tooltip" id="tooltip"></div>

  <script type="application/json" id="initial-state">{{INITIAL_STATE}}</script>
  <script>
    const REFRESH_MS = 30000;
    const query = window.location.search;
    const gridEl = document.getElementById('grid');
    const tooltipEl = document.getElementById('tooltip');
    const statusEl = document.getElementById('status');

    let state = JSON.parse(document.getElementById('initial-state').textContent);

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (message) {
        setTimeout(() => setStatus('', ''), 2500);
      }
    };

    const renderGrid = (units) => {
      const fragment = document.createDocumentFragment();
      units.forEach((unit) => {
        const dot = document.createElement('div');
        dot.className = 'dot';
        dot.classList.toggle('filled', unit.is_filled);
        dot.classList.toggle('current', unit.is_current);
        dot.classList.toggle('milestone', unit.is_milestone);
        dot.dataset.index = unit.index;
        dot.title = unit.label;
        if (unit.current_fraction !== null) {
          dot.style.setProperty('--day-progress', unit.current_fraction.toFixed(4));
        }
        fragment.appendChild(dot);
      });
      gridEl.replaceChildren(fragment);
    };

    const updateUI = (next) => {
      state = next;
      document.title = next.title;
      document.getElementById('title').textContent = next.title;
      document.getElementById('range').textContent = next.range_label;
      const noticeEl = document.getElementById('notice');
      noticeEl.textContent = next.progress.degenerate ? noticeEl.dataset.message : '';
      document.getElementById('percent').textContent = next.percent_label;
      document.getElementById('remaining').textContent = next.remaining_label;
      document.getElementById('day').textContent = next.day_label;
      document.getElementById('weeks').textContent = next.weeks_label;
      renderGrid(next.units);
    };

    const refresh = async () => {
      const res = await fetch(`/api/progress${query}`);
      if (!res.ok) {
        throw new Error('Unable to refresh progress');
      }
      updateUI(await res.json());
    };

    const scheduleMidnight = () => {
      const now = new Date();
      const midnight = new Date(now.getFullYear(), now.getMonth(), now.getDate() + 1);
      setTimeout(() => {
        refresh().catch((err) => setStatus(err.message, 'error'));
        scheduleMidnight();
      }, midnight - now);
    };

    gridEl.addEventListener('mousemove', (event) => {
      const dot = event.target.closest('.dot');
      if (!dot) {
        tooltipEl.classList.remove('visible');
        return;
      }
      const unit = state.units[Number(dot.dataset.index)];
      tooltipEl.textContent = unit ? `${unit.label} (day ${unit.index + 1})` : dot.title;
      tooltipEl.style.left = `${event.clientX + 12}px`;
      tooltipEl.style.top = `${event.clientY + 12}px`;
      tooltipEl.classList.add('visible');
    });

    gridEl.addEventListener('mouseleave', () => tooltipEl.classList.remove('visible'));

    const drawShareImage = (snapshot) => {
      const size = 1080;
      const canvas = document.createElement('canvas');
      canvas.width = size;
      canvas.height = size;
      const ctx = canvas.getContext('2d');

      ctx.fillStyle = '#f8f3e6';
      ctx.fillRect(0, 0, size, size);

      ctx.fillStyle = '#2b2a28';
      ctx.font = '600 64px Fraunces, Georgia, serif';
      ctx.fillText(snapshot.title, 80, 150);
      ctx.font = '500 32px "Space Grotesk", sans-serif';
      ctx.fillStyle = '#5f5c57';
      ctx.fillText(snapshot.range_label, 80, 205);

      const columns = Math.ceil(Math.sqrt(snapshot.total_units * 1.6));
      const cell = Math.min(28, (size - 160) / columns);
      const radius = cell * 0.36;
      const top = 260;
      const milestones = new Set(snapshot.milestones);
      for (let i = 0; i < snapshot.total_units; i += 1) {
        const x = 80 + (i % columns) * cell + cell / 2;
        const y = top + Math.floor(i / columns) * cell + cell / 2;
        ctx.beginPath();
        ctx.arc(x, y, radius, 0, Math.PI * 2);
        ctx.fillStyle = i < snapshot.elapsed_units ? '#2f4858' : 'rgba(47, 72, 88, 0.14)';
        ctx.fill();
        if (i === snapshot.current_unit_index) {
          ctx.beginPath();
          ctx.moveTo(x, y);
          ctx.arc(x, y, radius, -Math.PI / 2, -Math.PI / 2 + Math.PI * 2 * snapshot.current_unit_fraction);
          ctx.fillStyle = '#ff6b4a';
          ctx.fill();
        }
        if (milestones.has(i)) {
          ctx.strokeStyle = '#ff6b4a';
          ctx.lineWidth = 2;
          ctx.stroke();
        }
      }

      ctx.fillStyle = '#ff6b4a';
      ctx.font = '600 96px "Space Grotesk", sans-serif';
      ctx.fillText(snapshot.percent_label, 80, size - 110);
      ctx.fillStyle = '#2f4858';
      ctx.font = '500 36px "Space Grotesk", sans-serif';
      ctx.fillText(`${snapshot.remaining_units} of ${snapshot.total_units} days left`, 80, size - 60);

      return new Promise((resolve, reject) => {
        canvas.toBlob((blob) => (blob ? resolve(blob) : reject(new Error('Image export failed'))), 'image/png');
      });
    };

    document.getElementById('export-btn').addEventListener('click', async () => {
      try {
        const res = await fetch(`/api/export${query}`);
        if (!res.ok) {
          throw new Error('Unable to load export data');
        }
        const blob = await drawShareImage(await res.json());
        const link = document.createElement('a');
        link.href = URL.createObjectURL(blob);
        link.download = 'progress.png';
        link.click();
        URL.revokeObjectURL(link.href);
        setStatus('Image saved', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('share-btn').addEventListener('click', async () => {
      try {
        const res = await fetch(`/api/share${query}`);
        if (!res.ok) {
          throw new Error('Unable to load share data');
        }
        const payload = await res.json();
        if (navigator.share) {
          await navigator.share(payload);
          setStatus('Shared', 'ok');
        } else {
          await navigator.clipboard.writeText(`${payload.text} ${payload.url}`);
          setStatus('Copied to clipboard', 'ok');
        }
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    setInterval(() => refresh().catch((err) => setStatus(err.message, 'error')), REFRESH_MS);
    scheduleMidnight();
  </script>
</body>
</html>
"#;
