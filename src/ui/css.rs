//! Dashboard styles

pub(crate) const STYLES: &str = r#"
:root {
    --bg-dark: #0d0d12;
    --bg-panel: #16161f;
    --bg-hover: #1e1e2d;
    --border: #2a2a3a;
    --text-primary: #e6e6e6;
    --text-secondary: #9494a8;
    --brand: #00c2ff;
    --buy: #00c2a2;
    --sell: #ff3b69;
    --sell-bg: rgba(255, 59, 105, 0.15);
}

* { box-sizing: border-box; }

body {
    background: var(--bg-dark);
    color: var(--text-primary);
    font-family: 'Inter', sans-serif;
    margin: 0;
    min-height: 100vh;
}

.app-header {
    background: var(--bg-panel);
    border-bottom: 1px solid var(--border);
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 0 20px;
    height: 50px;
}
.brand { font-weight: 700; font-size: 14px; }
.brand span { color: var(--brand); }
.app-header a { color: var(--text-secondary); font-size: 12px; text-decoration: none; }

main { padding: 20px; max-width: 1400px; margin: 0 auto; }

.landing {
    max-width: 520px;
    margin: 80px auto;
    background: var(--bg-panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 24px;
}
.landing h1 { font-size: 18px; margin: 0 0 16px; }

label { display: block; font-size: 11px; color: var(--text-secondary); margin-bottom: 12px; }
input[type=text], select {
    display: block;
    width: 100%;
    margin-top: 4px;
    padding: 8px;
    background: var(--bg-dark);
    color: var(--text-primary);
    border: 1px solid var(--border);
    border-radius: 4px;
    font-family: 'JetBrains Mono', monospace;
    font-size: 12px;
}
.row-inline { display: flex; gap: 8px; align-items: flex-end; }
.row-inline label { flex: 1; }

button {
    background: var(--brand);
    color: var(--bg-dark);
    border: none;
    border-radius: 4px;
    padding: 8px 14px;
    font-weight: 600;
    cursor: pointer;
}
button.secondary { background: var(--bg-hover); color: var(--text-primary); border: 1px solid var(--border); }
button:disabled { opacity: 0.5; cursor: wait; }

.controls {
    display: grid;
    grid-template-columns: 2fr 3fr 1fr auto auto auto;
    gap: 12px;
    align-items: end;
    margin-bottom: 12px;
}
.controls label { margin: 0; }
.toggle { display: flex; gap: 6px; align-items: center; white-space: nowrap; }

.mono { font-family: 'JetBrains Mono', monospace; }
.account { font-size: 13px; padding: 8px 0; overflow: hidden; text-overflow: ellipsis; }

.share { display: flex; gap: 8px; margin-bottom: 20px; }
.share input { margin: 0; }

.prompt, .loading { color: var(--text-secondary); text-align: center; padding: 40px; }

.error-banner {
    background: var(--sell-bg);
    border: 1px solid var(--sell);
    color: var(--sell);
    border-radius: 4px;
    padding: 12px 16px;
    margin-bottom: 20px;
}

.cards {
    display: grid;
    grid-template-columns: repeat(4, 1fr);
    gap: 10px;
    margin-bottom: 12px;
}
.card {
    background: var(--bg-panel);
    border: 1px solid var(--border);
    padding: 12px;
    border-radius: 6px;
}
.card-title { font-size: 11px; color: var(--text-secondary); margin-bottom: 4px; }
.card-value { font-size: 16px; font-weight: 600; font-family: 'JetBrains Mono', monospace; }
.card-sub { font-size: 11px; color: var(--text-secondary); margin-top: 4px; font-family: 'JetBrains Mono', monospace; }

.window-line { font-size: 12px; color: var(--text-secondary); margin-bottom: 20px; }

.panel {
    background: var(--bg-panel);
    border: 1px solid var(--border);
    border-radius: 6px;
    margin-bottom: 20px;
    overflow: auto;
}
.panel-header {
    padding: 8px 20px;
    font-size: 12px;
    font-weight: 600;
    border-bottom: 1px solid var(--border);
    display: flex;
    justify-content: space-between;
}
.panel-header a { color: var(--brand); text-decoration: none; font-weight: normal; }

.trades-table {
    width: 100%;
    border-collapse: collapse;
    font-size: 12px;
    font-family: 'JetBrains Mono', monospace;
}
.trades-table th {
    text-align: left;
    padding: 8px 12px;
    color: var(--text-secondary);
    font-weight: normal;
    border-bottom: 1px solid var(--border);
}
.trades-table td { padding: 6px 12px; border-bottom: 1px solid var(--border); }
.trades-table td.num { text-align: right; }
.trades-table .empty { text-align: center; color: var(--text-secondary); padding: 20px; }

.pos { color: var(--buy); }
.neg { color: var(--sell); }
"#;
