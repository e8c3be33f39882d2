use crate::dashboard::{DashboardView, FetchState};
use crate::format::{fmt_money, fmt_num, fmt_pct, fmt_ts, PRECISE_DECIMALS};
use crate::model::{ClosedTrade, CsvSection, Period, PnlReport, Position};

use super::escape;

pub fn render_dashboard(view: &DashboardView, origin: &str, now_secs: i64) -> String {
    let body = match view.state() {
        FetchState::Idle => {
            r#"<div class="prompt">Choose a period and press Fetch to load PnL.</div>"#.to_string()
        }
        FetchState::Loading => r#"<div class="loading">Loading…</div>"#.to_string(),
        FetchState::Failed(message) => format!(
            r#"<div class="error-banner" role="alert">{}</div>"#,
            escape(message)
        ),
        FetchState::Loaded(report) => render_report(view, report, now_secs),
    };

    format!(
        r#"<section class="dashboard">
    {controls}
    {share}
    {body}
</section>"#,
        controls = render_controls(view),
        share = render_share(view, origin),
        body = body,
    )
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn render_controls(view: &DashboardView) -> String {
    let periods: String = Period::ALL
        .iter()
        .map(|p| {
            let selected = if *p == view.period() { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                p.as_str(),
                selected,
                p.label()
            )
        })
        .collect();

    let (disabled, label) = if view.is_loading() {
        (" disabled", "Loading…")
    } else {
        ("", "Fetch")
    };

    format!(
        r#"<form id="options" class="controls" autocomplete="off">
        <div>
            <label>Account</label>
            <div class="account mono" title="{address}">{address}</div>
        </div>
        <label>API base URL
            <input type="text" name="base_url" value="{base_url}">
        </label>
        <label>Period
            <select name="period">{periods}</select>
        </label>
        <label class="toggle"><input type="checkbox" name="positions"{positions}> Positions</label>
        <label class="toggle"><input type="checkbox" name="closed"{closed}> Closed trades</label>
        <button type="button" id="run" data-action="run"{disabled}>{label}</button>
    </form>"#,
        address = escape(view.address()),
        base_url = escape(view.base_url()),
        periods = periods,
        positions = checked(view.show_positions()),
        closed = checked(view.show_closed()),
        disabled = disabled,
        label = label,
    )
}

fn render_share(view: &DashboardView, origin: &str) -> String {
    format!(
        r#"<div class="share">
        <input type="text" id="share-url" readonly value="{url}">
        <button type="button" class="secondary" data-action="copy" data-target="share-url">Copy link</button>
    </div>"#,
        url = escape(&view.share_url(origin)),
    )
}

fn pnl_class(v: Option<f64>) -> &'static str {
    match v {
        Some(x) if x > 0.0 => "pos",
        Some(x) if x < 0.0 => "neg",
        _ => "",
    }
}

fn text(v: &Option<String>) -> String {
    v.as_deref().map(escape).unwrap_or_default()
}

fn leverage(v: Option<f64>) -> String {
    let s = fmt_num(v, 0);
    if s.is_empty() {
        s
    } else {
        format!("{}x", s)
    }
}

fn render_report(view: &DashboardView, report: &PnlReport, now_secs: i64) -> String {
    let mut html = render_cards(report);
    html.push_str(&render_window(report));
    if view.show_positions() {
        html.push_str(&render_positions(
            &report.positions,
            &view.csv_url(CsvSection::Positions, now_secs),
        ));
    }
    if view.show_closed() {
        html.push_str(&render_closed(
            &report.closed,
            &view.csv_url(CsvSection::Closed, now_secs),
        ));
    }
    html
}

fn render_cards(report: &PnlReport) -> String {
    format!(
        r#"<div class="cards">
        <div class="card">
            <div class="card-title">Period</div>
            <div class="card-value">{period}</div>
            <div class="card-sub">{method}</div>
        </div>
        <div class="card">
            <div class="card-title">Trading PnL</div>
            <div class="card-value {perp_class}">{perp_pnl}</div>
            <div class="card-sub">ROI {trading_roi}</div>
        </div>
        <div class="card">
            <div class="card-title">Portfolio PnL</div>
            <div class="card-value {portfolio_class}">{balance_change}</div>
            <div class="card-sub">ROI {portfolio_roi}</div>
        </div>
        <div class="card">
            <div class="card-title">Balances</div>
            <div class="card-value">{perp_now}</div>
            <div class="card-sub">Portfolio {portfolio_now}</div>
        </div>
    </div>"#,
        period = text(&report.period),
        method = text(&report.method),
        perp_class = pnl_class(report.perp_pnl),
        perp_pnl = fmt_money(report.perp_pnl),
        trading_roi = fmt_pct(report.roi.trading_pct),
        portfolio_class = pnl_class(report.balance_change),
        balance_change = fmt_money(report.balance_change),
        portfolio_roi = fmt_pct(report.roi.portfolio_pct),
        perp_now = fmt_money(report.balances.perp_now),
        portfolio_now = fmt_money(report.balances.portfolio_now),
    )
}

fn render_window(report: &PnlReport) -> String {
    format!(
        r#"<div class="window-line">Window {start} → {end} · Deposits {deposits} · Withdrawals {withdrawals} · Net cashflow {net}</div>"#,
        start = fmt_ts(report.window.start_ms),
        end = fmt_ts(report.window.end_ms),
        deposits = fmt_money(report.adjustments.deposits),
        withdrawals = fmt_money(report.adjustments.withdrawals),
        net = fmt_money(report.adjustments.net_cashflow),
    )
}

fn panel(id: &str, title: &str, csv_url: &str, section: CsvSection, head: &str, rows: String) -> String {
    format!(
        r#"<div class="panel">
        <div class="panel-header">
            <span>{title}</span>
            <a href="{csv_url}" target="_blank" rel="noopener" data-section="{section}">Export CSV</a>
        </div>
        <table class="trades-table" id="{id}">
            <thead><tr>{head}</tr></thead>
            <tbody>{rows}</tbody>
        </table>
    </div>"#,
        id = id,
        title = title,
        csv_url = escape(csv_url),
        section = section.as_str(),
        head = head,
        rows = rows,
    )
}

fn render_positions(positions: &[Position], csv_url: &str) -> String {
    const HEAD: &str = "<th>Coin</th><th>Side</th><th>Size</th><th>Entry</th><th>Mark</th>\
        <th>Notional</th><th>uPnL</th><th>ROE</th><th>Basis</th><th>Lev</th><th>Liq. Px</th><th>Opened</th>";

    let rows = if positions.is_empty() {
        r#"<tr><td colspan="12" class="empty">No open positions</td></tr>"#.to_string()
    } else {
        positions
            .iter()
            .map(|p| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num {}">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td>{}</td></tr>"#,
                    text(&p.coin),
                    text(&p.side),
                    fmt_num(p.size, PRECISE_DECIMALS),
                    fmt_num(p.entry_px, PRECISE_DECIMALS),
                    fmt_num(p.mark_px, PRECISE_DECIMALS),
                    fmt_money(p.notional),
                    pnl_class(p.unrealized_pnl),
                    fmt_money(p.unrealized_pnl),
                    fmt_pct(p.roe_pct),
                    fmt_pct(p.basis_pct),
                    leverage(p.leverage),
                    fmt_num(p.liq_px, PRECISE_DECIMALS),
                    fmt_ts(p.entry_time),
                )
            })
            .collect()
    };

    panel("positions-table", "Open positions", csv_url, CsvSection::Positions, HEAD, rows)
}

fn render_closed(trades: &[ClosedTrade], csv_url: &str) -> String {
    const HEAD: &str = "<th>Closed</th><th>Coin</th><th>Dir</th><th>Duration</th><th>Size</th>\
        <th>Avg entry</th><th>Exit</th><th>PnL</th><th>Fees</th><th>Net PnL</th>";

    let rows = if trades.is_empty() {
        r#"<tr><td colspan="10" class="empty">No closed trades</td></tr>"#.to_string()
    } else {
        trades
            .iter()
            .map(|t| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class="num">{}</td><td class="num">{}</td><td class="num">{}</td><td class="num {}">{}</td><td class="num">{}</td><td class="num {}">{}</td></tr>"#,
                    fmt_ts(t.end_time),
                    text(&t.coin),
                    text(&t.dir),
                    text(&t.duration),
                    fmt_num(t.size_closed, PRECISE_DECIMALS),
                    fmt_num(t.avg_entry_px, PRECISE_DECIMALS),
                    fmt_num(t.exit_px, PRECISE_DECIMALS),
                    pnl_class(t.pnl),
                    fmt_money(t.pnl),
                    fmt_money(t.fees),
                    pnl_class(t.net_pnl),
                    fmt_money(t.net_pnl),
                )
            })
            .collect()
    };

    panel("closed-table", "Closed trades", csv_url, CsvSection::Closed, HEAD, rows)
}
