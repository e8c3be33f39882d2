use crate::landing::LandingView;

use super::escape;

pub fn render_landing(view: &LandingView) -> String {
    format!(
        r#"<section class="landing">
    <h1>Perp &amp; portfolio PnL</h1>
    <form id="landing" autocomplete="off">
        <label>Account address
            <input type="text" name="address" placeholder="0x…" value="{address}" autofocus>
        </label>
        <div class="row-inline">
            <label>API base URL
                <input type="text" name="base_url" value="{base_url}">
            </label>
            <button type="button" class="secondary" data-action="reset" title="{default}">Reset</button>
        </div>
        <button type="submit">Open dashboard</button>
    </form>
</section>"#,
        address = escape(view.address()),
        base_url = escape(view.base_url()),
        default = escape(view.default_base_url()),
    )
}
