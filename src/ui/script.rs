//! Browser-side relay
//!
//! Forwards fragment changes and form edits to the server and swaps in the
//! HTML it returns. All state lives server side.

pub(crate) const SCRIPT: &str = r#"
const root = document.getElementById('app');

function swap(html) {
    root.innerHTML = html;
}

async function post(path, data) {
    return fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
        body: new URLSearchParams(data || {}),
    });
}

async function loadView() {
    try {
        const res = await fetch('/view?fragment=' + encodeURIComponent(location.hash || '#/'));
        swap(await res.text());
    } catch (e) {
        console.error('View load failed:', e);
    }
}

function optionsData(form) {
    return {
        base_url: form.base_url.value,
        period: form.period.value,
        positions: form.positions.checked ? '1' : '0',
        closed: form.closed.checked ? '1' : '0',
    };
}

root.addEventListener('input', (e) => {
    const form = e.target.form;
    if (form && form.id === 'landing' && e.target.name === 'base_url') {
        post('/landing/base-url', { base_url: e.target.value });
    }
});

root.addEventListener('change', async (e) => {
    const form = e.target.form;
    if (form && form.id === 'options') {
        const res = await post('/dashboard/options', optionsData(form));
        swap(await res.text());
    }
});

root.addEventListener('submit', async (e) => {
    e.preventDefault();
    if (e.target.id !== 'landing') return;
    const res = await post('/landing/submit', { address: e.target.address.value });
    const body = await res.json();
    if (body.fragment) {
        location.hash = body.fragment;
    }
});

root.addEventListener('click', async (e) => {
    const target = e.target.closest('[data-action]');
    if (!target) return;
    switch (target.dataset.action) {
        case 'reset': {
            const res = await post('/landing/reset');
            swap(await res.text());
            break;
        }
        case 'run': {
            target.disabled = true;
            target.textContent = 'Loading…';
            const res = await post('/dashboard/run');
            swap(await res.text());
            break;
        }
        case 'copy': {
            const input = document.getElementById(target.dataset.target);
            await navigator.clipboard.writeText(input.value);
            target.textContent = 'Copied';
            break;
        }
    }
});

window.addEventListener('hashchange', loadView);
loadView();
"#;
