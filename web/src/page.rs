//! Server-rendered HTML for the tip jar page.

use std::fmt::Write;

use tipjar_controller::{SessionPhase, SessionView, TipSelection, PRESETS};
use tipjar_types::TIP_JAR_ADDRESS;

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:28rem;margin:2rem auto;text-align:center}\
button{padding:.5rem 1rem;margin:.25rem;cursor:pointer}\
button.active-btn{outline:2px solid #f5a623}\
.status-box{margin-top:1rem;padding:.75rem;border:1px solid #ccc;border-radius:.5rem}\
.custom-tip-row{display:flex;justify-content:center;gap:.5rem}\
form{display:inline}";

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole page for `view`.
pub fn render(view: &SessionView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">");
    let _ = write!(html, "<title>My Tip Jar</title><style>{STYLE}</style></head><body>");
    html.push_str("<h1>My Tip Jar</h1><p>Fuel my next build, buy me a coffee!</p>");

    let _ = write!(
        html,
        "<div class=\"qr-section\"><img src=\"{QR_ENDPOINT}{addr}\" alt=\"Tip Jar QR Code\" width=\"150\" height=\"150\">\
         <p class=\"address-text\">Scan to tip via mobile</p></div><hr>",
        addr = TIP_JAR_ADDRESS
    );

    html.push_str("<div class=\"wallet-section\">");
    match view.address_short() {
        None => {
            let busy = if view.phase == SessionPhase::Connecting { " disabled" } else { "" };
            let _ = write!(
                html,
                "<form method=\"post\" action=\"/connect\"><button class=\"connect-btn\"{busy}>Connect Wallet</button></form>"
            );
        }
        Some(short) => render_dashboard(&mut html, view, &short),
    }
    html.push_str("</div>");

    if !view.status.is_empty() {
        let _ = write!(
            html,
            "<div class=\"status-box\" role=\"status\">{}</div>",
            escape_html(&view.status)
        );
    }
    html.push_str(TOGGLE_SEND_SCRIPT);
    html.push_str("</body></html>");
    html
}

fn render_dashboard(html: &mut String, view: &SessionView, short: &str) {
    let _ = write!(
        html,
        "<div class=\"dashboard\"><p><strong>Connected:</strong> {}</p>\
         <p><strong>Your Balance:</strong> {} XLM</p>",
        escape_html(short),
        escape_html(&view.balance_text())
    );

    html.push_str("<p class=\"section-label\">Quick Tip</p><div class=\"tip-buttons\">");
    for preset in PRESETS {
        let class = if view.selection == Some(TipSelection::Preset(preset)) {
            " class=\"active-btn\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/tip/preset/{preset}\"><button{class}>Tip {preset} XLM</button></form>"
        );
    }
    html.push_str("</div>");

    let disabled = if view.custom_amount_sendable() { "" } else { " disabled" };
    let active = if view.selection == Some(TipSelection::Custom) {
        " active-btn"
    } else {
        ""
    };
    let _ = write!(
        html,
        "<p class=\"section-label\">Custom Amount</p>\
         <form method=\"post\" action=\"/tip/custom\" class=\"custom-tip-row\">\
         <input id=\"custom-amount\" name=\"amount\" type=\"number\" min=\"0.0000001\" step=\"any\" \
         placeholder=\"Enter any XLM amount\" value=\"{value}\" class=\"custom-input{active}\">\
         <button id=\"send-custom\" class=\"send-btn\"{disabled}>Send</button></form>",
        value = escape_html(&view.custom_amount)
    );

    html.push_str(
        "<form method=\"post\" action=\"/disconnect\"><button class=\"disconnect-btn\">Disconnect</button></form></div>",
    );
}

/// Keeps the custom send button disabled while the input is empty or not
/// positive, and stores each edit through `POST /custom-amount`. The server's
/// answer decides once it arrives, unless the input has changed since.
const TOGGLE_SEND_SCRIPT: &str = "<script>\
(function(){var i=document.getElementById('custom-amount'),b=document.getElementById('send-custom');\
if(!i||!b)return;i.addEventListener('input',function(){var v=parseFloat(i.value),sent=i.value;b.disabled=!(v>0);\
fetch('/custom-amount',{method:'POST',headers:{'Content-Type':'application/x-www-form-urlencoded'},\
body:'amount='+encodeURIComponent(sent)}).then(function(r){return r.json();})\
.then(function(s){if(i.value===sent)b.disabled=!s.custom_amount_sendable;}).catch(function(){});});})();\
</script>";
