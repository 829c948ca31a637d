//! # Views
//!
//! Server-rendered HTML. Every dynamic value goes through `escape_html`.

use hoodpay_core::{escape_html, PaymentError, Transaction};

fn admin_page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<div class="wrap">
    <h1>{title}</h1>
{body}
</div>
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

/// Transactions table, or the error in red
pub fn transactions_page(result: &Result<Vec<Transaction>, PaymentError>) -> String {
    let body = match result {
        Err(err) => format!(
            r#"    <p style="color: red;">{}</p>"#,
            escape_html(&err.user_message())
        ),
        Ok(transactions) => {
            let rows: String = transactions
                .iter()
                .map(|tx| {
                    format!(
                        "            <tr>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n                <td>{}</td>\n            </tr>\n",
                        escape_html(&tx.id),
                        escape_html(&tx.amount),
                        escape_html(&tx.currency),
                        escape_html(&tx.status),
                        escape_html(&tx.created_at_display()),
                    )
                })
                .collect();

            format!(
                r#"    <table class="widefat fixed striped">
        <thead>
            <tr>
                <th>Payment ID</th>
                <th>Amount</th>
                <th>Currency</th>
                <th>Status</th>
                <th>Date</th>
            </tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>"#
            )
        }
    };

    admin_page("HoodPay Transactions", &body)
}

/// Settings form prefilled with the stored values
pub fn settings_page(api_key: &str, business_id: &str, nonce: &str, notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!("    <div class=\"notice notice-success\"><p>{}</p></div>\n", escape_html(n)))
        .unwrap_or_default();

    let body = format!(
        r#"{notice}    <form method="POST">
        <input type="hidden" name="_nonce" value="{nonce}" />
        <table class="form-table">
            <tr>
                <th>API Key</th>
                <td><input type="text" name="api_key" value="{api_key}" class="regular-text" /></td>
            </tr>
            <tr>
                <th>Business ID</th>
                <td><input type="text" name="business_id" value="{business_id}" class="regular-text" /></td>
            </tr>
        </table>
        <p class="submit">
            <button type="submit" class="button-primary">Save Changes</button>
        </p>
    </form>"#,
        notice = notice,
        nonce = escape_html(nonce),
        api_key = escape_html(api_key),
        business_id = escape_html(business_id),
    );

    admin_page("HoodPay Settings", &body)
}

/// Class shared by every payment button on a page
pub const BUTTON_CLASS: &str = "hoodpay-initiate-payment";

/// A single payment button. Posts to `endpoint`; credentials never reach the page.
///
/// Needs `payment_script()` once on the page.
pub fn payment_button_markup(id: &str, endpoint: &str) -> String {
    format!(
        r#"<button id="{id}" class="button {class}" type="button" data-endpoint="{endpoint}">Pay with HoodPay</button>"#,
        id = escape_html(id),
        class = BUTTON_CLASS,
        endpoint = escape_html(endpoint),
    )
}

/// Click handling for every payment button on the page.
///
/// Installs one delegated listener no matter how often it is included.
/// A single in-flight flag covers all buttons: while a request runs every
/// button is disabled, and they stay disabled once a redirect is issued.
pub fn payment_script() -> String {
    format!(
        r#"<script>
(function () {{
    if (window.hoodpayPayment) {{ return; }}
    var state = window.hoodpayPayment = {{ inFlight: false }};

    function setDisabled(disabled) {{
        document.querySelectorAll('.{class}').forEach(function (b) {{ b.disabled = disabled; }});
    }}

    function settle() {{
        state.inFlight = false;
        setDisabled(false);
    }}

    document.addEventListener('click', function (event) {{
        var button = event.target.closest && event.target.closest('.{class}');
        if (!button) {{ return; }}
        if (state.inFlight) {{ return; }}
        state.inFlight = true;
        setDisabled(true);

        fetch(button.getAttribute('data-endpoint'), {{ method: 'POST', headers: {{ 'Accept': 'application/json' }} }})
            .then(function (response) {{ return response.json(); }})
            .then(function (result) {{
                if (result.paymentUrl) {{
                    window.location.href = result.paymentUrl;
                }} else {{
                    settle();
                    alert(result.message || 'Failed to create payment.');
                }}
            }})
            .catch(function (error) {{
                settle();
                console.error('Error:', error);
                alert('An error occurred. Please try again.');
            }});
    }});
}})();
</script>"#,
        class = BUTTON_CLASS
    )
}

/// Standalone snippet: one button plus the click script
pub fn payment_button(id: &str, endpoint: &str) -> String {
    format!("{}\n{}", payment_button_markup(id, endpoint), payment_script())
}

/// Public page wrapper for expanded checkout content
pub fn public_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body style="font-family: system-ui; max-width: 640px; margin: 40px auto;">
{content}
</body>
</html>
"#,
        title = escape_html(title),
        content = content
    )
}

/// Landing page after the hosted checkout redirects back
pub fn payment_success_page() -> String {
    public_page(
        "Payment Received",
        r#"<div style="text-align: center;">
    <h1>Thank you!</h1>
    <p style="color: #666;">Your payment is being processed by HoodPay.</p>
</div>"#,
    )
}
