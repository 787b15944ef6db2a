//! Server-rendered HTML for the app's pages.
//!
//! Every value that came from a request or a session passes through
//! [`escape_html`] before it is interpolated.

use std::fmt::Write;

/// Static rows shown on the test page: product, category, price, status.
pub const SAMPLE_PRODUCTS: [[&str; 4]; 5] = [
    ["Product 1", "Clothing", "$19.99", "In Stock"],
    ["Product 2", "Accessories", "$9.99", "Low Stock"],
    ["Product 3", "Home Goods", "$29.99", "Out of Stock"],
    ["Product 4", "Electronics", "$99.99", "In Stock"],
    ["Product 5", "Books", "$14.99", "In Stock"],
];

const PRODUCT_HEADINGS: [&str; 4] = ["Product", "Category", "Price", "Status"];

const STYLES: &str = "body{font-family:-apple-system,BlinkMacSystemFont,'San Francisco','Segoe UI',Roboto,sans-serif;background:#f6f6f7;color:#202223;margin:0}\
main{max-width:960px;margin:2rem auto;padding:0 1rem}main.narrow{max-width:480px}\
.card{background:#fff;border-radius:8px;box-shadow:0 1px 2px rgba(0,0,0,.15);padding:1.25rem;margin-bottom:1rem}\
.button{display:inline-block;background:#008060;color:#fff;padding:.6rem 1rem;border-radius:4px;text-decoration:none;border:0;font-size:1rem;cursor:pointer}\
.banner{background:#fff4f4;border-left:4px solid #d72c0d;padding:.75rem 1rem;margin-bottom:1rem}\
.badge{background:#aee9d1;border-radius:10px;padding:.1rem .5rem}\
table{width:100%;border-collapse:collapse}th,td{text-align:left;padding:.5rem;border-bottom:1px solid #e1e3e5}\
label{display:block;margin-bottom:.25rem}input[type=text]{width:100%;box-sizing:border-box;padding:.5rem;margin-bottom:.25rem}\
.help{color:#6d7175;font-size:.875rem;margin-bottom:1rem}";

/// Escapes the five HTML-significant characters.
///
/// ```rust
/// use shopify_app::app::views::escape_html;
///
/// assert_eq!(
///     escape_html(r#"<a href="x">'&'</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
/// );
/// ```
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, narrow: bool, body: &str) -> String {
    let class = if narrow { " class=\"narrow\"" } else { "" };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLES}</style>\n</head>\n\
         <body>\n<main{class}>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// The dashboard for an installed shop.
#[must_use]
pub fn dashboard(shop: &str) -> String {
    let body = format!(
        "<header class=\"card\">\n<h1>Shopify App Dashboard</h1>\n<p>Connected to {shop}</p>\n\
         <a class=\"button\" href=\"/test\">Go to Test Page</a>\n</header>\n\
         <section class=\"card\">\n<h2>Welcome to your Shopify app</h2>\n\
         <p>This is a sample Shopify app served by a Rust backend.</p>\n\
         <a class=\"button\" href=\"/test\">Go to Test Page</a>\n</section>",
        shop = escape_html(shop),
    );
    layout("Shopify App Dashboard", false, &body)
}

/// The prompt shown on `/` when no session is present.
#[must_use]
pub fn install_prompt() -> String {
    let body = "<section class=\"card\">\n<h2>Install the app</h2>\n\
                <p>You need to install the app to continue.</p>\n\
                <a class=\"button\" href=\"/auth\">Install App</a>\n</section>";
    layout("Install the app", true, body)
}

/// The prompt shown on protected pages other than `/` when no session is present.
#[must_use]
pub fn auth_required() -> String {
    let body = "<section class=\"card\">\n<h2>Authentication Required</h2>\n\
                <p>Please install the app to access this page.</p>\n\
                <a class=\"button\" href=\"/auth\">Go to Auth Page</a>\n</section>";
    layout("Authentication Required", true, body)
}

/// The install form, prefilled with `shop` and showing a banner for `error`.
#[must_use]
pub fn auth_form(shop: &str, error: &str) -> String {
    let banner = match error {
        "" => String::new(),
        "missing_shop" => "<div class=\"banner\" role=\"alert\">A shop domain is required.</div>\n".to_string(),
        "invalid_shop" => "<div class=\"banner\" role=\"alert\">Enter a valid shop domain ending in .myshopify.com.</div>\n".to_string(),
        _ => "<div class=\"banner\" role=\"alert\">Authentication failed. Please try again.</div>\n".to_string(),
    };
    let body = format!(
        "<section class=\"card\">\n<h1>Shopify App Installation</h1>\n{banner}\
         <form method=\"get\" action=\"/auth/begin\">\n\
         <label for=\"shop\">Shop Domain</label>\n\
         <input type=\"text\" id=\"shop\" name=\"shop\" value=\"{shop}\" \
         placeholder=\"your-store.myshopify.com\" autocomplete=\"off\" required>\n\
         <p class=\"help\">Enter your shop domain to install the app</p>\n\
         <button class=\"button\" type=\"submit\">Install App</button>\n</form>\n</section>",
        shop = escape_html(shop),
    );
    layout("Shopify App Installation", true, &body)
}

/// The sample products table and shop card.
#[must_use]
pub fn test_page(shop: &str) -> String {
    let mut rows = String::new();
    for row in &SAMPLE_PRODUCTS {
        rows.push_str("<tr>");
        for cell in row {
            let _ = write!(rows, "<td>{}</td>", escape_html(cell));
        }
        rows.push_str("</tr>\n");
    }
    let headings: String = PRODUCT_HEADINGS
        .iter()
        .map(|heading| format!("<th>{heading}</th>"))
        .collect();

    let body = format!(
        "<header class=\"card\">\n<a href=\"/\">&larr; Dashboard</a>\n<h1>Test Page</h1>\n\
         <p>Sample data and UI components</p>\n</header>\n\
         <section class=\"card\">\n<h2>Sample Products</h2>\n\
         <p>This is a test page showing sample data.</p>\n\
         <table>\n<thead><tr>{headings}</tr></thead>\n<tbody>\n{rows}</tbody>\n</table>\n</section>\n\
         <aside class=\"card\">\n<h2>Shop Information</h2>\n\
         <p><strong>Shop:</strong> {shop}</p>\n\
         <p><strong>Status:</strong> <span class=\"badge\">Connected</span></p>\n</aside>",
        shop = escape_html(shop),
    );
    layout("Test Page", false, &body)
}
