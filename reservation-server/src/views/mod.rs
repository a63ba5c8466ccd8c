//! Server-rendered HTML pages
//!
//! Pages are plain `format!` templates; every interpolated value goes
//! through [`escape`].

pub mod form;
pub mod index;

use std::fmt::Write;

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;background:#f3f4f6;color:#111;margin:0}\
.container{padding:20px;max-width:1100px;margin:0 auto}\
.header{display:flex;justify-content:space-between;align-items:center;margin-bottom:18px}\
.header h1{margin:0}\
.btn{background:#2563eb;color:#fff;padding:8px 12px;border-radius:6px;border:none;\
text-decoration:none;cursor:pointer}\
.btn-outline{padding:8px 14px;border-radius:6px;text-decoration:none;\
border:1px solid #e5e7eb;color:#111}\
.flash{margin-bottom:12px;padding:10px;background:#ecfdf5;border:1px solid #10b981;\
color:#065f46;border-radius:6px}\
.filters{display:flex;gap:12px;margin-bottom:14px;align-items:center}\
.filters input[type=search]{flex:1}\
input,select{padding:8px 10px;border-radius:6px;border:1px solid #ddd}\
.card{background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,.06);overflow:hidden}\
table{width:100%;border-collapse:collapse}\
th,td{padding:12px;text-align:left}\
thead tr{background:#f9fafb}\
tbody tr{border-top:1px solid #f3f4f6}\
.empty{text-align:center;color:#666}\
.badge{padding:4px 8px;border-radius:6px;font-size:13px}\
.badge-pending{background:#fef3c7}\
.badge-confirmed{background:#d1fae5}\
.badge-seated{background:#e0f2fe}\
.badge-canceled{background:#fee2e2}\
.actions{text-align:right}\
.actions a{margin-right:8px;color:#2563eb}\
.link-danger{color:#ef4444;background:none;border:none;cursor:pointer}\
.footer{display:flex;justify-content:space-between;align-items:center;margin-top:12px}\
.summary{color:#666}\
.pager{display:flex;gap:8px}\
.pager a,.pager span{padding:6px 10px;border-radius:6px;border:1px solid #eee;\
background:#fff;text-decoration:none;color:#111}\
.pager .current{border-color:#2563eb;background:#eef2ff}\
.pager .disabled{color:#aaa}\
.field{margin-bottom:12px}\
.field label{display:block;margin-bottom:6px}\
.field input,.field select{width:100%;box-sizing:border-box}\
.row{display:flex;gap:12px}\
.row .field{flex:1}\
.error{color:red;margin-top:6px}\
.form-actions{display:flex;gap:8px}";

/// Wrap a page body in the shared document shell
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{STYLE}</style></head>\
<body><div class=\"container\">{body}</div></body></html>",
        title = escape(title),
    )
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Percent-encode a query string component
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Nguyễn Văn A"), "Nguyễn Văn A");
    }

    #[test]
    fn encodes_query_components() {
        assert_eq!(encode_component("ana maria"), "ana+maria");
        assert_eq!(encode_component("+84&x=1"), "%2B84%26x%3D1");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn layout_escapes_title() {
        let html = layout("A <b>", "<p>body</p>");
        assert!(html.contains("<title>A &lt;b&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
