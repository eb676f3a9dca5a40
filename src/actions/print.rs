const PRINT_DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Print Selection</title>
<style>
body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.6; }
.content { max-width: 800px; margin: 0 auto; }
h1 { font-size: 18px; color: #333; }
.selection { padding: 15px; border: 1px solid #ddd; background: #f9f9f9; white-space: pre-wrap; }
</style>
</head>
<body>
<div class="content">
<h1>Selected Text</h1>
<div class="selection">"#;

const PRINT_DOCUMENT_TAIL: &str = r#"</div>
</div>
<script>window.onload = function() { window.print(); }</script>
</body>
</html>
"#;

/// Minimal document holding only `text`; it opens the print dialog on load.
pub fn print_document(text: &str) -> String {
    let mut html = String::with_capacity(
        PRINT_DOCUMENT_HEAD.len() + PRINT_DOCUMENT_TAIL.len() + text.len(),
    );
    html.push_str(PRINT_DOCUMENT_HEAD);
    push_escaped(&mut html, text);
    html.push_str(PRINT_DOCUMENT_TAIL);
    html
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
