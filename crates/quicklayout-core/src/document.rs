//! Combined document builder.

use crate::content::EditorContent;

/// Build the self-contained preview document for `content`.
///
/// CSS goes into a `<style>` block in the head, HTML becomes the body, and
/// JS runs from a `<script>` block at the end of the body. Only the script
/// payload is touched: every `</` becomes `<\/`, which is the same string to
/// the JS engine but can no longer close the enclosing script element.
pub fn build_document(content: &EditorContent) -> String {
    let script = escape_script(&content.js);

    let mut doc = String::with_capacity(content.byte_size() + 192);
    doc.push_str("<!doctype html>\n<html lang=\"ja\">\n<head>\n");
    doc.push_str("<meta charset=\"UTF-8\">\n");
    doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    doc.push_str("<style>");
    doc.push_str(&content.css);
    doc.push_str("</style>\n</head>\n<body>\n");
    doc.push_str(&content.html);
    doc.push_str("\n<script>");
    doc.push_str(&script);
    doc.push_str("</script>\n</body>\n</html>");
    doc
}

fn escape_script(js: &str) -> String {
    js.replace("</", "<\\/")
}
