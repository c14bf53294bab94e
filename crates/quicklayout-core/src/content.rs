//! Editor content: the three text fragments the user edits.

use serde::{Deserialize, Serialize};

const SAMPLE_HTML: &str = "<div class=\"card\">\n  <h2>QuickLayout サンプル</h2>\n  <p>HTML / CSS / JS を入力して \"反映\" を押してください。</p>\n  <button id=\"helloButton\">クリック</button>\n</div>";

const SAMPLE_CSS: &str = ".card {\n  max-width: 420px;\n  margin: 40px auto;\n  padding: 24px;\n  background: #ffffff;\n  border-radius: 16px;\n  box-shadow: 0 12px 30px rgba(15, 23, 42, 0.12);\n  font-family: 'Helvetica Neue', sans-serif;\n}\n\n.card h2 {\n  margin-top: 0;\n}\n\n#helloButton {\n  padding: 10px 16px;\n  border-radius: 999px;\n  border: none;\n  background: #2563eb;\n  color: #fff;\n  cursor: pointer;\n}";

const SAMPLE_JS: &str = "document.getElementById('helloButton')?.addEventListener('click', () => {\n  alert('こんにちは！');\n});";

/// HTML, CSS and JS as typed into the editors. Any text is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorContent {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

impl EditorContent {
    pub fn new(html: impl Into<String>, css: impl Into<String>, js: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
        }
    }

    /// Built-in starter content shown when there is no usable draft.
    pub fn sample() -> Self {
        Self::new(SAMPLE_HTML, SAMPLE_CSS, SAMPLE_JS)
    }

    /// Combined UTF-8 size of the three fragments, in bytes.
    pub fn byte_size(&self) -> usize {
        self.html.len() + self.css.len() + self.js.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_size_counts_utf8() {
        let content = EditorContent::new("あ", "b", "");
        // "あ" is three bytes in UTF-8
        assert_eq!(content.byte_size(), 4);
    }

    #[test]
    fn test_sample_wires_button() {
        let sample = EditorContent::sample();
        assert!(sample.html.contains("id=\"helloButton\""));
        assert!(sample.css.contains("#helloButton"));
        assert!(sample.js.contains("getElementById('helloButton')"));
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let content: EditorContent = serde_json::from_str(r#"{"html": "<p>x</p>"}"#).unwrap();
        assert_eq!(content.html, "<p>x</p>");
        assert!(content.css.is_empty());
        assert!(content.js.is_empty());
    }
}
