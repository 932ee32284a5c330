//! Fuzz target for report document parsing and export.
//!
//! Any document that parses must validate and export without panicking, and
//! the export must never contain a raw `</script` inside the inline script.

#![no_main]

use dr_report::ReportExporter;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = dr_common::ReportDocument::from_json(text) else {
        return;
    };
    let _ = dr_common::validate(&doc);
    if let Ok(html) = ReportExporter::default_config().export(&doc) {
        let script_start = html.rfind("<script>").unwrap_or(0);
        let script = &html[script_start + "<script>".len()..];
        assert_eq!(script.matches("</script").count(), 1);
    }
});
