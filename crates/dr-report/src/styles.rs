//! Inline stylesheet for exported reports.
//!
//! Colors are CSS custom properties; the `dark` class on `<html>` swaps the
//! palette, so one sheet serves both themes.

use dr_common::Theme;

const PALETTE_LIGHT: &str = r#"
:root {
    --bg-page: #f8fafc;
    --bg-card: #fafafa;
    --bg-surface: #ffffff;
    --bg-header-cell: #f8f9fa;
    --text-body: #334155;
    --text-heading: #2c3e50;
    --text-subheading: #34495e;
    --text-muted: #7f8c8d;
    --border-strong: #dddddd;
    --border-soft: #eeeeee;
    --border-card: #e1e8ed;
    --accent: #3498db;
}
"#;

const PALETTE_DARK: &str = r#"
.dark {
    --bg-page: #111827;
    --bg-card: #1f2937;
    --bg-surface: #0f172a;
    --bg-header-cell: #1e293b;
    --text-body: #e2e8f0;
    --text-heading: #f8fafc;
    --text-subheading: #cbd5e1;
    --text-muted: #94a3b8;
    --border-strong: #374151;
    --border-soft: #334155;
    --border-card: #374151;
    --accent: #60a5fa;
}
"#;

const LAYOUT: &str = r#"
body {
    font-family: 'Inter', sans-serif;
    background: var(--bg-page);
    color: var(--text-body);
    line-height: 1.6;
    margin: 0;
    padding: 20px;
}
.report-container { max-width: 1200px; margin: 0 auto; }
.report-header { border-bottom: 2px solid var(--border-strong); padding-bottom: 20px; margin-bottom: 30px; }
.report-header h1 { color: var(--text-heading); margin-bottom: 10px; font-size: 2.5em; }
.report-header h2 { color: var(--text-subheading); margin-bottom: 15px; font-size: 1.5em; }
.report-meta { display: flex; gap: 20px; margin-bottom: 15px; }
.report-meta span { color: var(--text-muted); font-size: 0.9em; }
.download-btn { background: var(--accent); color: #ffffff; border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; }
.report-section { margin-bottom: 40px; }
.report-section h3 { color: var(--text-heading); border-bottom: 1px solid var(--border-soft); padding-bottom: 10px; margin-bottom: 20px; font-size: 1.8em; }
.chart-container { margin: 30px 0; padding: 20px; border: 1px solid var(--border-card); border-radius: 8px; background: var(--bg-card); }
.chart-container h4 { margin-top: 0; color: var(--text-heading); font-size: 1.3em; margin-bottom: 15px; }
.chart-plot { margin-bottom: 15px; background: var(--bg-surface); border-radius: 4px; }
.table-container { margin: 30px 0; }
.data-table, .chart-data-table { width: 100%; border-collapse: collapse; margin-bottom: 20px; background: var(--bg-surface); }
.data-table th, .data-table td, .chart-data-table th, .chart-data-table td { border: 1px solid var(--border-strong); padding: 12px; text-align: left; }
.data-table th, .chart-data-table th { background-color: var(--bg-header-cell); font-weight: 600; color: var(--text-heading); }
.data-table tbody tr:nth-child(even), .chart-data-table tbody tr:nth-child(even) { background-color: var(--bg-header-cell); }
.empty-table { color: var(--text-muted); font-style: italic; }
@media print {
    .no-print { display: none !important; }
    body { font-size: 10pt; padding: 0; }
    .chart-container, .table-container { page-break-inside: avoid; }
}
"#;

/// The complete inline stylesheet. The dark palette is only emitted for
/// [`Theme::Dark`].
pub fn stylesheet(theme: Theme) -> String {
    let mut css = String::with_capacity(PALETTE_LIGHT.len() + PALETTE_DARK.len() + LAYOUT.len());
    css.push_str(PALETTE_LIGHT);
    if theme == Theme::Dark {
        css.push_str(PALETTE_DARK);
    }
    css.push_str(LAYOUT);
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_palette_only_for_dark_theme() {
        let light = stylesheet(Theme::Light);
        let dark = stylesheet(Theme::Dark);
        assert!(!light.contains(".dark {"));
        assert!(dark.contains(".dark {"));
        assert!(dark.contains("--bg-page: #111827"));
        assert_ne!(light, dark);
    }

    #[test]
    fn test_print_rules_present() {
        assert!(stylesheet(Theme::Light).contains("@media print"));
    }
}
