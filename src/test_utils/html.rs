//! Invoice-page HTML generation for testing.

/// Builder for invoice page test documents with a fluent API.
///
/// Produces the `#cikti` output block with its user section (`.d45`),
/// optional site section (`.d45r`), and optional meter table
/// (`table.table2`) in the markup shape the extractor expects.
#[derive(Debug, Default)]
pub struct InvoicePageBuilder {
    user_fields: Vec<(String, String)>,
    site_fields: Vec<(String, String)>,
    meter_rows: Vec<Vec<String>>,
    omit_user_section: bool,
}

impl InvoicePageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label/value pair to the user section.
    pub fn user_field(mut self, label: &str, value: &str) -> Self {
        self.user_fields.push((label.to_string(), value.to_string()));
        self
    }

    /// Adds a label/value pair to the site section; the section is rendered
    /// only when at least one field is added.
    pub fn site_field(mut self, label: &str, value: &str) -> Self {
        self.site_fields.push((label.to_string(), value.to_string()));
        self
    }

    /// Adds one meter table row with the given cells; the table is rendered
    /// only when at least one row is added.
    pub fn meter_row(mut self, cells: &[&str]) -> Self {
        self.meter_rows
            .push(cells.iter().map(|cell| cell.to_string()).collect());
        self
    }

    /// Leaves the mandatory user section out entirely.
    pub fn without_user_section(mut self) -> Self {
        self.omit_user_section = true;
        self
    }

    /// Builds the HTML string.
    pub fn build(self) -> String {
        let mut content = String::from(r#"<html><body><div id="cikti">"#);

        if !self.omit_user_section {
            content.push_str(r#"<div class="d45">"#);
            for (label, value) in &self.user_fields {
                content.push_str(&format!(
                    "<div><strong>{}</strong><span>{}</span></div>",
                    label, value
                ));
            }
            content.push_str("</div>");
        }

        if !self.site_fields.is_empty() {
            content.push_str(r#"<div class="d45r">"#);
            for (label, value) in &self.site_fields {
                content.push_str(&format!(
                    "<div><strong>{}</strong><span>{}</span></div>",
                    label, value
                ));
            }
            content.push_str("</div>");
        }

        if !self.meter_rows.is_empty() {
            content.push_str(r#"<table class="table2">"#);
            for cells in &self.meter_rows {
                content.push_str("<tr>");
                for cell in cells {
                    content.push_str(&format!("<td>{}</td>", cell));
                }
                content.push_str("</tr>");
            }
            content.push_str("</table>");
        }

        content.push_str("</div></body></html>");
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_user_section() {
        let html = InvoicePageBuilder::new()
            .user_field("Kullanıcı Adı", "Ali Veli")
            .build();

        assert!(html.contains(r#"<div class="d45">"#));
        assert!(html.contains("<strong>Kullanıcı Adı</strong><span>Ali Veli</span>"));
    }

    #[test]
    fn test_site_section_rendered_only_when_populated() {
        let without = InvoicePageBuilder::new()
            .user_field("Kullanıcı Adı", "A")
            .build();
        assert!(!without.contains("d45r"));

        let with = InvoicePageBuilder::new()
            .user_field("Kullanıcı Adı", "A")
            .site_field("Site Adı", "Gül Sitesi")
            .build();
        assert!(with.contains(r#"<div class="d45r">"#));
    }

    #[test]
    fn test_meter_table_rendered_only_when_populated() {
        let without = InvoicePageBuilder::new()
            .user_field("Kullanıcı Adı", "A")
            .build();
        assert!(!without.contains("table2"));

        let with = InvoicePageBuilder::new()
            .user_field("Kullanıcı Adı", "A")
            .meter_row(&["111", "Kalorimetre", "x", "01.01.2025", "10", "15", "5"])
            .build();
        assert!(with.contains(r#"<table class="table2">"#));
        assert_eq!(with.matches("<td>").count(), 7);
    }

    #[test]
    fn test_without_user_section() {
        let html = InvoicePageBuilder::new().without_user_section().build();
        assert!(!html.contains("d45"));
        assert!(html.contains(r#"<div id="cikti">"#));
    }
}
