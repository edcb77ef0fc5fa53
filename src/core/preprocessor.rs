use crate::core::markers;
use crate::core::transform::transform;
use crate::domain::model::Page;
use crate::domain::ports::DataSource;
use crate::utils::error::Result;

/// Runs the marker transform once per page, before final rendering.
///
/// The data document is loaded again for every page, so a data file
/// regenerated mid-build is picked up by the next page.
pub struct Preprocessor<S: DataSource> {
    source: S,
}

impl<S: DataSource> Preprocessor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn on_page_markdown(&self, markdown: &str) -> Result<String> {
        let data = self.source.load()?;
        transform(markdown, &data)
    }

    pub fn process_page(&self, page: &Page) -> Result<String> {
        tracing::debug!(
            "Processing page: {} ({} marker(s))",
            page.name,
            markers::scan(&page.markdown).len()
        );

        let output = self
            .on_page_markdown(&page.markdown)
            .map_err(|e| e.in_page(page.name.as_str()))?;

        if output != page.markdown {
            tracing::info!("Substituted markers in {}", page.name);
        }
        Ok(output)
    }
}
