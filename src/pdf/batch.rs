//! Multi-template generation for a single job.

use super::renderer::{self, RenderedDocument};
use super::GeneratorError;
use crate::job::models::Job;
use crate::template::models::PdfTemplate;

/// Render one document per selected template id, in selection order.
///
/// The whole batch is resolved against the catalog before any rendering
/// starts: an unknown id aborts the operation with zero results rather
/// than skipping the bad entry. The catalog is small, static and trusted,
/// so a bad id is a caller bug worth failing loudly on.
pub fn generate_batch<'a>(
    job: &Job,
    template_ids: &[String],
    catalog: &'a [PdfTemplate],
) -> Result<Vec<(&'a PdfTemplate, RenderedDocument)>, GeneratorError> {
    let mut selected = Vec::with_capacity(template_ids.len());
    for id in template_ids {
        let template = catalog
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| GeneratorError::UnknownTemplate(id.clone()))?;
        selected.push(template);
    }

    let mut results = Vec::with_capacity(selected.len());
    for template in selected {
        let rendered = renderer::render(job, template)?;
        results.push((template, rendered));
    }
    Ok(results)
}
