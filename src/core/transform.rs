use crate::core::markers;
use crate::core::render::{render_backend, render_contracts, render_specs};
use crate::domain::model::{DataDocument, Marker};
use crate::utils::error::Result;

/// Replaces every marker in `markdown` with its rendered fragment.
///
/// Marker kinds are handled in turn: backends, then `!!! contracts`, then
/// `!!! specs`. A kind that does not occur in the page is never looked up.
/// The first failed lookup aborts the whole call.
pub fn transform(markdown: &str, data: &DataDocument) -> Result<String> {
    let mut output = markdown.to_string();

    let identifiers = markers::backend_identifiers(&output);
    if !identifiers.is_empty() {
        tracing::debug!("Found {} backend marker(s)", identifiers.len());

        let mut fragments = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            let fragment = render_backend(data, &identifier)?;
            fragments.push((Marker::Backend(identifier).text(), fragment));
        }

        // `!!! backend:a` is a prefix of `!!! backend:a.b`.
        fragments.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        for (marker, fragment) in &fragments {
            output = output.replace(marker.as_str(), fragment);
        }
    }

    if output.contains(Marker::CONTRACTS) {
        tracing::debug!("Rendering contracts marker");
        let contracts = render_contracts(data.contracts()?)?;
        output = output.replace(Marker::CONTRACTS, &contracts);
    }

    if output.contains(Marker::SPECS) {
        tracing::debug!("Rendering specs marker");
        let specs = render_specs(data.specs()?)?;
        output = output.replace(Marker::SPECS, &specs);
    }

    Ok(output)
}
