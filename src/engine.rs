use crate::collect::collect_files;
use crate::error::DigestError;
use crate::filter::PathFilter;
use crate::options::DigestOptions;
use crate::output::{WriteOutcome, assemble, ensure_output_available};
use crate::report::{Reporter, TracingReporter};
use crate::tree::render_tree;
use crate::types::DigestResult;

/// Traverses `options.root` and returns the tree and file records, reporting
/// through a [`TracingReporter`] that honours `options.quiet`.
///
/// # Errors
///
/// [`DigestError::OutputExists`] before any traversal when a real, non-forced
/// run targets an existing file, and [`DigestError::InvalidPattern`] for a
/// rule that does not compile. Failures on individual entries never abort.
pub fn process_directory(options: &DigestOptions) -> Result<DigestResult, DigestError> {
    process_directory_with(options, &TracingReporter::new(options.quiet))
}

pub fn process_directory_with(
    options: &DigestOptions,
    reporter: &dyn Reporter,
) -> Result<DigestResult, DigestError> {
    ensure_output_available(options)?;
    let filter = PathFilter::from_options(options)?;
    reporter.info(&format!("Scanning {}", options.root.display()));

    let tree = if options.include_tree {
        Some(render_tree(options, &filter, reporter))
    } else {
        None
    };
    let collection = collect_files(options, &filter, reporter);

    let skipped = collection.records.len() - collection.processed_count;
    if skipped > 0 {
        reporter.warn(&format!("{} file(s) could not be read as text", skipped));
    }
    reporter.info(&format!(
        "{} file(s) {}",
        collection.processed_count,
        if options.dry_run {
            "would be processed"
        } else {
            "processed"
        }
    ));

    Ok(DigestResult {
        tree,
        files: collection.records,
        processed_count: collection.processed_count,
    })
}

/// [`process_directory`] followed by [`assemble`].
pub fn run(options: &DigestOptions) -> Result<WriteOutcome, DigestError> {
    let result = process_directory(options)?;
    assemble(options, result)
}
