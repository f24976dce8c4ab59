use crate::crawler::CrawlResult;
use crate::CrawlError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the result as pretty JSON to a file, replacing any existing content
///
/// # Returns
///
/// * `Ok(())` - The file was written
/// * `Err(CrawlError)` - The file could not be created or written
pub fn write_result(result: &CrawlResult, path: &Path) -> Result<(), CrawlError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_result_to(result, &mut writer)?;
    writer.flush()?;
    tracing::info!("Wrote crawl result to {}", path.display());
    Ok(())
}

/// Writes the result as pretty JSON followed by a newline
pub fn write_result_to<W: Write>(result: &CrawlResult, writer: &mut W) -> Result<(), CrawlError> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}
