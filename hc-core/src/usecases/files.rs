use super::prelude::*;

/// Files are kept for at least this period before an
/// unreferenced file is collected.
pub const FILE_RETENTION_PERIOD: Duration = Duration::days(1);

pub fn create_file<R: FileRepo>(repo: &R, file: &File) -> Result<()> {
    repo.create_file(file)?;
    Ok(())
}

pub fn unreferenced_files<R: FileRepo>(repo: &R, now: Timestamp) -> Result<Vec<File>> {
    Ok(repo.unreferenced_files(now - FILE_RETENTION_PERIOD)?)
}
