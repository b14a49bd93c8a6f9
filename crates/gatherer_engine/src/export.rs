use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use gatherer_core::{Contact, CONTACT_FIELDS};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Writes a header plus one row per contact, in the order given. The header
/// is written even when there are no contacts.
pub fn write_contacts_csv(path: &Path, contacts: &[Contact]) -> Result<ExportSummary, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CONTACT_FIELDS)?;
    for contact in contacts {
        writer.write_record(contact.fields())?;
    }
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;

    let output_path = AtomicFileWriter::new(path).write(&bytes)?.to_path_buf();
    engine_info!("Wrote {} contacts to {:?}", contacts.len(), output_path);
    Ok(ExportSummary {
        rows: contacts.len(),
        output_path,
    })
}
