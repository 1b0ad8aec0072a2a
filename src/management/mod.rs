mod records;

pub use records::OutputError;
pub use records::RecordFile;
