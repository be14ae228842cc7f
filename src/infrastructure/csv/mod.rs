// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Export of stored results and reading exports back

mod result_csv;

pub use result_csv::{export_file_name, ResultCsv, CSV_HEADERS};
