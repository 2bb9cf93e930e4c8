//! CSV exchange: flexible-header import and report export.

mod csv_io;

pub use csv_io::{
    export_buckets, export_transactions, import_transactions, import_transactions_from_reader,
    ImportReport,
};
