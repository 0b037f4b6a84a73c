//! Job dispatch services.

mod delivery;
mod pdf;
mod spooler;

pub use delivery::{PrintRoute, print_job, send_to_printer};
pub use pdf::page_count;
pub use spooler::{build_lp_args, print_via_spooler, printer_status};
