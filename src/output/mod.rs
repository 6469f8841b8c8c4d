pub mod reporter;

pub use reporter::format_details;
pub use reporter::format_json;
pub use reporter::format_list_report;
pub use reporter::format_single_report;
pub use reporter::JsonReport;
