mod analysis_client;
mod chart_data;
mod export;
mod session;

pub use analysis_client::{AnalysisClient, AnalysisError};
pub use chart_data::{distribution_points, top_requirements, ChartPoint};
pub use export::{export_file_name, records_to_csv, write_export};
pub use session::SessionService;
