pub mod repository;
pub mod service;

pub use repository::{SeaOrmUserRecordRepository, UserRecordRepository};
pub use service::RecordService;
