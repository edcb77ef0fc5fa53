use crate::domain::model::DataDocument;
use crate::utils::error::Result;

/// Produces the data document for one page render.
pub trait DataSource {
    fn load(&self) -> Result<DataDocument>;
}

pub trait ConfigProvider {
    fn data_file(&self) -> &str;
}
