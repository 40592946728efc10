use crate::domain::model::{ModeSelection, OpenString, RenderOptions};
use crate::utils::error::Result;

/// Where the rendered chart goes when an output path is configured.
pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Everything needed to produce one chart, however it was configured.
pub trait ChartConfig {
    fn open_strings(&self) -> Result<Vec<OpenString>>;
    fn frets(&self) -> Result<usize>;
    fn mode(&self) -> Result<Option<ModeSelection>>;
    fn render_options(&self) -> RenderOptions;
    fn output_path(&self) -> Option<&str>;
}
