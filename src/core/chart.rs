use crate::core::fretboard::Fretboard;
use crate::core::render;
use crate::domain::ports::{ChartConfig, Storage};
use crate::utils::error::Result;

/// Runs one chart request: build, annotate, render, and optionally store.
pub struct ChartEngine<C: ChartConfig, S: Storage> {
    config: C,
    storage: S,
}

impl<C: ChartConfig, S: Storage> ChartEngine<C, S> {
    pub fn new(config: C, storage: S) -> Self {
        Self { config, storage }
    }

    /// Returns the rendered chart. When an output path is configured the
    /// chart is also written there.
    pub fn run(&self) -> Result<String> {
        let strings = self.config.open_strings()?;
        let frets = self.config.frets()?;
        tracing::info!(
            "Building fretboard: {} strings, {} frets",
            strings.len(),
            frets
        );
        let mut fretboard = Fretboard::new(&strings, frets)?;

        let matrix = match self.config.mode()? {
            Some(mode) => {
                tracing::info!("Applying mode {}", mode);
                fretboard.apply_mode(&mode.root, &mode.intervals)?
            }
            None => fretboard.clear_mode()?,
        };

        let options = self.config.render_options();
        tracing::debug!("Rendering chart as {:?}", options.format);
        let chart = render::render(matrix, &options)?;

        if let Some(path) = self.config.output_path() {
            self.storage.write_file(path, chart.as_bytes())?;
            tracing::info!("Chart saved to: {}", path);
        }

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ModeSelection, OpenString, OutputFormat, RenderOptions};
    use crate::utils::error::FretboardError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<Vec<(String, Vec<u8>)>>,
    }

    impl Storage for &MemoryStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .push((path.to_string(), data.to_vec()));
            Ok(())
        }
    }

    struct FixedConfig {
        strings: Vec<OpenString>,
        frets: usize,
        mode: Option<ModeSelection>,
        format: OutputFormat,
        output_path: Option<String>,
    }

    impl ChartConfig for FixedConfig {
        fn open_strings(&self) -> Result<Vec<OpenString>> {
            Ok(self.strings.clone())
        }

        fn frets(&self) -> Result<usize> {
            Ok(self.frets)
        }

        fn mode(&self) -> Result<Option<ModeSelection>> {
            Ok(self.mode.clone())
        }

        fn render_options(&self) -> RenderOptions {
            RenderOptions {
                format: self.format,
                ..Default::default()
            }
        }

        fn output_path(&self) -> Option<&str> {
            self.output_path.as_deref()
        }
    }

    fn a_string_config() -> FixedConfig {
        FixedConfig {
            strings: vec![OpenString::new("A", None)],
            frets: 12,
            mode: Some(ModeSelection {
                root: "A".to_string(),
                intervals: vec![0, 2, 3, 5, 7, 8, 10],
                name: Some("aeolian".to_string()),
            }),
            format: OutputFormat::Csv,
            output_path: None,
        }
    }

    #[test]
    fn test_run_renders_annotated_chart() {
        let storage = MemoryStorage::default();
        let engine = ChartEngine::new(a_string_config(), &storage);

        let chart = engine.run().unwrap();
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[1], "1,0,1,A,A,,1");
        assert_eq!(lines[13], "1,12,1,A,A,,1");
        assert!(storage.files.borrow().is_empty());
    }

    #[test]
    fn test_run_writes_output_when_path_configured() {
        let storage = MemoryStorage::default();
        let mut config = a_string_config();
        config.output_path = Some("charts/a.csv".to_string());
        let engine = ChartEngine::new(config, &storage);

        let chart = engine.run().unwrap();

        let files = storage.files.borrow();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "charts/a.csv");
        assert_eq!(files[0].1, chart.as_bytes());
    }

    #[test]
    fn test_run_without_mode_leaves_positions_empty() {
        let storage = MemoryStorage::default();
        let mut config = a_string_config();
        config.mode = None;
        let engine = ChartEngine::new(config, &storage);

        let chart = engine.run().unwrap();
        assert!(chart.lines().skip(1).all(|line| line.ends_with(',')));
    }

    #[test]
    fn test_run_propagates_engine_errors() {
        let storage = MemoryStorage::default();
        let mut config = a_string_config();
        config.strings.clear();
        let engine = ChartEngine::new(config, &storage);

        assert!(matches!(engine.run(), Err(FretboardError::EmptyTuning)));
    }
}
