use crate::core::Pipeline;
use crate::utils::error::Result;

/// Driver states. `Failed`, `WriteFailed` and `Done` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Rendering,
    Done,
    Failed,
    WriteFailed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PipelineState::Done | PipelineState::Failed | PipelineState::WriteFailed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub contact_count: usize,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    state: PipelineState,
}

// 只借用 state 欄位，extract 回傳的輸入仍借用著 pipeline
fn enter(state: &mut PipelineState, next: PipelineState) {
    tracing::debug!("Pipeline state: {:?} -> {:?}", state, next);
    *state = next;
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Runs the pipeline once. Nothing is written unless every step before
    /// the write succeeded.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("Starting phonebook conversion...");

        // Extract: header check only
        enter(&mut self.state, PipelineState::Validating);
        let input = match self.pipeline.extract() {
            Ok(input) => input,
            Err(e) => {
                enter(&mut self.state, PipelineState::Failed);
                return Err(e);
            }
        };

        // Transform: read rows, build contacts, render
        enter(&mut self.state, PipelineState::Rendering);
        let rendered = match self.pipeline.transform(input) {
            Ok(rendered) => rendered,
            Err(e) => {
                enter(&mut self.state, PipelineState::Failed);
                return Err(e);
            }
        };
        let contact_count = rendered.contact_count;

        // Load
        let output_path = match self.pipeline.load(rendered) {
            Ok(path) => path,
            Err(e) => {
                enter(&mut self.state, PipelineState::WriteFailed);
                return Err(e);
            }
        };

        enter(&mut self.state, PipelineState::Done);
        tracing::info!("Wrote {} contacts to {}", contact_count, output_path);

        Ok(RunSummary {
            output_path,
            contact_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapper;
    use crate::core::{CsvRow, RenderedPhonebook, ValidatedInput};
    use crate::utils::error::EtlError;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct ScriptedPipeline {
        missing_columns: bool,
        short_row: bool,
        write_fails: bool,
        rows_read: Cell<usize>,
        loaded: RefCell<Vec<String>>,
    }

    impl Pipeline for ScriptedPipeline {
        fn extract(&self) -> Result<ValidatedInput<'_>> {
            if self.missing_columns {
                return Err(EtlError::MissingColumns {
                    missing: vec!["mobile-number".to_string()],
                });
            }

            let mut data: std::collections::HashMap<String, String> = [
                ("realName", "Jane Doe"),
                ("home-number", "12345"),
                ("mobile-number", "67890"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            if self.short_row {
                data.remove("mobile-number");
            }

            let rows = std::iter::once(CsvRow { index: 1, data }).map(|row| {
                self.rows_read.set(self.rows_read.get() + 1);
                Ok(row)
            });
            Ok(ValidatedInput::new(rows))
        }

        fn transform(&self, input: ValidatedInput<'_>) -> Result<RenderedPhonebook> {
            let contacts = mapper::contacts_from_rows(input.into_rows())?;
            Ok(RenderedPhonebook {
                contact_count: contacts.len(),
                xml: "<phonebooks/>".to_string(),
            })
        }

        fn load(&self, phonebook: RenderedPhonebook) -> Result<String> {
            if self.write_fails {
                return Err(EtlError::file_access(
                    "/missing/dir/out.xml",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
                ));
            }
            self.loaded.borrow_mut().push(phonebook.xml);
            Ok("out.xml".to_string())
        }
    }

    #[test]
    fn test_successful_run_reaches_done() {
        let mut engine = EtlEngine::new(ScriptedPipeline::default());
        assert_eq!(engine.state(), PipelineState::Idle);

        let summary = engine.run().unwrap();

        assert_eq!(engine.state(), PipelineState::Done);
        assert!(engine.state().is_terminal());
        assert_eq!(summary.contact_count, 1);
        assert_eq!(summary.output_path, "out.xml");
        assert_eq!(engine.pipeline.loaded.borrow().len(), 1);
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let mut engine = EtlEngine::new(ScriptedPipeline {
            missing_columns: true,
            ..Default::default()
        });

        let err = engine.run().unwrap_err();

        assert!(matches!(err, EtlError::MissingColumns { .. }));
        assert_eq!(engine.state(), PipelineState::Failed);
        assert_eq!(engine.pipeline.rows_read.get(), 0);
        assert!(engine.pipeline.loaded.borrow().is_empty());
    }

    #[test]
    fn test_malformed_row_fails_while_rendering() {
        let mut engine = EtlEngine::new(ScriptedPipeline {
            short_row: true,
            ..Default::default()
        });

        let err = engine.run().unwrap_err();

        assert!(matches!(err, EtlError::MalformedRow { row: 1, .. }));
        assert_eq!(engine.state(), PipelineState::Failed);
        assert_eq!(engine.pipeline.rows_read.get(), 1);
        assert!(engine.pipeline.loaded.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let mut engine = EtlEngine::new(ScriptedPipeline {
            write_fails: true,
            ..Default::default()
        });

        let err = engine.run().unwrap_err();

        assert!(matches!(err, EtlError::FileAccess { .. }));
        assert_eq!(engine.state(), PipelineState::WriteFailed);
    }
}
