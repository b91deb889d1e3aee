use crate::core::columns::{check_columns, REQUIRED_COLUMNS};
use crate::core::mapper;
use crate::core::template::TemplateRenderer;
use crate::core::{ConfigProvider, Pipeline, RenderedPhonebook, Storage, ValidatedInput};
use crate::utils::error::{EtlError, Result};

pub struct PhonebookPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PhonebookPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for PhonebookPipeline<S, C> {
    fn extract(&self) -> Result<ValidatedInput<'_>> {
        let input_path = self.config.input_file();
        tracing::debug!("Opening CSV input: {}", input_path.display());

        // reader 隨 ValidatedInput 一起釋放，錯誤路徑亦同
        let input = self.storage.open_reader(input_path)?;
        let mut reader = mapper::csv_reader(input);
        let headers = reader.headers()?.clone();
        tracing::debug!("CSV header: {:?}", headers);

        let check = check_columns(headers.iter(), &REQUIRED_COLUMNS);
        if !check.success() {
            return Err(EtlError::MissingColumns {
                missing: check.missing,
            });
        }
        tracing::info!("Good! All expected columns are present.");

        Ok(ValidatedInput::new(mapper::rows(reader, headers)))
    }

    fn transform(&self, input: ValidatedInput<'_>) -> Result<RenderedPhonebook> {
        let contacts = mapper::contacts_from_rows(input.into_rows())?;
        tracing::info!("Found {} contacts", contacts.len());

        let renderer = TemplateRenderer::new(self.config.escape_xml());
        let rendered = renderer.render(self.config.phonebook_name(), &contacts);

        tracing::debug!(
            "Rendered phonebook '{}' ({} bytes)",
            self.config.phonebook_name(),
            rendered.xml.len()
        );
        Ok(rendered)
    }

    fn load(&self, phonebook: RenderedPhonebook) -> Result<String> {
        let output_path = self.config.output_file();

        tracing::debug!(
            "Writing {} contacts to {}",
            phonebook.contact_count,
            output_path.display()
        );
        self.storage.write_file(output_path, phonebook.xml.as_bytes())?;

        Ok(output_path.display().to_string())
    }
}
