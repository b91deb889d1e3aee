use crate::domain::model::{PhonebookName, RenderedPhonebook, ValidatedInput};
use crate::utils::error::Result;
use std::io::Read;
use std::path::Path;

pub trait Storage {
    fn open_reader(&self, path: &Path) -> Result<Box<dyn Read + '_>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_file(&self) -> &Path;
    fn output_file(&self) -> &Path;
    fn phonebook_name(&self) -> &PhonebookName;
    fn escape_xml(&self) -> bool;
}

pub trait Pipeline {
    /// Opens the input and checks its header row. Data rows are not read.
    fn extract(&self) -> Result<ValidatedInput<'_>>;
    /// Maps every data row to a contact and renders the document.
    fn transform(&self, input: ValidatedInput<'_>) -> Result<RenderedPhonebook>;
    fn load(&self, phonebook: RenderedPhonebook) -> Result<String>;
}
