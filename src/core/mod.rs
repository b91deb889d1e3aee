pub mod columns;
pub mod etl;
pub mod mapper;
pub mod pipeline;
pub mod template;

pub use crate::domain::model::{
    Contact, CsvRow, PhonebookName, RenderedPhonebook, ValidatedInput,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
