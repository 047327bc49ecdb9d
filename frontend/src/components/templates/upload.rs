use common::api::ApiError;
use common::listing::validate_template_upload;
use common::model::document::DocumentType;
use web_sys::{File, FormData};

/// Values of the upload sheet.
pub struct UploadForm {
    pub name: String,
    pub doc_type: DocumentType,
    pub file: Option<File>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            doc_type: DocumentType::Invoice,
            file: None,
        }
    }
}

impl UploadForm {
    /// Validates the form and builds the multipart body
    /// (`name`, `type`, `file`).
    pub fn to_form_data(&self) -> Result<FormData, ApiError> {
        validate_template_upload(&self.name, self.file.as_ref().map(File::name).as_deref())?;
        let Some(file) = &self.file else {
            return Err(ApiError::Validation("Please select a file".into()));
        };

        let form = FormData::new().map_err(|_| ApiError::Validation("Unable to build the upload".into()))?;
        form.append_with_str("name", self.name.trim())
            .and_then(|_| form.append_with_str("type", self.doc_type.as_str()))
            .and_then(|_| form.append_with_blob_and_filename("file", file, &file.name()))
            .map_err(|_| ApiError::Validation("Unable to build the upload".into()))?;
        Ok(form)
    }
}
