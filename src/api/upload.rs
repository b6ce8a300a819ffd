// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart form reading shared by the upload endpoints

use axum_extra::extract::Multipart;
use std::collections::HashMap;

use crate::api::errors::ApiError;

/// Name of the form field carrying the image
pub const FILE_FIELD: &str = "file";

/// A parsed multipart upload: at most one file plus text fields
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Vec<u8>>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read every part of `multipart`
    ///
    /// The image is taken from the `file` field, or failing that from the
    /// first part that carries a filename. Other parts are read as text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);

            if name == FILE_FIELD || (file_name.is_some() && form.file.is_none()) {
                let data = field.bytes().await?;
                tracing::debug!(
                    "Received upload {:?} ({} bytes)",
                    file_name.as_deref().unwrap_or(&name),
                    data.len()
                );
                form.file = Some(data.to_vec());
            } else if file_name.is_some() {
                // extra file parts are ignored
                continue;
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// The uploaded image bytes, or a 400 if none were sent
    pub fn require_file(&mut self) -> Result<Vec<u8>, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::missing_field(FILE_FIELD))
    }

    /// A required text field
    pub fn require_text(&self, field: &str) -> Result<String, ApiError> {
        self.fields
            .get(field)
            .cloned()
            .ok_or_else(|| ApiError::missing_field(field))
    }

    /// An optional integer field, `default` when absent
    pub fn int_or(&self, field: &str, default: i64) -> Result<i64, ApiError> {
        match self.fields.get(field) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| ApiError::ValidationError {
                field: field.to_string(),
                message: format!("value is not a valid integer: {:?}", raw),
            }),
        }
    }
}
