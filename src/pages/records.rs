//! Medical record upload and listing.
//!
//! Uploads are multipart: the text fields, the file part, and a `fileType`
//! part carrying the file's MIME type.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

use super::date_part;
use crate::net::api::{Endpoint, Part, RequestBody};
use crate::net::types::{Id, MedicalRecord};
use crate::state::form::{DraftRecord, FormSchema, encode_draft};
use crate::state::list::Resource;
use crate::util::field::{FieldKind, FieldSpec, FieldValue};

pub const RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", "Title", FieldKind::Text),
    FieldSpec::optional("description", "Description", FieldKind::TextArea),
    FieldSpec::required("file", "File", FieldKind::File),
];

pub const UPLOADED: &str = "Medical record added successfully!";
pub const NO_RECORDS: &str = "No records found.";

impl Resource for MedicalRecord {
    const ENDPOINT: Endpoint = Endpoint::MedicalRecords;
    const LOAD_FAILED: &'static str = "Failed to load medical records";

    fn id(&self) -> &Id {
        &self.id
    }
}

pub struct MedicalRecordForm;

impl FormSchema for MedicalRecordForm {
    type Output = MedicalRecord;

    fn endpoint(&self) -> Endpoint {
        Endpoint::MedicalRecords
    }

    fn fields(&self) -> &[FieldSpec] {
        RECORD_FIELDS
    }

    fn failure_message(&self) -> &str {
        "Failed to upload record. Please try again."
    }

    fn body(&self, draft: &DraftRecord) -> RequestBody {
        let mut body = encode_draft(RECORD_FIELDS, draft);
        if let (RequestBody::Multipart(parts), Some(FieldValue::File(file))) = (&mut body, draft.get("file")) {
            parts.push(Part::Text { name: "fileType".to_owned(), value: file.mime.clone() });
        }
        body
    }
}

pub fn render_record(record: &MedicalRecord) -> String {
    let mut out = record.title.clone();
    if let Some(date) = &record.date {
        out.push_str(&format!("\n  Date: {}", date_part(date)));
    }
    if let Some(doctor) = &record.doctor {
        out.push_str(&format!("\n  Doctor: {doctor}"));
    }
    out.push_str(&format!("\n  Description: {}", record.description));
    if !record.attachments.is_empty() {
        out.push_str("\n  Attachments:");
        for attachment in &record.attachments {
            out.push_str(&format!("\n    {} <{}>", attachment.name, attachment.url));
        }
    }
    out
}
