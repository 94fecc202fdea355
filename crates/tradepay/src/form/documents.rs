//! Supporting documents
//!
//! Pre-shipment payments attach one document of a chosen type. Post-shipment
//! payments have a fixed list of slots, each of which is either uploaded or
//! explicitly declared missing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document Error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Slot is declared missing, the upload control is disabled
    #[error("Document `{0}` is declared missing")]
    DeclaredMissing(String),
    /// Slot holds an upload, the "declare missing" control is disabled
    #[error("Document `{0}` is already uploaded")]
    AlreadyUploaded(String),
    /// File name is blank
    #[error("Uploaded file name is empty")]
    EmptyFileName,
    /// Unknown document type code
    #[error("Unknown document type: `{0}`")]
    UnknownDocumentType(String),
    /// Unknown post-shipment document key
    #[error("Unknown post-shipment document: `{0}`")]
    UnknownPostShipmentDocument(String),
}

/// Type of the single pre-shipment document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    /// Proforma invoice
    #[serde(rename = "PI")]
    ProformaInvoice,
    /// Purchase order
    #[serde(rename = "PO")]
    PurchaseOrder,
    /// Commercial contract
    #[serde(rename = "CC")]
    CommercialContract,
}

impl DocumentType {
    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            DocumentType::ProformaInvoice => "Proforma invoice (PI)",
            DocumentType::PurchaseOrder => "Purchase order (PO)",
            DocumentType::CommercialContract => "Commercial contract (CC)",
        }
    }

    /// Label of the document number field
    pub fn number_label(&self) -> &'static str {
        match self {
            DocumentType::ProformaInvoice => "Proforma invoice number",
            DocumentType::PurchaseOrder => "Purchase order number",
            DocumentType::CommercialContract => "Commercial contract number",
        }
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "PI" => Ok(Self::ProformaInvoice),
            "PO" => Ok(Self::PurchaseOrder),
            "CC" => Ok(Self::CommercialContract),
            _ => Err(Error::UnknownDocumentType(value.to_string())),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::ProformaInvoice => write!(f, "PI"),
            DocumentType::PurchaseOrder => write!(f, "PO"),
            DocumentType::CommercialContract => write!(f, "CC"),
        }
    }
}

/// Documents expected after shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostShipmentDocument {
    /// Commercial invoice
    #[serde(rename = "ci")]
    CommercialInvoice,
    /// Bill of lading, airway bill or other transport document
    #[serde(rename = "transport")]
    TransportDocument,
    /// Packing list
    #[serde(rename = "packing")]
    PackingList,
}

impl PostShipmentDocument {
    /// All post-shipment slots, in display order
    pub const ALL: [PostShipmentDocument; 3] = [
        PostShipmentDocument::CommercialInvoice,
        PostShipmentDocument::TransportDocument,
        PostShipmentDocument::PackingList,
    ];

    /// Key used by the presentation layer
    pub fn key(&self) -> &'static str {
        match self {
            PostShipmentDocument::CommercialInvoice => "ci",
            PostShipmentDocument::TransportDocument => "transport",
            PostShipmentDocument::PackingList => "packing",
        }
    }

    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            PostShipmentDocument::CommercialInvoice => "Commercial invoice",
            PostShipmentDocument::TransportDocument => "Transport document",
            PostShipmentDocument::PackingList => "Packing list",
        }
    }

    /// Name used in the missing-documents declaration. The commercial invoice
    /// cannot be left out of it, so it has none.
    pub fn declaration_name(&self) -> Option<&'static str> {
        match self {
            PostShipmentDocument::CommercialInvoice => None,
            PostShipmentDocument::TransportDocument => Some("transport document"),
            PostShipmentDocument::PackingList => Some("packing list"),
        }
    }
}

impl FromStr for PostShipmentDocument {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|doc| doc.key() == value.trim())
            .ok_or_else(|| Error::UnknownPostShipmentDocument(value.to_string()))
    }
}

impl fmt::Display for PostShipmentDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Upload slot state
///
/// Uploaded and declared-missing are exclusive: the slot can only be in one
/// state at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentSlot {
    /// Nothing provided yet
    #[default]
    Empty,
    /// A file has been uploaded
    Uploaded {
        /// Name of the uploaded file
        file_name: String,
    },
    /// The payer declared they do not have this document
    DeclaredMissing,
}

impl DocumentSlot {
    /// Whether a file is attached
    pub fn is_uploaded(&self) -> bool {
        matches!(self, DocumentSlot::Uploaded { .. })
    }

    /// Whether the slot is declared missing
    pub fn is_declared_missing(&self) -> bool {
        matches!(self, DocumentSlot::DeclaredMissing)
    }

    /// Name of the uploaded file
    pub fn file_name(&self) -> Option<&str> {
        match self {
            DocumentSlot::Uploaded { file_name } => Some(file_name),
            _ => None,
        }
    }

    /// Uploaded or declared missing
    pub fn is_settled(&self) -> bool {
        !matches!(self, DocumentSlot::Empty)
    }

    /// The upload control is enabled
    pub fn can_upload(&self) -> bool {
        !self.is_declared_missing()
    }

    /// The "I don't have this document" control is enabled
    pub fn can_declare_missing(&self) -> bool {
        !self.is_uploaded()
    }

    /// Attach a file, replacing any previous upload
    pub fn upload(&mut self, name: &str, file_name: &str) -> Result<(), Error> {
        if !self.can_upload() {
            return Err(Error::DeclaredMissing(name.to_string()));
        }
        if file_name.trim().is_empty() {
            return Err(Error::EmptyFileName);
        }

        *self = DocumentSlot::Uploaded {
            file_name: file_name.trim().to_string(),
        };
        Ok(())
    }

    /// Check or uncheck the "declare missing" control
    pub fn set_declared_missing(&mut self, name: &str, missing: bool) -> Result<(), Error> {
        if missing {
            if !self.can_declare_missing() {
                return Err(Error::AlreadyUploaded(name.to_string()));
            }
            *self = DocumentSlot::DeclaredMissing;
        } else if self.is_declared_missing() {
            *self = DocumentSlot::Empty;
        }

        Ok(())
    }

    /// Remove the upload or the missing declaration
    pub fn reset(&mut self) {
        *self = DocumentSlot::Empty;
    }
}

/// Post-shipment slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostShipmentDocuments {
    /// Commercial invoice slot
    #[serde(rename = "ci")]
    pub commercial_invoice: DocumentSlot,
    /// Transport document slot
    #[serde(rename = "transport")]
    pub transport_document: DocumentSlot,
    /// Packing list slot
    #[serde(rename = "packing")]
    pub packing_list: DocumentSlot,
}

impl PostShipmentDocuments {
    /// Slot for a document
    pub fn slot(&self, document: PostShipmentDocument) -> &DocumentSlot {
        match document {
            PostShipmentDocument::CommercialInvoice => &self.commercial_invoice,
            PostShipmentDocument::TransportDocument => &self.transport_document,
            PostShipmentDocument::PackingList => &self.packing_list,
        }
    }

    /// Mutable slot for a document
    pub fn slot_mut(&mut self, document: PostShipmentDocument) -> &mut DocumentSlot {
        match document {
            PostShipmentDocument::CommercialInvoice => &mut self.commercial_invoice,
            PostShipmentDocument::TransportDocument => &mut self.transport_document,
            PostShipmentDocument::PackingList => &mut self.packing_list,
        }
    }

    /// Slots in display order
    pub fn iter(&self) -> impl Iterator<Item = (PostShipmentDocument, &DocumentSlot)> {
        PostShipmentDocument::ALL
            .into_iter()
            .map(move |doc| (doc, self.slot(doc)))
    }

    /// Upload a file into a slot
    pub fn upload(&mut self, document: PostShipmentDocument, file_name: &str) -> Result<(), Error> {
        self.slot_mut(document).upload(document.key(), file_name)
    }

    /// Toggle the missing declaration of a slot
    pub fn set_declared_missing(
        &mut self,
        document: PostShipmentDocument,
        missing: bool,
    ) -> Result<(), Error> {
        self.slot_mut(document)
            .set_declared_missing(document.key(), missing)
    }

    /// Declaration the payer confirms for the documents declared missing,
    /// `None` when there is nothing to declare
    pub fn missing_declaration(&self) -> Option<MissingDeclaration> {
        let documents: Vec<_> = self
            .iter()
            .filter(|(document, slot)| {
                slot.is_declared_missing() && document.declaration_name().is_some()
            })
            .map(|(document, _)| document)
            .collect();

        (!documents.is_empty()).then_some(MissingDeclaration { documents })
    }
}

/// Confirmation shown when post-shipment documents are declared missing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingDeclaration {
    documents: Vec<PostShipmentDocument>,
}

impl MissingDeclaration {
    /// Documents covered, in display order
    pub fn documents(&self) -> &[PostShipmentDocument] {
        &self.documents
    }

    /// Singular listing, e.g. `transport document or packing list`
    pub fn label(&self) -> String {
        self.names().collect::<Vec<_>>().join(" or ")
    }

    /// Full sentence, pluralized, e.g. `By proceeding, I confirm that this
    /// payment does not involve any transport documents`
    pub fn title(&self) -> String {
        let plural = self
            .names()
            .map(|name| {
                if name.ends_with('s') {
                    name.to_string()
                } else {
                    format!("{name}s")
                }
            })
            .collect::<Vec<_>>()
            .join(" or ");

        format!("By proceeding, I confirm that this payment does not involve any {plural}")
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.documents
            .iter()
            .filter_map(PostShipmentDocument::declaration_name)
    }
}

impl fmt::Display for MissingDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Every supporting-document field of the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportingDocuments {
    /// Raw pre-shipment document type selection (`PI`, `PO`, `CC` or empty)
    pub document_type: String,
    /// Pre-shipment upload slot
    pub pre_shipment: DocumentSlot,
    /// Post-shipment slots
    pub post_shipment: PostShipmentDocuments,
}

impl SupportingDocuments {
    /// Change the pre-shipment document type; a different type discards the upload
    pub fn select_document_type(&mut self, document_type: &str) {
        if self.document_type != document_type {
            self.document_type = document_type.to_string();
            self.pre_shipment.reset();
        }
    }

    /// Upload the pre-shipment document
    pub fn upload_pre_shipment(&mut self, file_name: &str) -> Result<(), Error> {
        self.pre_shipment.upload("pre_shipment", file_name)
    }
}
