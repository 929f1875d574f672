// src/upload.rs
//! Upload control: file type allow-lists and the drag/drop state machine

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::core::FsOps;

/// A file picked or dropped by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    /// Declared MIME type. Empty when the source did not provide one.
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk. The MIME type is declared from the extension,
    /// and left empty for unknown extensions.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = FsOps::read_bytes(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime = FileKind::from_file_name(&name)
            .map(|kind| kind.mime().to_string())
            .unwrap_or_default();

        Ok(Self { name, mime, bytes })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
    Png,
    Jpeg,
}

impl FileKind {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Text => "text/plain",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &[".pdf"],
            Self::Docx => &[".docx"],
            Self::Text => &[".txt"],
            Self::Png => &[".png"],
            Self::Jpeg => &[".jpg", ".jpeg"],
        }
    }

    fn all() -> [FileKind; 5] {
        [Self::Pdf, Self::Docx, Self::Text, Self::Png, Self::Jpeg]
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        Self::all()
            .into_iter()
            .find(|kind| kind.extensions().iter().any(|ext| lower.ends_with(ext)))
    }
}

/// Which file kinds a view accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptPolicy {
    kinds: Vec<FileKind>,
}

impl AcceptPolicy {
    pub fn new(kinds: &[FileKind]) -> Self {
        Self {
            kinds: kinds.to_vec(),
        }
    }

    /// PDF, DOCX and plain text.
    pub fn documents() -> Self {
        Self::new(&[FileKind::Pdf, FileKind::Docx, FileKind::Text])
    }

    /// Documents plus PNG and JPEG scans.
    pub fn documents_and_images() -> Self {
        Self::new(&FileKind::all())
    }

    pub fn pdf_only() -> Self {
        Self::new(&[FileKind::Pdf])
    }

    /// Accepts when the declared MIME type is allowed, or when the filename
    /// carries an allowed extension. File content is never inspected.
    pub fn accepts(&self, file: &UploadFile) -> bool {
        let mime = file.mime.trim().to_lowercase();
        if !mime.is_empty() && self.kinds.iter().any(|kind| kind.mime() == mime) {
            return true;
        }

        let name = file.name.to_lowercase();
        self.kinds
            .iter()
            .flat_map(|kind| kind.extensions())
            .any(|ext| name.ends_with(ext))
    }

    /// Comma separated extensions, like an `accept` attribute.
    pub fn accept_attribute(&self) -> String {
        self.kinds
            .iter()
            .flat_map(|kind| kind.extensions().iter().copied())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum UploadState {
    #[default]
    Idle,
    DragOver,
    FileSelected(String),
}

#[derive(Debug, Clone)]
pub enum UploadEvent {
    DragEnter,
    DragLeave,
    Drop(UploadFile),
    Pick(UploadFile),
}

/// The drop zone / file picker. Rejected files are ignored without error.
#[derive(Debug, Clone)]
pub struct UploadControl {
    policy: AcceptPolicy,
    state: UploadState,
    /// Last accepted filename, kept while a new drag is hovering.
    file_name: Option<String>,
}

impl UploadControl {
    pub fn new(policy: AcceptPolicy) -> Self {
        Self {
            policy,
            state: UploadState::Idle,
            file_name: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn is_drag_over(&self) -> bool {
        self.state == UploadState::DragOver
    }

    pub fn policy(&self) -> &AcceptPolicy {
        &self.policy
    }

    /// Swap the allow-list. The current selection is kept.
    pub fn set_policy(&mut self, policy: AcceptPolicy) {
        self.policy = policy;
    }

    /// Apply an event. When a file is accepted the handler is invoked once
    /// with it and the file is returned.
    pub fn handle<F>(&mut self, event: UploadEvent, mut on_select: F) -> Option<UploadFile>
    where
        F: FnMut(&UploadFile),
    {
        match event {
            UploadEvent::DragEnter => {
                self.state = UploadState::DragOver;
                None
            }
            UploadEvent::DragLeave => {
                self.state = self.resting_state();
                None
            }
            UploadEvent::Drop(file) | UploadEvent::Pick(file) => {
                if !self.policy.accepts(&file) {
                    debug!("Ignoring unsupported file: {} ({})", file.name, file.mime);
                    self.state = self.resting_state();
                    return None;
                }

                self.file_name = Some(file.name.clone());
                self.state = UploadState::FileSelected(file.name.clone());
                on_select(&file);
                Some(file)
            }
        }
    }

    fn resting_state(&self) -> UploadState {
        match &self.file_name {
            Some(name) => UploadState::FileSelected(name.clone()),
            None => UploadState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str) -> UploadFile {
        UploadFile::new(name, mime, b"dummy content".to_vec())
    }

    #[test]
    fn test_accepts_by_mime() {
        let policy = AcceptPolicy::documents();
        assert!(policy.accepts(&file("resume", "application/pdf")));
        assert!(policy.accepts(&file("blob", FileKind::Docx.mime())));
        assert!(policy.accepts(&file("notes.bin", "text/plain")));
    }

    #[test]
    fn test_accepts_by_extension_when_mime_missing() {
        let policy = AcceptPolicy::documents();
        assert!(policy.accepts(&file("Resume.PDF", "")));
        assert!(policy.accepts(&file("cv.docx", "")));
        assert!(policy.accepts(&file("cv.txt", "application/octet-stream")));
    }

    #[test]
    fn test_rejects_outside_allow_list() {
        let policy = AcceptPolicy::documents();
        assert!(!policy.accepts(&file("cv.doc", "application/msword")));
        assert!(!policy.accepts(&file("photo.png", "image/png")));
        assert!(!policy.accepts(&file("archive.pdf.zip", "")));
        assert!(!policy.accepts(&file("noext", "")));
    }

    #[test]
    fn test_content_is_ignored() {
        let policy = AcceptPolicy::documents();
        let fake = UploadFile::new("cv.pdf", "", b"\x89PNG not a pdf".to_vec());
        assert!(policy.accepts(&fake));
        let real_pdf = UploadFile::new("cv.exe", "", b"%PDF-1.7".to_vec());
        assert!(!policy.accepts(&real_pdf));
    }

    #[test]
    fn test_image_policy() {
        let policy = AcceptPolicy::documents_and_images();
        assert!(policy.accepts(&file("scan.jpeg", "")));
        assert!(policy.accepts(&file("scan", "image/png")));
        assert!(!AcceptPolicy::pdf_only().accepts(&file("cv.docx", "")));
        assert_eq!(
            AcceptPolicy::documents().accept_attribute(),
            ".pdf,.docx,.txt"
        );
    }

    #[test]
    fn test_drag_drop_flow_invokes_handler_once() {
        let mut control = UploadControl::new(AcceptPolicy::documents());
        let mut calls = Vec::new();

        control.handle(UploadEvent::DragEnter, |_| {});
        assert!(control.is_drag_over());

        let selected = control.handle(UploadEvent::Drop(file("resume.pdf", "application/pdf")), |f| {
            calls.push(f.name.clone())
        });

        assert!(selected.is_some());
        assert_eq!(calls, vec!["resume.pdf".to_string()]);
        assert_eq!(
            control.state(),
            &UploadState::FileSelected("resume.pdf".into())
        );
        assert_eq!(control.file_name(), Some("resume.pdf"));
    }

    #[test]
    fn test_invalid_drop_is_silent() {
        let mut control = UploadControl::new(AcceptPolicy::documents());
        let mut called = false;

        control.handle(UploadEvent::DragEnter, |_| {});
        let selected = control.handle(UploadEvent::Drop(file("virus.exe", "")), |_| called = true);

        assert!(selected.is_none());
        assert!(!called);
        assert_eq!(control.state(), &UploadState::Idle);
        assert_eq!(control.file_name(), None);
    }

    #[test]
    fn test_drag_leave_keeps_previous_selection() {
        let mut control = UploadControl::new(AcceptPolicy::documents());
        control.handle(UploadEvent::Pick(file("a.txt", "text/plain")), |_| {});
        control.handle(UploadEvent::DragEnter, |_| {});
        control.handle(UploadEvent::DragLeave, |_| {});
        assert_eq!(control.state(), &UploadState::FileSelected("a.txt".into()));
    }

    #[test]
    fn test_set_policy_applies_to_next_drop() {
        let mut control = UploadControl::new(AcceptPolicy::documents());
        control.handle(UploadEvent::Pick(file("cv.docx", "")), |_| {});

        control.set_policy(AcceptPolicy::pdf_only());
        assert!(control
            .handle(UploadEvent::Pick(file("cv2.docx", "")), |_| {})
            .is_none());
        assert_eq!(control.file_name(), Some("cv.docx"));
        assert!(control
            .handle(UploadEvent::Pick(file("cv.pdf", "")), |_| {})
            .is_some());
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(FileKind::from_file_name("x.JPG"), Some(FileKind::Jpeg));
        assert_eq!(FileKind::from_file_name("x.md"), None);
    }

    #[tokio::test]
    async fn test_from_path_declares_mime() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF").expect("write");

        let upload = UploadFile::from_path(&path).await.expect("read");
        assert_eq!(upload.name, "resume.pdf");
        assert_eq!(upload.mime, "application/pdf");
        assert_eq!(upload.bytes, b"%PDF".to_vec());
    }
}
