use std::path::Path;

/// What a reference target points at, judged purely by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// No extension, or an extension outside the attachment sets.
    Note,
    Image,
    /// Non-image attachment (document or media file).
    Attachment,
}

impl TargetKind {
    pub fn is_attachment(self) -> bool {
        !matches!(self, TargetKind::Note)
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory names to ignore anywhere in the path.
    pub ignore_dirs: Vec<String>,
    /// File extension (without dot) that is considered a note.
    pub note_extension: String,
    /// Image extensions (without dot), matched case-insensitively.
    pub image_extensions: Vec<String>,
    /// Document attachment extensions (without dot).
    pub document_extensions: Vec<String>,
    /// Audio/video attachment extensions (without dot).
    pub media_extensions: Vec<String>,
    /// Conventional attachment directories, searched in order. An empty
    /// string stands for the vault root itself.
    pub attachment_dirs: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: vec![
                ".obsidian".into(),
                ".git".into(),
                ".trash".into(),
                "node_modules".into(),
                "target".into(),
            ],
            note_extension: "md".into(),
            image_extensions: vec![
                "png".into(),
                "jpg".into(),
                "jpeg".into(),
                "gif".into(),
                "svg".into(),
                "webp".into(),
                "bmp".into(),
            ],
            document_extensions: vec![
                "pdf".into(),
                "doc".into(),
                "docx".into(),
                "xls".into(),
                "xlsx".into(),
                "ppt".into(),
                "pptx".into(),
            ],
            media_extensions: vec![
                "mp3".into(),
                "wav".into(),
                "mp4".into(),
                "webm".into(),
                "ogg".into(),
            ],
            attachment_dirs: vec![
                "attachments".into(),
                "assets".into(),
                "images".into(),
                "files".into(),
                String::new(),
            ],
        }
    }
}

impl ExportConfig {
    /// Classify a target filename by its extension.
    pub fn classify(&self, filename: &str) -> TargetKind {
        let Some(ext) = Path::new(filename).extension().and_then(|s| s.to_str()) else {
            return TargetKind::Note;
        };
        let ext = ext.to_lowercase();
        if self.image_extensions.iter().any(|e| e == &ext) {
            return TargetKind::Image;
        }
        if self.document_extensions.iter().any(|e| e == &ext)
            || self.media_extensions.iter().any(|e| e == &ext)
        {
            return TargetKind::Attachment;
        }
        TargetKind::Note
    }
}
