use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sift_domain::{
    export_file_name, step_cursor, window_title, ExportReport, RenderedImage, Rotation,
    DEFAULT_TITLE, FALLBACK_EXPORT_NAME,
};

use crate::{
    ApplicationError, FileScanner, ImageExporter, ImageRenderer, MetadataReader, ViewerCommand,
    ViewerOutcome,
};

const DEFAULT_DISPLAY_HEIGHT: u32 = 980;

/// The cursor is always a valid index into `images`, or `images` is empty.
pub struct ViewerSession {
    scanner: Box<dyn FileScanner>,
    metadata: Box<dyn MetadataReader>,
    renderer: Box<dyn ImageRenderer>,
    exporter: Box<dyn ImageExporter>,
    origin: Option<PathBuf>,
    destination: Option<PathBuf>,
    images: Vec<PathBuf>,
    cursor: usize,
    display_height: u32,
    title: String,
}

impl ViewerSession {
    pub fn new(
        scanner: Box<dyn FileScanner>,
        metadata: Box<dyn MetadataReader>,
        renderer: Box<dyn ImageRenderer>,
        exporter: Box<dyn ImageExporter>,
    ) -> Self {
        Self {
            scanner,
            metadata,
            renderer,
            exporter,
            origin: None,
            destination: None,
            images: Vec::new(),
            cursor: 0,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn handle(&mut self, command: ViewerCommand) -> Result<ViewerOutcome, ApplicationError> {
        match command {
            ViewerCommand::SetOrigin(folder) => Ok(match self.set_origin(&folder)? {
                Some(image) => ViewerOutcome::Rendered(image),
                None => ViewerOutcome::Cleared,
            }),
            ViewerCommand::SetDestination(folder) => {
                self.set_destination(folder);
                Ok(ViewerOutcome::Unchanged)
            }
            ViewerCommand::Advance => Ok(self.advance()?.into()),
            ViewerCommand::Retreat => Ok(self.retreat()?.into()),
            ViewerCommand::ExportCurrent => Ok(match self.export_current()? {
                Some(report) => ViewerOutcome::Exported(report),
                None => ViewerOutcome::ExportSkipped,
            }),
        }
    }

    pub fn set_origin(&mut self, folder: &Path) -> Result<Option<RenderedImage>, ApplicationError> {
        let summary = self.scanner.scan_images(folder)?;
        let mut images = summary.files;
        images.sort();
        info!(
            "origin set to {}: scanned={}, images={}",
            folder.display(),
            summary.scanned_files,
            images.len()
        );

        self.origin = Some(folder.to_path_buf());
        self.images = images;
        self.cursor = 0;

        if self.images.is_empty() {
            self.title = DEFAULT_TITLE.to_string();
            return Ok(None);
        }
        self.render(0).map(Some)
    }

    pub fn set_destination(&mut self, folder: PathBuf) {
        info!("destination set to {}", folder.display());
        self.destination = Some(folder);
    }

    pub fn advance(&mut self) -> Result<Option<RenderedImage>, ApplicationError> {
        self.step(1)
    }

    pub fn retreat(&mut self) -> Result<Option<RenderedImage>, ApplicationError> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Result<Option<RenderedImage>, ApplicationError> {
        let Some(next) = step_cursor(self.cursor, delta, self.images.len()) else {
            return Ok(None);
        };
        self.cursor = next;
        self.render(next).map(Some)
    }

    pub fn render(&mut self, index: usize) -> Result<RenderedImage, ApplicationError> {
        let path = self.images.get(index).cloned().ok_or_else(|| {
            ApplicationError::InvalidInput(format!(
                "image index {index} out of range for {} images",
                self.images.len()
            ))
        })?;
        self.title = window_title(&path, index, self.images.len());

        let rotation = self
            .metadata
            .try_read_orientation(&path)
            .map(Rotation::from_exif_orientation)
            .unwrap_or_default();
        debug!(
            "rendering {} (rotation={}deg, height={})",
            path.display(),
            rotation.degrees(),
            self.display_height
        );
        self.renderer.render(&path, rotation, self.display_height)
    }

    pub fn rerender(&mut self) -> Result<Option<RenderedImage>, ApplicationError> {
        if self.images.is_empty() {
            return Ok(None);
        }
        self.render(self.cursor).map(Some)
    }

    pub fn export_current(&mut self) -> Result<Option<ExportReport>, ApplicationError> {
        let Some(source) = self.current_path().map(Path::to_path_buf) else {
            info!("export skipped: no image loaded");
            return Ok(None);
        };
        let Some(folder) = self.destination.clone() else {
            info!("export skipped: no destination folder set");
            return Ok(None);
        };

        let capture_time = self.metadata.try_read_capture_time(&source);
        let file_name = export_file_name(capture_time.as_deref());
        let named_from_capture_time = file_name != FALLBACK_EXPORT_NAME;
        let destination = folder.join(&file_name);
        if destination.exists() {
            warn!("overwriting existing export {}", destination.display());
        }

        let artifact = self.exporter.export(&source, &destination)?;
        info!(
            "image copied to {} and renamed to {}",
            destination.display(),
            file_name
        );

        Ok(Some(ExportReport {
            source,
            destination,
            file_name,
            named_from_capture_time,
            exif_preserved: artifact.exif_preserved,
        }))
    }

    pub fn set_display_height(&mut self, height: u32) -> bool {
        let height = height.max(1);
        if height == self.display_height {
            return false;
        }
        self.display_height = height;
        true
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.images.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl From<Option<RenderedImage>> for ViewerOutcome {
    fn from(value: Option<RenderedImage>) -> Self {
        match value {
            Some(image) => Self::Rendered(image),
            None => Self::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::{ExportArtifact, FileScanSummary};

    struct FakeScanner {
        folders: HashMap<PathBuf, Vec<PathBuf>>,
    }

    impl FakeScanner {
        fn with(folder: &str, files: &[&str]) -> Self {
            let mut folders = HashMap::new();
            folders.insert(
                PathBuf::from(folder),
                files.iter().map(|file| Path::new(folder).join(file)).collect(),
            );
            Self { folders }
        }
    }

    impl FileScanner for FakeScanner {
        fn scan_images(&self, folder: &Path) -> Result<FileScanSummary, ApplicationError> {
            let files = self.folders.get(folder).cloned().ok_or_else(|| {
                ApplicationError::InvalidInput(format!("not a directory: {}", folder.display()))
            })?;
            Ok(FileScanSummary {
                scanned_files: files.len(),
                files,
            })
        }
    }

    #[derive(Default)]
    struct FakeMetadata {
        orientation: HashMap<PathBuf, u16>,
        capture_time: HashMap<PathBuf, String>,
    }

    impl MetadataReader for FakeMetadata {
        fn try_read_orientation(&self, path: &Path) -> Option<u16> {
            self.orientation.get(path).copied()
        }

        fn try_read_capture_time(&self, path: &Path) -> Option<String> {
            self.capture_time.get(path).cloned()
        }
    }

    #[derive(Default, Clone)]
    struct FakeRenderer {
        calls: Rc<RefCell<Vec<(PathBuf, Rotation, u32)>>>,
    }

    impl ImageRenderer for FakeRenderer {
        fn render(
            &self,
            path: &Path,
            rotation: Rotation,
            display_height: u32,
        ) -> Result<RenderedImage, ApplicationError> {
            self.calls
                .borrow_mut()
                .push((path.to_path_buf(), rotation, display_height));
            if path.ends_with("broken.png") {
                return Err(ApplicationError::Decode("corrupt".to_string()));
            }
            Ok(RenderedImage {
                path: path.to_path_buf(),
                width: 2,
                height: display_height,
                rgba: vec![0; 8 * display_height as usize],
            })
        }
    }

    #[derive(Default, Clone)]
    struct FakeExporter {
        exports: Rc<RefCell<Vec<(PathBuf, PathBuf)>>>,
    }

    impl ImageExporter for FakeExporter {
        fn export(
            &self,
            source: &Path,
            destination: &Path,
        ) -> Result<ExportArtifact, ApplicationError> {
            self.exports
                .borrow_mut()
                .push((source.to_path_buf(), destination.to_path_buf()));
            Ok(ExportArtifact {
                exif_preserved: true,
            })
        }
    }

    fn session_with(
        scanner: FakeScanner,
        metadata: FakeMetadata,
    ) -> (ViewerSession, FakeRenderer, FakeExporter) {
        let renderer = FakeRenderer::default();
        let exporter = FakeExporter::default();
        let session = ViewerSession::new(
            Box::new(scanner),
            Box::new(metadata),
            Box::new(renderer.clone()),
            Box::new(exporter.clone()),
        );
        (session, renderer, exporter)
    }

    fn file_names(session: &ViewerSession) -> Vec<String> {
        session
            .images()
            .iter()
            .map(|path| path.file_name().expect("name").to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn set_origin_sorts_and_shows_first_image() {
        let (mut session, renderer, _) = session_with(
            FakeScanner::with("/photos", &["b.png", "A.JPG", "a.gif"]),
            FakeMetadata::default(),
        );

        let outcome = session
            .handle(ViewerCommand::SetOrigin(PathBuf::from("/photos")))
            .expect("origin should load");

        assert_eq!(file_names(&session), vec!["A.JPG", "a.gif", "b.png"]);
        assert_eq!(session.cursor(), 0);
        assert!(matches!(outcome, ViewerOutcome::Rendered(ref image) if image.path.ends_with("A.JPG")));
        assert_eq!(session.title(), "Image Viewer - A.JPG - 1 of 3 (33.33%)");
        assert_eq!(renderer.calls.borrow().len(), 1);
    }

    #[test]
    fn empty_origin_clears_display_and_navigation_is_noop() {
        let (mut session, renderer, _) =
            session_with(FakeScanner::with("/empty", &[]), FakeMetadata::default());

        let outcome = session
            .handle(ViewerCommand::SetOrigin(PathBuf::from("/empty")))
            .expect("empty origin should load");
        assert_eq!(outcome, ViewerOutcome::Cleared);
        assert_eq!(session.title(), "Image Viewer");

        assert_eq!(
            session.handle(ViewerCommand::Advance).expect("advance"),
            ViewerOutcome::Unchanged
        );
        assert_eq!(
            session.handle(ViewerCommand::Retreat).expect("retreat"),
            ViewerOutcome::Unchanged
        );
        assert_eq!(session.current_path(), None);
        assert!(renderer.calls.borrow().is_empty());
        assert!(session.rerender().expect("rerender").is_none());
    }

    #[test]
    fn invalid_origin_keeps_previous_state() {
        let (mut session, _, _) = session_with(
            FakeScanner::with("/photos", &["a.png", "b.png"]),
            FakeMetadata::default(),
        );
        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");
        session.advance().expect("advance");

        let result = session.set_origin(Path::new("/missing"));

        assert!(matches!(result, Err(ApplicationError::InvalidInput(_))));
        assert_eq!(session.origin(), Some(Path::new("/photos")));
        assert_eq!(session.cursor(), 1);
        assert_eq!(session.images().len(), 2);
    }

    #[test]
    fn navigation_wraps_and_updates_title() {
        let (mut session, _, _) = session_with(
            FakeScanner::with("/photos", &["a.png", "b.png", "c.png"]),
            FakeMetadata::default(),
        );
        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");

        session.retreat().expect("retreat");
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.title(), "Image Viewer - c.png - 3 of 3 (100.00%)");

        for _ in 0..3 {
            session.advance().expect("advance");
        }
        assert_eq!(session.cursor(), 2);

        session.advance().expect("advance");
        session.retreat().expect("retreat");
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn render_rejects_out_of_range_index() {
        let (mut session, _, _) =
            session_with(FakeScanner::with("/photos", &["a.png"]), FakeMetadata::default());
        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");

        assert!(matches!(
            session.render(5),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[test]
    fn decode_failure_still_moves_cursor() {
        let (mut session, _, _) = session_with(
            FakeScanner::with("/photos", &["a.png", "broken.png"]),
            FakeMetadata::default(),
        );
        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");

        assert!(matches!(
            session.advance(),
            Err(ApplicationError::Decode(_))
        ));
        assert_eq!(session.cursor(), 1);
        assert_eq!(
            session.title(),
            "Image Viewer - broken.png - 2 of 2 (100.00%)"
        );
        assert!(session.advance().expect("next image renders").is_some());
        assert_eq!(session.cursor(), 0);
    }

    #[test]
    fn orientation_metadata_selects_rotation() {
        let mut metadata = FakeMetadata::default();
        metadata
            .orientation
            .insert(PathBuf::from("/photos/a.jpg"), 6);
        metadata
            .orientation
            .insert(PathBuf::from("/photos/b.jpg"), 5);
        let (mut session, renderer, _) =
            session_with(FakeScanner::with("/photos", &["a.jpg", "b.jpg", "c.jpg"]), metadata);
        assert!(session.set_display_height(700));
        assert!(!session.set_display_height(700));

        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");
        session.advance().expect("advance");
        session.advance().expect("advance");

        let rotations: Vec<(Rotation, u32)> = renderer
            .calls
            .borrow()
            .iter()
            .map(|(_, rotation, height)| (*rotation, *height))
            .collect();
        assert_eq!(
            rotations,
            vec![
                (Rotation::Ccw270, 700),
                (Rotation::None, 700),
                (Rotation::None, 700)
            ]
        );
    }

    #[test]
    fn export_is_skipped_without_destination_or_image() {
        let (mut session, _, exporter) =
            session_with(FakeScanner::with("/photos", &["a.png"]), FakeMetadata::default());

        assert_eq!(
            session.handle(ViewerCommand::ExportCurrent).expect("export"),
            ViewerOutcome::ExportSkipped
        );

        session.set_destination(PathBuf::from("/out"));
        assert_eq!(
            session.handle(ViewerCommand::ExportCurrent).expect("export"),
            ViewerOutcome::ExportSkipped
        );

        session
            .set_origin(Path::new("/photos"))
            .expect("origin should load");
        session.destination = None;
        assert_eq!(
            session.handle(ViewerCommand::ExportCurrent).expect("export"),
            ViewerOutcome::ExportSkipped
        );
        assert!(exporter.exports.borrow().is_empty());
    }

    #[test]
    fn export_names_file_after_capture_time() {
        let mut metadata = FakeMetadata::default();
        metadata.capture_time.insert(
            PathBuf::from("/photos/a.jpg"),
            "2024:01:02 03:04:05".to_string(),
        );
        let (mut session, _, exporter) =
            session_with(FakeScanner::with("/photos", &["a.jpg", "b.png"]), metadata);
        session
            .handle(ViewerCommand::SetOrigin(PathBuf::from("/photos")))
            .expect("origin should load");
        session
            .handle(ViewerCommand::SetDestination(PathBuf::from("/out")))
            .expect("destination should be set");

        let first = session
            .handle(ViewerCommand::ExportCurrent)
            .expect("export should work");
        session.advance().expect("advance");
        let second = session
            .handle(ViewerCommand::ExportCurrent)
            .expect("export should work");

        let ViewerOutcome::Exported(first) = first else {
            panic!("expected export, got {first:?}");
        };
        assert_eq!(first.file_name, "2024-01-02-03-04-05.jpg");
        assert!(first.named_from_capture_time);
        assert!(first.exif_preserved);

        let ViewerOutcome::Exported(second) = second else {
            panic!("expected export, got {second:?}");
        };
        assert_eq!(second.file_name, "unnamed.jpg");
        assert!(!second.named_from_capture_time);

        assert_eq!(
            *exporter.exports.borrow(),
            vec![
                (
                    PathBuf::from("/photos/a.jpg"),
                    PathBuf::from("/out/2024-01-02-03-04-05.jpg")
                ),
                (
                    PathBuf::from("/photos/b.png"),
                    PathBuf::from("/out/unnamed.jpg")
                ),
            ]
        );
    }
}
