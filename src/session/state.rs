//! Editing session state and lifecycle
//!
//! One `EditSession` exists per photo. It is created when editing begins and
//! dropped on cancel or after a successful export.

use image::RgbaImage;

use crate::annotations::handle_edit_msg;
use crate::assets::StickerCatalog;
use crate::capture::CapturedImage;
use crate::config::{EditorConfig, ShapeColor};
use crate::domain::{AnnotationModel, PreviewGeometry};
use crate::error::EditorError;
use crate::export::ExportSink;
use crate::render::Compositor;
use crate::session::messages::{EditMsg, SessionMsg};

/// Everything being edited for one photo
#[derive(Clone, Debug)]
pub struct EditSession {
    pub image: CapturedImage,
    pub geometry: PreviewGeometry,
    pub model: AnnotationModel,
    /// Whether the sticker picker is showing
    pub picker_open: bool,
}

impl EditSession {
    pub fn new(
        image: CapturedImage,
        display_width: f32,
        color: ShapeColor,
        max_stroke_points: usize,
    ) -> Result<Self, EditorError> {
        let geometry = PreviewGeometry::fit_to_width(image.size(), display_width)?;
        let home = geometry.preview_size().center();
        Ok(Self {
            image,
            geometry,
            model: AnnotationModel::new(home, color, max_stroke_points),
            picker_open: false,
        })
    }

    /// Flatten the current annotations without ending the session
    pub fn render(&self, compositor: &Compositor) -> Result<RgbaImage, EditorError> {
        compositor.flatten(&self.image, &self.model, self.geometry.preview_size())
    }
}

/// Owns the active session plus its collaborators
pub struct Editor<C: StickerCatalog, S: ExportSink> {
    config: EditorConfig,
    catalog: C,
    sink: S,
    compositor: Compositor,
    session: Option<EditSession>,
}

impl<C: StickerCatalog, S: ExportSink> Editor<C, S> {
    pub fn new(config: EditorConfig, catalog: C, sink: S, compositor: Compositor) -> Self {
        Self {
            config,
            catalog,
            sink,
            compositor,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Start editing `image`, replacing any session in progress
    pub fn begin_session(&mut self, image: CapturedImage) -> Result<(), EditorError> {
        if self.session.is_some() {
            log::debug!("Discarding previous session");
        }
        let session = EditSession::new(
            image,
            self.config.display_width,
            self.config.stroke_color,
            self.config.max_stroke_points,
        )?;
        log::debug!(
            "Session started: {}x{} photo, preview {:?}",
            session.image.width(),
            session.image.height(),
            session.geometry.preview_size()
        );
        self.session = Some(session);
        Ok(())
    }

    /// Throw away the session and its annotations
    pub fn cancel_session(&mut self) {
        if self.session.take().is_some() {
            log::debug!("Session cancelled");
        }
    }

    pub fn reset_annotations(&mut self) -> Result<(), EditorError> {
        self.apply(EditMsg::Reset)
    }

    pub fn apply(&mut self, msg: EditMsg) -> Result<(), EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NoSession)?;
        handle_edit_msg(session, &self.catalog, msg)
    }

    /// Flatten and publish. The session ends only if the sink accepts the
    /// image; otherwise annotations are kept so the export can be retried.
    pub fn request_export(&mut self) -> Result<(), EditorError> {
        let session = self.session.as_ref().ok_or(EditorError::NoSession)?;
        let image = session.render(&self.compositor)?;
        match self.sink.publish(&image) {
            Ok(()) => {
                self.session = None;
                Ok(())
            }
            Err(err) => {
                log::error!("Export failed, keeping annotations for retry: {err}");
                Err(err)
            }
        }
    }

    pub fn handle(&mut self, msg: SessionMsg) -> Result<(), EditorError> {
        match msg {
            SessionMsg::Begin(image) => self.begin_session(image),
            SessionMsg::Cancel => {
                self.cancel_session();
                Ok(())
            }
            SessionMsg::Reset => self.reset_annotations(),
            SessionMsg::Export => self.request_export(),
            SessionMsg::Edit(edit) => self.apply(edit),
        }
    }
}
