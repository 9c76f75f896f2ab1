//! Drawing state machine and input state management.

use crate::annotation::{Annotation, AnnotationInfo, ColorValue, DrawStatus};
use crate::config::{Config, StatusConfig};
use crate::input::tool::Tool;
use crate::util::{self, Viewport};

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, actively drawing a shape, or entering text.
/// State transitions occur based on mouse and keyboard events.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for user input
    Idle,
    /// Actively drawing a shape (mouse button held down)
    Drawing {
        /// Which tool is being used for this shape
        tool: Tool,
        /// Shape id shared by every message of this shape
        id: String,
        /// Normalized points: every sample for freehand tools, the two drag
        /// corners otherwise
        points: Vec<f64>,
    },
    /// Text input mode - user is typing into a placed text box
    WritingText {
        /// Shape id shared by every message of this text box
        id: String,
        /// Normalized left edge
        x: f64,
        /// Normalized top edge
        y: f64,
        /// Accumulated text buffer
        buffer: String,
    },
}

/// A message for the annotation store.
#[derive(Debug, Clone, PartialEq)]
pub enum Outgoing {
    /// Insert this record
    Send(Annotation),
    /// Drop the unfinished records of a cancelled shape
    Discard { id: String },
}

/// Input state for one user drawing on one whiteboard.
///
/// Handlers never touch a store; they queue [`Outgoing`] messages that the
/// host drains with [`InputState::take_outgoing`].
#[derive(Debug)]
pub struct InputState {
    /// Tool used for the next press
    pub current_tool: Tool,
    /// Stroke and text color for new shapes
    pub current_color: ColorValue,
    /// Normalized stroke thickness for new shapes (percent of slide width)
    pub current_thickness: f64,
    /// Text size in pixels for new text boxes
    pub current_font_size: f64,
    /// Current drawing mode state machine
    pub state: DrawingState,
    /// Pixel size of the slide the events are reported against
    pub viewport: Viewport,
    pub(crate) statuses: StatusConfig,
    user_id: String,
    whiteboard_id: String,
    shape_counter: u64,
    outgoing: Vec<Outgoing>,
}

impl InputState {
    /// Creates an idle input state with drawing defaults from `config`.
    pub fn new(
        user_id: impl Into<String>,
        whiteboard_id: impl Into<String>,
        viewport: Viewport,
        config: &Config,
    ) -> Self {
        Self {
            current_tool: Tool::default(),
            current_color: config.drawing.default_color.clone(),
            current_thickness: config.drawing.default_thickness,
            current_font_size: config.drawing.default_font_size,
            state: DrawingState::Idle,
            viewport,
            statuses: config.status.clone(),
            user_id: user_id.into(),
            whiteboard_id: whiteboard_id.into(),
            shape_counter: 0,
            outgoing: Vec::new(),
        }
    }

    /// Selects the tool for the next shape.
    ///
    /// Switching tools mid-shape does not affect the shape in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
    }

    /// Updates the slide size after a resize.
    pub fn update_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Drains the queued store messages, oldest first.
    pub fn take_outgoing(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outgoing)
    }

    /// Allocates the next `"<user>-<n>"` shape id.
    pub(crate) fn next_shape_id(&mut self) -> String {
        self.shape_counter += 1;
        format!("{}-{}", self.user_id, self.shape_counter)
    }

    /// Converts a pixel position into normalized slide coordinates, clamped to the slide.
    pub(crate) fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        (
            util::unscale(x, self.viewport.width).clamp(0.0, 100.0),
            util::unscale(y, self.viewport.height).clamp(0.0, 100.0),
        )
    }

    pub(crate) fn emit(&mut self, annotation: Annotation) {
        self.outgoing.push(Outgoing::Send(annotation));
    }

    pub(crate) fn discard(&mut self, id: String) {
        log::debug!("discarding unfinished shape {id}");
        self.outgoing.push(Outgoing::Discard { id });
    }

    fn stamp(&self, annotation: Annotation) -> Annotation {
        let mut annotation = annotation.on_whiteboard(self.whiteboard_id.clone());
        annotation.user_id = Some(self.user_id.clone());
        annotation.position = Some(0.0);
        annotation
    }

    /// Builds a stroked-shape record for the given lifecycle phase.
    pub(crate) fn shape_annotation(
        &self,
        tool: Tool,
        id: &str,
        status: DrawStatus,
        points: &[f64],
    ) -> Annotation {
        let mut info = AnnotationInfo {
            points: Some(points.to_vec()),
            thickness: Some(self.current_thickness),
            color: Some(self.current_color.clone()),
            ..AnnotationInfo::default()
        };
        if tool == Tool::Pencil && status == DrawStatus::End {
            info.commands = Some(polyline_commands(points.len() / 2));
        }

        self.stamp(Annotation::new(
            id,
            self.statuses.tag(status),
            tool.annotation_type(),
            info,
        ))
    }

    /// Builds a text record, measuring the box from the buffer.
    pub(crate) fn text_annotation(
        &self,
        id: &str,
        status: DrawStatus,
        x: f64,
        y: f64,
        text: &str,
    ) -> Annotation {
        let (width, height) = measure_text(text, self.current_font_size);
        let info = AnnotationInfo {
            x: Some(x),
            y: Some(y),
            text: Some(text.to_string()),
            font_size: Some(self.current_font_size),
            calced_font_size: Some(util::unscale(self.current_font_size, self.viewport.height)),
            font_color: Some(self.current_color.clone()),
            text_box_width: Some(util::unscale(width, self.viewport.width)),
            text_box_height: Some(util::unscale(height, self.viewport.height)),
            ..AnnotationInfo::default()
        };

        self.stamp(Annotation::new(
            id,
            self.statuses.tag(status),
            Tool::Text.annotation_type(),
            info,
        ))
    }
}

/// Command stream for a pencil stroke finalized without curve fitting: one
/// move followed by a line per remaining point.
pub(crate) fn polyline_commands(point_count: usize) -> Vec<i64> {
    (0..point_count)
        .map(|i| if i == 0 { 1 } else { 2 })
        .collect()
}

/// Approximate pixel size of unwrapped text: average glyph advance of 0.6em,
/// one font size per line.
pub(crate) fn measure_text(text: &str, font_size: f64) -> (f64, f64) {
    let lines: Vec<&str> = text.split('\n').collect();
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    (
        longest as f64 * font_size * 0.6,
        lines.len() as f64 * font_size,
    )
}
