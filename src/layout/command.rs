use crate::document::ImageHandle;
use crate::page::SpanFont;
use crate::units::Pt;

/// One positioned drawing primitive. Coordinates are in points measured from the
/// top-left corner of the page, with `y` growing downwards; the renderer flips them
/// into PDF space.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A single line of text whose top edge sits at `y`
    Text {
        x: Pt,
        y: Pt,
        text: String,
        font: SpanFont,
        /// Measured advance width of `text`, also the length of the underline
        width: Pt,
        underline: bool,
    },
    /// An image scaled into the box at `(x, y)` of `width` by `height`
    Image {
        image: ImageHandle,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
    /// Everything after this goes on a fresh page
    PageBreak,
}

impl DrawCommand {
    /// The text of a text command, `None` for anything else
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }
}
