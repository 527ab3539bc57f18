use super::{DrawCommand, Margins};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// The vertical writing position during one layout pass, along with the commands
/// emitted so far. A cursor is owned by a single layout call and consumed by
/// [LayoutCursor::into_commands] at the end of it.
#[derive(Debug)]
pub struct LayoutCursor {
    page_size: PageSize,
    margins: Margins,
    y: Pt,
    pages: usize,
    commands: Vec<DrawCommand>,
}

impl LayoutCursor {
    /// Start at the top margin of the first page
    pub fn new(page_size: PageSize, margins: Margins) -> LayoutCursor {
        LayoutCursor {
            page_size,
            margins,
            y: margins.top,
            pages: 1,
            commands: Vec::new(),
        }
    }

    pub fn y(&self) -> Pt {
        self.y
    }

    /// Number of pages the commands emitted so far span
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// The area inside the margins, in top-down page coordinates (`y1` is the
    /// top edge, `y2` the bottom one)
    pub fn content_box(&self) -> Rect {
        Rect {
            x1: self.margins.left,
            y1: self.margins.top,
            x2: self.page_size.0 - self.margins.right,
            y2: self.page_size.1 - self.margins.bottom,
        }
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= self.margins.top
    }

    pub fn advance(&mut self, by: Pt) {
        self.y += by;
    }

    /// Move the cursor to an absolute position on the current page
    pub fn move_to(&mut self, y: Pt) {
        self.y = y;
    }

    /// Make sure something `height` tall fits above the bottom margin, starting a
    /// new page when it doesn't. Something that can't fit on an empty page either
    /// is placed anyway rather than breaking forever.
    pub fn ensure_room(&mut self, height: Pt) {
        if self.y + height > self.content_box().y2 && !self.at_page_top() {
            self.commands.push(DrawCommand::PageBreak);
            self.pages += 1;
            self.y = self.margins.top;
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}
