//! Line-cursor layout — turns a resume into absolutely-positioned text
//! operations, paginating when the cursor passes the printable height.
//!
//! The drawing space is A4 measured in millimetres, origin at the top-left.
//! Rendering is one synchronous pass with a monotonically advancing vertical
//! cursor, and it never fails: every empty optional value renders as the `-`
//! sentinel so no line silently disappears.

use crate::models::resume::{CreateResumeInput, Education, Experience};

/// Placeholder drawn for an empty optional value.
pub const SENTINEL: &str = "-";

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 14.0;
const ENTRY_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;

/// One absolutely-positioned piece of text. `x`/`y` are millimetres from the
/// page's top-left corner; `size` is the font size in points.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedPage {
    pub ops: Vec<TextOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub layout: PageLayout,
    pub pages: Vec<RenderedPage>,
}

/// Page geometry in millimetres. A4 with the margins the original drawing
/// code assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub bullet_indent: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 20.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            bullet_indent: 25.0,
        }
    }
}

impl PageLayout {
    /// Last cursor position a line may be drawn at.
    fn max_y(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

/// Renders the resume into pages of text operations. Pure: equal input gives
/// an identical operation sequence.
pub fn render(input: &CreateResumeInput) -> RenderedDocument {
    let mut cursor = Cursor::new(PageLayout::default());

    cursor.line_at_margin(TITLE_SIZE, input.title.clone());
    cursor.advance(10.0);

    // Labels mirror the wire field names of the record being drawn.
    cursor.line_at_margin(HEADING_SIZE, "Personal Info".to_string());
    cursor.advance(8.0);
    let info = &input.personal_info;
    let fields: [(&str, &str); 8] = [
        ("fullName", &info.full_name),
        ("email", &info.email),
        ("phone", &info.phone),
        ("location", &info.location),
        ("website", &info.website),
        ("linkedin", &info.linkedin),
        ("github", &info.github),
        ("summary", &info.summary),
    ];
    for (label, value) in fields {
        cursor.line_at_margin(BODY_SIZE, format!("{label}: {}", or_sentinel(value)));
        cursor.advance(6.0);
    }

    cursor.advance(8.0);
    cursor.line_at_margin(HEADING_SIZE, "Experience".to_string());
    cursor.advance(8.0);
    for (i, exp) in input.experience.iter().enumerate() {
        render_experience(&mut cursor, i, exp);
    }

    cursor.advance(8.0);
    cursor.line_at_margin(HEADING_SIZE, "Education".to_string());
    cursor.advance(8.0);
    for (i, edu) in input.education.iter().enumerate() {
        render_education(&mut cursor, i, edu);
    }

    cursor.advance(8.0);
    cursor.line_at_margin(HEADING_SIZE, "Skills".to_string());
    cursor.advance(8.0);
    for (i, skill) in input.skills.iter().enumerate() {
        cursor.line_at_margin(
            BODY_SIZE,
            format!(
                "{}. {} - {} ({})",
                i + 1,
                or_sentinel(&skill.name),
                or_sentinel(&skill.level),
                or_sentinel(&skill.category)
            ),
        );
        cursor.advance(6.0);
    }

    cursor.finish()
}

fn render_experience(cursor: &mut Cursor, index: usize, exp: &Experience) {
    cursor.line_at_margin(
        ENTRY_SIZE,
        format!(
            "{}. {} @ {}",
            index + 1,
            or_sentinel(&exp.position),
            or_sentinel(&exp.company)
        ),
    );
    cursor.advance(6.0);

    cursor.line_at_margin(BODY_SIZE, format!("Location: {}", or_sentinel(&exp.location)));
    cursor.advance(5.0);

    cursor.line_at_margin(
        BODY_SIZE,
        format!(
            "Duration: {} - {}",
            or_sentinel(&exp.start_date),
            end_date_label(exp.current, &exp.end_date)
        ),
    );
    cursor.advance(5.0);

    cursor.line_at_margin(
        BODY_SIZE,
        format!("Description: {}", or_sentinel(&exp.description)),
    );
    cursor.advance(6.0);

    for achievement in &exp.achievements {
        cursor.bullet(format!("- {achievement}"));
        cursor.advance(5.0);
    }
    cursor.advance(5.0);
}

fn render_education(cursor: &mut Cursor, index: usize, edu: &Education) {
    cursor.line_at_margin(
        ENTRY_SIZE,
        format!(
            "{}. {} in {}",
            index + 1,
            or_sentinel(&edu.degree),
            or_sentinel(&edu.field)
        ),
    );
    cursor.advance(6.0);

    cursor.line_at_margin(
        BODY_SIZE,
        format!(
            "{} ({} - {})",
            or_sentinel(&edu.institution),
            or_sentinel(&edu.start_date),
            end_date_label(edu.current, &edu.end_date)
        ),
    );
    cursor.advance(5.0);

    cursor.line_at_margin(BODY_SIZE, format!("GPA: {}", or_sentinel(&edu.gpa)));
    cursor.advance(6.0);

    for achievement in &edu.achievements {
        cursor.bullet(format!("- {achievement}"));
        cursor.advance(5.0);
    }
}

/// An ongoing engagement always reads "Present", whatever end date string is
/// still stored.
fn end_date_label(current: bool, end_date: &str) -> String {
    if current {
        "Present".to_string()
    } else {
        or_sentinel(end_date).to_string()
    }
}

fn or_sentinel(value: &str) -> &str {
    if value.is_empty() {
        SENTINEL
    } else {
        value
    }
}

// ── cursor ──────────────────────────────────────────────────────────────────

struct Cursor {
    layout: PageLayout,
    pages: Vec<RenderedPage>,
    y: f32,
}

impl Cursor {
    fn new(layout: PageLayout) -> Self {
        let y = layout.margin_top;
        Self {
            layout,
            pages: vec![RenderedPage::default()],
            y,
        }
    }

    /// Emits a line at the left margin, breaking the page first if the
    /// cursor has passed the printable height.
    fn line_at_margin(&mut self, size: f32, text: String) {
        self.line(self.layout.margin_left, size, text);
    }

    fn bullet(&mut self, text: String) {
        self.line(self.layout.bullet_indent, BODY_SIZE, text);
    }

    fn line(&mut self, x: f32, size: f32, text: String) {
        if self.y > self.layout.max_y() {
            self.pages.push(RenderedPage::default());
            self.y = self.layout.margin_top;
        }
        let op = TextOp {
            x,
            y: self.y,
            size,
            text,
        };
        self.pages
            .last_mut()
            .expect("cursor always holds at least one page")
            .ops
            .push(op);
    }

    /// Advances the cursor without drawing. A gap can push the cursor past
    /// the printable height; the next line then starts the new page, so a
    /// trailing gap never produces an empty page.
    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn finish(self) -> RenderedDocument {
        RenderedDocument {
            layout: self.layout,
            pages: self.pages,
        }
    }
}
