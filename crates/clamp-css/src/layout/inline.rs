//! CSS Inline Layout and Line Box Model.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. Horizontal
//! margins, borders, and padding are respected between these boxes."
//!
//! [§ 10.8 Line height calculations: the 'line-height' and 'vertical-align' properties](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of the line box is determined by the rules given in the
//! section on line height calculations."

/// Font metrics interface for text measurement during layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
pub trait FontMetrics {
    /// Measure the total advance width of a text string at the given font size.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Calculate the line height for a given font size.
    ///
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// "The initial value of 'line-height' is 'normal'. We recommend a used
    /// value for 'normal' between 1.0 and 1.2."
    fn line_height(&self, font_size: f32) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// Without font data every glyph advances 0.6× the font size (typical for
/// Helvetica/Arial body text) and `normal` line height is 1.2×, the upper
/// end of the recommended range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        font_size * crate::style::NORMAL_LINE_HEIGHT_RATIO
    }
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "The rectangular area that contains the boxes that form a line is called
/// a line box."
#[derive(Debug, Clone, PartialEq)]
pub struct LineBox {
    /// Top of the line box, relative to the formatting context.
    pub y: f32,
    /// Total advance of the fragments on this line.
    pub width: f32,
    /// "The height of the line box is the distance between the uppermost
    /// box top and the lowermost box bottom."
    pub height: f32,
    /// Fragments laid out on this line.
    pub fragments: Vec<LineFragment>,
}

/// A run of text placed on a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFragment {
    /// Offset from the start of the line.
    pub x: f32,
    /// Advance width from font metrics.
    pub width: f32,
    /// The text placed.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
}

/// Breaks text runs into line boxes of a fixed available width.
///
/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// "In an inline formatting context, boxes are laid out horizontally, one
/// after the other, beginning at the top of a containing block."
#[derive(Debug)]
pub struct InlineLayout {
    /// Completed line boxes.
    pub line_boxes: Vec<LineBox>,
    /// Fragments on the line being filled.
    pending: Vec<LineFragment>,
    /// Advance used on the line being filled.
    pen_x: f32,
    /// Top of the line being filled.
    pen_y: f32,
    /// Tallest `line-height` on the line being filled.
    pending_height: f32,
    width: f32,
}

impl InlineLayout {
    /// Start laying out lines `width` wide from `top`.
    #[must_use]
    pub const fn new(width: f32, top: f32) -> Self {
        Self {
            line_boxes: Vec::new(),
            pending: Vec::new(),
            pen_x: 0.0,
            pen_y: top,
            pending_height: 0.0,
            width,
        }
    }

    /// Whether nothing has been placed on the current line yet.
    #[must_use]
    pub fn at_line_start(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether the text placed last on the current line ends in a space.
    #[must_use]
    pub fn ends_with_space(&self) -> bool {
        self.pending.last().is_some_and(|f| f.text.ends_with(' '))
    }

    /// [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Add a text run whose line boxes are `line_height` tall.
    ///
    /// "When an inline box exceeds the width of a line box, it is split into
    /// several boxes and these boxes are distributed across several line boxes."
    ///
    /// The text is expected to have its white space collapsed already.
    pub fn add_text(&mut self, text: &str, font_size: f32, line_height: f32, metrics: &dyn FontMetrics) {
        let mut text = text;
        loop {
            // [§ 4.1.3](https://www.w3.org/TR/css-text-3/#white-space-phase-2)
            // "A sequence of collapsible spaces at the beginning of a line is removed."
            if self.at_line_start() {
                text = text.trim_start();
            }
            if text.is_empty() {
                return;
            }
            if self.pen_x + metrics.text_width(text, font_size) <= self.width {
                self.place(text, font_size, line_height, metrics);
                return;
            }

            // [§ 5.5.2 Word Breaking Rules](https://www.w3.org/TR/css-text-3/#word-breaking)
            let room = self.width - self.pen_x;
            let split = Self::find_break_opportunity(text, room, font_size, metrics).or_else(|| {
                // [§ 3.3 overflow-wrap](https://www.w3.org/TR/css-text-3/#overflow-wrap-property)
                //
                // On a fresh line the first word overflows instead.
                self.at_line_start()
                    .then(|| soft_wrap_opportunities(text).next().unwrap_or(text.len()))
            });

            if let Some(split) = split {
                let (head, tail) = text.split_at(split);
                // "A sequence of collapsible spaces at the end of a line is removed."
                let head = head.trim_end();
                if !head.is_empty() {
                    self.place(head, font_size, line_height, metrics);
                }
                if tail.trim_start().is_empty() {
                    return;
                }
                text = tail;
            }
            self.finish_line();
        }
    }

    fn place(&mut self, text: &str, font_size: f32, line_height: f32, metrics: &dyn FontMetrics) {
        let width = metrics.text_width(text, font_size);
        self.pending.push(LineFragment {
            x: self.pen_x,
            width,
            text: text.to_string(),
            font_size,
        });
        self.pen_x += width;
        self.pending_height = self.pending_height.max(line_height);
    }

    /// [§ 5.1 Line Breaking](https://www.w3.org/TR/css-text-3/#line-breaking)
    ///
    /// "A line break is forced at a preserved newline." `<br>` does the same.
    /// An empty line still takes up `line_height`.
    pub fn force_break(&mut self, line_height: f32) {
        if !self.at_line_start() {
            self.finish_line();
            return;
        }
        self.line_boxes.push(LineBox {
            y: self.pen_y,
            width: 0.0,
            height: line_height,
            fragments: Vec::new(),
        });
        self.pen_y += line_height;
    }

    /// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
    ///
    /// Close the current line box. Empty lines are not kept.
    pub fn finish_line(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let height = std::mem::take(&mut self.pending_height);
        self.line_boxes.push(LineBox {
            y: self.pen_y,
            width: std::mem::take(&mut self.pen_x),
            height,
            fragments: std::mem::take(&mut self.pending),
        });
        self.pen_y += height;
    }

    /// [§ 5.5 Line Breaking and Word Boundaries](https://www.w3.org/TR/css-text-3/#line-breaking)
    ///
    /// The last soft wrap opportunity whose preceding text fits in
    /// `max_width`: the byte index where the next word starts, or the end of
    /// the text when it ends in white space and fits whole.
    #[must_use]
    pub fn find_break_opportunity(
        text: &str,
        max_width: f32,
        font_size: f32,
        metrics: &dyn FontMetrics,
    ) -> Option<usize> {
        let fits = |end: usize| metrics.text_width(&text[..end], font_size) <= max_width;
        let mut best = soft_wrap_opportunities(text).take_while(|&i| fits(i)).last();
        if text.ends_with([' ', '\t']) && fits(text.len()) {
            best = Some(text.len());
        }
        best
    }

    /// Height of the completed line boxes.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.line_boxes.iter().map(|lb| lb.height).sum()
    }
}

/// "A soft wrap opportunity exists at the boundary of whitespace": the byte
/// index of every word that follows a space or tab.
fn soft_wrap_opportunities(text: &str) -> impl Iterator<Item = usize> + '_ {
    let is_space = |c: char| c == ' ' || c == '\t';
    text.char_indices()
        .scan(false, move |after_space, (i, c)| {
            let starts_word = *after_space && !is_space(c);
            *after_space = is_space(c);
            Some(starts_word.then_some(i))
        })
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: ApproximateFontMetrics = ApproximateFontMetrics;

    fn lines(layout: &InlineLayout) -> Vec<String> {
        layout
            .line_boxes
            .iter()
            .map(|lb| lb.fragments.iter().map(|f| f.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_wraps_at_spaces() {
        // 6px per character at font size 10.
        let mut layout = InlineLayout::new(62.0, 0.0);
        layout.add_text("aaaa bbbb cccc", 10.0, 12.0, &METRICS);
        layout.finish_line();

        assert_eq!(lines(&layout), vec!["aaaa bbbb", "cccc"]);
        assert_eq!(layout.total_height(), 24.0);
    }

    #[test]
    fn test_overlong_word_overflows_on_its_own_line() {
        let mut layout = InlineLayout::new(30.0, 0.0);
        layout.add_text("abcdefghij xy", 10.0, 12.0, &METRICS);
        layout.finish_line();

        assert_eq!(lines(&layout), vec!["abcdefghij", "xy"]);
    }

    #[test]
    fn test_consecutive_runs_share_a_line() {
        let mut layout = InlineLayout::new(120.0, 0.0);
        layout.add_text("one ", 10.0, 12.0, &METRICS);
        layout.add_text("two", 10.0, 20.0, &METRICS);
        layout.finish_line();

        assert_eq!(layout.line_boxes.len(), 1);
        assert_eq!(layout.total_height(), 20.0);
    }

    #[test]
    fn test_force_break_on_empty_line_adds_height() {
        let mut layout = InlineLayout::new(100.0, 0.0);
        layout.add_text("a", 10.0, 10.0, &METRICS);
        layout.force_break(10.0);
        layout.force_break(10.0);
        layout.add_text("b", 10.0, 10.0, &METRICS);
        layout.finish_line();

        assert_eq!(lines(&layout), vec!["a", "", "b"]);
        assert_eq!(layout.total_height(), 30.0);
    }

    #[test]
    fn test_break_opportunities() {
        // "ab cd  ef": words start at 3 and 7.
        assert_eq!(soft_wrap_opportunities("ab cd  ef").collect::<Vec<_>>(), vec![3, 7]);
        assert_eq!(
            InlineLayout::find_break_opportunity("ab cd  ef", 30.0, 10.0, &METRICS),
            Some(3)
        );
        assert_eq!(
            InlineLayout::find_break_opportunity("ab cd ", 40.0, 10.0, &METRICS),
            Some(6)
        );
        assert_eq!(InlineLayout::find_break_opportunity("abcdef", 100.0, 10.0, &METRICS), None);
    }

    #[test]
    fn test_leading_space_dropped_at_line_start() {
        let mut layout = InlineLayout::new(100.0, 0.0);
        layout.add_text("   ", 10.0, 10.0, &METRICS);
        layout.finish_line();
        assert!(layout.line_boxes.is_empty());
    }
}
