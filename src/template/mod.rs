//! The template style registry.
//!
//! A template is a named, fixed bundle of typographic parameters applied
//! uniformly across one rendering: one bundle per structural role (title,
//! heading at a given level, paragraph). The catalog is a static read-only
//! table — templates are not user-extensible — and every renderer consumes
//! the same bundles, so a template looks the same in EPUB, PDF, and DOCX.

use serde::Serialize;

/// A built-in visual template. Unknown names fall back to [`Classic`].
///
/// [`Classic`]: Template::Classic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Elegant,
    Scifi,
}

/// Horizontal alignment of a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

impl Alignment {
    pub fn css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        }
    }

    /// The `w:jc` value in WordprocessingML ("both" means justified).
    pub fn docx(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Justify => "both",
        }
    }
}

/// The typeface a template uses, named for each output format.
#[derive(Debug, Clone, Copy)]
pub struct FontSpec {
    /// Family name for DOCX (a font expected on the reader's machine).
    pub family: &'static str,
    /// CSS font stack for EPUB.
    pub css_stack: &'static str,
    /// Standard-14 PDF base font, regular weight.
    pub pdf_regular: &'static str,
    /// Standard-14 PDF base font, bold weight.
    pub pdf_bold: &'static str,
}

/// Style bundle for one structural role.
#[derive(Debug, Clone, Copy)]
pub struct RoleStyle {
    pub size_pt: f32,
    pub align: Alignment,
    pub bold: bool,
    pub small_caps: bool,
    pub all_caps: bool,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
    /// First-line indent (classic/elegant body text).
    pub first_indent_pt: f32,
    /// Whole-block left indent (scifi body text).
    pub left_indent_pt: f32,
}

/// Heading parameters before a level is applied: the rendered size is
/// `base_size_pt - level_step_pt * level`, so subordinate sections shrink.
#[derive(Debug, Clone, Copy)]
struct HeadingStyle {
    base_size_pt: f32,
    level_step_pt: f32,
    align: Alignment,
    small_caps: bool,
    all_caps: bool,
    space_before_pt: f32,
    space_after_pt: f32,
}

/// The full style table for one template.
#[derive(Debug, Clone, Copy)]
pub struct StyleSet {
    pub font: FontSpec,
    pub title: RoleStyle,
    heading: HeadingStyle,
    pub paragraph: RoleStyle,
    /// Body line spacing as a multiple of single spacing.
    pub line_spacing: f32,
}

impl StyleSet {
    /// Style bundle for a heading at `level` (1-3).
    pub fn heading(&self, level: u8) -> RoleStyle {
        let h = self.heading;
        RoleStyle {
            size_pt: h.base_size_pt - h.level_step_pt * f32::from(level),
            align: h.align,
            bold: true,
            small_caps: h.small_caps,
            all_caps: h.all_caps,
            space_before_pt: h.space_before_pt,
            space_after_pt: h.space_after_pt,
            first_indent_pt: 0.0,
            left_indent_pt: 0.0,
        }
    }
}

const fn title_style(size_pt: f32, align: Alignment) -> RoleStyle {
    RoleStyle {
        size_pt,
        align,
        bold: true,
        small_caps: false,
        all_caps: false,
        space_before_pt: 0.0,
        space_after_pt: 30.0,
        first_indent_pt: 0.0,
        left_indent_pt: 0.0,
    }
}

static CLASSIC: StyleSet = StyleSet {
    font: FontSpec {
        family: "Times New Roman",
        css_stack: "\"Times New Roman\", Times, serif",
        pdf_regular: "Times-Roman",
        pdf_bold: "Times-Bold",
    },
    title: title_style(24.0, Alignment::Center),
    heading: HeadingStyle {
        base_size_pt: 18.0,
        level_step_pt: 2.0,
        align: Alignment::Center,
        small_caps: false,
        all_caps: false,
        space_before_pt: 24.0,
        space_after_pt: 12.0,
    },
    paragraph: RoleStyle {
        size_pt: 12.0,
        align: Alignment::Justify,
        bold: false,
        small_caps: false,
        all_caps: false,
        space_before_pt: 0.0,
        space_after_pt: 6.0,
        first_indent_pt: 36.0,
        left_indent_pt: 0.0,
    },
    line_spacing: 1.15,
};

static MODERN: StyleSet = StyleSet {
    font: FontSpec {
        family: "Calibri",
        css_stack: "Calibri, Helvetica, Arial, sans-serif",
        pdf_regular: "Helvetica",
        pdf_bold: "Helvetica-Bold",
    },
    title: title_style(28.0, Alignment::Center),
    heading: HeadingStyle {
        base_size_pt: 16.0,
        level_step_pt: 1.0,
        align: Alignment::Left,
        small_caps: false,
        all_caps: false,
        space_before_pt: 20.0,
        space_after_pt: 10.0,
    },
    paragraph: RoleStyle {
        size_pt: 11.0,
        align: Alignment::Left,
        bold: false,
        small_caps: false,
        all_caps: false,
        space_before_pt: 0.0,
        space_after_pt: 8.0,
        first_indent_pt: 0.0,
        left_indent_pt: 0.0,
    },
    line_spacing: 1.15,
};

static ELEGANT: StyleSet = StyleSet {
    font: FontSpec {
        family: "Georgia",
        css_stack: "Georgia, \"Times New Roman\", serif",
        pdf_regular: "Times-Roman",
        pdf_bold: "Times-Bold",
    },
    title: title_style(26.0, Alignment::Center),
    heading: HeadingStyle {
        base_size_pt: 16.0,
        level_step_pt: 1.0,
        align: Alignment::Center,
        small_caps: true,
        all_caps: false,
        space_before_pt: 30.0,
        space_after_pt: 15.0,
    },
    paragraph: RoleStyle {
        size_pt: 12.0,
        align: Alignment::Justify,
        bold: false,
        small_caps: false,
        all_caps: false,
        space_before_pt: 0.0,
        space_after_pt: 10.0,
        first_indent_pt: 21.6,
        left_indent_pt: 0.0,
    },
    line_spacing: 1.15,
};

static SCIFI: StyleSet = StyleSet {
    font: FontSpec {
        family: "Courier New",
        css_stack: "\"Courier New\", Courier, monospace",
        pdf_regular: "Courier",
        pdf_bold: "Courier-Bold",
    },
    title: title_style(22.0, Alignment::Center),
    heading: HeadingStyle {
        base_size_pt: 14.0,
        level_step_pt: 1.0,
        align: Alignment::Left,
        small_caps: false,
        all_caps: true,
        space_before_pt: 16.0,
        space_after_pt: 8.0,
    },
    paragraph: RoleStyle {
        size_pt: 10.0,
        align: Alignment::Left,
        bold: false,
        small_caps: false,
        all_caps: false,
        space_before_pt: 0.0,
        space_after_pt: 4.0,
        first_indent_pt: 0.0,
        left_indent_pt: 14.4,
    },
    line_spacing: 1.15,
};

/// Catalog entry describing a template to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Classic,
        Template::Modern,
        Template::Elegant,
        Template::Scifi,
    ];

    /// Look up a template by name, case-insensitively. Unknown names fall
    /// back to `Classic`.
    pub fn parse(name: &str) -> Template {
        match name.to_ascii_lowercase().as_str() {
            "modern" => Template::Modern,
            "elegant" => Template::Elegant,
            "scifi" => Template::Scifi,
            _ => Template::Classic,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
            Template::Elegant => "elegant",
            Template::Scifi => "scifi",
        }
    }

    pub fn info(self) -> TemplateInfo {
        match self {
            Template::Classic => TemplateInfo {
                key: "classic",
                name: "Classic",
                description: "Traditional book styling with serif fonts",
            },
            Template::Modern => TemplateInfo {
                key: "modern",
                name: "Modern",
                description: "Clean, contemporary design with sans-serif fonts",
            },
            Template::Elegant => TemplateInfo {
                key: "elegant",
                name: "Elegant",
                description: "Sophisticated typography with elegant spacing",
            },
            Template::Scifi => TemplateInfo {
                key: "scifi",
                name: "Sci-Fi",
                description: "Futuristic styling perfect for science fiction",
            },
        }
    }

    /// The style table for this template.
    pub fn styles(self) -> &'static StyleSet {
        match self {
            Template::Classic => &CLASSIC,
            Template::Modern => &MODERN,
            Template::Elegant => &ELEGANT,
            Template::Scifi => &SCIFI,
        }
    }

    /// Render the style table as the EPUB stylesheet.
    pub fn css(self) -> String {
        let styles = self.styles();
        let mut css = String::new();

        css.push_str(&format!(
            "body {{\n  font-family: {};\n  font-size: {}pt;\n  line-height: {};\n}}\n",
            styles.font.css_stack, styles.paragraph.size_pt, styles.line_spacing
        ));

        css.push_str(&format!(
            "h1.book-title {{\n  font-size: {}pt;\n  text-align: {};\n  font-weight: bold;\n  margin-bottom: {}pt;\n}}\n",
            styles.title.size_pt,
            styles.title.align.css(),
            styles.title.space_after_pt
        ));

        for level in 1..=3u8 {
            let heading = styles.heading(level);
            css.push_str(&format!(
                "h{level}.chapter-heading {{\n  font-size: {}pt;\n  text-align: {};\n  font-weight: bold;\n  margin-top: {}pt;\n  margin-bottom: {}pt;\n",
                heading.size_pt,
                heading.align.css(),
                heading.space_before_pt,
                heading.space_after_pt
            ));
            if heading.small_caps {
                css.push_str("  font-variant: small-caps;\n");
            }
            if heading.all_caps {
                css.push_str("  text-transform: uppercase;\n");
            }
            css.push_str("}\n");
        }

        let p = &styles.paragraph;
        css.push_str(&format!(
            "p.paragraph {{\n  text-align: {};\n  margin-top: 0;\n  margin-bottom: {}pt;\n",
            p.align.css(),
            p.space_after_pt
        ));
        if p.first_indent_pt > 0.0 {
            css.push_str(&format!("  text-indent: {}pt;\n", p.first_indent_pt));
        }
        if p.left_indent_pt > 0.0 {
            css.push_str(&format!("  margin-left: {}pt;\n", p.left_indent_pt));
        }
        css.push_str("}\n");

        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_falls_back_to_classic() {
        assert_eq!(Template::parse("classic"), Template::Classic);
        assert_eq!(Template::parse("SCIFI"), Template::Scifi);
        assert_eq!(Template::parse("gothic"), Template::Classic);
        assert_eq!(Template::parse(""), Template::Classic);
    }

    #[test]
    fn test_heading_sizes_shrink_with_level() {
        for template in Template::ALL {
            let styles = template.styles();
            assert!(styles.heading(1).size_pt > styles.heading(2).size_pt);
            assert!(styles.heading(2).size_pt > styles.heading(3).size_pt);
        }
    }

    #[test]
    fn test_css_mentions_each_role() {
        for template in Template::ALL {
            let css = template.css();
            assert!(css.contains("body {"), "{}: missing body", template.key());
            assert!(css.contains("h1.chapter-heading"));
            assert!(css.contains("p.paragraph"));
            assert!(css.contains(template.styles().font.css_stack));
        }
    }

    #[test]
    fn test_catalog_is_complete() {
        let keys: Vec<_> = Template::ALL.iter().map(|t| t.info().key).collect();
        assert_eq!(keys, vec!["classic", "modern", "elegant", "scifi"]);
    }
}
